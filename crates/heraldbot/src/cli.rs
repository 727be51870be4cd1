use std::path::PathBuf;

use clap::{Parser, Subcommand};
use heraldcore::Locale;

#[derive(Parser)]
#[command(name = "herald")]
#[command(author, version, about = "Telegram bot for category-targeted broadcasts and a menu-driven user panel", long_about = None)]
pub struct Cli {
    /// Locale partition this instance serves (EN or TR)
    #[arg(long, global = true, default_value_t = Locale::En)]
    pub locale: Locale,

    /// Directory holding the JSON data files
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for the application and user panel logs
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling
    Run,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
