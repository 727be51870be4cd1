//! Logging initialization
//!
//! Three sinks share one `CombinedLogger`:
//! - the terminal
//! - `herald.log` in the log directory
//! - `user_panel_errors_<LOCALE>.log`, which only receives errors logged
//!   with target [`USER_PANEL_TARGET`]. Admins can download and clear it
//!   from the admin panel.

use std::path::Path;

use anyhow::Result;
use fs_err::OpenOptions;
use simplelog::*;

use crate::config::Settings;

/// Log target for user panel failures routed to the per-locale error log.
pub const USER_PANEL_TARGET: &str = "user_panel";

/// Log target for user interaction traces.
pub const INTERACTION_TARGET: &str = "user_interaction";

fn open_append(path: &Path) -> Result<fs_err::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open log file: {}", e))
}

/// Initialize logger for console, the application log and the user panel error log
pub fn init_logger(settings: &Settings) -> Result<()> {
    fs_err::create_dir_all(&settings.log_dir)?;

    let app_log = open_append(&settings.app_log_path())?;
    let panel_log = open_append(&settings.user_panel_log_path())?;

    let panel_config = ConfigBuilder::new().add_filter_allow_str(USER_PANEL_TARGET).build();

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), app_log),
        WriteLogger::new(LevelFilter::Error, panel_config, panel_log),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}
