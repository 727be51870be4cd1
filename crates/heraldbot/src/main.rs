use std::sync::Arc;

use anyhow::Result;
use herald::cli::{Cli, Commands};
use herald::telegram::{create_bot, schema, setup_bot_commands, TelegramMessenger};
use heraldcore::logging::init_logger;
use heraldcore::{HandlerDeps, Router, Settings};
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

/// Main entry point for the Telegram bot
///
/// # Errors
/// Returns an error if initialization fails (settings, logging, data files, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from handler tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    // Secrets first so they win over the shared .env
    let _ = dotenvy::from_filename(".env.secret");
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env(cli.locale, cli.data_dir, cli.log_dir)?;
    init_logger(&settings)?;

    match cli.command {
        Some(Commands::Run) | None => {
            log::info!("Running bot for locale {}", settings.locale);
            run_bot(settings).await
        }
    }
}

/// Loads the data files and runs the dispatcher until Ctrl+C.
async fn run_bot(settings: Settings) -> Result<()> {
    let settings = Arc::new(settings);
    let bot = create_bot(&settings)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let deps = HandlerDeps::load(settings.clone(), messenger)?;
    log::info!(
        "Data directory {}, panel channel {:?}, sample signals channel {:?}",
        settings.data_dir.display(),
        settings.panel_channel_id,
        settings.sample_signals_channel_id
    );

    let handler = schema(deps, Arc::new(Router::new()));
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
