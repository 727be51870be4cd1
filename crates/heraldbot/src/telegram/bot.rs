//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation

use heraldcore::config::REQUEST_TIMEOUT;
use heraldcore::Settings;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the main menu")]
    Start,
    #[command(description = "show help")]
    Help,
    #[command(description = "relay the replied message to one user (admins only)")]
    Send,
    #[command(description = "overwrite a category with the replied user list (admins only)")]
    SetCategory,
    #[command(description = "add the replied user list to a category (admins only)")]
    AddToCategory,
    #[command(description = "remove the replied user list from a category (admins only)")]
    RemoveFromCategory,
    #[command(description = "send the replied message to a whole category (admins only)")]
    BulkSend,
    #[command(description = "cancel the operation in progress")]
    Cancel,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (invalid URL, HTTP client setup)
pub fn create_bot(settings: &Settings) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(REQUEST_TIMEOUT).build()?;
    let bot = Bot::with_client(settings.token.expose_secret(), client);

    match &settings.bot_api_url {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
