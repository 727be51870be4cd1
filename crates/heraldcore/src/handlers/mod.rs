//! Single-shot handlers and helpers shared with the wizards

pub mod cancel;
pub mod errors;
pub mod help;
pub mod history;
pub mod panel;
pub mod send;
pub mod start;
pub mod types;
pub mod user_logs;

pub use types::HandlerDeps;

use crate::error::AppResult;
use crate::event::Event;
use crate::logging::INTERACTION_TARGET;
use crate::messenger::{ChatTarget, Keyboard};

/// Edits the message a callback came from, or sends a new message for
/// message events.
pub async fn reply_or_edit(deps: &HandlerDeps, event: &Event, text: &str, keyboard: Option<&Keyboard>) -> AppResult<()> {
    match event.callback_message_id() {
        Some(message_id) => {
            deps.messenger
                .edit_text(event.chat_id, message_id, text, keyboard)
                .await?
        }
        None => {
            deps.messenger
                .send_text(&ChatTarget::Id(event.chat_id), text, keyboard)
                .await?;
        }
    }
    Ok(())
}

/// Sends to the chat the event came from.
pub async fn reply(deps: &HandlerDeps, event: &Event, text: &str, keyboard: Option<&Keyboard>) -> AppResult<i32> {
    Ok(deps
        .messenger
        .send_text(&ChatTarget::Id(event.chat_id), text, keyboard)
        .await?)
}

pub(crate) fn log_interaction(event: &Event, action: &str) {
    log::info!(
        target: INTERACTION_TARGET,
        "user {} (@{}) {}",
        event.user_id(),
        event.sender.username.as_deref().unwrap_or("-"),
        action
    );
}
