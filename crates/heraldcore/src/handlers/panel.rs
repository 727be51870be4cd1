//! User panel pages: copies of channel posts, shown on menu button presses.
//! Sample signals work the same way from their own channel.

use crate::error::{AppError, AppResult, PlatformError};
use crate::event::Event;
use crate::handlers::{log_interaction, HandlerDeps};
use crate::i18n::t;
use crate::keyboards;
use crate::logging::USER_PANEL_TARGET;
use crate::messenger::{ChatTarget, MessageRef};
use crate::storage::PageSource;

/// True when the callback names a configured panel page.
pub fn is_page(deps: &HandlerDeps, event: &Event) -> bool {
    event
        .callback_data()
        .is_some_and(|data| deps.panel.page(data).is_some())
}

/// True when the callback is `<TYPE>:<id>` for a configured signal type.
pub fn is_sample_signal(deps: &HandlerDeps, event: &Event) -> bool {
    event
        .callback_data()
        .and_then(keyboards::parse_sample_signal_callback)
        .is_some_and(|(signal_type, _)| deps.panel.signal_type(signal_type).is_some())
}

/// Shows a panel page. Failures go to the user panel error log only.
pub async fn show_page(deps: &HandlerDeps, event: &Event) {
    if let Err(e) = try_show_page(deps, event).await {
        log::error!(
            target: USER_PANEL_TARGET,
            "User panel error occurred in show_page for user {}: {}",
            event.user_id(),
            e
        );
    }
}

async fn try_show_page(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    let Some((key, page)) = event
        .callback_data()
        .and_then(|data| deps.panel.page(data).map(|page| (data, page)))
    else {
        return Ok(());
    };
    log_interaction(event, &format!("opened {key}"));

    let channel_id = deps
        .settings
        .panel_channel_id
        .ok_or_else(|| AppError::Config("USER_PANEL_MESSAGE_CHANNEL_ID is not set".to_string()))?;
    let keyboard = match (&page.keyboard, deps.panel.signal_list(key)) {
        (Some(keyboard), _) => keyboard.clone(),
        (None, Some((signal_type, kind))) => keyboards::sample_signal_list(deps.locale(), signal_type, &kind.signals),
        (None, None) => keyboards::return_to_main_menu(deps.locale()),
    };
    let to = ChatTarget::Id(event.chat_id);

    match page.message {
        PageSource::Single(message_id) => {
            let source = MessageRef {
                chat_id: channel_id,
                message_id,
            };
            deps.messenger.copy_message(&to, source, Some(&keyboard)).await?;
        }
        PageSource::Album { first_id, .. } => {
            let ids = page.message.message_ids();
            match deps.messenger.copy_messages(event.chat_id, channel_id, &ids).await {
                Ok(_) => {
                    let text = t(deps.locale(), "panel-choose-option");
                    deps.messenger.send_text(&to, &text, Some(&keyboard)).await?;
                }
                // A text-only post after a photo album is rejected as a group; send it alone.
                Err(PlatformError::Rejected(reason)) => {
                    log::warn!("Album copy of {} rejected ({}), copying first message", key, reason);
                    let source = MessageRef {
                        chat_id: channel_id,
                        message_id: first_id,
                    };
                    deps.messenger.copy_message(&to, source, Some(&keyboard)).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    if let Some(message_id) = event.callback_message_id() {
        deps.messenger.delete_message(event.chat_id, message_id).await?;
    }
    Ok(())
}

/// Copies one sample signal post. Failures go to the user panel error log only.
pub async fn show_sample_signal(deps: &HandlerDeps, event: &Event) {
    if let Err(e) = try_show_sample_signal(deps, event).await {
        log::error!(
            target: USER_PANEL_TARGET,
            "User panel error occurred in show_sample_signal for user {}: {}",
            event.user_id(),
            e
        );
    }
}

async fn try_show_sample_signal(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    let Some((signal_type, message_id)) = event.callback_data().and_then(keyboards::parse_sample_signal_callback) else {
        return Ok(());
    };
    let Some(kind) = deps.panel.signal_type(signal_type) else {
        return Ok(());
    };
    log_interaction(event, &format!("opened sample signal {signal_type}:{message_id}"));

    let channel_id = deps
        .settings
        .sample_signals_channel_id
        .ok_or_else(|| AppError::Config("SAMPLE_SIGNALS_CHANNEL_ID is not set".to_string()))?;
    let keyboard = kind
        .keyboard
        .clone()
        .unwrap_or_else(|| keyboards::sample_signal_back(deps.locale(), signal_type));
    let source = MessageRef {
        chat_id: channel_id,
        message_id,
    };
    deps.messenger
        .copy_message(&ChatTarget::Id(event.chat_id), source, Some(&keyboard))
        .await?;

    if let Some(message_id) = event.callback_message_id() {
        deps.messenger.delete_message(event.chat_id, message_id).await?;
    }
    Ok(())
}
