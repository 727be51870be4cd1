use fluent_templates::fluent_bundle::FluentArgs;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{log_interaction, reply, reply_or_edit, HandlerDeps};
use crate::i18n::{admin_t, admin_t_with, t, t_args};
use crate::keyboards;
use crate::messenger::ChatTarget;
use crate::storage::{CategoryId, CategoryRef, HistoryEntry};

fn history_entry(event: &Event) -> HistoryEntry {
    HistoryEntry {
        user_id: event.user_id().to_string(),
        first_name: event.sender.first_name.clone(),
        last_name: event.sender.last_name.clone().unwrap_or_default(),
        language: event.sender.language_code.clone(),
        username: event.sender.username.clone().unwrap_or_default(),
        start_time: event.date,
    }
}

/// `/start` and the `RETURN_TO_MAIN_MENU` button.
///
/// Admins get the admin panel. A user's first `/start` is recorded in the
/// history and, unless they already hold a real category, enrolls them in
/// the default one.
pub async fn start(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    if deps.is_admin(event.user_id()) {
        let keyboard = keyboards::admin_main_menu();
        let text = if event.is_callback() {
            admin_t("admin-welcome-back")
        } else {
            admin_t_with("admin-welcome", "name", event.sender.first_name.clone())
        };
        return reply_or_edit(deps, event, &text, Some(&keyboard)).await;
    }

    let locale = deps.locale();
    let user_id = event.user_id().to_string();
    let labels = deps.categories.categories_for_user(&user_id)?;
    let menu = deps.panel.menu_for(&labels).clone();

    if !event.is_callback() {
        log_interaction(event, "started the bot");
        deps.history.register(history_entry(event))?;
        if !deps.categories.is_user_in_any_non_default_category(&user_id)? {
            deps.categories
                .add_user(&user_id, CategoryRef::Id(CategoryId::default_category()))?;
        }

        let mut args = FluentArgs::new();
        args.set("name", event.sender.first_name.clone());
        reply(deps, event, &t_args(locale, "user-welcome", &args), Some(&menu)).await?;
        return Ok(());
    }

    let text = t(locale, "user-welcome-back");
    let Some(message_id) = event.callback_message_id() else {
        reply(deps, event, &text, Some(&menu)).await?;
        return Ok(());
    };

    // Media pages cannot be edited into text; replace them instead.
    if let Err(e) = deps
        .messenger
        .edit_text(event.chat_id, message_id, &text, Some(&menu))
        .await
    {
        log::debug!("Menu edit failed for {}, resending: {}", event.user_id(), e);
        deps.messenger
            .send_text(&ChatTarget::Id(event.chat_id), &text, Some(&menu))
            .await?;
        deps.messenger.delete_message(event.chat_id, message_id).await?;
    }
    Ok(())
}
