use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{reply_or_edit, HandlerDeps};
use crate::i18n::{admin_t, t};
use crate::keyboards;

/// Confirms a cancellation: admin wording and menu for admins, the localized
/// notice for everyone else. Sends for messages, edits for callbacks.
pub async fn cancel_operation(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    let (text, keyboard) = if deps.is_admin(event.user_id()) {
        (admin_t("admin-operation-canceled"), keyboards::admin_return_to_main_menu())
    } else {
        (
            t(deps.locale(), "operation-canceled"),
            keyboards::return_to_main_menu(deps.locale()),
        )
    };
    reply_or_edit(deps, event, &text, Some(&keyboard)).await
}
