use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{reply_or_edit, HandlerDeps};
use crate::i18n::{admin_t, t};
use crate::keyboards;

/// `/help` and the `SHOW_HELP` button.
pub async fn show_help(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    if deps.is_admin(event.user_id()) {
        let keyboard = keyboards::admin_return_to_main_menu();
        return reply_or_edit(deps, event, &admin_t("admin-help"), Some(&keyboard)).await;
    }
    let keyboard = keyboards::return_to_main_menu(deps.locale());
    reply_or_edit(deps, event, &t(deps.locale(), "user-help"), Some(&keyboard)).await
}
