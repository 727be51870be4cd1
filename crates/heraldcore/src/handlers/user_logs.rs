use std::io::ErrorKind;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{reply, reply_or_edit, HandlerDeps};
use crate::i18n::admin_t;
use crate::keyboards;

/// `SEND_USER_LOGS` button: sends the locale's user panel error log.
pub async fn send_user_logs(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    if !deps.is_admin(event.user_id()) {
        return Ok(());
    }

    let keyboard = keyboards::admin_return_to_main_menu();
    let path = deps.settings.user_panel_log_path();
    let bytes = match fs_err::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return reply_or_edit(deps, event, &admin_t("send-user-logs-no-file"), Some(&keyboard)).await;
        }
        Err(e) => return Err(e.into()),
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "user_panel_errors.log".to_string());
    deps.messenger.send_document(event.chat_id, &file_name, bytes).await?;
    reply(deps, event, &admin_t("send-user-logs-success"), Some(&keyboard)).await?;
    Ok(())
}
