use crate::error::AppResult;
use crate::event::Event;
use crate::export::history_csv;
use crate::handlers::{reply, HandlerDeps};
use crate::i18n::{admin_t, admin_t_with};
use crate::keyboards;

pub const EXPORT_FILE_NAME: &str = "user_history.csv";

/// `EXPORT_HISTORY` button: sends the locale's start history as CSV.
pub async fn export_history(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    if !deps.is_admin(event.user_id()) {
        return Ok(());
    }

    let keyboard = keyboards::admin_return_to_main_menu();
    let csv = match build_csv(deps) {
        Ok(csv) => csv,
        Err(e) => {
            log::error!("History export failed: {}", e);
            let text = admin_t_with("export-history-error", "error", e.to_string());
            reply(deps, event, &text, Some(&keyboard)).await?;
            return Ok(());
        }
    };

    deps.messenger
        .send_document(event.chat_id, EXPORT_FILE_NAME, csv)
        .await?;
    reply(deps, event, &admin_t("export-history-success"), Some(&keyboard)).await?;
    Ok(())
}

fn build_csv(deps: &HandlerDeps) -> AppResult<Vec<u8>> {
    let entries = deps.history.entries()?;
    let labels = deps.categories.labels_by_user()?;
    log::info!("Exporting {} history entries", entries.len());
    history_csv(&entries, &labels)
}
