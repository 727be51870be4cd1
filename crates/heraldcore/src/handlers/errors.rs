//! Error escalation for admin handlers and wizard steps.

use crate::error::{AppError, AppResult};
use crate::event::Event;
use crate::handlers::HandlerDeps;
use crate::i18n::admin_t_with;
use crate::messenger::ChatTarget;

/// Notice shown to the acting chat for a failed handler.
pub fn error_notice(err: &AppError) -> String {
    let key = if err.is_rejection() {
        "error-platform"
    } else {
        "error-generic"
    };
    admin_t_with(key, "error", err.to_string())
}

/// Tells the acting chat what went wrong. Failures to deliver are only logged.
pub async fn report_error(deps: &HandlerDeps, event: &Event, err: &AppError) {
    let notice = error_notice(err);
    if let Err(e) = deps
        .messenger
        .send_text(&ChatTarget::Id(event.chat_id), &notice, None)
        .await
    {
        log::error!("Failed to report error to chat {}: {}", event.chat_id, e);
    }
}

/// Runs the reporting path for a single-shot handler result.
pub async fn report_on_failure(deps: &HandlerDeps, event: &Event, result: AppResult<()>) {
    if let Err(e) = result {
        log::error!("Handler failed for user {}: {}", event.user_id(), e);
        report_error(deps, event, &e).await;
    }
}
