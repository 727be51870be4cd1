//! Bulk dispatch: relay one stored message to every member of a category.

use fluent_templates::fluent_bundle::FluentArgs;

use crate::i18n::admin_t_args;
use crate::messenger::{ChatTarget, MessageRef, Messenger};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: Vec<String>,
}

/// Copies `message` to each recipient in order.
///
/// A failed recipient gets one error notice in `admin_chat_id` and the batch
/// moves on. No retries and no pacing between sends.
pub async fn bulk_send(
    messenger: &dyn Messenger,
    admin_chat_id: i64,
    message: MessageRef,
    recipients: &[String],
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for user_id in recipients {
        report.attempted += 1;
        match messenger.copy_message(&ChatTarget::parse(user_id), message, None).await {
            Ok(_) => report.delivered += 1,
            Err(e) => {
                log::warn!("Bulk send to {} failed: {}", user_id, e);
                report.failed.push(user_id.clone());

                let mut args = FluentArgs::new();
                args.set("user_id", user_id.clone());
                args.set("error", e.to_string());
                let notice = admin_t_args("bulk-send-error-user", &args);
                if let Err(e) = messenger.send_text(&ChatTarget::Id(admin_chat_id), &notice, None).await {
                    log::error!("Failed to report bulk send failure to admin {}: {}", admin_chat_id, e);
                }
            }
        }
    }

    log::info!(
        "Bulk send finished: {}/{} delivered",
        report.delivered,
        report.attempted
    );
    report
}
