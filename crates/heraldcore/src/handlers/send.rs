use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{reply, HandlerDeps};
use crate::i18n::{admin_t, admin_t_with};
use crate::messenger::{ChatTarget, MessageRef};

/// `/send [target]`: relay the replied-to message to one user, or send them a
/// test message. Without a target the sender receives it.
pub async fn send_message(deps: &HandlerDeps, event: &Event) -> AppResult<()> {
    if !deps.is_admin(event.user_id()) {
        return Ok(());
    }

    let target_arg = event
        .command()
        .and_then(|c| c.args.split_whitespace().next())
        .map(str::to_string);

    let target = match target_arg {
        Some(raw) => ChatTarget::parse(&raw),
        None => {
            reply(deps, event, &admin_t("send-no-target"), None).await?;
            ChatTarget::Id(event.user_id())
        }
    };
    let target_text = target.to_string();

    match event.reply_to() {
        Some(replied) => {
            reply(deps, event, &admin_t_with("send-forwarding", "target", target_text.clone()), None).await?;
            let source = MessageRef {
                chat_id: event.chat_id,
                message_id: replied.message_id,
            };
            deps.messenger.copy_message(&target, source, None).await?;
        }
        None => {
            reply(deps, event, &admin_t_with("send-sending", "target", target_text.clone()), None).await?;
            let text = admin_t_with("send-test-message", "target", target_text);
            deps.messenger.send_text(&target, &text, None).await?;
        }
    }

    log::info!("Admin {} sent a message to {}", event.user_id(), target);
    Ok(())
}
