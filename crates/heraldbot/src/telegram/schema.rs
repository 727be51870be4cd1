//! Dispatcher schema: converts teloxide updates into core events and hands
//! them to the router.

use std::sync::Arc;

use heraldcore::event::{ReplyRef, Sender};
use heraldcore::{Event, HandlerDeps, Router};
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Message, User};

use super::types::HandlerError;

/// Creates the dispatcher schema for the bot.
///
/// Every message and callback query goes through the same [`Router`]; the
/// core decides what, if anything, handles it.
pub fn schema(deps: HandlerDeps, router: Arc<Router>) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(message_handler(deps.clone(), router.clone()))
        .branch(callback_handler(deps, router))
}

fn message_handler(deps: HandlerDeps, router: Arc<Router>) -> UpdateHandler<HandlerError> {
    Update::filter_message().endpoint(move |msg: Message| {
        let deps = deps.clone();
        let router = router.clone();
        async move {
            if let Some(event) = message_event(&msg) {
                router.handle(&deps, &event).await;
            }
            Ok::<(), HandlerError>(())
        }
    })
}

fn callback_handler(deps: HandlerDeps, router: Arc<Router>) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        let router = router.clone();
        async move {
            // Stop the button spinner before doing the work.
            if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
                log::warn!("Failed to answer callback query from {}: {}", q.from.id, e);
            }
            if let Some(event) = callback_event(&q) {
                router.handle(&deps, &event).await;
            }
            Ok::<(), HandlerError>(())
        }
    })
}

pub fn sender(user: &User) -> Sender {
    Sender {
        id: user.id.0 as i64,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
        language_code: user.language_code.clone(),
    }
}

/// Messages without a sender (channel posts) are ignored.
pub fn message_event(msg: &Message) -> Option<Event> {
    let user = msg.from.as_ref()?;
    let event = Event::message(sender(user), msg.chat.id.0, msg.id.0, msg.text().map(str::to_string)).with_date(msg.date);

    Some(match msg.reply_to_message() {
        Some(replied) => event.with_reply(ReplyRef {
            message_id: replied.id.0,
            text: replied.text().map(str::to_string),
        }),
        None => event,
    })
}

/// Callback queries without data (game buttons) are ignored.
pub fn callback_event(q: &CallbackQuery) -> Option<Event> {
    let data = q.data.clone()?;
    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat().id.0)
        .unwrap_or(q.from.id.0 as i64);
    let message_id = q.message.as_ref().map(|m| m.id().0);
    Some(Event::callback(sender(&q.from), chat_id, data, message_id))
}
