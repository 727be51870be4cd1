//! teloxide implementation of the core [`Messenger`] seam

use async_trait::async_trait;
use heraldcore::{ButtonAction, ChatTarget, Keyboard, MessageRef, Messenger, PlatformError};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, MessageId, Recipient, ReplyMarkup};
use teloxide::{ApiError, RequestError};

pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

pub fn recipient(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::Id(id) => Recipient::Id(ChatId(*id)),
        ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

/// Converts a core keyboard. Buttons with an unparseable URL are dropped.
pub fn inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    let rows = keyboard.rows.iter().map(|row| {
        row.iter()
            .filter_map(|button| match &button.action {
                ButtonAction::Callback(data) => Some(InlineKeyboardButton::callback(button.text.clone(), data.clone())),
                ButtonAction::Url(raw) => match url::Url::parse(raw) {
                    Ok(url) => Some(InlineKeyboardButton::url(button.text.clone(), url)),
                    Err(e) => {
                        log::warn!("Skipping button {:?} with invalid URL {}: {}", button.text, raw, e);
                        None
                    }
                },
            })
            .collect::<Vec<_>>()
    });
    InlineKeyboardMarkup::new(rows)
}

/// Telegram refusals become `Rejected`, transport failures `Network`.
pub fn platform_error(err: RequestError) -> PlatformError {
    match err {
        RequestError::Api(api) => PlatformError::Rejected(api.to_string()),
        RequestError::Network(e) => PlatformError::Network(e.to_string()),
        other => PlatformError::Other(other.to_string()),
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, to: &ChatTarget, text: &str, keyboard: Option<&Keyboard>) -> Result<i32, PlatformError> {
        let mut request = self.bot.send_message(recipient(to), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(inline_markup(keyboard));
        }
        let message = request.await.map_err(platform_error)?;
        Ok(message.id.0)
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PlatformError> {
        let mut request = self.bot.edit_message_text(ChatId(chat_id), MessageId(message_id), text);
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(inline_markup(keyboard));
        }
        match request.await {
            Ok(_) => Ok(()),
            // Pressing the same button twice re-renders identical content.
            Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => Err(platform_error(e)),
        }
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(platform_error)?;
        Ok(())
    }

    async fn copy_message(
        &self,
        to: &ChatTarget,
        from: MessageRef,
        keyboard: Option<&Keyboard>,
    ) -> Result<i32, PlatformError> {
        let mut request = self
            .bot
            .copy_message(recipient(to), ChatId(from.chat_id), MessageId(from.message_id));
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(ReplyMarkup::InlineKeyboard(inline_markup(keyboard)));
        }
        let id = request.await.map_err(platform_error)?;
        Ok(id.0)
    }

    async fn copy_messages(&self, to: i64, from_chat_id: i64, message_ids: &[i32]) -> Result<Vec<i32>, PlatformError> {
        let ids = self
            .bot
            .copy_messages(
                ChatId(to),
                ChatId(from_chat_id),
                message_ids.iter().copied().map(MessageId),
            )
            .await
            .map_err(platform_error)?;
        Ok(ids.into_iter().map(|id| id.0).collect())
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<(), PlatformError> {
        let file = InputFile::memory(bytes).file_name(file_name.to_string());
        self.bot
            .send_document(ChatId(chat_id), file)
            .await
            .map_err(platform_error)?;
        Ok(())
    }
}
