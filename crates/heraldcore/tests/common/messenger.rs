//! Messenger that records every outbound call instead of talking to Telegram

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use heraldcore::{ChatTarget, Keyboard, MessageRef, Messenger, PlatformError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SendText {
        to: ChatTarget,
        text: String,
        keyboard: Option<Keyboard>,
    },
    EditText {
        chat_id: i64,
        message_id: i32,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Delete {
        chat_id: i64,
        message_id: i32,
    },
    Copy {
        to: ChatTarget,
        from: MessageRef,
        keyboard: Option<Keyboard>,
    },
    CopyMany {
        to: i64,
        from_chat_id: i64,
        message_ids: Vec<i32>,
    },
    Document {
        chat_id: i64,
        file_name: String,
        bytes: Vec<u8>,
    },
}

impl Call {
    /// Text of a sent or edited message.
    pub fn text(&self) -> Option<&str> {
        match self {
            Call::SendText { text, .. } | Call::EditText { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Records calls in order. Recipients marked as blocked reject sends and
/// copies the way Telegram does for users who blocked the bot.
#[derive(Default)]
pub struct RecordingMessenger {
    calls: Mutex<Vec<Call>>,
    blocked: Mutex<HashSet<ChatTarget>>,
    reject_albums: AtomicBool,
    next_message_id: AtomicI32,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self {
            next_message_id: AtomicI32::new(1000),
            ..Default::default()
        }
    }

    pub fn block(&self, target: ChatTarget) {
        self.blocked.lock().unwrap().insert(target);
    }

    pub fn reject_albums(&self) {
        self.reject_albums.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Texts of every sent or edited message, in order.
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .iter()
            .filter_map(|c| c.text().map(str::to_string))
            .collect()
    }

    pub fn last_text(&self) -> Option<String> {
        self.texts().pop()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, to: &ChatTarget) -> Result<(), PlatformError> {
        if self.blocked.lock().unwrap().contains(to) {
            return Err(PlatformError::Rejected("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(())
    }

    fn next_id(&self) -> i32 {
        self.next_message_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, to: &ChatTarget, text: &str, keyboard: Option<&Keyboard>) -> Result<i32, PlatformError> {
        self.check(to)?;
        self.record(Call::SendText {
            to: to.clone(),
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(self.next_id())
    }

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PlatformError> {
        self.record(Call::EditText {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError> {
        self.record(Call::Delete { chat_id, message_id });
        Ok(())
    }

    async fn copy_message(
        &self,
        to: &ChatTarget,
        from: MessageRef,
        keyboard: Option<&Keyboard>,
    ) -> Result<i32, PlatformError> {
        // Failed attempts are recorded too so dispatch order can be checked.
        self.record(Call::Copy {
            to: to.clone(),
            from,
            keyboard: keyboard.cloned(),
        });
        self.check(to)?;
        Ok(self.next_id())
    }

    async fn copy_messages(&self, to: i64, from_chat_id: i64, message_ids: &[i32]) -> Result<Vec<i32>, PlatformError> {
        self.record(Call::CopyMany {
            to,
            from_chat_id,
            message_ids: message_ids.to_vec(),
        });
        if self.reject_albums.load(Ordering::SeqCst) {
            return Err(PlatformError::Rejected("Bad Request: message can't be copied".to_string()));
        }
        Ok(message_ids.iter().map(|_| self.next_id()).collect())
    }

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<(), PlatformError> {
        self.record(Call::Document {
            chat_id,
            file_name: file_name.to_string(),
            bytes,
        });
        Ok(())
    }
}
