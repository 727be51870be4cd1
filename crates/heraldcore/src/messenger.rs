//! Outbound side of the platform seam.
//!
//! Core handlers talk to the chat platform only through [`Messenger`]. The bot
//! crate implements it on top of `teloxide::Bot`; tests use a recording fake.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Where a message goes: a numeric chat id or a public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    /// Numeric input becomes a chat id; anything else is taken as a username.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => ChatTarget::Id(id),
            Err(_) if raw.starts_with('@') => ChatTarget::Username(raw.to_string()),
            Err(_) => ChatTarget::Username(format!("@{raw}")),
        }
    }
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        ChatTarget::Id(id)
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Username(name) => f.write_str(name),
        }
    }
}

/// A message already sent somewhere, addressed for relaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    #[serde(rename = "callback")]
    Callback(String),
    #[serde(rename = "url")]
    Url(String),
}

/// Inline keyboard button. In data files: `{"text": "...", "callback": "..."}`
/// or `{"text": "...", "url": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    #[serde(flatten)]
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Callback(data.into()),
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Inline keyboard, row by row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// One button per row.
    pub fn column(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }

    pub fn push_row(mut self, row: Vec<Button>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn callback_data(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().filter_map(|b| match &b.action {
            ButtonAction::Callback(data) => Some(data.as_str()),
            ButtonAction::Url(_) => None,
        })
    }
}

/// Outbound operations the handlers need from the platform.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a text message and returns its id.
    async fn send_text(&self, to: &ChatTarget, text: &str, keyboard: Option<&Keyboard>) -> Result<i32, PlatformError>;

    async fn edit_text(
        &self,
        chat_id: i64,
        message_id: i32,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<(), PlatformError>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), PlatformError>;

    /// Relays a message without the "forwarded from" header.
    async fn copy_message(
        &self,
        to: &ChatTarget,
        from: MessageRef,
        keyboard: Option<&Keyboard>,
    ) -> Result<i32, PlatformError>;

    /// Relays several messages of one chat at once, keeping albums grouped.
    async fn copy_messages(&self, to: i64, from_chat_id: i64, message_ids: &[i32]) -> Result<Vec<i32>, PlatformError>;

    async fn send_document(&self, chat_id: i64, file_name: &str, bytes: Vec<u8>) -> Result<(), PlatformError>;
}
