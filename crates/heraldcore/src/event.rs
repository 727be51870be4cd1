//! Inbound side of the platform seam: a platform-neutral view of one update.

use chrono::{DateTime, Utc};

use crate::messenger::MessageRef;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

impl Sender {
    pub fn new(id: i64, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            username: None,
            language_code: None,
        }
    }
}

/// The message a command was sent in reply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRef {
    pub message_id: i32,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Message {
        message_id: i32,
        text: Option<String>,
        reply_to: Option<ReplyRef>,
    },
    Callback {
        data: String,
        /// Message carrying the pressed keyboard, absent for inline-mode messages
        message_id: Option<i32>,
    },
}

/// Slash command split into name and argument string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandText<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub sender: Sender,
    pub chat_id: i64,
    pub date: DateTime<Utc>,
    pub payload: Payload,
}

impl Event {
    pub fn message(sender: Sender, chat_id: i64, message_id: i32, text: Option<String>) -> Self {
        Self {
            sender,
            chat_id,
            date: Utc::now(),
            payload: Payload::Message {
                message_id,
                text,
                reply_to: None,
            },
        }
    }

    pub fn callback(sender: Sender, chat_id: i64, data: impl Into<String>, message_id: Option<i32>) -> Self {
        Self {
            sender,
            chat_id,
            date: Utc::now(),
            payload: Payload::Callback {
                data: data.into(),
                message_id,
            },
        }
    }

    /// Attaches a replied-to message. No effect on callback events.
    pub fn with_reply(mut self, reply: ReplyRef) -> Self {
        if let Payload::Message { reply_to, .. } = &mut self.payload {
            *reply_to = Some(reply);
        }
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn user_id(&self) -> i64 {
        self.sender.id
    }

    pub fn is_callback(&self) -> bool {
        matches!(self.payload, Payload::Callback { .. })
    }

    fn raw_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Message { text, .. } => text.as_deref(),
            Payload::Callback { .. } => None,
        }
    }

    /// Parses `/name@bot args` into its parts.
    pub fn command(&self) -> Option<CommandText<'_>> {
        let text = self.raw_text()?.trim_start();
        let body = text.strip_prefix('/')?;
        let (head, args) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
        let name = head.split('@').next().unwrap_or(head);
        if name.is_empty() {
            return None;
        }
        Some(CommandText { name, args: args.trim() })
    }

    pub fn is_command(&self) -> bool {
        self.command().is_some()
    }

    /// Text of a plain (non-command) message.
    pub fn text(&self) -> Option<&str> {
        if self.is_command() {
            return None;
        }
        self.raw_text()
    }

    pub fn callback_data(&self) -> Option<&str> {
        match &self.payload {
            Payload::Callback { data, .. } => Some(data.as_str()),
            Payload::Message { .. } => None,
        }
    }

    pub fn reply_to(&self) -> Option<&ReplyRef> {
        match &self.payload {
            Payload::Message { reply_to, .. } => reply_to.as_ref(),
            Payload::Callback { .. } => None,
        }
    }

    /// The incoming message itself, for relaying.
    pub fn message_ref(&self) -> Option<MessageRef> {
        match &self.payload {
            Payload::Message { message_id, .. } => Some(MessageRef {
                chat_id: self.chat_id,
                message_id: *message_id,
            }),
            Payload::Callback { .. } => None,
        }
    }

    /// Message holding the keyboard a callback came from.
    pub fn callback_message_id(&self) -> Option<i32> {
        match &self.payload {
            Payload::Callback { message_id, .. } => *message_id,
            Payload::Message { .. } => None,
        }
    }
}
