//! Test fixtures
//!
//! [`TestEnv`] lays out a data directory in a temp dir, builds the handler
//! dependencies over a [`RecordingMessenger`] and routes events through the
//! real [`Router`].

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use heraldcore::event::{ReplyRef, Sender};
use heraldcore::storage::CategoryId;
use heraldcore::{Event, HandlerDeps, Locale, Router, Settings};
use tempfile::TempDir;

use super::RecordingMessenger;

pub const ADMIN_ID: i64 = 1000;
pub const USER_ID: i64 = 555;
pub const PANEL_CHANNEL_ID: i64 = -100200;
pub const SIGNALS_CHANNEL_ID: i64 = -100300;

/// Message id of the keyboard message callbacks come from
pub const KEYBOARD_MESSAGE_ID: i32 = 500;

pub const CATEGORIES: &str = r#"{
    "EN": {
        "0": {"label": "INTERESTED", "users": ["7", "43"]},
        "1": {"label": "OLDVIP", "users": ["8"]},
        "3": {"label": "VIP", "users": ["42", "900"]},
        "5": {"label": "NEWS", "users": ["201", "202", "203"]}
    },
    "TR": {
        "0": {"label": "INTERESTED", "users": ["99"]}
    }
}"#;

const ADMINS: &str = r#"{"EN": [1000], "TR": [2000]}"#;

const PROMO_CODES: &str = r#"{"EN": ["SPRING25"], "TR": ["BAHAR25"]}"#;

const PANEL: &str = r#"{
    "EN": {
        "main_menu": [
            [{"text": "Offers", "callback": "OFFERS"}],
            [{"text": "Promo code", "callback": "START_ENTER_PROMO_CODE"}]
        ],
        "category_menus": {
            "VIP": [[{"text": "VIP lounge", "callback": "VIP_LOUNGE"}]]
        },
        "pages": {
            "OFFERS": {
                "message": 12,
                "keyboard": [[{"text": "Back", "callback": "RETURN_TO_MAIN_MENU"}]]
            },
            "JANUARY_2025": {"message": {"first_id": 40, "album_length": 3}},
            "SAMPLE_SIGNALS_FUTURES": {"message": 31}
        },
        "sample_signals": {
            "FUTURES": {
                "signals": [{"title": "Long", "pair_name": "BTC/USDT", "message_id": 88}]
            }
        }
    }
}"#;

/// Complete environment for routing tests
pub struct TestEnv {
    /// Keeps the temp dir alive
    pub dir: TempDir,
    pub messenger: Arc<RecordingMessenger>,
    pub deps: HandlerDeps,
    pub router: Router,
    next_message_id: i32,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_categories(CATEGORIES)
    }

    pub fn with_categories(categories: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("user_lists.json"), categories).unwrap();
        std::fs::write(data_dir.join("admins.json"), ADMINS).unwrap();
        std::fs::write(data_dir.join("promo_codes.json"), PROMO_CODES).unwrap();
        std::fs::write(data_dir.join("user_panel.json"), PANEL).unwrap();

        let settings = Settings::from_lookup(Locale::En, &data_dir, dir.path().join("logs"), |key| match key {
            "BOT_TOKEN" => Some("123456:TEST".to_string()),
            "USER_PANEL_MESSAGE_CHANNEL_ID" => Some(PANEL_CHANNEL_ID.to_string()),
            "SAMPLE_SIGNALS_CHANNEL_ID" => Some(SIGNALS_CHANNEL_ID.to_string()),
            _ => None,
        })
        .unwrap();

        let messenger = Arc::new(RecordingMessenger::new());
        let deps = HandlerDeps::load(Arc::new(settings), messenger.clone()).unwrap();

        Self {
            dir,
            messenger,
            deps,
            router: Router::new(),
            next_message_id: 1,
        }
    }

    pub fn categories_path(&self) -> PathBuf {
        self.deps.categories.path().to_path_buf()
    }

    /// Raw bytes of the category file, for unchanged-file checks.
    pub fn categories_raw(&self) -> Vec<u8> {
        std::fs::read(self.categories_path()).unwrap()
    }

    pub fn members(&self, id: &str) -> Vec<String> {
        self.deps.categories.members_of(&CategoryId::new(id)).unwrap()
    }

    fn message_id(&mut self) -> i32 {
        self.next_message_id += 1;
        self.next_message_id
    }

    pub fn message(&mut self, user_id: i64, text: &str) -> Event {
        let id = self.message_id();
        Event::message(sender(user_id), user_id, id, Some(text.to_string()))
    }

    /// A command sent in reply to an earlier text message.
    pub fn reply(&mut self, user_id: i64, text: &str, replied_text: &str) -> Event {
        let replied_id = self.message_id();
        self.message(user_id, text).with_reply(ReplyRef {
            message_id: replied_id,
            text: Some(replied_text.to_string()),
        })
    }

    pub fn callback(&self, user_id: i64, data: &str) -> Event {
        Event::callback(sender(user_id), user_id, data, Some(KEYBOARD_MESSAGE_ID))
    }

    pub async fn send(&self, event: &Event) {
        self.router.handle(&self.deps, event).await;
    }
}

pub fn sender(user_id: i64) -> Sender {
    let mut sender = Sender::new(user_id, if user_id == ADMIN_ID { "Alice" } else { "Deniz" });
    sender.username = Some(format!("user{user_id}"));
    sender.language_code = Some("en".to_string());
    sender
}
