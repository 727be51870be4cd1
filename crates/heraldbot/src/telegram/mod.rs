//! Telegram integration: bot setup, the `Messenger` adapter and the dispatcher schema

pub mod adapter;
pub mod bot;
pub mod schema;
pub mod types;

// Re-exports for convenience
pub use adapter::TelegramMessenger;
pub use bot::{create_bot, setup_bot_commands, Command};
pub use schema::schema;
pub use types::HandlerError;
