//! Herald core - category membership and broadcast engine for a Telegram bot
//!
//! Everything here is platform-neutral: inbound updates arrive as [`Event`]s
//! and outbound calls go through the [`Messenger`] trait, which the bot crate
//! implements on top of teloxide.
//!
//! # Module Structure
//!
//! - `storage`: JSON-backed category store, history, admins, panel layout, promo codes
//! - `session`, `guard`, `wizard`: per-user conversation machine and the wizards built on it
//! - `handlers`: single-shot handlers (start, help, send, export, logs, panel pages)
//! - `dispatch`: bulk relay of a message to a category
//! - `router`: routes one event through conversations and handlers

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod export;
pub mod guard;
pub mod handlers;
pub mod i18n;
pub mod keyboards;
pub mod logging;
pub mod messenger;
pub mod router;
pub mod session;
pub mod storage;
pub mod wizard;

// Re-export commonly used types for convenience
pub use config::{Locale, Settings};
pub use error::{AppError, AppResult, PlatformError};
pub use event::Event;
pub use handlers::HandlerDeps;
pub use messenger::{Button, ButtonAction, ChatTarget, Keyboard, MessageRef, Messenger};
pub use router::Router;
