//! Herald - Telegram bot for category-targeted broadcasts
//!
//! The engine lives in `heraldcore`; this crate wires it to Telegram.
//!
//! # Module Structure
//!
//! - `cli`: command line arguments
//! - `telegram`: bot creation, the teloxide `Messenger` adapter and the dispatcher schema

pub mod cli;
pub mod telegram;
