//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod messenger;

#[allow(unused_imports)]
pub use fixtures::{TestEnv, ADMIN_ID, PANEL_CHANNEL_ID, SIGNALS_CHANNEL_ID, USER_ID};
#[allow(unused_imports)]
pub use messenger::{Call, RecordingMessenger};
