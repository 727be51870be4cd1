//! Multi-step conversations built on the session machine

pub mod category;
pub mod clear_logs;
pub mod promo;

pub use category::{CategoryAction, CategoryScratch, CategoryState, CategoryWizard, PendingPayload};
pub use clear_logs::{ClearLogsState, ClearLogsWizard};
pub use promo::{PromoState, PromoWizard};
