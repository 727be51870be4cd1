//! JSON data files: categories, start history, admins, user panel, promo codes

pub mod admins;
pub mod categories;
pub mod history;
pub mod json_file;
pub mod panel;
pub mod promo;

// Re-exports for convenience
pub use admins::AdminDirectory;
pub use categories::{Category, CategoryId, CategoryRef, CategoryStore};
pub use history::{HistoryEntry, HistoryStore};
pub use panel::{Page, PageSource, PanelCatalog, SampleSignal, SignalType};
pub use promo::PromoCodes;
