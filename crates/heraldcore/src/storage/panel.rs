//! User panel layout, `user_panel.json`.
//!
//! Per locale: the main menu keyboard, optional replacement menus for members
//! of a given category label, and the pages. A page is a message (or an album
//! range) in the panel channel, copied to the user with the page keyboard.
//!
//! Sample signals are listed per signal type. The list page of a type is the
//! ordinary page `SAMPLE_SIGNALS_<TYPE>`; each signal itself is a post in the
//! sample signals channel.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::json_file;
use crate::config::Locale;
use crate::error::AppResult;
use crate::messenger::Keyboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSource {
    Single(i32),
    Album { first_id: i32, album_length: i32 },
}

impl PageSource {
    /// Channel message ids making up the page.
    pub fn message_ids(self) -> Vec<i32> {
        match self {
            PageSource::Single(id) => vec![id],
            PageSource::Album { first_id, album_length } => {
                (first_id..first_id.saturating_add(album_length.max(0))).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub message: PageSource,
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
}

/// Page key prefix of the per-type sample signal lists
pub const SAMPLE_SIGNALS_PAGE_PREFIX: &str = "SAMPLE_SIGNALS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSignal {
    pub title: String,
    pub pair_name: String,
    /// Post id in the sample signals channel
    pub message_id: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalType {
    #[serde(default)]
    pub signals: Vec<SampleSignal>,
    /// Keyboard under a shown signal; defaults to main menu and back to the list
    #[serde(default)]
    pub keyboard: Option<Keyboard>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelCatalog {
    #[serde(default)]
    pub main_menu: Keyboard,
    /// Category label → menu shown instead of `main_menu`
    #[serde(default)]
    pub category_menus: BTreeMap<String, Keyboard>,
    #[serde(default)]
    pub pages: BTreeMap<String, Page>,
    /// Signal type name (`CAN_BAG`, `FUTURES`) → its signals
    #[serde(default)]
    pub sample_signals: BTreeMap<String, SignalType>,
}

impl PanelCatalog {
    pub fn load(path: &Path, locale: Locale) -> AppResult<Self> {
        let file: Option<BTreeMap<String, PanelCatalog>> = json_file::read_optional(path)?;
        match file.and_then(|mut f| f.remove(locale.code())) {
            Some(catalog) => Ok(catalog),
            None => {
                log::warn!("No user panel for locale {} in {}", locale, path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn page(&self, key: &str) -> Option<&Page> {
        self.pages.get(key)
    }

    pub fn signal_type(&self, name: &str) -> Option<&SignalType> {
        self.sample_signals.get(name)
    }

    /// The signal type whose list page is `page_key`.
    pub fn signal_list<'a>(&'a self, page_key: &'a str) -> Option<(&'a str, &'a SignalType)> {
        let name = page_key.strip_prefix(SAMPLE_SIGNALS_PAGE_PREFIX)?;
        self.signal_type(name).map(|kind| (name, kind))
    }

    /// Menu for a user belonging to `labels`; the first label with an override wins.
    pub fn menu_for<'a>(&'a self, labels: &[String]) -> &'a Keyboard {
        labels
            .iter()
            .find_map(|label| self.category_menus.get(label))
            .unwrap_or(&self.main_menu)
    }
}
