//! User start history, one list per locale in `user_history.json`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::json_file;
use crate::config::Locale;
use crate::error::AppResult;

/// First `/start` of a user, recorded once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub username: String,
    pub start_time: DateTime<Utc>,
}

type HistoryFile = BTreeMap<String, Vec<HistoryEntry>>;

#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    locale: Locale,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, locale: Locale) -> Self {
        Self {
            path: path.into(),
            locale,
            lock: Mutex::new(()),
        }
    }

    fn empty_file() -> HistoryFile {
        Locale::iter().map(|l| (l.code().to_string(), Vec::new())).collect()
    }

    /// Appends the entry unless its user is already recorded for this locale.
    ///
    /// Returns `true` when a new entry was written.
    pub fn register(&self, entry: HistoryEntry) -> AppResult<bool> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut file = match json_file::read_optional::<HistoryFile>(&self.path)? {
            Some(file) => file,
            None => {
                let file = Self::empty_file();
                json_file::write_atomic(&self.path, &file)?;
                file
            }
        };

        let entries = file.entry(self.locale.code().to_string()).or_default();
        if entries.iter().any(|e| e.user_id == entry.user_id) {
            return Ok(false);
        }

        log::info!("Registering user {} in {} history", entry.user_id, self.locale);
        entries.push(entry);
        json_file::write_atomic(&self.path, &file)?;
        Ok(true)
    }

    /// History of the active locale in registration order.
    pub fn entries(&self) -> AppResult<Vec<HistoryEntry>> {
        let mut file: HistoryFile = json_file::read_or_default(&self.path)?;
        Ok(file.remove(self.locale.code()).unwrap_or_default())
    }
}
