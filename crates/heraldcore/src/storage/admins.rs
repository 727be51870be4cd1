use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::json_file;
use crate::config::Locale;
use crate::error::AppResult;

/// Admin user ids for the active locale. Loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    ids: HashSet<i64>,
}

impl AdminDirectory {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Reads `admins.json` (`{locale: [ids]}`) and merges `extra` into it.
    pub fn load(path: &Path, locale: Locale, extra: &[i64]) -> AppResult<Self> {
        let file: Option<BTreeMap<String, Vec<i64>>> = json_file::read_optional(path)?;
        if file.is_none() {
            log::warn!("Admin file {} not found, using ADMIN_IDS only", path.display());
        }
        let mut ids: HashSet<i64> = file
            .and_then(|mut f| f.remove(locale.code()))
            .unwrap_or_default()
            .into_iter()
            .collect();
        ids.extend(extra.iter().copied());

        if ids.is_empty() {
            log::warn!("No admins configured for locale {}", locale);
        }
        Ok(Self { ids })
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.ids.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_merges_locale_and_extra() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("admins.json");
        std::fs::write(&path, r#"{"EN": [1, 2], "TR": [3]}"#).unwrap();

        let admins = AdminDirectory::load(&path, Locale::En, &[5]).unwrap();
        assert!(admins.is_admin(1));
        assert!(admins.is_admin(5));
        assert!(!admins.is_admin(3));
        assert_eq!(admins.len(), 3);
    }

    #[test]
    fn test_missing_file_uses_extra_only() {
        let dir = TempDir::new().unwrap();
        let admins = AdminDirectory::load(&dir.path().join("none.json"), Locale::Tr, &[8]).unwrap();
        assert!(admins.is_admin(8));
        assert_eq!(admins.len(), 1);
    }
}
