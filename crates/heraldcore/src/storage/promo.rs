use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use super::json_file;
use crate::config::Locale;
use crate::error::AppResult;

/// Valid promo codes for the active locale, from `promo_codes.json`.
///
/// Codes are compared trimmed and upper-cased. A redeemed code doubles as the
/// label of the category its users join.
#[derive(Debug, Clone, Default)]
pub struct PromoCodes {
    codes: HashSet<String>,
}

impl PromoCodes {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            codes: codes.into_iter().map(|c| normalize(c.as_ref())).collect(),
        }
    }

    pub fn load(path: &Path, locale: Locale) -> AppResult<Self> {
        let file: BTreeMap<String, Vec<String>> = json_file::read_or_default(path)?;
        let codes = file.get(locale.code()).cloned().unwrap_or_default();
        Ok(Self::new(codes))
    }

    /// Returns the normalized code when it is valid.
    pub fn validate(&self, input: &str) -> Option<String> {
        let code = normalize(input);
        self.codes.contains(&code).then_some(code)
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_normalizes_input() {
        let codes = PromoCodes::new(["spring25"]);
        assert_eq!(codes.validate("  Spring25 \n"), Some("SPRING25".to_string()));
        assert_eq!(codes.validate("WINTER"), None);
    }

    #[test]
    fn test_load_is_per_locale() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("promo_codes.json");
        std::fs::write(&path, r#"{"EN": ["ALPHA"], "TR": ["BETA"]}"#).unwrap();
        let codes = PromoCodes::load(&path, Locale::Tr).unwrap();
        assert!(codes.validate("beta").is_some());
        assert!(codes.validate("alpha").is_none());
    }
}
