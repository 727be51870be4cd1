use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{AppError, AppResult};

/// Deployment locale. One process serves exactly one locale for its lifetime;
/// every data file is partitioned by it at top level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Locale {
    #[strum(serialize = "EN")]
    #[serde(rename = "EN")]
    En,
    #[strum(serialize = "TR")]
    #[serde(rename = "TR")]
    Tr,
}

impl Locale {
    /// Partition key used in the JSON data files.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "EN",
            Locale::Tr => "TR",
        }
    }

    /// Language tag for the translation bundles.
    pub fn lang(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }
}

/// Timeout for Bot API requests
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Data file names inside the data directory
pub mod files {
    pub const CATEGORIES: &str = "user_lists.json";
    pub const HISTORY: &str = "user_history.json";
    pub const ADMINS: &str = "admins.json";
    pub const PANEL: &str = "user_panel.json";
    pub const PROMO_CODES: &str = "promo_codes.json";
}

/// Admin id parsing shared by the environment loader
pub mod admin {
    /// Parses a comma/whitespace separated admin id list, skipping garbage.
    pub fn parse_admin_ids(raw: &str) -> Vec<i64> {
        raw.split([',', ' ', '\n', '\t'])
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect()
    }
}

/// Immutable runtime settings, built once in `main` and shared by reference.
#[derive(Debug)]
pub struct Settings {
    pub locale: Locale,
    pub token: SecretString,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Channel holding the user panel page messages
    pub panel_channel_id: Option<i64>,
    /// Channel holding the sample signal posts
    pub sample_signals_channel_id: Option<i64>,
    /// Extra admins from `ADMIN_IDS`, merged into the admin directory
    pub extra_admin_ids: Vec<i64>,
    /// Custom Bot API server, if any
    pub bot_api_url: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env(locale: Locale, data_dir: impl Into<PathBuf>, log_dir: impl Into<PathBuf>) -> AppResult<Self> {
        Self::from_lookup(locale, data_dir, log_dir, |key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    ///
    /// The bot token is read from `BOT_TOKEN_<LOCALE>`, falling back to
    /// `BOT_TOKEN` and then `TELOXIDE_TOKEN`.
    pub fn from_lookup<F>(
        locale: Locale,
        data_dir: impl Into<PathBuf>,
        log_dir: impl Into<PathBuf>,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale_key = format!("BOT_TOKEN_{}", locale.code());
        let token = [locale_key.as_str(), "BOT_TOKEN", "TELOXIDE_TOKEN"]
            .iter()
            .find_map(|key| lookup(key).filter(|value| !value.trim().is_empty()))
            .ok_or_else(|| AppError::Config(format!("{locale_key} is not set")))?;

        let panel_channel_id = chat_id_var(&lookup, "USER_PANEL_MESSAGE_CHANNEL_ID")?;
        let sample_signals_channel_id = chat_id_var(&lookup, "SAMPLE_SIGNALS_CHANNEL_ID")?;

        Ok(Self {
            locale,
            token: SecretString::from(token),
            data_dir: data_dir.into(),
            log_dir: log_dir.into(),
            panel_channel_id,
            sample_signals_channel_id,
            extra_admin_ids: lookup("ADMIN_IDS")
                .map(|raw| admin::parse_admin_ids(&raw))
                .unwrap_or_default(),
            bot_api_url: lookup("BOT_API_URL").filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn app_log_path(&self) -> PathBuf {
        self.log_dir.join("herald.log")
    }

    /// Path of the per-locale user panel error log.
    pub fn user_panel_log_path(&self) -> PathBuf {
        self.log_dir.join(format!("user_panel_errors_{}.log", self.locale.code()))
    }
}

/// Optional chat id variable; present but unparsable is an error.
fn chat_id_var<F>(lookup: &F, key: &str) -> AppResult<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("{key} is not a chat id: {raw}"))),
        _ => Ok(None),
    }
}
