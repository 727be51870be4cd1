use std::collections::HashMap;

use fluent_templates::{
    fluent_bundle::{FluentArgs, FluentValue},
    static_loader, Loader,
};
use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

use crate::config::Locale;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "en",
        // Unicode isolation marks around placeables break ids inside messages.
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

static EN: Lazy<LanguageIdentifier> = Lazy::new(|| "en".parse().unwrap_or_default());
static TR: Lazy<LanguageIdentifier> = Lazy::new(|| "tr".parse().unwrap_or_default());

fn lang_of(locale: Locale) -> &'static LanguageIdentifier {
    match locale {
        Locale::En => &EN,
        Locale::Tr => &TR,
    }
}

fn lookup(lang: &LanguageIdentifier, key: &str, args: Option<&FluentArgs>) -> String {
    let text = match args {
        None => LOCALES
            .lookup(lang, key)
            .unwrap_or_else(|| LOCALES.lookup(&EN, key).unwrap_or_else(|| key.to_string())),
        Some(args) => {
            let args_map: HashMap<String, FluentValue> =
                args.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
            LOCALES.lookup_with_args(lang, key, &args_map).unwrap_or_else(|| {
                LOCALES
                    .lookup_with_args(&EN, key, &args_map)
                    .unwrap_or_else(|| key.to_string())
            })
        }
    };
    text.replace("\\n", "\n")
}

/// Returns the user-facing string for the deployment locale.
/// Converts literal `\n` sequences to actual newlines for proper Telegram formatting.
pub fn t(locale: Locale, key: &str) -> String {
    lookup(lang_of(locale), key, None)
}

/// Returns a user-facing string with arguments for interpolation.
pub fn t_args(locale: Locale, key: &str, args: &FluentArgs) -> String {
    lookup(lang_of(locale), key, Some(args))
}

/// Admin panel strings are English regardless of the deployment locale.
pub fn admin_t(key: &str) -> String {
    lookup(&EN, key, None)
}

pub fn admin_t_args(key: &str, args: &FluentArgs) -> String {
    lookup(&EN, key, Some(args))
}

/// Single-argument shorthand, the common case for admin notices.
pub fn admin_t_with(key: &str, name: &'static str, value: impl Into<String>) -> String {
    let mut args = FluentArgs::new();
    args.set(name, value.into());
    admin_t_args(key, &args)
}
