//! Fixed keyboards and callback data

use crate::config::Locale;
use crate::i18n::{admin_t, t};
use crate::messenger::{Button, Keyboard};
use crate::storage::panel::SAMPLE_SIGNALS_PAGE_PREFIX;
use crate::storage::{CategoryId, SampleSignal};

/// Callback data values
pub mod callbacks {
    pub const START_SET_CATEGORY: &str = "START_SET_CATEGORY";
    pub const START_ADD_TO_CATEGORY: &str = "START_ADD_TO_CATEGORY";
    pub const START_REMOVE_FROM_CATEGORY: &str = "START_REMOVE_FROM_CATEGORY";
    pub const START_BULK_SEND: &str = "START_BULK_SEND";
    pub const EXPORT_HISTORY: &str = "EXPORT_HISTORY";
    pub const SEND_USER_LOGS: &str = "SEND_USER_LOGS";
    pub const CLEAR_USER_LOGS: &str = "CLEAR_USER_LOGS";
    pub const SHOW_HELP: &str = "SHOW_HELP";
    pub const RETURN_TO_MAIN_MENU: &str = "RETURN_TO_MAIN_MENU";
    pub const START_ENTER_PROMO_CODE: &str = "START_ENTER_PROMO_CODE";
    pub const CONFIRM: &str = "CONFIRM";
    pub const CANCEL: &str = "CANCEL";
    /// Prefix of category selection buttons, followed by the category id
    pub const CATEGORY_PREFIX: &str = "CATEGORY:";
    pub const SAMPLE_SIGNALS_SELECT_TYPE: &str = "SAMPLE_SIGNALS_SELECT_TYPE";
}

pub fn category_callback(id: &CategoryId) -> String {
    format!("{}{}", callbacks::CATEGORY_PREFIX, id)
}

pub fn parse_category_callback(data: &str) -> Option<CategoryId> {
    data.strip_prefix(callbacks::CATEGORY_PREFIX)
        .filter(|id| !id.is_empty())
        .map(CategoryId::from)
}

/// `<TYPE>:<message id>`, the button data of one sample signal.
pub fn sample_signal_callback(signal_type: &str, message_id: i32) -> String {
    format!("{signal_type}:{message_id}")
}

pub fn parse_sample_signal_callback(data: &str) -> Option<(&str, i32)> {
    let (signal_type, id) = data.split_once(':')?;
    if signal_type.is_empty() || id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((signal_type, id.parse().ok()?))
}

/// One button per signal, then main menu and back to the type selection.
pub fn sample_signal_list(locale: Locale, signal_type: &str, signals: &[SampleSignal]) -> Keyboard {
    Keyboard::column(signals.iter().map(|signal| {
        Button::callback(
            format!("{} - {}", signal.title, signal.pair_name),
            sample_signal_callback(signal_type, signal.message_id),
        )
    }))
    .push_row(vec![
        Button::callback(t(locale, "btn-main-menu"), callbacks::RETURN_TO_MAIN_MENU),
        Button::callback(t(locale, "btn-back"), callbacks::SAMPLE_SIGNALS_SELECT_TYPE),
    ])
}

/// Under a shown signal: main menu and back to its type's list.
pub fn sample_signal_back(locale: Locale, signal_type: &str) -> Keyboard {
    Keyboard::new(vec![vec![
        Button::callback(t(locale, "btn-main-menu"), callbacks::RETURN_TO_MAIN_MENU),
        Button::callback(t(locale, "btn-back"), format!("{SAMPLE_SIGNALS_PAGE_PREFIX}{signal_type}")),
    ]])
}

pub fn admin_main_menu() -> Keyboard {
    Keyboard::column([
        Button::callback(admin_t("btn-admin-set-category"), callbacks::START_SET_CATEGORY),
        Button::callback(admin_t("btn-admin-add-to-category"), callbacks::START_ADD_TO_CATEGORY),
        Button::callback(admin_t("btn-admin-remove-from-category"), callbacks::START_REMOVE_FROM_CATEGORY),
        Button::callback(admin_t("btn-admin-bulk-send"), callbacks::START_BULK_SEND),
        Button::callback(admin_t("btn-admin-export-history"), callbacks::EXPORT_HISTORY),
        Button::callback(admin_t("btn-admin-send-user-logs"), callbacks::SEND_USER_LOGS),
        Button::callback(admin_t("btn-admin-clear-user-logs"), callbacks::CLEAR_USER_LOGS),
        Button::callback(admin_t("btn-admin-show-help"), callbacks::SHOW_HELP),
    ])
}

pub fn admin_return_to_main_menu() -> Keyboard {
    Keyboard::column([Button::callback(admin_t("btn-main-menu"), callbacks::RETURN_TO_MAIN_MENU)])
}

pub fn admin_cancel() -> Keyboard {
    Keyboard::column([Button::callback(admin_t("btn-cancel"), callbacks::CANCEL)])
}

pub fn admin_confirmation() -> Keyboard {
    Keyboard::new(vec![vec![
        Button::callback(admin_t("btn-yes"), callbacks::CONFIRM),
        Button::callback(admin_t("btn-cancel"), callbacks::CANCEL),
    ]])
}

/// One button per category, then a cancel row.
pub fn category_selection(categories: &[(CategoryId, String)]) -> Keyboard {
    Keyboard::column(
        categories
            .iter()
            .map(|(id, label)| Button::callback(label.clone(), category_callback(id))),
    )
    .push_row(vec![Button::callback(admin_t("btn-cancel"), callbacks::CANCEL)])
}

pub fn return_to_main_menu(locale: Locale) -> Keyboard {
    Keyboard::column([Button::callback(t(locale, "btn-main-menu"), callbacks::RETURN_TO_MAIN_MENU)])
}

pub fn cancel(locale: Locale) -> Keyboard {
    Keyboard::column([Button::callback(t(locale, "btn-cancel"), callbacks::CANCEL)])
}
