//! Handler dependencies

use std::sync::Arc;

use crate::config::{files, Locale, Settings};
use crate::error::AppResult;
use crate::messenger::Messenger;
use crate::storage::{AdminDirectory, CategoryStore, HistoryStore, PanelCatalog, PromoCodes};

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub settings: Arc<Settings>,
    pub messenger: Arc<dyn Messenger>,
    pub categories: Arc<CategoryStore>,
    pub history: Arc<HistoryStore>,
    pub admins: Arc<AdminDirectory>,
    pub panel: Arc<PanelCatalog>,
    pub promo_codes: Arc<PromoCodes>,
}

impl HandlerDeps {
    /// Opens every store under the configured data directory.
    ///
    /// Admins, panel layout and promo codes are read once here; categories and
    /// history are re-read on every operation.
    pub fn load(settings: Arc<Settings>, messenger: Arc<dyn Messenger>) -> AppResult<Self> {
        let locale = settings.locale;
        let admins = AdminDirectory::load(&settings.data_file(files::ADMINS), locale, &settings.extra_admin_ids)?;
        let panel = PanelCatalog::load(&settings.data_file(files::PANEL), locale)?;
        let promo_codes = PromoCodes::load(&settings.data_file(files::PROMO_CODES), locale)?;

        log::info!(
            "Loaded {} admins and {} panel pages for locale {}",
            admins.len(),
            panel.pages.len(),
            locale
        );

        Ok(Self {
            categories: Arc::new(CategoryStore::new(settings.data_file(files::CATEGORIES), locale)),
            history: Arc::new(HistoryStore::new(settings.data_file(files::HISTORY), locale)),
            admins: Arc::new(admins),
            panel: Arc::new(panel),
            promo_codes: Arc::new(promo_codes),
            messenger,
            settings,
        })
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admins.is_admin(user_id)
    }
}
