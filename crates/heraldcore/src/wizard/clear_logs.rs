use async_trait::async_trait;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{reply_or_edit, HandlerDeps};
use crate::i18n::{admin_t, admin_t_with};
use crate::keyboards::{self, callbacks};
use crate::session::{Transition, Trigger, Wizard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearLogsState {
    AwaitingConfirmation,
}

/// Truncates the locale's user panel error log after a confirmation.
pub struct ClearLogsWizard;

impl ClearLogsWizard {
    async fn no_file(deps: &HandlerDeps, event: &Event) -> AppResult<Transition<ClearLogsState>> {
        let keyboard = keyboards::admin_return_to_main_menu();
        reply_or_edit(deps, event, &admin_t("clear-user-logs-no-file"), Some(&keyboard)).await?;
        Ok(Transition::End)
    }
}

#[async_trait]
impl Wizard for ClearLogsWizard {
    type State = ClearLogsState;
    type Scratch = ();

    fn name(&self) -> &'static str {
        "clear_user_logs"
    }

    fn entry_triggers(&self) -> Vec<Trigger> {
        vec![Trigger::Callback(callbacks::CLEAR_USER_LOGS)]
    }

    fn state_trigger(&self, _state: ClearLogsState) -> Trigger {
        Trigger::Callback(callbacks::CONFIRM)
    }

    async fn enter(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        _scratch: &mut (),
    ) -> AppResult<Transition<ClearLogsState>> {
        let locale = deps.locale();
        if !deps.settings.user_panel_log_path().exists() {
            return Self::no_file(deps, event).await;
        }
        let text = admin_t_with("clear-user-logs-confirm", "locale", locale.code());
        reply_or_edit(deps, event, &text, Some(&keyboards::admin_confirmation())).await?;
        Ok(Transition::Continue(ClearLogsState::AwaitingConfirmation))
    }

    async fn step(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        _state: ClearLogsState,
        _scratch: &mut (),
    ) -> AppResult<Transition<ClearLogsState>> {
        let path = deps.settings.user_panel_log_path();
        if !path.exists() {
            return Self::no_file(deps, event).await;
        }

        fs_err::File::create(&path)?;
        log::info!("Admin {} cleared {}", event.user_id(), path.display());

        let keyboard = keyboards::admin_return_to_main_menu();
        reply_or_edit(deps, event, &admin_t("clear-user-logs-success"), Some(&keyboard)).await?;
        Ok(Transition::End)
    }
}
