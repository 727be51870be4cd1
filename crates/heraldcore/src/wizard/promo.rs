use async_trait::async_trait;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{log_interaction, reply, reply_or_edit, HandlerDeps};
use crate::i18n::t;
use crate::keyboards::{self, callbacks};
use crate::session::{Transition, Trigger, Wizard};
use crate::storage::CategoryRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoState {
    AwaitingCode,
}

/// User panel promo code entry. A valid code enrolls the user in the category
/// labelled with the code, creating it on first use.
pub struct PromoWizard;

#[async_trait]
impl Wizard for PromoWizard {
    type State = PromoState;
    type Scratch = ();

    fn name(&self) -> &'static str {
        "promo_code"
    }

    fn entry_triggers(&self) -> Vec<Trigger> {
        vec![Trigger::Callback(callbacks::START_ENTER_PROMO_CODE)]
    }

    fn state_trigger(&self, _state: PromoState) -> Trigger {
        Trigger::Text
    }

    async fn enter(&self, deps: &HandlerDeps, event: &Event, _scratch: &mut ()) -> AppResult<Transition<PromoState>> {
        log_interaction(event, "started promo code entry");
        let keyboard = keyboards::cancel(deps.locale());
        reply_or_edit(deps, event, &t(deps.locale(), "promo-code-input"), Some(&keyboard)).await?;
        Ok(Transition::Continue(PromoState::AwaitingCode))
    }

    async fn step(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        _state: PromoState,
        _scratch: &mut (),
    ) -> AppResult<Transition<PromoState>> {
        let locale = deps.locale();
        let input = event.text().unwrap_or_default();
        log_interaction(event, &format!("entered promo code {}", input.trim().to_uppercase()));

        let Some(code) = deps.promo_codes.validate(input) else {
            reply(deps, event, &t(locale, "promo-code-invalid"), Some(&keyboards::cancel(locale))).await?;
            return Ok(Transition::Unchanged);
        };

        deps.categories
            .add_user(&event.user_id().to_string(), CategoryRef::Label(code))?;
        reply(
            deps,
            event,
            &t(locale, "promo-code-valid"),
            Some(&keyboards::return_to_main_menu(locale)),
        )
        .await?;
        Ok(Transition::End)
    }
}
