//! Access control for admin-only wizards

use async_trait::async_trait;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::HandlerDeps;
use crate::session::{Transition, Trigger, Wizard};

/// Runs the wrapped wizard only for admins.
///
/// For anyone else the scratch is reset and the interaction ends without any
/// reply, so the admin panel stays invisible to regular users.
pub struct AdminOnly<W>(pub W);

impl<W: Wizard> AdminOnly<W> {
    fn allowed(&self, deps: &HandlerDeps, event: &Event, scratch: &mut W::Scratch) -> bool {
        if deps.is_admin(event.user_id()) {
            return true;
        }
        log::warn!("{}: ignoring non-admin user {}", self.0.name(), event.user_id());
        *scratch = W::Scratch::default();
        false
    }
}

#[async_trait]
impl<W: Wizard> Wizard for AdminOnly<W> {
    type State = W::State;
    type Scratch = W::Scratch;

    fn name(&self) -> &'static str {
        self.0.name()
    }

    fn entry_triggers(&self) -> Vec<Trigger> {
        self.0.entry_triggers()
    }

    fn state_trigger(&self, state: Self::State) -> Trigger {
        self.0.state_trigger(state)
    }

    async fn enter(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        scratch: &mut Self::Scratch,
    ) -> AppResult<Transition<Self::State>> {
        if !self.allowed(deps, event, scratch) {
            return Ok(Transition::End);
        }
        self.0.enter(deps, event, scratch).await
    }

    async fn step(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        state: Self::State,
        scratch: &mut Self::Scratch,
    ) -> AppResult<Transition<Self::State>> {
        if !self.allowed(deps, event, scratch) {
            return Ok(Transition::End);
        }
        self.0.step(deps, event, state, scratch).await
    }
}
