//! Conversation session machine
//!
//! A [`Wizard`] describes one multi-step conversation: its entry triggers,
//! the event each state waits for, and the handlers. [`Conversation`] runs a
//! wizard for every user independently and keeps the per-user state and
//! scratch between updates.
//!
//! Routing order for one event:
//! 1. cancel fallback (`/cancel`, `CANCEL`) while a session is active
//! 2. entry triggers, which always start a fresh session
//! 3. the current state's trigger
//!
//! Anything else falls through to the next route.
//!
//! A user has at most one live session across all conversations: the router
//! resets every other route when an entry trigger fires, and a cancel ends
//! them all.

use std::fmt;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::AppResult;
use crate::event::Event;
use crate::handlers::{cancel, errors, HandlerDeps};
use crate::keyboards::callbacks;

/// What a handler wants to happen to the session next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    Continue(S),
    End,
    /// Keep the current state. At entry this means no session is started.
    Unchanged,
}

/// Event pattern a wizard registers for entry or for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Command(&'static str),
    Callback(&'static str),
    CallbackPrefix(&'static str),
    /// Non-command message with text
    Text,
    /// Any non-command message
    Message,
}

impl Trigger {
    pub fn matches(self, event: &Event) -> bool {
        match self {
            Trigger::Command(name) => event.command().is_some_and(|c| c.name == name),
            Trigger::Callback(data) => event.callback_data() == Some(data),
            Trigger::CallbackPrefix(prefix) => event.callback_data().is_some_and(|d| d.starts_with(prefix)),
            Trigger::Text => event.text().is_some(),
            Trigger::Message => !event.is_callback() && !event.is_command(),
        }
    }
}

/// `/cancel` or the `CANCEL` button.
pub fn is_cancel(event: &Event) -> bool {
    Trigger::Command("cancel").matches(event) || Trigger::Callback(callbacks::CANCEL).matches(event)
}

#[async_trait]
pub trait Wizard: Send + Sync + 'static {
    type State: Copy + Eq + fmt::Debug + Send + Sync + 'static;
    type Scratch: Default + Send + Sync + 'static;

    fn name(&self) -> &'static str;

    fn entry_triggers(&self) -> Vec<Trigger>;

    /// The event a session in `state` waits for.
    fn state_trigger(&self, state: Self::State) -> Trigger;

    async fn enter(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        scratch: &mut Self::Scratch,
    ) -> AppResult<Transition<Self::State>>;

    async fn step(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        state: Self::State,
        scratch: &mut Self::Scratch,
    ) -> AppResult<Transition<Self::State>>;
}

/// Something the router can offer an event to.
#[async_trait]
pub trait Route: Send + Sync {
    fn name(&self) -> &'static str;

    /// True when the event would start a fresh session here.
    fn is_entry(&self, event: &Event) -> bool;

    /// Drops the user's session without any reply. Returns `true` if one was live.
    fn reset(&self, user_id: i64) -> bool;

    /// Returns `true` when the event was consumed.
    async fn offer(&self, deps: &HandlerDeps, event: &Event) -> bool;
}

struct Session<S, D> {
    state: S,
    scratch: D,
}

/// Per-user runtime for one wizard.
pub struct Conversation<W: Wizard> {
    wizard: W,
    sessions: DashMap<i64, Session<W::State, W::Scratch>>,
}

impl<W: Wizard> Conversation<W> {
    pub fn new(wizard: W) -> Self {
        Self {
            wizard,
            sessions: DashMap::new(),
        }
    }

    /// Current state of a user's session, if one is active.
    pub fn state_of(&self, user_id: i64) -> Option<W::State> {
        self.sessions.get(&user_id).map(|s| s.state)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    async fn settle(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        current: Option<W::State>,
        result: AppResult<Transition<W::State>>,
        scratch: W::Scratch,
    ) {
        let user_id = event.user_id();
        match result {
            Ok(Transition::Continue(state)) => {
                log::debug!("{}: user {} -> {:?}", self.wizard.name(), user_id, state);
                self.sessions.insert(user_id, Session { state, scratch });
            }
            Ok(Transition::Unchanged) => {
                if let Some(state) = current {
                    self.sessions.insert(user_id, Session { state, scratch });
                }
            }
            Ok(Transition::End) => {
                log::debug!("{}: user {} finished", self.wizard.name(), user_id);
            }
            Err(e) => {
                log::error!("{}: step failed for user {}: {}", self.wizard.name(), user_id, e);
                errors::report_error(deps, event, &e).await;
            }
        }
    }
}

#[async_trait]
impl<W: Wizard> Route for Conversation<W> {
    fn name(&self) -> &'static str {
        self.wizard.name()
    }

    fn is_entry(&self, event: &Event) -> bool {
        self.wizard.entry_triggers().into_iter().any(|t| t.matches(event))
    }

    fn reset(&self, user_id: i64) -> bool {
        self.sessions.remove(&user_id).is_some()
    }

    async fn offer(&self, deps: &HandlerDeps, event: &Event) -> bool {
        let user_id = event.user_id();

        if is_cancel(event) && self.sessions.remove(&user_id).is_some() {
            log::info!("{}: user {} canceled", self.wizard.name(), user_id);
            if let Err(e) = cancel::cancel_operation(deps, event).await {
                log::error!("Failed to confirm cancellation to {}: {}", user_id, e);
            }
            return true;
        }

        if self.is_entry(event) {
            self.sessions.remove(&user_id);
            let mut scratch = W::Scratch::default();
            let result = self.wizard.enter(deps, event, &mut scratch).await;
            self.settle(deps, event, None, result, scratch).await;
            return true;
        }

        // Take the session out while the step runs; no map guard lives across an await.
        let Some((_, session)) = self
            .sessions
            .remove_if(&user_id, |_, s| self.wizard.state_trigger(s.state).matches(event))
        else {
            return false;
        };

        let Session { state, mut scratch } = session;
        let result = self.wizard.step(deps, event, state, &mut scratch).await;
        self.settle(deps, event, Some(state), result, scratch).await;
        true
    }
}
