//! Category wizard: set, add to, remove from, or bulk-send to a category.
//!
//! All four flows share one shape:
//!
//! ```text
//! /command (as reply) ──────────────────────────┐
//! menu button ─> AwaitingPayload ─(text/msg)─> AwaitingCategory ─(CATEGORY:id)─> AwaitingConfirmation ─(CONFIRM)─> done
//! ```
//!
//! The payload is a whitespace-separated list of user ids for the membership
//! actions and a reference to the message to relay for bulk send.

use async_trait::async_trait;
use fluent_templates::fluent_bundle::FluentArgs;

use crate::dispatch;
use crate::error::{AppError, AppResult};
use crate::event::Event;
use crate::handlers::{reply, reply_or_edit, HandlerDeps};
use crate::i18n::{admin_t, admin_t_args, admin_t_with};
use crate::keyboards::{self, callbacks};
use crate::messenger::MessageRef;
use crate::session::{Transition, Trigger, Wizard};
use crate::storage::CategoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAction {
    /// Overwrite the member list
    Set,
    Add,
    Remove,
    /// Relay a message to every member
    BulkSend,
}

struct Texts {
    reply_error: &'static str,
    select_prompt: &'static str,
    payload_prompt: &'static str,
    confirm: &'static str,
    success: &'static str,
}

impl CategoryAction {
    pub fn command(self) -> &'static str {
        match self {
            CategoryAction::Set => "setcategory",
            CategoryAction::Add => "addtocategory",
            CategoryAction::Remove => "removefromcategory",
            CategoryAction::BulkSend => "bulksend",
        }
    }

    pub fn menu_callback(self) -> &'static str {
        match self {
            CategoryAction::Set => callbacks::START_SET_CATEGORY,
            CategoryAction::Add => callbacks::START_ADD_TO_CATEGORY,
            CategoryAction::Remove => callbacks::START_REMOVE_FROM_CATEGORY,
            CategoryAction::BulkSend => callbacks::START_BULK_SEND,
        }
    }

    fn texts(self) -> Texts {
        match self {
            CategoryAction::Set => Texts {
                reply_error: "category-error-reply",
                select_prompt: "category-select-prompt",
                payload_prompt: "category-user-list-prompt",
                confirm: "category-confirm-set",
                success: "category-set-success",
            },
            CategoryAction::Add => Texts {
                reply_error: "category-error-reply",
                select_prompt: "add-to-category-select-prompt",
                payload_prompt: "add-to-category-user-list-prompt",
                confirm: "add-to-category-confirm",
                success: "add-to-category-success",
            },
            CategoryAction::Remove => Texts {
                reply_error: "category-error-reply",
                select_prompt: "remove-from-category-select-prompt",
                payload_prompt: "remove-from-category-user-list-prompt",
                confirm: "remove-from-category-confirm",
                success: "remove-from-category-success",
            },
            CategoryAction::BulkSend => Texts {
                reply_error: "bulk-send-error-reply",
                select_prompt: "bulk-send-message-selected",
                payload_prompt: "bulk-send-prompt",
                confirm: "bulk-send-category-selected",
                success: "bulk-send-success",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryState {
    AwaitingPayload,
    AwaitingCategory,
    AwaitingConfirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPayload {
    UserIds(Vec<String>),
    Message(MessageRef),
}

#[derive(Debug, Default)]
pub struct CategoryScratch {
    pub payload: Option<PendingPayload>,
    pub category: Option<CategoryId>,
}

pub struct CategoryWizard {
    action: CategoryAction,
}

impl CategoryWizard {
    pub fn new(action: CategoryAction) -> Self {
        Self { action }
    }

    pub fn action(&self) -> CategoryAction {
        self.action
    }

    fn split_ids(text: Option<&str>) -> Vec<String> {
        text.unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    async fn ask_for_category(&self, deps: &HandlerDeps, event: &Event) -> AppResult<Transition<CategoryState>> {
        let keyboard = keyboards::category_selection(&deps.categories.list_categories()?);
        reply(deps, event, &admin_t(self.action.texts().select_prompt), Some(&keyboard)).await?;
        Ok(Transition::Continue(CategoryState::AwaitingCategory))
    }

    async fn apply(&self, deps: &HandlerDeps, event: &Event, scratch: &CategoryScratch) -> AppResult<()> {
        let category = scratch
            .category
            .as_ref()
            .ok_or(AppError::MissingScratch("category"))?;
        let label = deps.categories.label_for(category)?;

        match (self.action, &scratch.payload) {
            (CategoryAction::Set, Some(PendingPayload::UserIds(ids))) => {
                deps.categories.replace_members(category, ids)?;
            }
            (CategoryAction::Add, Some(PendingPayload::UserIds(ids))) => {
                deps.categories.add_members(category, ids)?;
            }
            (CategoryAction::Remove, Some(PendingPayload::UserIds(ids))) => {
                deps.categories.remove_members(category, ids)?;
            }
            (CategoryAction::BulkSend, Some(PendingPayload::Message(message))) => {
                let members = deps.categories.members_of(category)?;
                dispatch::bulk_send(deps.messenger.as_ref(), event.chat_id, *message, &members).await;
            }
            _ => return Err(AppError::MissingScratch("payload")),
        }

        log::info!(
            "Admin {} applied {:?} to category {} ({})",
            event.user_id(),
            self.action,
            category,
            label
        );
        let text = admin_t_with(self.action.texts().success, "category", label);
        reply_or_edit(deps, event, &text, Some(&keyboards::admin_return_to_main_menu())).await
    }
}

#[async_trait]
impl Wizard for CategoryWizard {
    type State = CategoryState;
    type Scratch = CategoryScratch;

    fn name(&self) -> &'static str {
        self.action.command()
    }

    fn entry_triggers(&self) -> Vec<Trigger> {
        vec![
            Trigger::Command(self.action.command()),
            Trigger::Callback(self.action.menu_callback()),
        ]
    }

    fn state_trigger(&self, state: CategoryState) -> Trigger {
        match state {
            CategoryState::AwaitingPayload if self.action == CategoryAction::BulkSend => Trigger::Message,
            CategoryState::AwaitingPayload => Trigger::Text,
            CategoryState::AwaitingCategory => Trigger::CallbackPrefix(callbacks::CATEGORY_PREFIX),
            CategoryState::AwaitingConfirmation => Trigger::Callback(callbacks::CONFIRM),
        }
    }

    async fn enter(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        scratch: &mut CategoryScratch,
    ) -> AppResult<Transition<CategoryState>> {
        if event.is_callback() {
            let prompt = admin_t(self.action.texts().payload_prompt);
            reply_or_edit(deps, event, &prompt, Some(&keyboards::admin_cancel())).await?;
            return Ok(Transition::Continue(CategoryState::AwaitingPayload));
        }

        let Some(replied) = event.reply_to() else {
            reply(deps, event, &admin_t(self.action.texts().reply_error), None).await?;
            return Ok(Transition::Unchanged);
        };

        scratch.payload = Some(match self.action {
            CategoryAction::BulkSend => PendingPayload::Message(MessageRef {
                chat_id: event.chat_id,
                message_id: replied.message_id,
            }),
            _ => PendingPayload::UserIds(Self::split_ids(replied.text.as_deref())),
        });
        self.ask_for_category(deps, event).await
    }

    async fn step(
        &self,
        deps: &HandlerDeps,
        event: &Event,
        state: CategoryState,
        scratch: &mut CategoryScratch,
    ) -> AppResult<Transition<CategoryState>> {
        match state {
            CategoryState::AwaitingPayload => {
                scratch.payload = match self.action {
                    CategoryAction::BulkSend => event.message_ref().map(PendingPayload::Message),
                    _ => Some(PendingPayload::UserIds(Self::split_ids(event.text()))),
                };
                self.ask_for_category(deps, event).await
            }
            CategoryState::AwaitingCategory => {
                let category = event
                    .callback_data()
                    .and_then(keyboards::parse_category_callback)
                    .ok_or(AppError::MissingScratch("category"))?;
                let label = deps.categories.label_for(&category)?;

                let text = match self.action {
                    CategoryAction::BulkSend => {
                        let count = deps.categories.members_of(&category)?.len();
                        let mut args = FluentArgs::new();
                        args.set("category", label);
                        args.set("count", count);
                        admin_t_args(self.action.texts().confirm, &args)
                    }
                    _ => admin_t_with(self.action.texts().confirm, "category", label),
                };
                scratch.category = Some(category);
                reply_or_edit(deps, event, &text, Some(&keyboards::admin_confirmation())).await?;
                Ok(Transition::Continue(CategoryState::AwaitingConfirmation))
            }
            CategoryState::AwaitingConfirmation => {
                self.apply(deps, event, scratch).await?;
                Ok(Transition::End)
            }
        }
    }
}
