//! Update routing: conversations first, then single-shot handlers.

use crate::event::Event;
use crate::guard::AdminOnly;
use crate::handlers::{cancel, errors, help, history, panel, send, start, user_logs, HandlerDeps};
use crate::keyboards::callbacks;
use crate::session::{is_cancel, Conversation, Route, Trigger};
use crate::wizard::{CategoryAction, CategoryWizard, ClearLogsWizard, PromoWizard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Start,
    Help,
    Send,
    ExportHistory,
    SendUserLogs,
    PanelPage,
    SampleSignal,
}

fn classify(deps: &HandlerDeps, event: &Event) -> Option<Action> {
    let any = |triggers: &[Trigger]| triggers.iter().any(|t| t.matches(event));

    if any(&[Trigger::Command("start"), Trigger::Callback(callbacks::RETURN_TO_MAIN_MENU)]) {
        Some(Action::Start)
    } else if any(&[Trigger::Command("help"), Trigger::Callback(callbacks::SHOW_HELP)]) {
        Some(Action::Help)
    } else if any(&[Trigger::Command("send")]) {
        Some(Action::Send)
    } else if any(&[Trigger::Callback(callbacks::EXPORT_HISTORY)]) {
        Some(Action::ExportHistory)
    } else if any(&[Trigger::Callback(callbacks::SEND_USER_LOGS)]) {
        Some(Action::SendUserLogs)
    } else if panel::is_page(deps, event) {
        Some(Action::PanelPage)
    } else if panel::is_sample_signal(deps, event) {
        Some(Action::SampleSignal)
    } else {
        None
    }
}

pub struct Router {
    routes: Vec<Box<dyn Route>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// The full set of conversations: the four category wizards and clear
    /// logs for admins, promo code entry for users.
    pub fn new() -> Self {
        let mut routes: Vec<Box<dyn Route>> = [
            CategoryAction::Set,
            CategoryAction::Add,
            CategoryAction::Remove,
            CategoryAction::BulkSend,
        ]
        .into_iter()
        .map(|action| Box::new(Conversation::new(AdminOnly(CategoryWizard::new(action)))) as Box<dyn Route>)
        .collect();
        routes.push(Box::new(Conversation::new(AdminOnly(ClearLogsWizard))));
        routes.push(Box::new(Conversation::new(PromoWizard)));
        Self { routes }
    }

    pub fn with_routes(routes: Vec<Box<dyn Route>>) -> Self {
        Self { routes }
    }

    /// Offers the event to each conversation in order, then to the plain
    /// handlers. Errors never escape; they are reported or logged here.
    pub async fn handle(&self, deps: &HandlerDeps, event: &Event) {
        let user_id = event.user_id();

        // A cancel ends every conversation of the user and is answered once,
        // with or without a live session.
        if is_cancel(event) {
            let ended: Vec<&str> = self
                .routes
                .iter()
                .filter_map(|route| route.reset(user_id).then_some(route.name()))
                .collect();
            if !ended.is_empty() {
                log::info!("User {} canceled {}", user_id, ended.join(", "));
            }
            if let Err(e) = cancel::cancel_operation(deps, event).await {
                log::error!("Cancel failed for user {}: {}", user_id, e);
            }
            return;
        }

        // Starting a wizard abandons whatever other wizard the user was in.
        if let Some(entering) = self.routes.iter().position(|route| route.is_entry(event)) {
            for (i, route) in self.routes.iter().enumerate() {
                if i != entering && route.reset(user_id) {
                    log::debug!("{}: user {} left for {}", route.name(), user_id, self.routes[entering].name());
                }
            }
        }

        for route in &self.routes {
            if route.offer(deps, event).await {
                log::debug!("Update from {} handled by {}", user_id, route.name());
                return;
            }
        }

        let Some(action) = classify(deps, event) else {
            log::debug!("Unhandled update from {}", user_id);
            return;
        };

        match action {
            Action::Start => {
                if let Err(e) = start::start(deps, event).await {
                    log::error!("Start failed for user {}: {}", event.user_id(), e);
                }
            }
            Action::Help => errors::report_on_failure(deps, event, help::show_help(deps, event).await).await,
            Action::Send => errors::report_on_failure(deps, event, send::send_message(deps, event).await).await,
            Action::ExportHistory => {
                errors::report_on_failure(deps, event, history::export_history(deps, event).await).await
            }
            Action::SendUserLogs => {
                errors::report_on_failure(deps, event, user_logs::send_user_logs(deps, event).await).await
            }
            Action::PanelPage => panel::show_page(deps, event).await,
            Action::SampleSignal => panel::show_sample_signal(deps, event).await,
        }
    }
}
