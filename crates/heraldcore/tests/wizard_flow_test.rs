//! Category wizard flows driven through the session machine and the router.
//!
//! Run with: cargo test -p heraldcore --test wizard_flow_test

mod common;

use common::{Call, TestEnv, ADMIN_ID, USER_ID};
use heraldcore::guard::AdminOnly;
use heraldcore::keyboards::callbacks;
use heraldcore::session::{Conversation, Route};
use heraldcore::wizard::{CategoryAction, CategoryState, CategoryWizard};
use heraldcore::ChatTarget;
use pretty_assertions::assert_eq;

fn conversation(action: CategoryAction) -> Conversation<AdminOnly<CategoryWizard>> {
    Conversation::new(AdminOnly(CategoryWizard::new(action)))
}

#[tokio::test]
async fn test_set_category_overwrites_members_and_ends_session() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);

    let entry = env.reply(ADMIN_ID, "/setcategory", "111 222");
    assert!(set.offer(&env.deps, &entry).await);
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));

    let select = env.callback(ADMIN_ID, "CATEGORY:3");
    assert!(set.offer(&env.deps, &select).await);
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingConfirmation));
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("❓ Are you sure you want to set the user list for category VIP?")
    );

    let confirm = env.callback(ADMIN_ID, callbacks::CONFIRM);
    assert!(set.offer(&env.deps, &confirm).await);

    assert_eq!(env.members("3"), vec!["111", "222"]);
    assert_eq!(set.state_of(ADMIN_ID), None);
    assert_eq!(set.active_sessions(), 0);
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("✅ Category VIP set successfully!")
    );

    // Dropped members fall back to the default category; new ones leave it.
    let default = env.members("0");
    assert!(default.contains(&"42".to_string()));
    assert!(default.contains(&"900".to_string()));
    assert!(!default.contains(&"111".to_string()));
}

#[tokio::test]
async fn test_menu_entry_asks_for_ids_first() {
    let mut env = TestEnv::new();
    let add = conversation(CategoryAction::Add);

    assert!(add.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::START_ADD_TO_CATEGORY)).await);
    assert_eq!(add.state_of(ADMIN_ID), Some(CategoryState::AwaitingPayload));
    assert!(matches!(
        env.messenger.calls().last(),
        Some(Call::EditText { message_id: 500, .. })
    ));

    let ids = env.message(ADMIN_ID, "301\n302");
    assert!(add.offer(&env.deps, &ids).await);
    assert_eq!(add.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));

    add.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:1")).await;
    add.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CONFIRM)).await;
    assert_eq!(env.members("1"), vec!["8", "301", "302"]);
}

#[tokio::test]
async fn test_command_without_reply_is_rejected() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);

    let entry = env.message(ADMIN_ID, "/setcategory");
    assert!(set.offer(&env.deps, &entry).await);
    assert_eq!(set.state_of(ADMIN_ID), None);
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("⚠️ You have to use this command in reply to a list of user ID's.")
    );
}

#[tokio::test]
async fn test_cancel_from_every_state_leaves_store_untouched() {
    let mut env = TestEnv::new();
    let before = env.categories_raw();
    let set = conversation(CategoryAction::Set);

    // AwaitingPayload, canceled by command
    set.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::START_SET_CATEGORY)).await;
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingPayload));
    let cancel = env.message(ADMIN_ID, "/cancel");
    assert!(set.offer(&env.deps, &cancel).await);
    assert_eq!(set.state_of(ADMIN_ID), None);
    assert_eq!(env.messenger.last_text().as_deref(), Some("❌ Operation canceled by the user."));

    // AwaitingCategory, canceled by button
    let entry = env.reply(ADMIN_ID, "/setcategory", "111");
    set.offer(&env.deps, &entry).await;
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));
    assert!(set.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CANCEL)).await);
    assert_eq!(set.state_of(ADMIN_ID), None);

    // AwaitingConfirmation
    let entry = env.reply(ADMIN_ID, "/setcategory", "111");
    set.offer(&env.deps, &entry).await;
    set.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:3")).await;
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingConfirmation));
    assert!(set.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CANCEL)).await);
    assert_eq!(set.state_of(ADMIN_ID), None);

    // A stale confirmation after cancel is not picked up
    assert!(!set.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CONFIRM)).await);

    assert_eq!(env.categories_raw(), before);
}

#[tokio::test]
async fn test_cancel_without_session_falls_through() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);
    let cancel = env.message(ADMIN_ID, "/cancel");
    assert!(!set.offer(&env.deps, &cancel).await);

    // The router still answers it.
    env.send(&cancel).await;
    assert_eq!(env.messenger.last_text().as_deref(), Some("❌ Operation canceled by the user."));
}

#[tokio::test]
async fn test_entry_restarts_a_running_session() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);

    let first = env.reply(ADMIN_ID, "/setcategory", "111");
    set.offer(&env.deps, &first).await;
    set.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:3")).await;

    let second = env.reply(ADMIN_ID, "/setcategory", "777");
    set.offer(&env.deps, &second).await;
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));

    set.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:1")).await;
    set.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CONFIRM)).await;
    assert_eq!(env.members("1"), vec!["777"]);
    assert_eq!(env.members("3"), vec!["42", "900"]);
}

#[tokio::test]
async fn test_non_admin_cannot_enter_admin_wizards() {
    let mut env = TestEnv::new();
    let before = env.categories_raw();

    for command in ["/setcategory", "/addtocategory", "/removefromcategory", "/bulksend"] {
        let event = env.reply(USER_ID, command, "1 2 3");
        env.send(&event).await;
    }
    for data in [
        callbacks::START_SET_CATEGORY,
        callbacks::START_ADD_TO_CATEGORY,
        callbacks::START_REMOVE_FROM_CATEGORY,
        callbacks::START_BULK_SEND,
        callbacks::CLEAR_USER_LOGS,
        "CATEGORY:3",
        callbacks::CONFIRM,
    ] {
        env.send(&env.callback(USER_ID, data)).await;
    }

    assert_eq!(env.categories_raw(), before);
    assert!(env.messenger.calls().is_empty());

    let set = conversation(CategoryAction::Set);
    let event = env.reply(USER_ID, "/setcategory", "1 2 3");
    assert!(set.offer(&env.deps, &event).await);
    assert_eq!(set.state_of(USER_ID), None);
}

#[tokio::test]
async fn test_bulk_send_continues_past_failed_member() {
    let mut env = TestEnv::new();
    env.messenger.block(ChatTarget::Id(202));

    env.send(&env.callback(ADMIN_ID, callbacks::START_BULK_SEND)).await;
    let message = env.message(ADMIN_ID, "Big news");
    let source = message.message_ref().unwrap();
    env.send(&message).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:5")).await;
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("❓ Category NEWS selected successfully. Are you sure you want to send the provided message to all 3 users in this category?")
    );

    env.messenger.clear();
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    let copies: Vec<ChatTarget> = env
        .messenger
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Copy { to, from, .. } if from == source => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(copies, vec![ChatTarget::Id(201), ChatTarget::Id(202), ChatTarget::Id(203)]);

    let texts = env.messenger.texts();
    assert_eq!(
        texts,
        vec![
            "⚠️ Error: Message sending failed for user ID 202: Forbidden: bot was blocked by the user".to_string(),
            "✅ Message sent to all users in category NEWS successfully!".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_bulk_send_as_reply_skips_payload_prompt() {
    let mut env = TestEnv::new();
    let bulk = conversation(CategoryAction::BulkSend);

    let entry = env.reply(ADMIN_ID, "/bulksend", "Hello everyone");
    let replied = entry.reply_to().unwrap().message_id;
    bulk.offer(&env.deps, &entry).await;
    assert_eq!(bulk.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));

    bulk.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:1")).await;
    bulk.offer(&env.deps, &env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert!(env.messenger.calls().contains(&Call::Copy {
        to: ChatTarget::Id(8),
        from: heraldcore::MessageRef {
            chat_id: ADMIN_ID,
            message_id: replied,
        },
        keyboard: None,
    }));
}

#[tokio::test]
async fn test_add_to_category_keeps_existing_members() {
    let mut env = TestEnv::new();

    let entry = env.reply(ADMIN_ID, "/addtocategory", "42 43");
    env.send(&entry).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:3")).await;
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert_eq!(env.members("3"), vec!["42", "900", "43"]);
    assert!(!env.members("0").contains(&"43".to_string()));
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("✅ Selected list added to category VIP successfully!")
    );
}

#[tokio::test]
async fn test_remove_from_only_category_returns_user_to_default() {
    let mut env = TestEnv::new();
    assert!(!env.members("0").contains(&"42".to_string()));

    let entry = env.reply(ADMIN_ID, "/removefromcategory", "42");
    env.send(&entry).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:3")).await;
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert_eq!(env.members("3"), vec!["900"]);
    assert!(env.members("0").contains(&"42".to_string()));
}

#[tokio::test]
async fn test_unknown_category_reports_error_and_ends() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);

    let entry = env.reply(ADMIN_ID, "/setcategory", "111");
    set.offer(&env.deps, &entry).await;
    set.offer(&env.deps, &env.callback(ADMIN_ID, "CATEGORY:9")).await;

    assert_eq!(set.state_of(ADMIN_ID), None);
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("🚨 An error occurred: category 9 not found")
    );
}

#[tokio::test]
async fn test_sessions_are_per_user() {
    let mut env = TestEnv::new();
    let set = conversation(CategoryAction::Set);

    let entry = env.reply(ADMIN_ID, "/setcategory", "111");
    set.offer(&env.deps, &entry).await;

    // Another user pressing a category button does not drive the admin's session.
    assert!(!set.offer(&env.deps, &env.callback(USER_ID, "CATEGORY:3")).await);
    assert_eq!(set.state_of(ADMIN_ID), Some(CategoryState::AwaitingCategory));
    assert_eq!(set.state_of(USER_ID), None);
}

#[tokio::test]
async fn test_switching_wizards_drops_the_abandoned_session() {
    let mut env = TestEnv::new();

    // Set is opened and left waiting for ids, then the admin picks Add instead.
    env.send(&env.callback(ADMIN_ID, callbacks::START_SET_CATEGORY)).await;
    env.send(&env.callback(ADMIN_ID, callbacks::START_ADD_TO_CATEGORY)).await;

    let ids = env.message(ADMIN_ID, "301");
    env.send(&ids).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:5")).await;
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert_eq!(env.members("5"), vec!["201", "202", "203", "301"]);
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("✅ Selected list added to category NEWS successfully!")
    );
}

#[tokio::test]
async fn test_clear_logs_confirmation_is_not_taken_by_a_stale_wizard() {
    let mut env = TestEnv::new();
    let path = env.deps.settings.user_panel_log_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "boom\n").unwrap();

    let entry = env.reply(ADMIN_ID, "/setcategory", "111");
    env.send(&entry).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:3")).await;

    env.send(&env.callback(ADMIN_ID, callbacks::CLEAR_USER_LOGS)).await;
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert_eq!(env.members("3"), vec!["42", "900"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert_eq!(
        env.messenger.last_text().as_deref(),
        Some("✅ User panel logs cleared successfully!")
    );
}

#[tokio::test]
async fn test_cancel_through_router_ends_the_session_with_one_notice() {
    let mut env = TestEnv::new();
    let before = env.categories_raw();

    env.send(&env.callback(ADMIN_ID, callbacks::START_SET_CATEGORY)).await;
    env.messenger.clear();

    let cancel = env.message(ADMIN_ID, "/cancel");
    env.send(&cancel).await;
    assert_eq!(env.messenger.texts(), vec!["❌ Operation canceled by the user.".to_string()]);

    // Nothing is waiting for ids any more.
    env.messenger.clear();
    let ids = env.message(ADMIN_ID, "301");
    env.send(&ids).await;
    env.send(&env.callback(ADMIN_ID, "CATEGORY:5")).await;
    env.send(&env.callback(ADMIN_ID, callbacks::CONFIRM)).await;

    assert!(env.messenger.calls().is_empty());
    assert_eq!(env.categories_raw(), before);
}
