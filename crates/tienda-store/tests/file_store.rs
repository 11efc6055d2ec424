//! Behavior tests for the file-backed chat store, including what the
//! memory backend cannot show: documents surviving a reopen.

use uuid::Uuid;

use tienda_core::models::user::{Role, UserProfile};
use tienda_store::error::StoreError;
use tienda_store::file::FileChatStore;
use tienda_store::store::{ChatStore, NewMessage};

fn customer(name: &str) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: Role::User,
    }
}

fn text_from(profile: &UserProfile, body: &str) -> NewMessage {
    NewMessage {
        sender_id: profile.id,
        sender_name: profile.name.clone(),
        message: body.to_string(),
        is_admin: false,
    }
}

#[tokio::test]
async fn repeated_connects_resolve_to_one_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileChatStore::open(dir.path()).await.expect("open");
    let ana = customer("Ana");

    let first = store.find_or_create_session(&ana).await.expect("create");
    let second = store.find_or_create_session(&ana).await.expect("lookup");

    assert_eq!(first.id, second.id);
    assert_eq!(store.list_sessions().await.expect("list").len(), 1);
}

#[tokio::test]
async fn sessions_and_messages_survive_a_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let ana = customer("Ana");
    let session_id = {
        let store = FileChatStore::open(dir.path()).await.expect("open");
        let session = store.find_or_create_session(&ana).await.expect("create");
        store
            .append_message(session.id, text_from(&ana, "hola"))
            .await
            .expect("append");
        store
            .append_message(session.id, text_from(&ana, "sigue ahi?"))
            .await
            .expect("append");
        session.id
    };

    let reopened = FileChatStore::open(dir.path()).await.expect("reopen");

    // Same session resolves for the same customer, not a fresh one.
    let resolved = reopened.find_or_create_session(&ana).await.expect("lookup");
    assert_eq!(resolved.id, session_id);
    assert_eq!(resolved.last_message.as_deref(), Some("sigue ahi?"));

    let messages = reopened.session_messages(session_id).await.expect("history");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message, "hola");
    assert_eq!(messages[1].message, "sigue ahi?");
}

#[tokio::test]
async fn summary_always_matches_the_latest_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileChatStore::open(dir.path()).await.expect("open");
    let ana = customer("Ana");
    let session = store.find_or_create_session(&ana).await.expect("create");

    let appended = store
        .append_message(session.id, text_from(&ana, "hola"))
        .await
        .expect("append");

    let current = store
        .find_session(session.id)
        .await
        .expect("find")
        .expect("session exists");
    assert_eq!(current.last_message.as_deref(), Some("hola"));
    assert_eq!(current.updated_at, appended.created_at);
}

#[tokio::test]
async fn session_with_no_messages_has_empty_history() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileChatStore::open(dir.path()).await.expect("open");
    let ana = customer("Ana");
    let session = store.find_or_create_session(&ana).await.expect("create");

    let messages = store.session_messages(session.id).await.expect("history");
    assert!(messages.is_empty());
}

#[tokio::test]
async fn unknown_session_is_refused() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileChatStore::open(dir.path()).await.expect("open");
    let bogus = Uuid::new_v4();

    assert!(matches!(
        store.session_messages(bogus).await,
        Err(StoreError::SessionNotFound { .. })
    ));
    assert!(matches!(
        store
            .append_message(bogus, text_from(&customer("Ana"), "hi"))
            .await,
        Err(StoreError::SessionNotFound { .. })
    ));
}

#[tokio::test]
async fn list_orders_sessions_by_recency() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileChatStore::open(dir.path()).await.expect("open");
    let ana = customer("Ana");
    let ben = customer("Ben");
    let ana_session = store.find_or_create_session(&ana).await.expect("create");
    let ben_session = store.find_or_create_session(&ben).await.expect("create");

    store
        .append_message(ana_session.id, text_from(&ana, "first"))
        .await
        .expect("append");
    store
        .append_message(ben_session.id, text_from(&ben, "second"))
        .await
        .expect("append");

    let listed = store.list_sessions().await.expect("list");
    assert_eq!(listed[0].id, ben_session.id);
    assert_eq!(listed[1].id, ana_session.id);
}
