use std::collections::HashMap;

use jiff::Timestamp;
use tokio::sync::RwLock;
use uuid::Uuid;

use tienda_core::models::chat::{ChatSession, ChatStatus};
use tienda_core::models::message::ChatMessage;
use tienda_core::models::user::UserProfile;

use crate::error::StoreError;
use crate::store::{ChatStore, NewMessage};

#[derive(Default)]
struct Inner {
    sessions: HashMap<Uuid, ChatSession>,
    by_user: HashMap<Uuid, Uuid>,
    messages: HashMap<Uuid, Vec<ChatMessage>>,
}

/// Process-local chat store. Not durable — used by tests and embedded
/// setups where the file backend is overkill.
#[derive(Default)]
pub struct MemoryChatStore {
    inner: RwLock<Inner>,
}

impl MemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChatStore for MemoryChatStore {
    async fn find_or_create_session(
        &self,
        profile: &UserProfile,
    ) -> Result<ChatSession, StoreError> {
        let mut inner = self.inner.write().await;
        if let Some(session_id) = inner.by_user.get(&profile.id)
            && let Some(session) = inner.sessions.get(session_id)
        {
            return Ok(session.clone());
        }

        let now = Timestamp::now();
        let session = ChatSession {
            id: Uuid::new_v4(),
            user_id: profile.id,
            user_name: profile.name.clone(),
            user_email: profile.email.clone(),
            last_message: None,
            updated_at: now,
            status: ChatStatus::Active,
            created_at: now,
        };
        inner.by_user.insert(profile.id, session.id);
        inner.messages.insert(session.id, Vec::new());
        inner.sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn find_session(&self, id: Uuid) -> Result<Option<ChatSession>, StoreError> {
        Ok(self.inner.read().await.sessions.get(&id).cloned())
    }

    async fn append_message(
        &self,
        chat_id: Uuid,
        new: NewMessage,
    ) -> Result<ChatMessage, StoreError> {
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .get_mut(&chat_id)
            .ok_or(StoreError::SessionNotFound { id: chat_id })?;

        // Clamp so history stays in append order even if the clock steps back.
        let created_at = Timestamp::now().max(session.updated_at);
        let message = ChatMessage {
            id: Uuid::new_v4(),
            chat_id,
            sender_id: new.sender_id,
            sender_name: new.sender_name,
            message: new.message,
            is_admin: new.is_admin,
            created_at,
        };

        session.last_message = Some(message.message.clone());
        session.updated_at = created_at;
        session.status = ChatStatus::Active;
        inner.messages.entry(chat_id).or_default().push(message.clone());
        Ok(message)
    }

    async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError> {
        let inner = self.inner.read().await;
        let mut sessions: Vec<ChatSession> = inner.sessions.values().cloned().collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn session_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, StoreError> {
        let inner = self.inner.read().await;
        inner
            .messages
            .get(&chat_id)
            .cloned()
            .ok_or(StoreError::SessionNotFound { id: chat_id })
    }
}
