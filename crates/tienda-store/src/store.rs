//! The persistence boundary for chat sessions and messages.

use uuid::Uuid;

use tienda_core::models::chat::ChatSession;
use tienda_core::models::message::ChatMessage;
use tienda_core::models::user::UserProfile;

use crate::error::StoreError;

/// Input for appending a message. The store assigns the id and the
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    pub is_admin: bool,
}

/// Durable source of truth for chat sessions and messages.
///
/// `append_message` is one sequential unit per message: the inserted row
/// and the session's summary fields (`last_message`, `updated_at`,
/// `status`) may never be observed out of step with each other.
#[allow(async_fn_in_trait)]
pub trait ChatStore: Send + Sync {
    /// Find the session owned by `profile.id`, creating it if absent.
    /// There is never more than one session per user id.
    async fn find_or_create_session(
        &self,
        profile: &UserProfile,
    ) -> Result<ChatSession, StoreError>;

    async fn find_session(&self, id: Uuid) -> Result<Option<ChatSession>, StoreError>;

    /// Append a message to an existing session and update the session's
    /// summary in the same unit. The assigned creation timestamp is
    /// non-decreasing within the session.
    async fn append_message(
        &self,
        chat_id: Uuid,
        new: NewMessage,
    ) -> Result<ChatMessage, StoreError>;

    /// All sessions, most recently active first.
    async fn list_sessions(&self) -> Result<Vec<ChatSession>, StoreError>;

    /// Full history of one session, in creation order.
    async fn session_messages(&self, chat_id: Uuid) -> Result<Vec<ChatMessage>, StoreError>;
}
