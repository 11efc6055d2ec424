//! Read path for admin supervision.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use tienda_core::events::ServerEvent;
use tienda_core::models::chat::ChatSession;
use tienda_core::models::message::ChatMessage;
use tienda_store::error::StoreError;
use tienda_store::store::ChatStore;

use crate::error::ChatError;
use crate::rooms::{ConnectionId, Room, RoomRouter};

/// The recency-ordered session list and per-session history, plus the
/// live subscription that comes with pulling a history.
pub struct SupervisionView<S> {
    store: Arc<S>,
    rooms: Arc<RoomRouter>,
}

impl<S: ChatStore> SupervisionView<S> {
    pub fn new(store: Arc<S>, rooms: Arc<RoomRouter>) -> Self {
        Self { store, rooms }
    }

    /// Every session, most recently active first.
    pub async fn chat_list(&self) -> Result<Vec<ChatSession>, ChatError> {
        Ok(self.store.list_sessions().await?)
    }

    /// Join the connection to the session's room, then return the full
    /// ordered history.
    ///
    /// Joining before the read means nothing sent after the returned
    /// history is missed — it arrives live instead. Safe to call again
    /// for the same session; the join is idempotent.
    pub async fn chat_history(
        &self,
        chat_id: Uuid,
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<Vec<ChatMessage>, ChatError> {
        if self.store.find_session(chat_id).await?.is_none() {
            return Err(StoreError::SessionNotFound { id: chat_id }.into());
        }
        self.rooms.join(Room::Session(chat_id), conn, tx).await;
        Ok(self.store.session_messages(chat_id).await?)
    }
}
