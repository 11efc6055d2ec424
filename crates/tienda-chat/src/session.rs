//! The chat session state machine.

use std::sync::Arc;

use tokio::sync::mpsc;
use uuid::Uuid;

use tienda_core::events::ServerEvent;
use tienda_core::models::chat::ChatSession;
use tienda_core::models::message::ChatMessage;
use tienda_core::models::user::UserProfile;
use tienda_store::store::{ChatStore, NewMessage};

use crate::error::ChatError;
use crate::rooms::{ConnectionId, Room, RoomRouter};

/// Core of the chat subsystem: resolves sessions on connect, persists
/// messages, and decides who gets notified.
///
/// Both the store and the room table are injected; the manager owns no
/// ambient state of its own.
pub struct ChatSessionManager<S> {
    store: Arc<S>,
    rooms: Arc<RoomRouter>,
}

impl<S: ChatStore> ChatSessionManager<S> {
    pub fn new(store: Arc<S>, rooms: Arc<RoomRouter>) -> Self {
        Self { store, rooms }
    }

    /// Connect transition for a customer: look up or create their
    /// session, join them to its room and emit the ready signal to this
    /// connection only.
    pub async fn open_user_session(
        &self,
        profile: &UserProfile,
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<ChatSession, ChatError> {
        let session = self.store.find_or_create_session(profile).await?;
        self.rooms
            .join(Room::Session(session.id), conn, tx.clone())
            .await;
        let _ = tx.send(ServerEvent::ChatReady {
            chat_id: session.id,
        });
        Ok(session)
    }

    /// Connect transition for an admin: join the shared room and push the
    /// current session list to this connection.
    pub async fn connect_admin(
        &self,
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<(), ChatError> {
        self.rooms.join(Room::Admins, conn, tx.clone()).await;
        let chats = self.store.list_sessions().await?;
        let _ = tx.send(ServerEvent::AdminChatList { chats });
        Ok(())
    }

    /// A customer message: persist, fan out to the session room, then
    /// refresh every admin's list and ping them so sessions they are not
    /// watching still re-order.
    pub async fn user_message(
        &self,
        chat_id: Uuid,
        profile: &UserProfile,
        body: String,
    ) -> Result<(), ChatError> {
        let message = self
            .store
            .append_message(
                chat_id,
                NewMessage {
                    sender_id: profile.id,
                    sender_name: profile.name.clone(),
                    message: body,
                    is_admin: false,
                },
            )
            .await?;
        self.rooms
            .broadcast(Room::Session(chat_id), &receive_event(&message))
            .await;

        let chats = self.store.list_sessions().await?;
        self.rooms
            .broadcast(Room::Admins, &ServerEvent::AdminChatList { chats })
            .await;
        self.rooms
            .broadcast(Room::Admins, &ServerEvent::NewUserMessage { chat_id })
            .await;
        Ok(())
    }

    /// An admin message: same persist-and-fan-out, but no list refresh —
    /// admins already see the session they are writing in.
    pub async fn admin_message(
        &self,
        chat_id: Uuid,
        profile: &UserProfile,
        body: String,
    ) -> Result<(), ChatError> {
        let message = self
            .store
            .append_message(
                chat_id,
                NewMessage {
                    sender_id: profile.id,
                    sender_name: profile.name.clone(),
                    message: body,
                    is_admin: true,
                },
            )
            .await?;
        self.rooms
            .broadcast(Room::Session(chat_id), &receive_event(&message))
            .await;
        Ok(())
    }
}

/// Broadcast happens only after the persistence write commits, so the
/// fan-out payload is built from the persisted row.
fn receive_event(message: &ChatMessage) -> ServerEvent {
    ServerEvent::ReceiveMessage {
        chat_id: message.chat_id,
        sender_id: message.sender_id,
        sender_name: message.sender_name.clone(),
        message: message.message.clone(),
        created_at: message.created_at,
    }
}
