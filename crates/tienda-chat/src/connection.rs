//! Per-connection event handling, specialized by role.
//!
//! The role split happens exactly once, at connect time, when the
//! authenticated profile picks the variant. Events a role does not
//! support are dropped without a reply — nothing may leak whether a
//! session exists or who owns it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error};
use uuid::Uuid;

use tienda_core::events::{ClientEvent, ServerEvent};
use tienda_core::models::user::{Role, UserProfile};
use tienda_store::store::ChatStore;

use crate::error::ChatError;
use crate::rooms::ConnectionId;
use crate::session::ChatSessionManager;
use crate::supervision::SupervisionView;

/// One authenticated live connection.
pub enum Connection<S> {
    User(UserConnection<S>),
    Admin(AdminConnection<S>),
}

impl<S: ChatStore> Connection<S> {
    /// Run the connect transition for this identity: resolve chat state,
    /// join the initial rooms, emit the initial events, and fix the
    /// connection's behavior for the rest of its life.
    pub async fn connect(
        manager: Arc<ChatSessionManager<S>>,
        view: Arc<SupervisionView<S>>,
        profile: UserProfile,
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) -> Result<Self, ChatError> {
        match profile.role {
            Role::User => {
                let session = manager.open_user_session(&profile, conn, tx).await?;
                Ok(Connection::User(UserConnection {
                    manager,
                    profile,
                    conn,
                    chat_id: session.id,
                }))
            }
            Role::Admin => {
                manager.connect_admin(conn, tx.clone()).await?;
                Ok(Connection::Admin(AdminConnection {
                    manager,
                    view,
                    profile,
                    conn,
                    tx,
                }))
            }
        }
    }

    /// Dispatch one client event. Failures are contained here: logged,
    /// never propagated to the socket loop.
    pub async fn handle(&self, event: ClientEvent) {
        match self {
            Connection::User(user) => user.handle(event).await,
            Connection::Admin(admin) => admin.handle(event).await,
        }
    }
}

/// A customer connection. Bound to its own session from the moment it
/// connects; it can write there and nowhere else.
pub struct UserConnection<S> {
    manager: Arc<ChatSessionManager<S>>,
    profile: UserProfile,
    conn: ConnectionId,
    chat_id: Uuid,
}

impl<S: ChatStore> UserConnection<S> {
    async fn handle(&self, event: ClientEvent) {
        match event {
            ClientEvent::SendMessage { chat_id, message } => {
                if chat_id != self.chat_id {
                    debug!(
                        connection = %self.conn,
                        user = %self.profile.id,
                        "dropping send_message for a session this user does not own"
                    );
                    return;
                }
                if let Err(e) = self
                    .manager
                    .user_message(self.chat_id, &self.profile, message)
                    .await
                {
                    error!(error = %e, chat = %self.chat_id, "send_message failed");
                }
            }
            // Admin-only reads; ignored without a reply.
            ClientEvent::GetChats {} | ClientEvent::GetMessages { .. } => {}
        }
    }
}

/// An admin connection. Sees the shared admin room from connect, and
/// accumulates session-room memberships as it pulls histories.
pub struct AdminConnection<S> {
    manager: Arc<ChatSessionManager<S>>,
    view: Arc<SupervisionView<S>>,
    profile: UserProfile,
    conn: ConnectionId,
    tx: mpsc::UnboundedSender<ServerEvent>,
}

impl<S: ChatStore> AdminConnection<S> {
    async fn handle(&self, event: ClientEvent) {
        match event {
            ClientEvent::SendMessage { chat_id, message } => {
                if let Err(e) = self
                    .manager
                    .admin_message(chat_id, &self.profile, message)
                    .await
                {
                    error!(error = %e, chat = %chat_id, "admin send_message failed");
                }
            }
            ClientEvent::GetChats {} => match self.view.chat_list().await {
                Ok(chats) => {
                    let _ = self.tx.send(ServerEvent::AdminChatList { chats });
                }
                Err(e) => error!(error = %e, "get_chats failed"),
            },
            ClientEvent::GetMessages { chat_id } => {
                match self
                    .view
                    .chat_history(chat_id, self.conn, self.tx.clone())
                    .await
                {
                    Ok(messages) => {
                        let _ = self.tx.send(ServerEvent::ChatHistory { messages });
                    }
                    Err(e) => error!(error = %e, chat = %chat_id, "get_messages failed"),
                }
            }
        }
    }
}
