//! Real-time wire protocol for the support-chat channel.
//!
//! Events are internally-tagged JSON (`{"type": "send_message", ...}`),
//! one enum per direction. Payload fields are camelCase on the wire to
//! match the storefront frontend.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::chat::ChatSession;
use crate::models::message::ChatMessage;

// ---------------------------------------------------------------------------
// Client -> Server
// ---------------------------------------------------------------------------

/// Events sent by a connected client.
///
/// `get_chats` and `get_messages` are admin operations; connections with
/// the user role ignore them without a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Submit a chat message to a session.
    SendMessage { chat_id: Uuid, message: String },

    /// Request the recency-ordered session summary list.
    GetChats {},

    /// Request one session's history and subscribe to its live traffic.
    GetMessages { chat_id: Uuid },
}

// ---------------------------------------------------------------------------
// Server -> Client
// ---------------------------------------------------------------------------

/// Events sent by the server, either to one connection or fanned out to a
/// room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// The connecting customer's session is resolved and its room joined.
    ChatReady { chat_id: Uuid },

    /// Fan-out of a persisted message to the session's room.
    ReceiveMessage {
        chat_id: Uuid,
        sender_id: Uuid,
        sender_name: String,
        message: String,
        created_at: jiff::Timestamp,
    },

    /// Refreshed session summary list, ordered by recency.
    AdminChatList { chats: Vec<ChatSession> },

    /// Lightweight signal that a customer wrote in some session.
    NewUserMessage { chat_id: Uuid },

    /// Full ordered history of one session.
    ChatHistory { messages: Vec<ChatMessage> },
}

impl ClientEvent {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl ServerEvent {
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
