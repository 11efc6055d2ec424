use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A single message in a chat session. Immutable once written.
///
/// `created_at` is assigned by the store at append time and is
/// non-decreasing within a session, so history order matches append order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub message: String,
    /// Whether the sender held the admin role at send time.
    pub is_admin: bool,
    pub created_at: jiff::Timestamp,
}
