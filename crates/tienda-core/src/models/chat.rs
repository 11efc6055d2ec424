use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted support-chat session between one customer and support staff.
///
/// Created lazily on the customer's first connection, updated on every
/// message so the admin list can be ordered by recency. There is exactly
/// one session per customer id.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    /// Body of the most recent message, if any message was ever sent.
    pub last_message: Option<String>,
    /// Timestamp of the most recent activity. Seeded at creation so a
    /// session with no messages still sorts deterministically.
    pub updated_at: jiff::Timestamp,
    pub status: ChatStatus,
    pub created_at: jiff::Timestamp,
}

/// Lifecycle status of a chat session.
///
/// Only `Active` is assigned today; `Closed` is reserved for an explicit
/// archive flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ChatStatus {
    Active,
    Closed,
}
