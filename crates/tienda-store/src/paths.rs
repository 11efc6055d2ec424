//! On-disk layout of the chat data directory.
//!
//! Pure path functions — no I/O. These define the canonical layout of
//! documents under the store's data directory.

use uuid::Uuid;

pub fn session(id: Uuid) -> String {
    format!("sessions/{id}.json")
}

pub fn session_messages(id: Uuid) -> String {
    format!("messages/{id}.jsonl")
}

pub const SESSIONS_DIR: &str = "sessions";

pub const MESSAGES_DIR: &str = "messages";
