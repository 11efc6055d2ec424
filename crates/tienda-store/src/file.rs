//! Durable chat store backed by JSON documents and JSONL message logs.
//!
//! Sessions live at `sessions/{id}.json`, history at
//! `messages/{id}.jsonl`. Session writes go through a temp file + rename;
//! messages are appended as single JSONL lines. An in-memory index of
//! session summaries is hydrated from disk on open and kept in step under
//! a write lock, which also serializes the insert-then-summary pair for
//! each message.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use jiff::Timestamp;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use uuid::Uuid;

use tienda_core::models::chat::{ChatSession, ChatStatus};
use tienda_core::models::message::ChatMessage;
use tienda_core::models::user::UserProfile;

use crate::error::StoreError;
use crate::paths;
use crate::store::{ChatStore, NewMessage};

#[derive(Default)]
struct Index {
    sessions: HashMap<Uuid, ChatSession>,
    by_user: HashMap<Uuid, Uuid>,
}

pub struct FileChatStore {
    dir: PathBuf,
    inner: RwLock<Index>,
}

impl FileChatStore {
    /// Open a store rooted at `dir`, creating the layout if needed and
    /// hydrating the session index from the documents already there.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(dir.join(paths::SESSIONS_DIR)).await?;
        fs::create_dir_all(dir.join(paths::MESSAGES_DIR)).await?;

        let mut index = Index::default();
        let mut entries = fs::read_dir(dir.join(paths::SESSIONS_DIR)).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let raw = fs::read(&path).await?;
            let session: ChatSession = serde_json::from_slice(&raw)?;
            index.by_user.insert(session.user_id, session.id);
            index.sessions.insert(session.id, session);
        }

        tracing::debug!(dir = %dir.display(), sessions = index.sessions.len(), "chat store opened");
        Ok(Self {
            dir,
            inner: RwLock::new(index),
        })
    }

    async fn write_session(&self, session: &ChatSession) -> Result<(), StoreError> {
        let path = self.dir.join(paths::session(session.id));
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(session)?;

        // Write to a temp file then rename for atomicity
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn append_line(&self, message: &ChatMessage) -> Result<(), StoreError> {
        let path = self.dir.join(paths::session_messages(message.chat_id));
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(&line).await?;
        Ok(())
    }
}

impl ChatStore for FileChatStore {
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
        self.write_session(&session).await?;
        inner.by_user.insert(profile.id, session.id);
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
            .get(&chat_id)
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

        // Message row first, then the summary that points at it.
        self.append_line(&message).await?;

        let mut updated = session.clone();
        updated.last_message = Some(message.message.clone());
        updated.updated_at = created_at;
        updated.status = ChatStatus::Active;
        self.write_session(&updated).await?;
        inner.sessions.insert(chat_id, updated);
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
        if !inner.sessions.contains_key(&chat_id) {
            return Err(StoreError::SessionNotFound { id: chat_id });
        }

        let path = self.dir.join(paths::session_messages(chat_id));
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut messages = Vec::new();
        for line in raw.lines().filter(|line| !line.is_empty()) {
            messages.push(serde_json::from_str(line)?);
        }
        Ok(messages)
    }
}
