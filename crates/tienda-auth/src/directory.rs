//! Read view of the storefront's account service.
//!
//! Registration, login and profile edits happen elsewhere; the chat layer
//! only needs current profiles by id, fetched fresh on every handshake.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use tienda_core::models::user::UserProfile;

use crate::error::AuthError;

/// Lookup of current account profiles by id.
#[allow(async_fn_in_trait)]
pub trait UserDirectory: Send + Sync {
    async fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError>;
}

/// Directory backed by a fixed in-memory table. Test double.
#[derive(Default)]
pub struct MemoryDirectory {
    users: HashMap<Uuid, UserProfile>,
}

impl MemoryDirectory {
    pub fn new(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: users.into_iter().map(|u| (u.id, u)).collect(),
        }
    }
}

impl UserDirectory for MemoryDirectory {
    async fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError> {
        Ok(self.users.get(&id).cloned())
    }
}

/// Directory reading the `users/{id}.json` documents the account service
/// maintains under the shared data directory.
///
/// Every lookup reads from disk, so a role change lands on the very next
/// handshake.
pub struct FileDirectory {
    dir: PathBuf,
}

impl FileDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl UserDirectory for FileDirectory {
    async fn find_user(&self, id: Uuid) -> Result<Option<UserProfile>, AuthError> {
        let path = self.dir.join("users").join(format!("{id}.json"));
        let raw = match fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::Directory(e.to_string())),
        };
        let profile =
            serde_json::from_slice(&raw).map_err(|e| AuthError::Directory(e.to_string()))?;
        Ok(Some(profile))
    }
}
