use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Role attached to a storefront account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Role {
    User,
    Admin,
}

/// Current profile of a storefront account, as returned by the user
/// directory.
///
/// Fetched fresh at connect time so a stale bearer token cannot carry an
/// outdated name or role onto a connection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}
