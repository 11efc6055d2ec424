use tracing::debug;

use tienda_core::models::user::UserProfile;

use crate::directory::UserDirectory;
use crate::error::AuthError;
use crate::jwt;

/// Authenticate a connection handshake.
///
/// Verifies the bearer token, then resolves the subject against the user
/// directory so the connection carries the account's current name, email
/// and role rather than whatever the token was minted with. Fails closed:
/// any missing piece rejects the connection before it can join a room or
/// touch chat state.
pub async fn authenticate<D: UserDirectory>(
    token: &str,
    secret: &str,
    directory: &D,
) -> Result<UserProfile, AuthError> {
    let claims = jwt::validate_token(token, secret)?;
    let profile = directory
        .find_user(claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound(claims.sub))?;

    debug!(user = %profile.id, role = ?profile.role, "handshake authenticated");
    Ok(profile)
}
