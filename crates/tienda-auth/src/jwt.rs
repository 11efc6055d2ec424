use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AuthError;

/// Claims carried by a storefront bearer token.
///
/// Only the subject id is trusted from here; name, email and role are
/// re-fetched from the user directory at connect time so a token issued
/// before a role change cannot carry the old role.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub exp: u64,
    pub iat: u64,
}

/// Validate a bearer token against the shared signing secret.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<TokenClaims>(token, &key, &validation).map_err(|e| {
        if matches!(e.kind(), ErrorKind::ExpiredSignature) {
            AuthError::TokenExpired
        } else {
            AuthError::Jwt(e)
        }
    })?;

    Ok(token_data.claims)
}
