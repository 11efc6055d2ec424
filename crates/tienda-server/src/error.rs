use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified error type for HTTP handlers, including the websocket upgrade.
#[derive(Debug)]
#[allow(dead_code)]
pub enum ApiError {
    Unauthorized,
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // One generic body for every authentication failure; the
            // specific cause is logged server-side only.
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "authentication error".to_string()),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<tienda_auth::error::AuthError> for ApiError {
    fn from(e: tienda_auth::error::AuthError) -> Self {
        tracing::warn!(error = %e, "connection handshake rejected");
        ApiError::Unauthorized
    }
}
