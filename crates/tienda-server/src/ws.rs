//! Websocket handshake and per-connection socket loop.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use tienda_auth::error::AuthError;
use tienda_auth::gate;
use tienda_chat::connection::Connection;
use tienda_core::events::{ClientEvent, ServerEvent};
use tienda_core::models::user::UserProfile;

use crate::error::ApiError;
use crate::state::AppState;

/// The bearer credential arrives out-of-band on the upgrade request, not
/// per-event. Browsers cannot set headers on a websocket, so it rides a
/// query parameter.
#[derive(Deserialize)]
pub struct WsParams {
    token: Option<String>,
}

/// Upgrade handler. Authentication happens *before* the upgrade: a bad
/// credential is refused with 401 and no chat state is ever touched.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    let token = params.token.ok_or(AuthError::MissingToken)?;
    let profile = gate::authenticate(&token, &state.jwt_secret, state.directory.as_ref()).await?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, profile)))
}

async fn handle_socket(socket: WebSocket, state: AppState, profile: UserProfile) {
    let conn_id = Uuid::new_v4();
    info!(connection = %conn_id, user = %profile.id, role = ?profile.role, "chat connection opened");

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Events for this client funnel through one channel; a writer task
    // owns the sink so room broadcasts never block on a slow socket.
    let (tx, mut rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match ServerEvent::to_json(&event) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "failed to encode server event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                debug!("websocket send failed, client disconnected");
                break;
            }
        }
    });

    let connection = match Connection::connect(
        state.manager.clone(),
        state.view.clone(),
        profile,
        conn_id,
        tx,
    )
    .await
    {
        Ok(connection) => connection,
        Err(e) => {
            warn!(connection = %conn_id, error = %e, "connect transition failed");
            state.rooms.disconnect(conn_id).await;
            writer.abort();
            return;
        }
    };

    while let Some(result) = ws_rx.next().await {
        let raw = match result {
            Ok(Message::Text(raw)) => raw,
            Ok(Message::Close(_)) => {
                debug!(connection = %conn_id, "client sent close frame");
                break;
            }
            // Ping/pong and binary frames carry no chat events.
            Ok(_) => continue,
            Err(e) => {
                warn!(connection = %conn_id, error = %e, "websocket error");
                break;
            }
        };

        let event = match ClientEvent::from_json(&raw) {
            Ok(event) => event,
            Err(e) => {
                warn!(connection = %conn_id, error = %e, "ignoring malformed client event");
                continue;
            }
        };

        connection.handle(event).await;
    }

    // No further delivery once the socket is gone.
    state.rooms.disconnect(conn_id).await;
    writer.abort();
    info!(connection = %conn_id, "chat connection closed");
}
