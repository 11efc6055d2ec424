use std::env;
use std::sync::Arc;

use axum::middleware as axum_mw;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod state;
mod ws;

use state::AppState;
use tienda_auth::directory::FileDirectory;
use tienda_chat::rooms::RoomRouter;
use tienda_chat::session::ChatSessionManager;
use tienda_chat::supervision::SupervisionView;
use tienda_store::file::FileChatStore;

async fn health_check() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let addr = env::var("TIENDA_ADDR").unwrap_or_else(|_| "127.0.0.1:4000".to_string());
    let data_dir = env::var("TIENDA_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let jwt_secret = env::var("TIENDA_JWT_SECRET")
        .map_err(|_| eyre::eyre!("TIENDA_JWT_SECRET must be set"))?;

    let store = Arc::new(FileChatStore::open(&data_dir).await?);
    let rooms = Arc::new(RoomRouter::new());
    let state = AppState {
        manager: Arc::new(ChatSessionManager::new(store.clone(), rooms.clone())),
        view: Arc::new(SupervisionView::new(store, rooms.clone())),
        rooms,
        directory: Arc::new(FileDirectory::new(&data_dir)),
        jwt_secret,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws::ws_handler))
        .layer(axum_mw::from_fn(middleware::request_log))
        .layer(cors)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "tienda chat server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
