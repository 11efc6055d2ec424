use std::sync::Arc;

use tienda_auth::directory::FileDirectory;
use tienda_chat::rooms::RoomRouter;
use tienda_chat::session::ChatSessionManager;
use tienda_chat::supervision::SupervisionView;
use tienda_store::file::FileChatStore;

/// Shared application state, injected into all handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<ChatSessionManager<FileChatStore>>,
    pub view: Arc<SupervisionView<FileChatStore>>,
    pub rooms: Arc<RoomRouter>,
    pub directory: Arc<FileDirectory>,
    pub jwt_secret: String,
}
