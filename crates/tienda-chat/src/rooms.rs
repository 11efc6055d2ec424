//! Process-local room membership and event fan-out.

use std::collections::HashMap;

use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use tienda_core::events::ServerEvent;

/// Id of one live connection. Each socket gets a fresh one at upgrade.
pub type ConnectionId = Uuid;

/// Identifier of a live-delivery broadcast group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    /// One room per chat session, keyed by the session id.
    Session(Uuid),
    /// The shared room every admin connection joins.
    Admins,
}

/// Room → member-set table, rebuilt from scratch on restart.
///
/// Membership mutates on every connect/join/disconnect while broadcasts
/// read it concurrently; the lock guarantees a broadcast sees members
/// either fully joined or not at all.
#[derive(Default)]
pub struct RoomRouter {
    rooms: RwLock<HashMap<Room, HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>>>,
}

impl RoomRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to a room. Idempotent — joining twice leaves a
    /// single membership.
    pub async fn join(
        &self,
        room: Room,
        conn: ConnectionId,
        tx: mpsc::UnboundedSender<ServerEvent>,
    ) {
        self.rooms
            .write()
            .await
            .entry(room)
            .or_default()
            .insert(conn, tx);
    }

    /// Deliver an event to every current member of a room.
    ///
    /// Best-effort, at-most-once: a member whose channel is gone is
    /// skipped without blocking delivery to the rest.
    pub async fn broadcast(&self, room: Room, event: &ServerEvent) {
        let rooms = self.rooms.read().await;
        let Some(members) = rooms.get(&room) else {
            return;
        };
        for (conn, tx) in members {
            if tx.send(event.clone()).is_err() {
                debug!(connection = %conn, ?room, "skipping dead room member");
            }
        }
    }

    /// Drop a connection from every room it joined. Called once when the
    /// socket goes away; no further delivery is attempted after this.
    pub async fn disconnect(&self, conn: ConnectionId) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, members| {
            members.remove(&conn);
            !members.is_empty()
        });
    }

    /// Current member count of a room.
    pub async fn member_count(&self, room: Room) -> usize {
        self.rooms
            .read()
            .await
            .get(&room)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}
