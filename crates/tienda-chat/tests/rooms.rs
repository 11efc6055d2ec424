//! Room membership and fan-out tests.

use tokio::sync::mpsc;
use uuid::Uuid;

use tienda_chat::rooms::{Room, RoomRouter};
use tienda_core::events::ServerEvent;

fn ping(chat_id: Uuid) -> ServerEvent {
    ServerEvent::NewUserMessage { chat_id }
}

#[tokio::test]
async fn broadcast_reaches_every_member_of_the_room() {
    let rooms = RoomRouter::new();
    let room = Room::Session(Uuid::new_v4());

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    rooms.join(room, Uuid::new_v4(), tx_a).await;
    rooms.join(room, Uuid::new_v4(), tx_b).await;

    rooms.broadcast(room, &ping(Uuid::new_v4())).await;

    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_ok());
}

#[tokio::test]
async fn rooms_are_isolated_from_each_other() {
    let rooms = RoomRouter::new();
    let room_a = Room::Session(Uuid::new_v4());
    let room_b = Room::Session(Uuid::new_v4());

    let (tx_a, mut rx_a) = mpsc::unbounded_channel();
    let (tx_b, mut rx_b) = mpsc::unbounded_channel();
    rooms.join(room_a, Uuid::new_v4(), tx_a).await;
    rooms.join(room_b, Uuid::new_v4(), tx_b).await;

    rooms.broadcast(room_a, &ping(Uuid::new_v4())).await;

    assert!(rx_a.try_recv().is_ok());
    assert!(rx_b.try_recv().is_err());
}

#[tokio::test]
async fn the_admin_room_is_distinct_from_session_rooms() {
    let rooms = RoomRouter::new();
    let session_room = Room::Session(Uuid::new_v4());

    let (tx_admin, mut rx_admin) = mpsc::unbounded_channel();
    rooms.join(Room::Admins, Uuid::new_v4(), tx_admin).await;

    rooms.broadcast(session_room, &ping(Uuid::new_v4())).await;
    assert!(rx_admin.try_recv().is_err());
}

#[tokio::test]
async fn joining_twice_keeps_a_single_membership() {
    let rooms = RoomRouter::new();
    let room = Room::Session(Uuid::new_v4());
    let conn = Uuid::new_v4();

    let (tx, mut rx) = mpsc::unbounded_channel();
    rooms.join(room, conn, tx.clone()).await;
    rooms.join(room, conn, tx).await;

    assert_eq!(rooms.member_count(room).await, 1);

    rooms.broadcast(room, &ping(Uuid::new_v4())).await;
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err(), "no duplicated delivery after double join");
}

#[tokio::test]
async fn disconnect_removes_the_connection_from_every_room() {
    let rooms = RoomRouter::new();
    let room_a = Room::Session(Uuid::new_v4());
    let conn = Uuid::new_v4();

    let (tx, mut rx) = mpsc::unbounded_channel();
    rooms.join(room_a, conn, tx.clone()).await;
    rooms.join(Room::Admins, conn, tx).await;

    rooms.disconnect(conn).await;
    assert_eq!(rooms.member_count(room_a).await, 0);
    assert_eq!(rooms.member_count(Room::Admins).await, 0);

    rooms.broadcast(room_a, &ping(Uuid::new_v4())).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn a_dead_member_does_not_block_the_rest() {
    let rooms = RoomRouter::new();
    let room = Room::Session(Uuid::new_v4());

    let (tx_dead, rx_dead) = mpsc::unbounded_channel();
    let (tx_live, mut rx_live) = mpsc::unbounded_channel();
    rooms.join(room, Uuid::new_v4(), tx_dead).await;
    rooms.join(room, Uuid::new_v4(), tx_live).await;
    drop(rx_dead);

    rooms.broadcast(room, &ping(Uuid::new_v4())).await;
    assert!(rx_live.try_recv().is_ok());
}
