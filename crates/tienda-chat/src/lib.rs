//! tienda-chat
//!
//! The live support-chat core: room fan-out, the per-connection state
//! machine, and the admin supervision view. Room membership is a
//! process-local cache of who wants live updates; the store stays the
//! source of truth.

pub mod connection;
pub mod error;
pub mod rooms;
pub mod session;
pub mod supervision;
