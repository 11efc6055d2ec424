//! tienda-core
//!
//! Pure domain types and the real-time wire protocol. No framework or I/O
//! dependency — this is the shared vocabulary of the Tienda chat system.

pub mod error;
pub mod events;
pub mod models;
