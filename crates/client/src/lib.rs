//! Pontoon client library.
//!
//! Connection lifecycle, message routing, and view reconciliation for the
//! pontoon table server. The server owns all game state; this crate renders
//! what it pushes and forwards user intents. The binary in `main.rs` is the
//! composition root.

pub mod application;
pub mod infrastructure;
pub mod launch;
pub mod session;
pub mod state;
pub mod ui;
