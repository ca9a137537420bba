//! Wire protocol for the pontoon table server.
//!
//! Messages travel in both directions as JSON envelopes with a `type` tag and
//! a type-dependent `data` payload. Server-reported faults are the one
//! exception: they carry a top-level `error` string instead of a payload.
//! Field names are camelCase on the wire.

pub mod messages;
pub mod types;

pub use messages::{ClientMessage, DecodeError, ServerMessage};
pub use types::{ChatMessage, PlayerSnapshot, PlayerStatus, RoomInfo, RoundResult, HIDDEN_CARD};
