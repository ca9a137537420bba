//! Application layer: session orchestration and the events it emits.

pub mod events;
pub mod session_service;

pub use events::{GameEvent, SessionEvent};
pub use session_service::SessionService;
