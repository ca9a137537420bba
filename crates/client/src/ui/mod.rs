//! Terminal user interface.

pub mod controller;
pub mod render;
pub mod surface;

pub use controller::handle_session_event;
pub use surface::TerminalSurface;
