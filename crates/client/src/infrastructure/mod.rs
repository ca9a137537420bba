pub mod http_client;
pub mod message_translator;
pub mod messaging;
pub mod websocket;

// Re-export messaging types
pub use messaging::{CommandBus, ConnectionState, EventBus};
