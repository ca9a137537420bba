//! Messaging primitives connecting the controller loop to the socket task.

mod command_bus;
mod connection;
mod event_bus;

pub use command_bus::CommandBus;
pub use connection::{
    set_connection_state, ConnectionHandle, ConnectionState, ConnectionStateObserver,
};
pub use event_bus::EventBus;
