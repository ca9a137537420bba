//! Command bus for sending intents to the table server.
//!
//! Every outbound message is fire-and-forget: the protocol has no
//! request/response correlation and the server never acknowledges an action,
//! so there is no pending-request tracking here.

use pontoon_protocol::ClientMessage;
use tokio::sync::mpsc;

/// Command bus for sending messages to the table server.
///
/// A concrete struct (not a trait) that can be cloned and shared; the UI and
/// services depend on it directly.
#[derive(Clone)]
pub struct CommandBus {
    tx: mpsc::Sender<ClientMessage>,
}

impl CommandBus {
    pub fn new(tx: mpsc::Sender<ClientMessage>) -> Self {
        Self { tx }
    }

    /// Queue a message for the socket task.
    ///
    /// Failure means the bridge task is gone; the message is dropped with a
    /// warning and the caller gets no signal, matching the
    /// send-while-disconnected policy.
    pub fn send(&self, message: ClientMessage) {
        if let Err(e) = self.tx.try_send(message) {
            tracing::warn!("dropping outbound message, bridge unavailable: {e}");
        }
    }
}
