//! Session service: the application's handle on one table session.
//!
//! Wraps the websocket connection behind intent methods (`hit`, `stand`,
//! `chat`) and a single event stream. The service owns the connection handle;
//! dropping or shutting down the service tears the connection down.

use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use crate::infrastructure::messaging::{ConnectionHandle, ConnectionState, ConnectionStateObserver};
use crate::infrastructure::websocket::{create_connection, ClientConfig, Connection};
use crate::infrastructure::CommandBus;
use crate::session::SessionIdentity;

use super::events::SessionEvent;

/// Buffer for the controller-facing event stream. Deep enough that a roster
/// push plus a burst of updates never blocks the bridge.
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct SessionService {
    command_bus: CommandBus,
    state_observer: ConnectionStateObserver,
    handle: Option<ConnectionHandle>,
    session: Arc<RwLock<SessionIdentity>>,
}

impl SessionService {
    /// Open the connection and return the service plus its event stream.
    ///
    /// The connection bootstraps itself: identity announcement, room join,
    /// and the delayed start request all happen without further calls.
    pub fn start(
        socket_url: &str,
        config: ClientConfig,
        identity: SessionIdentity,
    ) -> (Self, mpsc::Receiver<SessionEvent>) {
        let session = Arc::new(RwLock::new(identity));

        let Connection {
            command_bus,
            event_bus,
            handle,
            state_observer,
        } = create_connection(socket_url, config, Arc::clone(&session));

        // Re-export the bus as a channel so the controller can `select!` on
        // it. try_send keeps dispatch non-blocking; a full channel means the
        // controller stopped draining and losing events is the lesser evil.
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        event_bus.subscribe(move |event| {
            if let Err(e) = event_tx.try_send(event) {
                tracing::warn!("event stream backed up, dropping event: {e}");
            }
        });

        let service = Self {
            command_bus,
            state_observer,
            handle: Some(handle),
            session,
        };
        (service, event_rx)
    }

    pub fn state(&self) -> ConnectionState {
        self.state_observer.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub async fn player_id(&self) -> Option<String> {
        self.session.read().await.player_id.clone()
    }

    pub async fn room_id(&self) -> String {
        self.session.read().await.room_id.clone()
    }

    /// Store the server-assigned identity so every later message, including
    /// the re-announcement after a reconnect, carries it.
    pub async fn record_identity(&self, player_id: String, nickname: String) {
        let mut session = self.session.write().await;
        session.player_id = Some(player_id);
        session.nickname = nickname;
    }

    pub async fn hit(&self) {
        let msg = self.session.read().await.hit_message();
        self.command_bus.send(msg);
    }

    pub async fn stand(&self) {
        let msg = self.session.read().await.stand_message();
        self.command_bus.send(msg);
    }

    pub async fn chat(&self, text: &str) {
        let msg = self.session.read().await.chat_message(text);
        self.command_bus.send(msg);
    }

    /// Manual start request, for when the autonomous one was sent before the
    /// table was full.
    pub async fn request_start(&self) {
        let msg = self.session.read().await.start_message();
        self.command_bus.send(msg);
    }

    /// Tear the connection down. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.disconnect();
        }
    }
}

impl Drop for SessionService {
    fn drop(&mut self) {
        self.shutdown();
    }
}
