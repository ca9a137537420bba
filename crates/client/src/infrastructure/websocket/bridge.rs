//! WebSocket bridge - connects the CommandBus/EventBus to the TableClient.
//!
//! `create_connection` sets up a CommandBus for sending intents, an EventBus
//! for receiving session events, and a background task that bridges both to
//! the socket. The bridge task also owns the one-shot bootstrap timer that
//! autonomously requests the round start shortly after wiring up; tearing the
//! bridge down cancels it.

use std::sync::atomic::AtomicU8;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, RwLock};

use pontoon_protocol::ClientMessage;

use super::client::TableClient;
use super::core::ClientConfig;
use crate::application::events::SessionEvent;
use crate::infrastructure::message_translator;
use crate::infrastructure::messaging::{
    set_connection_state, CommandBus, ConnectionHandle, ConnectionState, ConnectionStateObserver,
    EventBus,
};
use crate::session::SessionIdentity;

/// Result of creating a connection.
///
/// Contains all the pieces needed to use it:
/// - `command_bus`: send intents to the table server
/// - `event_bus`: subscribe to session events
/// - `handle`: control connection lifecycle
/// - `state_observer`: observe connection state (for UI binding)
pub struct Connection {
    pub command_bus: CommandBus,
    pub event_bus: EventBus,
    pub handle: ConnectionHandle,
    pub state_observer: ConnectionStateObserver,
}

pub fn create_connection(
    url: &str,
    config: ClientConfig,
    session: Arc<RwLock<SessionIdentity>>,
) -> Connection {
    // Create channels
    let (cmd_tx, cmd_rx) = mpsc::channel::<ClientMessage>(32);
    let (disconnect_tx, disconnect_rx) = oneshot::channel::<()>();

    // Create shared state
    let state = Arc::new(AtomicU8::new(ConnectionState::Disconnected.to_u8()));

    // Create buses
    let command_bus = CommandBus::new(cmd_tx);
    let event_bus = EventBus::new();
    let state_observer = ConnectionStateObserver::new(Arc::clone(&state));

    // Spawn bridge task
    let client = TableClient::new(url, config.clone(), Arc::clone(&session));
    let event_bus_for_bridge = event_bus.clone();
    let state_for_bridge = Arc::clone(&state);

    tokio::spawn(async move {
        bridge_task(
            client,
            config,
            session,
            cmd_rx,
            disconnect_rx,
            event_bus_for_bridge,
            state_for_bridge,
        )
        .await;
    });

    // Create handle
    let handle = ConnectionHandle::new(Arc::clone(&state), disconnect_tx);

    Connection {
        command_bus,
        event_bus,
        handle,
        state_observer,
    }
}

async fn bridge_task(
    client: TableClient,
    config: ClientConfig,
    session: Arc<RwLock<SessionIdentity>>,
    mut cmd_rx: mpsc::Receiver<ClientMessage>,
    mut disconnect_rx: oneshot::Receiver<()>,
    event_bus: EventBus,
    state: Arc<AtomicU8>,
) {
    // State changes go to the shared atomic (for observers) and onto the bus
    // (for the controller loop), both synchronously so order is preserved.
    let state_for_callback = Arc::clone(&state);
    let bus_for_state = event_bus.clone();
    client
        .set_on_state_change(move |conn_state| {
            set_connection_state(&state_for_callback, conn_state);
            bus_for_state.dispatch(SessionEvent::StateChanged(conn_state));
        })
        .await;

    // Inbound messages are translated to application events; unrecognized
    // type tags translate to nothing and are dropped here.
    let bus_for_messages = event_bus.clone();
    client
        .set_on_message(move |msg| {
            if let Some(event) = message_translator::translate(msg) {
                bus_for_messages.dispatch(SessionEvent::MessageReceived(event));
            }
        })
        .await;

    // Run the connection lifecycle in the background
    let runner = {
        let client = client.clone();
        tokio::spawn(async move {
            client.run().await;
        })
    };

    // One-shot bootstrap timer: ask the server to begin the round
    let start_deadline = tokio::time::sleep(config.start_request_delay);
    tokio::pin!(start_deadline);
    let mut start_sent = false;

    // Main loop: forward commands until teardown
    loop {
        tokio::select! {
            _ = &mut disconnect_rx => {
                tracing::info!("teardown requested");
                client.disconnect().await;
                break;
            }

            _ = &mut start_deadline, if !start_sent => {
                start_sent = true;
                let msg = { session.read().await.start_message() };
                client.send(msg).await;
            }

            msg = cmd_rx.recv() => {
                match msg {
                    Some(msg) => client.send(msg).await,
                    None => {
                        // every CommandBus clone is gone; the session is over
                        tracing::debug!("command channel closed");
                        client.disconnect().await;
                        break;
                    }
                }
            }
        }
    }

    // cancels a pending reconnect timer along with everything else
    runner.abort();
}
