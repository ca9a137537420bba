//! WebSocket client for the table server, using tokio-tungstenite.

use std::sync::Arc;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use pontoon_protocol::{ClientMessage, ServerMessage};

use super::core::{ClientConfig, RetryState};
use crate::infrastructure::messaging::ConnectionState;
use crate::session::SessionIdentity;

type MessageCallback = Box<dyn Fn(ServerMessage) + Send + Sync>;
type StateCallback = Box<dyn Fn(ConnectionState) + Send + Sync>;

/// WebSocket client for communicating with the table server.
///
/// Owns the socket handle and the reconnect policy. The session identity is
/// shared with the controller: the client reads it when composing the
/// bootstrap messages after each open, the controller writes the assigned id
/// into it.
pub struct TableClient {
    url: String,
    config: ClientConfig,
    session: Arc<RwLock<SessionIdentity>>,
    tx: Arc<Mutex<Option<mpsc::Sender<ClientMessage>>>>,
    on_message: Arc<Mutex<Option<MessageCallback>>>,
    on_state_change: Arc<Mutex<Option<StateCallback>>>,
    /// Flag to track if teardown was requested (vs unexpected close)
    intentional_disconnect: Arc<RwLock<bool>>,
}

impl TableClient {
    pub fn new(
        url: impl Into<String>,
        config: ClientConfig,
        session: Arc<RwLock<SessionIdentity>>,
    ) -> Self {
        Self {
            url: url.into(),
            config,
            session,
            tx: Arc::new(Mutex::new(None)),
            on_message: Arc::new(Mutex::new(None)),
            on_state_change: Arc::new(Mutex::new(None)),
            intentional_disconnect: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_on_message<F>(&self, callback: F)
    where
        F: Fn(ServerMessage) + Send + Sync + 'static,
    {
        let mut on_message = self.on_message.lock().await;
        *on_message = Some(Box::new(callback));
    }

    pub async fn set_on_state_change<F>(&self, callback: F)
    where
        F: Fn(ConnectionState) + Send + Sync + 'static,
    {
        let mut on_state_change = self.on_state_change.lock().await;
        *on_state_change = Some(Box::new(callback));
    }

    async fn set_state(&self, new_state: ConnectionState) {
        let callback = self.on_state_change.lock().await;
        if let Some(ref cb) = *callback {
            cb(new_state);
        }
    }

    /// Drive the connection for the life of the session.
    ///
    /// Dials once, then applies the bounded fixed-delay reconnect policy on
    /// every closure until teardown or retry exhaustion. Transport errors are
    /// logged, never surfaced; the closure they cause is what drives the
    /// retry path.
    pub async fn run(&self) {
        {
            let mut flag = self.intentional_disconnect.write().await;
            *flag = false;
        }

        let mut retry = RetryState::default();
        loop {
            let outcome = self.connect_internal(&mut retry).await;

            if *self.intentional_disconnect.read().await {
                self.set_state(ConnectionState::Disconnected).await;
                return;
            }

            // graceful and error-induced closures both land here; only
            // teardown (above) and exhaustion (below) leave the loop
            if let Err(e) = outcome {
                tracing::warn!("connection attempt failed: {e}");
            }

            let Some(delay) = retry.next_attempt(&self.config) else {
                tracing::error!(
                    "giving up after {} reconnect attempts",
                    retry.attempts()
                );
                self.set_state(ConnectionState::Failed).await;
                return;
            };

            self.set_state(ConnectionState::Reconnecting).await;
            tracing::info!(
                "reconnect attempt {} of {} in {:?}",
                retry.attempts(),
                self.config.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;

            // teardown may have been requested while the timer was pending;
            // never dial against a torn-down session
            if *self.intentional_disconnect.read().await {
                self.set_state(ConnectionState::Disconnected).await;
                return;
            }
        }
    }

    /// One dial-to-closure cycle. Returns once the connection has ended.
    async fn connect_internal(&self, retry: &mut RetryState) -> Result<()> {
        self.set_state(ConnectionState::Connecting).await;

        let (ws_stream, _) = connect_async(&self.url).await?;
        tracing::info!(url = %self.url, "connected to table server");
        retry.reset();
        self.set_state(ConnectionState::Connected).await;

        let (mut write, mut read) = ws_stream.split();
        let (tx, mut rx) = mpsc::channel::<ClientMessage>(32);

        // announce identity, then ask to sit at the table, strictly in order
        {
            let session = self.session.read().await.clone();
            let _ = tx.send(session.connect_message()).await;
            let _ = tx.send(session.join_message()).await;
        }
        {
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = Some(tx);
        }

        let on_message = Arc::clone(&self.on_message);
        let read_handle = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => match ServerMessage::decode(&text) {
                        Ok(msg) => {
                            let callback = on_message.lock().await;
                            if let Some(ref cb) = *callback {
                                cb(msg);
                            }
                        }
                        // a single bad frame never tears down the connection
                        Err(e) => tracing::warn!("dropping malformed frame: {e}"),
                    },
                    Ok(Message::Close(_)) => {
                        tracing::info!("server closed the connection");
                        break;
                    }
                    Ok(Message::Ping(_)) => {}
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!("websocket error: {e}");
                        break;
                    }
                }
            }
        });

        let write_handle = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let text = match serde_json::to_string(&msg) {
                    Ok(t) => t,
                    Err(e) => {
                        tracing::error!("failed to serialize outbound message: {e}");
                        continue;
                    }
                };
                if let Err(e) = write.send(Message::Text(text)).await {
                    tracing::error!("failed to send message: {e}");
                    break;
                }
            }
        });

        tokio::select! {
            _ = read_handle => {
                tracing::debug!("read task completed");
            }
            _ = write_handle => {
                tracing::debug!("write task completed");
            }
        }

        {
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = None;
        }
        Ok(())
    }

    /// Transmit a message if the socket is open; otherwise drop it with a
    /// warning. Callers get no failure signal either way.
    pub async fn send(&self, message: ClientMessage) {
        // clone the sender so the lock is not held across the await
        let tx = {
            let tx_lock = self.tx.lock().await;
            tx_lock.clone()
        };
        match tx {
            Some(tx) => {
                if let Err(e) = tx.send(message).await {
                    tracing::warn!("socket task gone, dropping outbound message: {e}");
                }
            }
            None => tracing::warn!("socket not open, dropping outbound message"),
        }
    }

    /// Request teardown: no reconnect will follow the resulting closure.
    pub async fn disconnect(&self) {
        {
            let mut flag = self.intentional_disconnect.write().await;
            *flag = true;
        }
        // dropping the sender ends the write task, which closes the socket
        {
            let mut tx_lock = self.tx.lock().await;
            *tx_lock = None;
        }
        self.set_state(ConnectionState::Disconnected).await;
    }
}

impl Clone for TableClient {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            config: self.config.clone(),
            session: Arc::clone(&self.session),
            tx: Arc::clone(&self.tx),
            on_message: Arc::clone(&self.on_message),
            on_state_change: Arc::clone(&self.on_state_change),
            intentional_disconnect: Arc::clone(&self.intentional_disconnect),
        }
    }
}
