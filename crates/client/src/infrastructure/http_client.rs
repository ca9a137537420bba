//! Lobby HTTP client.
//!
//! The lobby is a small REST surface next to the websocket endpoint: it
//! reports room status and records a player leaving. Rooms are created on
//! the lobby page itself; the table is played entirely over the socket.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Client for the lobby REST API.
#[derive(Clone)]
pub struct LobbyApi {
    client: Client,
    base_url: String,
}

/// Room description as the lobby reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: String,
    /// 0 while waiting for players, 1 once the round is underway.
    #[serde(default)]
    pub status: i32,
}

#[derive(Debug, Error)]
pub enum LobbyError {
    #[error("lobby request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("lobby rejected the request: {0}")]
    Rejected(String),
}

impl LobbyApi {
    pub fn new(base_url: &str) -> Self {
        // Lobby calls are small and fast; fail quickly rather than hang the
        // launch sequence.
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look a room up by id.
    pub async fn room_info(&self, room_id: &str) -> Result<RoomSummary, LobbyError> {
        let response = self
            .client
            .get(format!("{}/api/room/{room_id}", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LobbyError::Rejected(response.text().await?));
        }
        Ok(response.json().await?)
    }

    /// Tell the lobby this player left the room. Best-effort at teardown;
    /// the server also reaps seats when the socket drops.
    pub async fn leave_room(&self, room_id: &str, player_id: &str) -> Result<(), LobbyError> {
        let response = self
            .client
            .delete(format!("{}/api/room/{room_id}", self.base_url))
            .query(&[("playerId", player_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LobbyError::Rejected(response.text().await?));
        }
        Ok(())
    }
}
