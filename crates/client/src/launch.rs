//! Launch-context parsing.
//!
//! The client is launched with the table page URL (first CLI argument or
//! `PONTOON_TABLE_URL`). The WebSocket endpoint, lobby page, and REST base
//! are all derived from that one URL: `https` pages talk `wss`, plain `http`
//! pages talk `ws`, and the socket lives at a fixed path on the same host.

use thiserror::Error;
use url::Url;

/// Query parameter that names the room to join.
pub const ROOM_PARAM: &str = "roomId";

/// Fixed path of the WebSocket endpoint on the table host.
pub const SOCKET_PATH: &str = "/ws";

/// Path of the lobby page users are pointed at when no room is named.
pub const LOBBY_PATH: &str = "/lobby";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("invalid launch URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),

    /// Fatal precondition: without a room there is nothing to join. Carries
    /// the lobby URL so the caller can point the user somewhere useful.
    #[error("launch URL is missing the `{ROOM_PARAM}` query parameter")]
    MissingRoomId { lobby_url: String },
}

/// Everything derived from the launch URL, fixed for the session lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    pub room_id: String,
    pub socket_url: String,
    pub api_base: String,
    pub lobby_url: String,
}

impl LaunchContext {
    pub fn parse(page_url: &str) -> Result<Self, LaunchError> {
        let url = Url::parse(page_url)?;

        let (ws_scheme, http_scheme) = match url.scheme() {
            "http" => ("ws", "http"),
            "https" => ("wss", "https"),
            other => return Err(LaunchError::UnsupportedScheme(other.to_string())),
        };

        let host = url.host_str().ok_or(url::ParseError::EmptyHost)?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let room_id = url
            .query_pairs()
            .find(|(key, _)| key == ROOM_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| LaunchError::MissingRoomId {
                lobby_url: format!("{http_scheme}://{authority}{LOBBY_PATH}"),
            })?;

        Ok(Self {
            room_id,
            socket_url: format!("{ws_scheme}://{authority}{SOCKET_PATH}"),
            api_base: format!("{http_scheme}://{authority}"),
            lobby_url: format!("{http_scheme}://{authority}{LOBBY_PATH}"),
        })
    }
}
