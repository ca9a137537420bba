//! Session identity: who the local player is and which room they sit at.

use pontoon_protocol::ClientMessage;
use rand::Rng;

/// Identity of the local participant for one session.
///
/// The room is fixed at launch; the id is assigned by the server on the first
/// connect ack and re-announced verbatim on every reconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Server-assigned participant id; `None` until the first connect ack.
    pub player_id: Option<String>,
    pub nickname: String,
    pub room_id: String,
}

impl SessionIdentity {
    /// New identity with a generated default nickname.
    pub fn new(room_id: impl Into<String>) -> Self {
        Self::with_nickname(room_id, default_nickname())
    }

    pub fn with_nickname(room_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            player_id: None,
            nickname: nickname.into(),
            room_id: room_id.into(),
        }
    }

    /// Identity announcement, the first message after every successful open.
    pub fn connect_message(&self) -> ClientMessage {
        ClientMessage::Connect {
            player_id: self.player_id.clone(),
            nickname: self.nickname.clone(),
        }
    }

    /// Room-join request, sent immediately after the identity announcement.
    pub fn join_message(&self) -> ClientMessage {
        ClientMessage::Join {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
            nickname: self.nickname.clone(),
        }
    }

    pub fn start_message(&self) -> ClientMessage {
        ClientMessage::Start {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
        }
    }

    pub fn hit_message(&self) -> ClientMessage {
        ClientMessage::Hit {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
        }
    }

    pub fn stand_message(&self) -> ClientMessage {
        ClientMessage::Stand {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
        }
    }

    pub fn chat_message(&self, text: impl Into<String>) -> ClientMessage {
        ClientMessage::Chat {
            room_id: self.room_id.clone(),
            player_id: self.player_id.clone(),
            message: text.into(),
        }
    }
}

/// Locally generated default display name, `player-<n>`.
fn default_nickname() -> String {
    let n: u16 = rand::thread_rng().gen_range(0..1000);
    format!("player-{n}")
}
