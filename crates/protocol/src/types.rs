//! Payload types carried inside the message envelope.

use serde::{Deserialize, Serialize};

/// Card code the server substitutes for a face-down card in roster pushes.
///
/// Cards are identified by short codes like `pk-heartA` or `pk-spade7`; the
/// client treats them as opaque except for this one sentinel.
pub const HIDDEN_CARD: &str = "pk-hide";

/// Lifecycle status of a player, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Waiting for the round to start.
    Waiting,
    /// Still taking actions this round.
    Acting,
    /// Stood; hand is final.
    Stood,
    /// Hand went over 21.
    Busted,
    /// A status this client does not know. Rendered as-is, never acted on.
    #[serde(other)]
    Unknown,
}

impl PlayerStatus {
    /// Human-readable label for rendering.
    pub fn label(self) -> &'static str {
        match self {
            PlayerStatus::Waiting => "waiting",
            PlayerStatus::Acting => "acting",
            PlayerStatus::Stood => "stood",
            PlayerStatus::Busted => "busted",
            PlayerStatus::Unknown => "unknown",
        }
    }
}

/// One player's visible state, pushed wholesale by the server.
///
/// The server decides what each recipient may see: opponents' hole cards
/// arrive as [`HIDDEN_CARD`] codes, and `cardCount` always reflects the real
/// hand size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub nickname: String,
    pub cards: Vec<String>,
    pub card_count: usize,
    pub hand_value: i32,
    pub status: PlayerStatus,
    pub status_color: String,
}

/// Room metadata sent after a join is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomInfo {
    pub room_id: String,
    /// Numeric room phase (waiting / playing / ended). Logged, never matched on.
    pub status: i32,
}

/// One chat line, relayed to everyone in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub player_id: Option<String>,
    pub nickname: String,
    pub message: String,
}

/// One line of the final standings pushed when a round ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    #[serde(default)]
    pub player_id: Option<String>,
    pub nickname: String,
    pub score: i32,
    pub status: PlayerStatus,
    pub is_winner: bool,
}
