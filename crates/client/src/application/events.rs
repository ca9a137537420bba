//! Application-level events produced by the session layer.

use pontoon_protocol::{ChatMessage, PlayerSnapshot, RoomInfo, RoundResult};

use crate::infrastructure::messaging::ConnectionState;

/// Game-domain events, translated from wire messages.
///
/// One variant per recognized server message; unrecognized messages never
/// reach this type.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The server assigned (or confirmed) our player identity.
    IdentityAssigned {
        player_id: String,
        nickname: String,
    },
    /// We have a seat at the table.
    RoomJoined,
    /// Room metadata refresh.
    RoomInfo(RoomInfo),
    /// Complete roster replacement; prior roster state is discarded.
    RosterReplaced(Vec<PlayerSnapshot>),
    /// One player's block changed.
    PlayerUpdated(PlayerSnapshot),
    ChatReceived(ChatMessage),
    /// The round has begun; controls unlock.
    GameStarted,
    /// The round is over; `results` carries the final scoring.
    GameEnded(Vec<RoundResult>),
    /// The server reported a fault in something we sent.
    ServerError(String),
}

/// Everything the controller loop can receive from the connection.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StateChanged(ConnectionState),
    MessageReceived(GameEvent),
}
