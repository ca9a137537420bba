//! Translates wire messages into application events.
//!
//! This is the single seam between the protocol crate and the application
//! layer: everything above it speaks [`GameEvent`], nothing above it sees a
//! wire tag. Messages the client does not recognize are logged and dropped
//! here, which keeps the dispatch table above closed over known variants.

use pontoon_protocol::ServerMessage;

use crate::application::events::GameEvent;

/// Translate a server message into a game event.
///
/// Returns `None` for messages that carry no application meaning; the caller
/// forwards everything else to the event bus.
pub fn translate(msg: ServerMessage) -> Option<GameEvent> {
    match msg {
        ServerMessage::ConnectAck {
            player_id,
            nickname,
        } => Some(GameEvent::IdentityAssigned {
            player_id,
            nickname,
        }),
        ServerMessage::JoinAck => Some(GameEvent::RoomJoined),
        ServerMessage::RoomInfo(info) => Some(GameEvent::RoomInfo(info)),
        ServerMessage::Players { players } => Some(GameEvent::RosterReplaced(players)),
        ServerMessage::Update(snapshot) => Some(GameEvent::PlayerUpdated(snapshot)),
        ServerMessage::Chat(chat) => Some(GameEvent::ChatReceived(chat)),
        ServerMessage::Start => Some(GameEvent::GameStarted),
        ServerMessage::GameEnd { results } => Some(GameEvent::GameEnded(results)),
        ServerMessage::Error { message } => Some(GameEvent::ServerError(message)),
        ServerMessage::Unknown { kind } => {
            tracing::warn!(kind = %kind, "dropping message with unrecognized type tag");
            None
        }
    }
}
