//! Message types exchanged over the table WebSocket connection.
//!
//! Outbound messages serialize through serde's adjacent tagging, which
//! produces the `{ "type": ..., "data": ... }` envelope directly. Inbound
//! messages cannot use the same derive because the `error` type breaks the
//! envelope shape (its text is a top-level field), so decoding goes through
//! [`ServerMessage::decode`] instead: envelope first, then the payload for the
//! recognized tag. Unrecognized tags decode to [`ServerMessage::Unknown`] so
//! the router can log and drop them without treating them as faults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{ChatMessage, PlayerSnapshot, RoomInfo, RoundResult};

/// Messages from a client to the table server.
///
/// Every request names the room and, once assigned, the sender's identity;
/// there is no request/response correlation and no acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ClientMessage {
    /// Identity announcement, sent first after every successful open.
    Connect {
        player_id: Option<String>,
        nickname: String,
    },
    /// Request to sit at a room's table.
    Join {
        room_id: String,
        player_id: Option<String>,
        nickname: String,
    },
    /// Ask the server to begin the round.
    Start {
        room_id: String,
        player_id: Option<String>,
    },
    /// Draw one more card.
    Hit {
        room_id: String,
        player_id: Option<String>,
    },
    /// Keep the current hand.
    Stand {
        room_id: String,
        player_id: Option<String>,
    },
    /// Say something to the room.
    Chat {
        room_id: String,
        player_id: Option<String>,
        message: String,
    },
}

/// Messages pushed by the table server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Acknowledges the identity announcement and carries the assigned id.
    ConnectAck { player_id: String, nickname: String },
    /// Acknowledges a join; the roster follows in a separate push.
    JoinAck,
    /// Room metadata. Logged only.
    RoomInfo(RoomInfo),
    /// Full roster replace, in server order.
    Players { players: Vec<PlayerSnapshot> },
    /// Single-player state replace.
    Update(PlayerSnapshot),
    /// One chat line.
    Chat(ChatMessage),
    /// The round has begun.
    Start,
    /// Final standings; the round is over.
    GameEnd { results: Vec<RoundResult> },
    /// Server-reported application error. The connection stays open.
    Error { message: String },
    /// A type tag this client does not recognize.
    Unknown { kind: String },
}

/// Why an inbound frame could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("`{kind}` frame is missing its payload")]
    MissingPayload { kind: String },
}

/// The raw envelope shared by every inbound frame.
#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

fn payload<T: DeserializeOwned>(kind: &str, data: Option<Value>) -> Result<T, DecodeError> {
    let value = data.ok_or_else(|| DecodeError::MissingPayload {
        kind: kind.to_string(),
    })?;
    serde_json::from_value(value).map_err(DecodeError::from)
}

impl ServerMessage {
    /// Decode one inbound frame.
    ///
    /// A frame that is not valid JSON, or whose payload does not match its
    /// tag, is a [`DecodeError`]; callers drop the frame and keep the
    /// connection. An unknown tag is not an error.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        let Envelope { kind, data, error } = serde_json::from_str(text)?;

        Ok(match kind.as_str() {
            "connect" => {
                #[derive(Deserialize)]
                #[serde(rename_all = "camelCase")]
                struct ConnectData {
                    player_id: String,
                    #[serde(default)]
                    nickname: String,
                }
                let ack: ConnectData = payload(&kind, data)?;
                ServerMessage::ConnectAck {
                    player_id: ack.player_id,
                    nickname: ack.nickname,
                }
            }
            "join" => ServerMessage::JoinAck,
            "roomInfo" => ServerMessage::RoomInfo(payload(&kind, data)?),
            "players" => {
                #[derive(Deserialize)]
                struct PlayersData {
                    players: Vec<PlayerSnapshot>,
                }
                let roster: PlayersData = payload(&kind, data)?;
                ServerMessage::Players {
                    players: roster.players,
                }
            }
            "update" => ServerMessage::Update(payload(&kind, data)?),
            "chat" => ServerMessage::Chat(payload(&kind, data)?),
            "start" => ServerMessage::Start,
            "gameEnd" => {
                #[derive(Deserialize)]
                struct GameEndData {
                    results: Vec<RoundResult>,
                }
                let end: GameEndData = payload(&kind, data)?;
                ServerMessage::GameEnd {
                    results: end.results,
                }
            }
            "error" => ServerMessage::Error {
                message: error.unwrap_or_else(|| "unspecified server error".to_string()),
            },
            _ => ServerMessage::Unknown { kind },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerStatus;
    use serde_json::json;

    #[test]
    fn outbound_messages_use_the_type_data_envelope() {
        let msg = ClientMessage::Join {
            room_id: "42137".to_string(),
            player_id: None,
            nickname: "ada".to_string(),
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "join",
                "data": { "roomId": "42137", "playerId": null, "nickname": "ada" }
            })
        );
    }

    #[test]
    fn outbound_actions_carry_room_and_identity_only() {
        let msg = ClientMessage::Hit {
            room_id: "42137".to_string(),
            player_id: Some("p7".to_string()),
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "hit",
                "data": { "roomId": "42137", "playerId": "p7" }
            })
        );
    }

    #[test]
    fn decodes_connect_ack() {
        let msg =
            ServerMessage::decode(r#"{"type":"connect","data":{"playerId":"p7","nickname":"ada"}}"#)
                .unwrap();
        assert_eq!(
            msg,
            ServerMessage::ConnectAck {
                player_id: "p7".to_string(),
                nickname: "ada".to_string(),
            }
        );
    }

    #[test]
    fn decodes_roster_push() {
        let text = r#"{
            "type": "players",
            "data": { "players": [{
                "id": "p1", "nickname": "ada", "cards": ["pk-spade7"],
                "cardCount": 1, "handValue": 7,
                "status": "acting", "statusColor": "yellow"
            }]}
        }"#;

        match ServerMessage::decode(text).unwrap() {
            ServerMessage::Players { players } => {
                assert_eq!(players.len(), 1);
                assert_eq!(players[0].status, PlayerStatus::Acting);
            }
            other => panic!("expected a roster push, got {other:?}"),
        }
    }

    #[test]
    fn decodes_game_end_with_results() {
        let text = r#"{
            "type": "gameEnd",
            "data": { "roomId": "42137", "results": [
                { "playerId": "p1", "nickname": "ada", "score": 20, "status": "stood", "isWinner": true },
                { "playerId": "p2", "nickname": "bob", "score": 23, "status": "busted", "isWinner": false }
            ]}
        }"#;

        match ServerMessage::decode(text).unwrap() {
            ServerMessage::GameEnd { results } => {
                assert!(results[0].is_winner);
                assert_eq!(results[1].status, PlayerStatus::Busted);
            }
            other => panic!("expected game end, got {other:?}"),
        }
    }

    #[test]
    fn error_frames_carry_a_top_level_error_field() {
        let msg = ServerMessage::decode(r#"{"type":"error","error":"room is full"}"#).unwrap();
        assert_eq!(
            msg,
            ServerMessage::Error {
                message: "room is full".to_string(),
            }
        );
    }

    #[test]
    fn unknown_type_tag_is_not_a_fault() {
        let msg = ServerMessage::decode(r#"{"type":"unknown_type_xyz","data":{}}"#).unwrap();
        assert_eq!(
            msg,
            ServerMessage::Unknown {
                kind: "unknown_type_xyz".to_string(),
            }
        );
    }

    #[test]
    fn join_and_start_ignore_their_payloads() {
        assert_eq!(
            ServerMessage::decode(r#"{"type":"start","data":{"roomId":"42137"}}"#).unwrap(),
            ServerMessage::Start
        );
        assert_eq!(
            ServerMessage::decode(r#"{"type":"join"}"#).unwrap(),
            ServerMessage::JoinAck
        );
    }

    #[test]
    fn malformed_frames_are_decode_errors() {
        assert!(matches!(
            ServerMessage::decode("not json at all"),
            Err(DecodeError::Malformed(_))
        ));
        // right tag, wrong payload shape
        assert!(matches!(
            ServerMessage::decode(r#"{"type":"update","data":{"id":12}}"#),
            Err(DecodeError::Malformed(_))
        ));
        // recognized tag with the payload missing entirely
        assert!(matches!(
            ServerMessage::decode(r#"{"type":"update"}"#),
            Err(DecodeError::MissingPayload { .. })
        ));
    }
}
