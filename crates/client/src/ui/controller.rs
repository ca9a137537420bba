//! Controller: applies session events to the view and redraws.
//!
//! One flat dispatch over the event variants; each arm is a single view
//! transition. Events arrive in transport order and are handled one at a
//! time, so the view never observes a partial update.

use anyhow::Result;

use crate::application::{GameEvent, SessionEvent, SessionService};
use crate::infrastructure::messaging::ConnectionState;
use crate::state::{GameView, StatusColor};

use super::surface::TerminalSurface;

/// Apply one session event to the view, then redraw.
///
/// Transitions that demand the user's attention return an alert text; it is
/// shown through the blocking notification before the redraw.
pub async fn handle_session_event(
    event: SessionEvent,
    view: &mut GameView,
    service: &SessionService,
    surface: &mut TerminalSurface,
) -> Result<()> {
    let alert = match event {
        SessionEvent::StateChanged(state) => apply_state(state, view),
        SessionEvent::MessageReceived(event) => apply_game_event(event, view, service).await,
    };

    if let Some(message) = alert {
        surface.alert(&message)?;
    }
    surface.draw(view)?;
    Ok(())
}

fn apply_state(state: ConnectionState, view: &mut GameView) -> Option<String> {
    match state {
        ConnectionState::Connecting => view.set_status("connecting...", StatusColor::Yellow),
        ConnectionState::Connected => view.set_status("connected", StatusColor::Green),
        ConnectionState::Reconnecting => {
            view.set_status("disconnected, retrying...", StatusColor::Red);
        }
        ConnectionState::Disconnected => view.set_status("disconnected", StatusColor::Gray),
        ConnectionState::Failed => {
            // terminal state, reported exactly once
            view.set_status("cannot reach the server", StatusColor::Red);
            view.set_controls_enabled(false);
            return Some("cannot reach the server, please try again later".to_string());
        }
    }
    None
}

async fn apply_game_event(
    event: GameEvent,
    view: &mut GameView,
    service: &SessionService,
) -> Option<String> {
    match event {
        GameEvent::IdentityAssigned {
            player_id,
            nickname,
        } => {
            tracing::info!(player_id = %player_id, "identity assigned");
            service
                .record_identity(player_id.clone(), nickname)
                .await;
            view.set_self_id(player_id);
        }
        GameEvent::RoomJoined => {
            view.set_status("waiting for game start", StatusColor::Gray);
        }
        GameEvent::RoomInfo(info) => {
            tracing::info!(room_id = %info.room_id, status = info.status, "room info");
        }
        GameEvent::RosterReplaced(players) => view.apply_roster(players),
        GameEvent::PlayerUpdated(snapshot) => view.apply_update(snapshot),
        GameEvent::ChatReceived(chat) => view.push_chat(chat),
        GameEvent::GameStarted => {
            view.set_status("game in progress", StatusColor::Yellow);
            view.set_controls_enabled(true);
        }
        GameEvent::GameEnded(results) => {
            view.set_status("round over", StatusColor::Yellow);
            view.apply_game_end(results);
        }
        GameEvent::ServerError(message) => {
            tracing::warn!("server error: {message}");
            view.set_status(message.clone(), StatusColor::Red);
            // the status line is overwritten by the next transition; the
            // blocking notice is what guarantees the user saw the error
            return Some(message);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pontoon_protocol::{PlayerSnapshot, PlayerStatus};

    fn snapshot(id: &str, status: PlayerStatus) -> PlayerSnapshot {
        PlayerSnapshot {
            id: id.to_string(),
            nickname: id.to_string(),
            cards: vec![],
            card_count: 0,
            hand_value: 0,
            status,
            status_color: "gray".to_string(),
        }
    }

    fn service() -> SessionService {
        // never dials in these tests; events are applied directly
        let (service, _events) = SessionService::start(
            "ws://127.0.0.1:9",
            crate::infrastructure::websocket::ClientConfig::default(),
            crate::session::SessionIdentity::with_nickname("42", "ada"),
        );
        service
    }

    #[tokio::test]
    async fn start_unlocks_controls_and_end_locks_them() {
        let mut view = GameView::new("42");
        let service = service();

        apply_game_event(GameEvent::GameStarted, &mut view, &service).await;
        assert!(view.controls_enabled());

        apply_game_event(GameEvent::GameEnded(vec![]), &mut view, &service).await;
        assert!(!view.controls_enabled());
        assert_eq!(view.status_text(), "round over");
    }

    #[tokio::test]
    async fn join_and_start_set_the_expected_status_line() {
        let mut view = GameView::new("42");
        let service = service();

        apply_game_event(GameEvent::RoomJoined, &mut view, &service).await;
        assert_eq!(view.status_text(), "waiting for game start");
        assert_eq!(view.status_color(), Some(StatusColor::Gray));

        apply_game_event(GameEvent::GameStarted, &mut view, &service).await;
        assert_eq!(view.status_text(), "game in progress");
        assert_eq!(view.status_color(), Some(StatusColor::Yellow));
    }

    #[tokio::test]
    async fn identity_assignment_marks_the_roster_and_the_session() {
        let mut view = GameView::new("42");
        let service = service();
        apply_game_event(
            GameEvent::RosterReplaced(vec![snapshot("p1", PlayerStatus::Waiting)]),
            &mut view,
            &service,
        )
        .await;

        apply_game_event(
            GameEvent::IdentityAssigned {
                player_id: "p1".to_string(),
                nickname: "ada".to_string(),
            },
            &mut view,
            &service,
        )
        .await;

        assert!(view.self_block().is_some());
        assert_eq!(service.player_id().await.as_deref(), Some("p1"));
    }

    #[tokio::test]
    async fn server_errors_raise_a_blocking_alert() {
        let mut view = GameView::new("42");
        let service = service();

        let alert = apply_game_event(
            GameEvent::ServerError("room is full".to_string()),
            &mut view,
            &service,
        )
        .await;

        assert_eq!(alert.as_deref(), Some("room is full"));
        assert_eq!(view.status_text(), "room is full");
        assert_eq!(view.status_color(), Some(StatusColor::Red));

        // ordinary transitions never alert
        let alert = apply_game_event(GameEvent::RoomJoined, &mut view, &service).await;
        assert_eq!(alert, None);
    }

    #[tokio::test]
    async fn retry_exhaustion_raises_a_blocking_alert() {
        let mut view = GameView::new("42");

        assert_eq!(apply_state(ConnectionState::Reconnecting, &mut view), None);

        let alert = apply_state(ConnectionState::Failed, &mut view);
        assert!(alert.is_some());
        assert!(!view.controls_enabled());
        assert_eq!(view.status_color(), Some(StatusColor::Red));
    }
}
