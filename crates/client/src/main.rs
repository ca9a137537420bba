//! Pontoon table client binary.
//!
//! Connects to a table named by a page URL, plays the session interactively
//! on stdin, and tears down cleanly on `quit` or end of input.

use std::io::BufRead;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pontoon_client::application::SessionService;
use pontoon_client::infrastructure::http_client::LobbyApi;
use pontoon_client::infrastructure::websocket::ClientConfig;
use pontoon_client::launch::{LaunchContext, LaunchError};
use pontoon_client::session::SessionIdentity;
use pontoon_client::state::GameView;
use pontoon_client::ui::{handle_session_event, TerminalSurface};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pontoon_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let page_url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("PONTOON_TABLE_URL").ok())
        .context("usage: pontoon-client <table-url>  (or set PONTOON_TABLE_URL)")?;

    let ctx = match LaunchContext::parse(&page_url) {
        Ok(ctx) => ctx,
        Err(LaunchError::MissingRoomId { lobby_url }) => {
            eprintln!("no room named in the URL; create one at {lobby_url}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(room_id = %ctx.room_id, socket = %ctx.socket_url, "starting session");

    let lobby = LobbyApi::new(&ctx.api_base);
    match lobby.room_info(&ctx.room_id).await {
        Ok(room) => tracing::info!(room_id = %room.room_id, status = room.status, "room found"),
        // the join over the socket is authoritative; a lobby miss is only a warning
        Err(e) => tracing::warn!("lobby lookup failed: {e}"),
    }

    let identity = match std::env::var("PONTOON_NICKNAME") {
        Ok(nickname) => SessionIdentity::with_nickname(&ctx.room_id, nickname),
        Err(_) => SessionIdentity::new(&ctx.room_id),
    };

    let (mut service, mut events) =
        SessionService::start(&ctx.socket_url, ClientConfig::default(), identity);

    let mut view = GameView::new(&ctx.room_id);
    let mut surface = TerminalSurface::new();
    let mut input = stdin_lines();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    tracing::info!("event stream closed");
                    break;
                };
                handle_session_event(event, &mut view, &service, &mut surface).await?;
            }
            line = input.recv() => {
                let Some(line) = line else { break };
                if !handle_command(&line, &view, &service).await {
                    break;
                }
            }
        }
    }

    // best-effort seat release before the socket goes away
    if let Some(player_id) = service.player_id().await {
        if let Err(e) = lobby.leave_room(&ctx.room_id, &player_id).await {
            tracing::warn!("failed to release seat: {e}");
        }
    }
    service.shutdown();

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Quit,
    Start,
    Hit,
    Stand,
    Say(String),
    Nothing,
    Unknown,
}

/// Classify one input line. Blank lines and empty chat text both come back
/// as [`Command::Nothing`].
fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "" => Command::Nothing,
        "quit" | "exit" => Command::Quit,
        "start" => Command::Start,
        "hit" => Command::Hit,
        "stand" => Command::Stand,
        _ => match line.strip_prefix("say ") {
            Some(text) if !text.trim().is_empty() => Command::Say(text.trim().to_string()),
            Some(_) => Command::Nothing,
            None => Command::Unknown,
        },
    }
}

/// Dispatch one input line. Returns `false` when the session should end.
async fn handle_command(line: &str, view: &GameView, service: &SessionService) -> bool {
    match parse_command(line) {
        Command::Nothing => {}
        Command::Quit => return false,
        Command::Start => service.request_start().await,
        Command::Hit if view.controls_enabled() => service.hit().await,
        Command::Stand if view.controls_enabled() => service.stand().await,
        Command::Hit | Command::Stand => tracing::warn!("not your turn; controls are locked"),
        Command::Say(text) => service.chat(&text).await,
        Command::Unknown => {
            tracing::warn!("unknown command: {line} (try hit, stand, say <msg>, quit)");
        }
    }
    true
}


/// Bridge blocking stdin reads onto a channel the select loop can poll.
fn stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}
