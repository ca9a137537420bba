//! Lobby REST client tests against an in-process HTTP listener.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use pontoon_client::infrastructure::http_client::{LobbyApi, LobbyError};

/// Accept connections one at a time, answer each request with the canned
/// response, and report every request line.
async fn spawn_lobby(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (req_tx, req_rx) = mpsc::channel(8);

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };

            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let Ok(n) = stream.read(&mut buf).await else { return };
                if n == 0 {
                    return;
                }
                head.extend_from_slice(&buf[..n]);
            }

            let request_line = String::from_utf8_lossy(&head)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();
            if req_tx.send(request_line).await.is_err() {
                break;
            }

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });

    (format!("http://{addr}"), req_rx)
}

#[tokio::test]
async fn room_info_parses_the_lobby_response() {
    let (base, mut requests) =
        spawn_lobby("HTTP/1.1 200 OK", r#"{"roomId":"42137","status":1}"#).await;

    let room = LobbyApi::new(&base).room_info("42137").await.unwrap();
    assert_eq!(room.room_id, "42137");
    assert_eq!(room.status, 1);

    let request = requests.recv().await.unwrap();
    assert_eq!(request, "GET /api/room/42137 HTTP/1.1");
}

#[tokio::test]
async fn leave_room_issues_a_delete_naming_the_player() {
    let (base, mut requests) = spawn_lobby("HTTP/1.1 200 OK", "").await;

    LobbyApi::new(&base).leave_room("42137", "p7").await.unwrap();

    let request = requests.recv().await.unwrap();
    assert_eq!(request, "DELETE /api/room/42137?playerId=p7 HTTP/1.1");
}

#[tokio::test]
async fn lobby_rejection_carries_the_response_body() {
    let (base, _requests) = spawn_lobby("HTTP/1.1 404 Not Found", "no such room").await;

    let err = LobbyApi::new(&base).room_info("42137").await.unwrap_err();
    match err {
        LobbyError::Rejected(message) => assert_eq!(message, "no such room"),
        other => panic!("expected a rejection, got {other:?}"),
    }
}
