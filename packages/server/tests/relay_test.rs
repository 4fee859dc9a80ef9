//! Integration tests for the drawing relay using an in-process server.
//!
//! Each test starts its own server (with its own registry) on an ephemeral
//! port and drives it with real WebSocket clients.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tegaki_server::{
    domain::ConnectionRegistry, infrastructure::registry::InMemoryConnectionRegistry, ui::Server,
};
use tegaki_shared::{protocol::CLEAR_FRAME, time::SystemClock};
use tokio::{net::TcpStream, task::JoinHandle, time::timeout};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

type TestSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const DRAW_FRAME: &str = r##"{"event":"draw","data":{"x0":0,"y0":0,"x1":10,"y1":10,"color":"#ff0000","brushSize":3}}"##;
const RECV_TIMEOUT: Duration = Duration::from_secs(2);
const SILENCE_WINDOW: Duration = Duration::from_millis(200);

/// Helper struct to manage an in-process server
struct TestServer {
    addr: SocketAddr,
    registry: Arc<InMemoryConnectionRegistry>,
    handle: JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let server = Server::new(registry.clone(), Arc::new(SystemClock));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to get local addr");

        let handle = tokio::spawn(async move {
            server
                .serve(listener, std::future::pending())
                .await
                .expect("Server failed");
        });

        TestServer {
            addr,
            registry,
            handle,
        }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> TestSocket {
        let (socket, _response) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect");
        socket
    }

    /// Wait until the registry holds exactly `expected` connections
    async fn wait_for_connections(&self, expected: usize) {
        timeout(RECV_TIMEOUT, async {
            while self.registry.count().await != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("Timed out waiting for connection count");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn send_text(socket: &mut TestSocket, text: &str) {
    socket
        .send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}

async fn recv_text(socket: &mut TestSocket) -> String {
    loop {
        let msg = timeout(RECV_TIMEOUT, socket.next())
            .await
            .expect("Timed out waiting for frame")
            .expect("Stream ended")
            .expect("WebSocket error");
        match msg {
            Message::Text(text) => return text.as_str().to_string(),
            Message::Ping(_) | Message::Pong(_) => continue,
            other => panic!("Unexpected message: {:?}", other),
        }
    }
}

async fn assert_silent(socket: &mut TestSocket) {
    let result = timeout(SILENCE_WINDOW, socket.next()).await;
    assert!(result.is_err(), "Expected no frame, got {:?}", result);
}

fn draw_frame(n: u32) -> String {
    format!(
        r##"{{"event":"draw","data":{{"x0":{n},"y0":{n},"x1":{m},"y1":{m},"color":"#000000","brushSize":5}}}}"##,
        n = n,
        m = n + 1
    )
}

#[tokio::test]
async fn test_draw_reaches_others_exactly_once() {
    // テスト項目: A の draw は B と C にそのまま 1 回ずつ届き、A には返らない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    server.wait_for_connections(3).await;

    // when (操作):
    send_text(&mut a, DRAW_FRAME).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut b).await, DRAW_FRAME);
    assert_eq!(recv_text(&mut c).await, DRAW_FRAME);
    assert_silent(&mut a).await;
    assert_silent(&mut b).await;
    assert_silent(&mut c).await;
}

#[tokio::test]
async fn test_draw_sequence_preserves_order() {
    // テスト項目: 連続した draw は送信順のまま全ての受信者に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    server.wait_for_connections(3).await;
    let frames: Vec<String> = (0..20).map(draw_frame).collect();

    // when (操作):
    for frame in &frames {
        send_text(&mut a, frame).await;
    }

    // then (期待する結果):
    for frame in &frames {
        assert_eq!(&recv_text(&mut b).await, frame);
    }
    for frame in &frames {
        assert_eq!(&recv_text(&mut c).await, frame);
    }
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_clear_then_draw_from_different_clients() {
    // テスト項目: A の clear の後に B が draw すると、C には clear → draw の順で届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    server.wait_for_connections(3).await;

    // when (操作):
    send_text(&mut a, CLEAR_FRAME).await;
    assert_eq!(recv_text(&mut b).await, CLEAR_FRAME);
    send_text(&mut b, DRAW_FRAME).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut c).await, CLEAR_FRAME);
    assert_eq!(recv_text(&mut c).await, DRAW_FRAME);
    assert_eq!(recv_text(&mut a).await, DRAW_FRAME);
    assert_silent(&mut b).await;
}

#[tokio::test]
async fn test_clear_skips_departed_clients() {
    // テスト項目: clear は切断済みのクライアントを除く全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    let mut c = server.connect().await;
    let mut d = server.connect().await;
    server.wait_for_connections(4).await;
    d.close(None).await.expect("Failed to close");
    server.wait_for_connections(3).await;

    // when (操作):
    send_text(&mut a, CLEAR_FRAME).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut b).await, CLEAR_FRAME);
    assert_eq!(recv_text(&mut c).await, CLEAR_FRAME);
    assert_silent(&mut a).await;
}

#[tokio::test]
async fn test_abrupt_disconnect_mid_stream() {
    // テスト項目: 途中で切断したクライアントがいても、残りのクライアントへの配信とサーバーは影響を受けない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let b = server.connect().await;
    let mut c = server.connect().await;
    server.wait_for_connections(3).await;

    // when (操作):
    send_text(&mut a, &draw_frame(1)).await;
    drop(b);
    send_text(&mut a, &draw_frame(2)).await;
    server.wait_for_connections(2).await;
    send_text(&mut a, &draw_frame(3)).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut c).await, draw_frame(1));
    assert_eq!(recv_text(&mut c).await, draw_frame(2));
    assert_eq!(recv_text(&mut c).await, draw_frame(3));

    let health: serde_json::Value = reqwest::get(server.http_url("/api/health"))
        .await
        .expect("Health request failed")
        .json()
        .await
        .expect("Invalid health body");
    assert_eq!(health, serde_json::json!({"status": "ok", "connections": 2}));
}

#[tokio::test]
async fn test_late_joiner_receives_no_backlog() {
    // テスト項目: 後から接続したクライアントには過去のイベントが届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    server.wait_for_connections(2).await;
    send_text(&mut a, DRAW_FRAME).await;
    send_text(&mut a, CLEAR_FRAME).await;
    assert_eq!(recv_text(&mut b).await, DRAW_FRAME);
    assert_eq!(recv_text(&mut b).await, CLEAR_FRAME);

    // when (操作):
    let mut late = server.connect().await;
    server.wait_for_connections(3).await;

    // then (期待する結果):
    assert_silent(&mut late).await;

    // 以降のイベントは受け取る
    send_text(&mut a, DRAW_FRAME).await;
    assert_eq!(recv_text(&mut late).await, DRAW_FRAME);
}

#[tokio::test]
async fn test_invalid_frames_are_dropped_and_connection_stays_open() {
    // テスト項目: 中継できないフレームは転送されず、送信元の接続も維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let mut b = server.connect().await;
    server.wait_for_connections(2).await;

    // when (操作):
    send_text(&mut a, "not json").await;
    send_text(&mut a, r#"{"event":"chat","data":"hi"}"#).await;
    send_text(&mut a, r#"{"event":"draw"}"#).await;
    a.send(Message::Binary(vec![1u8, 2, 3].into()))
        .await
        .expect("Failed to send binary");
    send_text(&mut a, DRAW_FRAME).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut b).await, DRAW_FRAME);
    assert_silent(&mut b).await;
    assert_eq!(server.registry.count().await, 2);
}

#[tokio::test]
async fn test_independent_servers_do_not_share_connections() {
    // テスト項目: 2 つのサーバーインスタンスは接続集合を共有しない
    // given (前提条件):
    let first = TestServer::start().await;
    let second = TestServer::start().await;
    let mut a = first.connect().await;
    let mut other = second.connect().await;
    let mut b = first.connect().await;
    first.wait_for_connections(2).await;
    second.wait_for_connections(1).await;

    // when (操作):
    send_text(&mut a, DRAW_FRAME).await;

    // then (期待する結果):
    assert_eq!(recv_text(&mut b).await, DRAW_FRAME);
    assert_silent(&mut other).await;
}

#[tokio::test]
async fn test_debug_connections_and_cors() {
    // テスト項目: 接続一覧が取得でき、任意のオリジンからのアクセスが許可される
    // given (前提条件):
    let server = TestServer::start().await;
    let _a = server.connect().await;
    let _b = server.connect().await;
    server.wait_for_connections(2).await;

    // when (操作):
    let response = reqwest::Client::new()
        .get(server.http_url("/debug/connections"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .expect("Request failed");

    // then (期待する結果):
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: Vec<serde_json::Value> = response.json().await.expect("Invalid body");
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|c| c["id"].is_string() && c["connected_at"].is_string()));
}

#[tokio::test]
async fn test_client_close_receives_close_reply() {
    // テスト項目: クライアントが close を送ると、サーバーの close 応答が届いてから接続が終わる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut a = server.connect().await;
    let _b = server.connect().await;
    server.wait_for_connections(2).await;

    // when (操作):
    a.close(None).await.expect("Failed to close");

    // then (期待する結果):
    let reply = timeout(RECV_TIMEOUT, a.next())
        .await
        .expect("Timed out waiting for close reply");
    assert!(
        matches!(reply, Some(Ok(Message::Close(_)))),
        "Expected close reply, got {:?}",
        reply
    );
    server.wait_for_connections(1).await;
}
