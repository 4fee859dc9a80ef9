//! InMemory ConnectionRegistry 実装
//!
//! ## 責務
//!
//! - 接続中クライアントの `UnboundedSender` を管理
//! - 送信者以外の全クライアントへのフレーム送信（fan-out）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、フレームの送信にのみ使用します。
//!
//! fan-out はロックを保持したまま同期的に行われます。`UnboundedSender::send` はブロックしないため、
//! 各受信者のチャンネルにはサーバーが処理した順序でフレームが積まれます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, FanOut, OutboundChannel, Timestamp};

struct ConnectionEntry {
    channel: OutboundChannel,
    connected_at: Timestamp,
}

/// インメモリ ConnectionRegistry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// Key: ConnectionId
    /// Value: 送信チャンネルと接続時刻
    connections: Mutex<HashMap<ConnectionId, ConnectionEntry>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, id: ConnectionId, channel: OutboundChannel, connected_at: Timestamp) {
        let mut connections = self.connections.lock().await;
        let entry = ConnectionEntry {
            channel,
            connected_at,
        };
        if connections.insert(id, entry).is_some() {
            tracing::warn!("Connection '{}' was already registered, replaced", id);
        }
        tracing::debug!(
            "Connection '{}' registered ({} active)",
            id,
            connections.len()
        );
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered ({} active)",
                id,
                connections.len()
            );
        }
        removed
    }

    async fn broadcast_except(&self, from: &ConnectionId, frame: &str) -> FanOut {
        let connections = self.connections.lock().await;
        let mut report = FanOut::default();

        for (id, entry) in connections.iter().filter(|(id, _)| *id != from) {
            // 受信者ごとの失敗は許容し、他の受信者への配信を続ける
            if entry.channel.send(frame.to_string()).is_ok() {
                report.delivered += 1;
            } else {
                tracing::debug!("Dropped frame for connection '{}': channel closed", id);
                report.dropped += 1;
            }
        }

        report
    }

    async fn count(&self) -> usize {
        self.connections.lock().await.len()
    }

    async fn connections(&self) -> Vec<Connection> {
        let connections = self.connections.lock().await;
        let mut list: Vec<Connection> = connections
            .iter()
            .map(|(id, entry)| Connection::new(*id, entry.connected_at))
            .collect();
        list.sort_by_key(|c| (c.connected_at, c.id.to_string()));
        list
    }
}
