//! ConnectionRegistry trait 定義
//!
//! 接続中クライアントの集合と、各クライアントへの送信チャンネルを扱う
//! インターフェースです。具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! サーバーインスタンスごとに 1 つのレジストリを注入するため、
//! テストでは独立したサーバーを複数起動できます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Connection, ConnectionId, Timestamp};

/// Outbound channel of one connection. Each item is one text frame.
pub type OutboundChannel = mpsc::UnboundedSender<String>;

/// Result of one fan-out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOut {
    /// Recipients whose channel accepted the frame
    pub delivered: usize,
    /// Recipients whose channel was already closed
    pub dropped: usize,
}

/// Connection Registry trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録する
    async fn register(&self, id: ConnectionId, channel: OutboundChannel, connected_at: Timestamp);

    /// 接続を削除する。登録されていた場合は `true`
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// `from` 以外の全ての接続にフレームを送信する
    ///
    /// 送信は受信者ごとに独立しており、失敗した受信者は `FanOut::dropped` に数えられるだけで
    /// 他の受信者への配信には影響しない。
    async fn broadcast_except(&self, from: &ConnectionId, frame: &str) -> FanOut;

    /// 接続数を取得
    async fn count(&self) -> usize;

    /// 接続中の一覧を取得（接続時刻順）
    async fn connections(&self) -> Vec<Connection>;
}
