//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 接続時にレジストリへ登録されること、接続時刻が Clock から取得されることを保証
//! - 参加通知（user joined）を送らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 正常系：既存の接続がある状態での登録（他の接続には何も送られない）

use std::sync::Arc;

use tegaki_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionIdFactory, ConnectionRegistry, OutboundChannel, Timestamp,
};

/// 接続のユースケース
pub struct ConnectUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// 接続時刻の取得元
    clock: Arc<dyn Clock>,
}

impl ConnectUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// 接続を登録する
    ///
    /// 新しい ConnectionId を払い出し、送信チャンネルとともにレジストリへ登録する。
    /// 他の接続への通知は行わない。
    pub async fn execute(&self, channel: OutboundChannel) -> Connection {
        let id = ConnectionIdFactory::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());

        self.registry.register(id, channel, connected_at).await;

        Connection::new(id, connected_at)
    }
}
