//! UseCase: キャンバス消去（clear）の中継

use std::sync::Arc;

use tegaki_shared::protocol::CLEAR_FRAME;

use crate::domain::{ConnectionId, ConnectionRegistry, FanOut};

/// clear イベント中継のユースケース
pub struct RelayClearUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayClearUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 正規の clear フレームを送信者以外の全接続へ送る
    ///
    /// 受信したフレームに付随するデータは転送しない。
    pub async fn execute(&self, from: &ConnectionId) -> FanOut {
        let report = self.registry.broadcast_except(from, CLEAR_FRAME).await;
        tracing::debug!(
            "Relayed clear from '{}' to {} connection(s) ({} dropped)",
            from,
            report.delivered,
            report.dropped
        );
        report
    }
}
