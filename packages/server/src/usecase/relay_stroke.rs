//! UseCase: ストローク（draw）の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayStrokeUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - フレームが一切加工されずに送信者以外へ転送されることを保証
//! - ペイロードの中身を検証しないこと（不正な値もそのまま転送される）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 接続中、1 接続からの draw
//! - エッジケース：送信者しか接続していない場合

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry, FanOut};

/// draw イベント中継のユースケース
pub struct RelayStrokeUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl RelayStrokeUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// draw フレームを送信者以外の全接続へ転送する
    ///
    /// # Arguments
    ///
    /// * `from` - 送信元の接続
    /// * `frame` - 受信したフレーム（そのまま転送される）
    pub async fn execute(&self, from: &ConnectionId, frame: &str) -> FanOut {
        let report = self.registry.broadcast_except(from, frame).await;
        tracing::debug!(
            "Relayed draw from '{}' to {} connection(s) ({} dropped)",
            from,
            report.delivered,
            report.dropped
        );
        report
    }
}
