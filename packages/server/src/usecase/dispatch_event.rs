//! UseCase: 受信フレームの振り分け
//!
//! イベント名は境界で `EventKind` に変換され、以降は列挙型に対する網羅的な `match`
//! によって各中継ユースケースへ振り分けられます（イベント種別 → ハンドラの対応表）。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchEventUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：draw / clear の振り分け
//! - 異常系：未知のイベント、ペイロードのない draw、JSON でないフレーム（いずれも誰にも転送されない）

use std::sync::Arc;

use tegaki_shared::protocol::{EventKind, inspect_frame};

use crate::domain::{ConnectionId, FanOut};

use super::{RelayClearUseCase, RelayError, RelayStrokeUseCase};

/// 振り分け結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub kind: EventKind,
    pub fan_out: FanOut,
}

/// 受信フレーム振り分けのユースケース
pub struct DispatchEventUseCase {
    relay_stroke_usecase: Arc<RelayStrokeUseCase>,
    relay_clear_usecase: Arc<RelayClearUseCase>,
}

impl DispatchEventUseCase {
    pub fn new(
        relay_stroke_usecase: Arc<RelayStrokeUseCase>,
        relay_clear_usecase: Arc<RelayClearUseCase>,
    ) -> Self {
        Self {
            relay_stroke_usecase,
            relay_clear_usecase,
        }
    }

    /// 受信フレームをイベント種別に応じて中継する
    ///
    /// # Errors
    ///
    /// フレームが中継できない場合は `RelayError::Rejected`。この場合は誰にも転送しない。
    pub async fn execute(&self, from: &ConnectionId, frame: &str) -> Result<Dispatched, RelayError> {
        let kind = inspect_frame(frame)?;

        let fan_out = match kind {
            EventKind::Draw => self.relay_stroke_usecase.execute(from, frame).await,
            EventKind::Clear => self.relay_clear_usecase.execute(from).await,
        };

        Ok(Dispatched { kind, fan_out })
    }
}
