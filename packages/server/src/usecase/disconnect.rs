//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断した接続がレジストリから削除され、以後のフレームを受け取らないことを保証
//! - 残りの接続に通知（user left）を送らないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続の切断
//! - エッジケース：同じ接続の二重切断（upgrade 失敗時の後始末と重なる場合）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRegistry};

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// ConnectionRegistry（接続集合の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
}

impl DisconnectUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続を削除する
    ///
    /// # Returns
    ///
    /// 接続が登録されていた場合は `true`。既に削除済みでもエラーにはしない。
    pub async fn execute(&self, id: ConnectionId) -> bool {
        self.registry.unregister(&id).await
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.registry.count().await
    }
}
