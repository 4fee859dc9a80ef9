//! UseCase: 接続一覧の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{Connection, ConnectionRegistry};

/// 接続一覧取得のユースケース
pub struct GetConnectionsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetConnectionsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// 接続中の一覧（接続時刻順）
    pub async fn execute(&self) -> Vec<Connection> {
        self.registry.connections().await
    }

    /// 接続数
    pub async fn count(&self) -> usize {
        self.registry.count().await
    }
}
