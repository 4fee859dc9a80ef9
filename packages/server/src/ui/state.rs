//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{
    ConnectUseCase, DisconnectUseCase, DispatchEventUseCase, GetConnectionsUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectUseCase（接続のユースケース）
    pub connect_usecase: Arc<ConnectUseCase>,
    /// DisconnectUseCase（切断のユースケース）
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// DispatchEventUseCase（受信フレーム振り分けのユースケース）
    pub dispatch_event_usecase: Arc<DispatchEventUseCase>,
    /// GetConnectionsUseCase（接続一覧取得のユースケース）
    pub get_connections_usecase: Arc<GetConnectionsUseCase>,
}
