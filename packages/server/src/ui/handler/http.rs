//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{ConnectionSummaryDto, HealthDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let connections = state.get_connections_usecase.count().await;
    Json(HealthDto::ok(connections))
}

/// Debug endpoint listing the active connections
pub async fn debug_connections(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<ConnectionSummaryDto>> {
    let connections = state.get_connections_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(connections.into_iter().map(Into::into).collect())
}
