//! HTTP API response bodies.

use serde::Serialize;
use tegaki_shared::time::timestamp_to_rfc3339;

use crate::domain::Connection;

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthDto {
    pub status: String,
    pub connections: usize,
}

impl HealthDto {
    pub fn ok(connections: usize) -> Self {
        Self {
            status: "ok".to_string(),
            connections,
        }
    }
}

/// One entry of `GET /debug/connections`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSummaryDto {
    pub id: String,
    /// RFC 3339 (UTC)
    pub connected_at: String,
}

impl From<Connection> for ConnectionSummaryDto {
    fn from(model: Connection) -> Self {
        Self {
            id: model.id.to_string(),
            connected_at: timestamp_to_rfc3339(model.connected_at.value()),
        }
    }
}
