//! Domain entities.

use super::value_object::{ConnectionId, Timestamp};

/// A live connection to the relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self { id, connected_at }
    }
}
