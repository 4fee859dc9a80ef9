//! Domain layer of the relay server.
//!
//! The server keeps no canvas state. The only thing it models is the set of
//! live connections and the seam (`ConnectionRegistry`) used to reach them.

pub mod entity;
pub mod registry;
pub mod value_object;

pub use entity::Connection;
pub use registry::{ConnectionRegistry, FanOut, OutboundChannel};
pub use value_object::{ConnectionId, ConnectionIdFactory, Timestamp};

#[cfg(test)]
pub use registry::MockConnectionRegistry;
