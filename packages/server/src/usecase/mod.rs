//! UseCase layer: one use case per relay operation.
//!
//! - `ConnectUseCase`: onConnect
//! - `RelayStrokeUseCase`: onStrokeSegment
//! - `RelayClearUseCase`: onClearSignal
//! - `DisconnectUseCase`: onDisconnect
//! - `DispatchEventUseCase`: routes an inbound frame to the relay use case of its event kind
//! - `GetConnectionsUseCase`: read-only view for the HTTP API

mod connect;
mod disconnect;
mod dispatch_event;
mod error;
mod get_connections;
mod relay_clear;
mod relay_stroke;

pub use connect::ConnectUseCase;
pub use disconnect::DisconnectUseCase;
pub use dispatch_event::{DispatchEventUseCase, Dispatched};
pub use error::RelayError;
pub use get_connections::GetConnectionsUseCase;
pub use relay_clear::RelayClearUseCase;
pub use relay_stroke::RelayStrokeUseCase;
