//! Tegaki relay server library.
//!
//! Accepts WebSocket connections and relays `draw` / `clear` events from each
//! client to every other connected client. The server keeps no canvas state.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
