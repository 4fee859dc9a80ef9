//! Terminal client for the Tegaki drawing relay.
//!
//! Typed gestures become `draw` / `clear` events; events relayed from other
//! clients are applied to a local in-memory canvas in receipt order.

pub mod canvas;
pub mod command;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod pen;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
