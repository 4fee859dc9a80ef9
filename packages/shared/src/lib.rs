//! Shared building blocks for the Tegaki server and client.
//!
//! - `protocol`: wire format of the relay (event envelopes and stroke payloads)
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting

pub mod logger;
pub mod protocol;
pub mod time;
