//! DTOs (Data Transfer Objects)
//!
//! The WebSocket frame format lives in `tegaki_shared::protocol`; this module
//! only holds the HTTP response bodies.

pub mod http;
