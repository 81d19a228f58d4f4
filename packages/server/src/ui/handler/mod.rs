//! HTTP / WebSocket endpoint handlers.

pub mod http;
pub mod websocket;
