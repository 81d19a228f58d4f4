//! Room-scoped shared timer service library.
//!
//! Any number of clients join a named room over WebSocket, create counters
//! ("timers") inside it, and start/stop/reset/annotate them. Every mutation
//! is broadcast to all sessions in the room and persisted so a room's state
//! survives reconnects and server restarts.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
