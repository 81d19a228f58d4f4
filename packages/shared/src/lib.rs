//! Shared utilities for the Sunadokei timer service.
//!
//! Cross-cutting helpers used by the server crate: tracing subscriber setup
//! and JST time helpers.

pub mod logger;
pub mod time;
