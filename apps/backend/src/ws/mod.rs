//! Realtime websocket surface: one session per connected seat.

pub mod protocol;
pub mod session;
