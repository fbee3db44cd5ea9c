//! Yubin relay server library.
//!
//! Routes one-to-one messages between WebSocket connections: every
//! authenticated identity owns a room, and a message addressed to an
//! identity is fanned out to all of that identity's live connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
