//! Async runtime for live manaclash rooms.
//!
//! This crate orchestrates multiplayer combat sessions: each room runs as a
//! single tokio task that owns all of its state, so handlers for one room
//! are serialized structurally rather than with locks.
//!
//! ## Architecture
//!
//! - [`Engine`] — functional core: the combat orchestrator state machine
//!   (declare → announce → await defense → resolve or chain)
//! - [`Room`] — imperative shell: the async task draining inbound frames
//!   and the defense deadline, broadcasting typed events back out
//! - [`Roster`] — per-room player registry, turn pointer, field magic
//! - [`Table`] — per-player outbound sender bookkeeping
//!
//! ## Protocol
//!
//! - [`Command`] — typed inbound operations
//! - [`Event`] — typed notifications emitted by the engine
//! - [`ClientMessage`]/[`ServerMessage`] — JSON wire mirror of the above
//! - [`Protocol`] — encode/decode between the two

mod cache;
mod command;
mod engine;
mod event;
mod message;
mod protocol;
mod room;
mod roster;
mod table;
mod timer;

pub use cache::*;
pub use command::*;
pub use engine::*;
pub use event::*;
pub use message::*;
pub use protocol::*;
pub use room::*;
pub use roster::*;
pub use table::*;
pub use timer::*;
