//! WebSocket hosting for live combat rooms.
//!
//! The [`Lobby`] owns the registry of running rooms and bridges each
//! authenticated socket onto its room's inbox. Rooms run as detached tokio
//! tasks; a [`RoomHandle`] is all the lobby keeps of one.

mod handle;
mod lobby;

pub use handle::*;
pub use lobby::*;
