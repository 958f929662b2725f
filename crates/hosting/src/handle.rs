use mcl_combat::PlayerState;
use mcl_core::ID;
use mcl_gameroom::Inbound;
use mcl_gameroom::Room;
use tokio::sync::mpsc::UnboundedSender;

/// Handle to communicate with a running room.
/// Holds the room's inbox sender and the player ids minted at open time;
/// the room task itself owns everything else.
pub struct RoomHandle {
    pub id: ID<Room>,
    pub players: Vec<ID<PlayerState>>,
    pub tx: UnboundedSender<Inbound>,
}

impl RoomHandle {
    /// Whether the given player was seated in this room at open time.
    pub fn has_player(&self, player: ID<PlayerState>) -> bool {
        self.players.contains(&player)
    }
}
