use super::*;
use mcl_combat::PlayerState;
use mcl_core::ID;
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

/// Manages outbound communication: one JSON sender per connected player.
/// Separates socket lifecycle from game logic; a detached player's game
/// state lives on in the roster and their frames simply go nowhere.
#[derive(Debug, Default)]
pub struct Table {
    senders: HashMap<ID<PlayerState>, UnboundedSender<String>>,
}

impl Table {
    /// Binds a player's outbound channel, replacing any previous binding
    /// (reconnects supersede stale sockets).
    pub fn attach(&mut self, player: ID<PlayerState>, sender: UnboundedSender<String>) {
        log::debug!("[table] attach {}", player);
        self.senders.insert(player, sender);
    }
    /// Drops a player's outbound channel.
    pub fn detach(&mut self, player: ID<PlayerState>) {
        log::debug!("[table] detach {}", player);
        self.senders.remove(&player);
    }
    pub fn is_attached(&self, player: ID<PlayerState>) -> bool {
        self.senders.contains_key(&player)
    }
    /// Returns the number of connected players.
    pub fn connected_count(&self) -> usize {
        self.senders.len()
    }
    /// Sends a message to a specific player.
    pub fn unicast(&self, player: ID<PlayerState>, message: &ServerMessage) {
        match self.senders.get(&player).map(|tx| tx.send(message.to_json())) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[table] unicast to {} failed: {:?}", player, e),
            None => log::debug!("[table] unicast to {}: not attached", player),
        }
    }
    /// Sends a message to all connected players.
    pub fn broadcast(&self, message: &ServerMessage) {
        let json = message.to_json();
        for (player, tx) in self.senders.iter() {
            if let Err(e) = tx.send(json.clone()) {
                log::warn!("[table] broadcast to {} failed: {:?}", player, e);
            }
        }
    }
}
