use super::*;
use mcl_combat::PlayerState;
use mcl_core::ID;
use mcl_core::MAX_PLAYERS;
use mcl_core::MIN_PLAYERS;
use mcl_gameroom::Inbound;
use mcl_gameroom::Room;
use mcl_gameroom::ServerMessage;
use mcl_gameroom::TimerConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Manages active combat rooms and their lifecycles.
#[derive(Default)]
pub struct Lobby {
    rooms: RwLock<HashMap<ID<Room>, RoomHandle>>,
}

impl Lobby {
    /// Opens a new room with the given seat count and spawns its task.
    /// Returns the room id and the minted player ids, one per seat; clients
    /// claim a seat by connecting with one of them.
    pub async fn open(
        self: &Arc<Self>,
        seats: usize,
    ) -> anyhow::Result<(ID<Room>, Vec<ID<PlayerState>>)> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&seats) {
            anyhow::bail!("rooms take {} to {} players", MIN_PLAYERS, MAX_PLAYERS);
        }
        let id = ID::default();
        let players = (0..seats).map(|_| ID::default()).collect::<Vec<_>>();
        let (room, tx) = Room::new(id, &players, TimerConfig::default());
        let (done_tx, done_rx) = oneshot::channel();
        self.rooms.write().await.insert(
            id,
            RoomHandle {
                id,
                players: players.clone(),
                tx,
            },
        );
        tokio::spawn(room.run(done_tx));
        let lobby = self.clone();
        tokio::spawn(async move {
            let _ = done_rx.await;
            let _ = lobby.close(id).await;
            log::info!("[lobby] room {} cleaned up", id);
        });
        log::debug!("[lobby] created room {} with {} seats", id, seats);
        Ok((id, players))
    }
    /// Closes a room and removes it from the lobby. Dropping the handle
    /// drops the room's last inbox sender, which ends its task.
    pub async fn close(&self, id: ID<Room>) -> anyhow::Result<()> {
        self.rooms
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| anyhow::anyhow!("room not found"))
    }
    pub async fn contains(&self, id: ID<Room>) -> bool {
        self.rooms.read().await.contains_key(&id)
    }
    /// Gets the room's inbox sender, verifying the player holds a seat.
    async fn channels(
        &self,
        id: ID<Room>,
        player: ID<PlayerState>,
    ) -> anyhow::Result<UnboundedSender<Inbound>> {
        self.rooms
            .read()
            .await
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("room not found"))
            .and_then(|handle| {
                handle
                    .has_player(player)
                    .then(|| handle.tx.clone())
                    .ok_or_else(|| anyhow::anyhow!("player not seated in this room"))
            })
    }
    /// Spawns a WebSocket bridge between one client socket and the room.
    /// Frames go in attributed to the bound player; events come out as
    /// JSON text. Either side closing tears the bridge down and detaches.
    pub async fn bridge(
        &self,
        id: ID<Room>,
        player: ID<PlayerState>,
        mut session: actix_ws::Session,
        mut stream: actix_ws::MessageStream,
    ) -> anyhow::Result<()> {
        use futures::StreamExt;
        let tx = self.channels(id, player).await?;
        session
            .text(ServerMessage::connected(&id.to_string(), &player.to_string()).to_json())
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        let (out_tx, mut out_rx) = unbounded_channel::<String>();
        tx.send(Inbound::Attach(player, out_tx))
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        log::debug!("[bridge {}] player {} connected", id, player);
        actix_web::rt::spawn(async move {
            'sesh: loop {
                tokio::select! {
                    biased;
                    msg = out_rx.recv() => match msg {
                        Some(json) => if session.text(json).await.is_err() { break 'sesh },
                        None => break 'sesh,
                    },
                    msg = stream.next() => match msg {
                        Some(Ok(actix_ws::Message::Text(text))) => if tx.send(Inbound::Frame(player, text.to_string())).is_err() { break 'sesh },
                        Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                        Some(Err(_)) => break 'sesh,
                        None => break 'sesh,
                        _ => continue 'sesh,
                    },
                }
            }
            let _ = tx.send(Inbound::Detach(player));
            log::debug!("[bridge {}] player {} disconnected", id, player);
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_validates_seat_bounds() {
        let lobby = Arc::new(Lobby::default());
        assert!(lobby.open(MIN_PLAYERS - 1).await.is_err());
        assert!(lobby.open(MAX_PLAYERS + 1).await.is_err());
        let (id, players) = lobby.open(MIN_PLAYERS).await.unwrap();
        assert_eq!(players.len(), MIN_PLAYERS);
        assert!(lobby.contains(id).await);
    }
    #[tokio::test]
    async fn close_removes_the_room() {
        let lobby = Arc::new(Lobby::default());
        let (id, _) = lobby.open(2).await.unwrap();
        lobby.close(id).await.unwrap();
        assert!(!lobby.contains(id).await);
        assert!(lobby.close(id).await.is_err());
    }
    #[tokio::test]
    async fn channels_reject_unseated_players() {
        let lobby = Arc::new(Lobby::default());
        let (id, players) = lobby.open(2).await.unwrap();
        assert!(lobby.channels(id, players[0]).await.is_ok());
        assert!(lobby.channels(id, ID::default()).await.is_err());
        assert!(lobby.channels(ID::default(), players[0]).await.is_err());
    }
}
