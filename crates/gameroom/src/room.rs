use super::*;
use mcl_combat::PlayerState;
use mcl_core::ID;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Everything the hosting layer can feed into a room's inbox.
///
/// Frames carry the bound player alongside the raw text: the socket bridge
/// authenticated the binding, and the room checks every wire-claimed actor
/// id against it before dispatching.
#[derive(Debug)]
pub enum Inbound {
    /// A player's socket connected; events flow out through the sender.
    Attach(ID<PlayerState>, UnboundedSender<String>),
    /// A raw text frame from a player's socket.
    Frame(ID<PlayerState>, String),
    /// A player's socket went away.
    Detach(ID<PlayerState>),
}

/// Live combat room coordinator.
/// Imperative shell that owns [`Engine`] (functional core) and serializes
/// all access to it on a single task: inbound frames and the defense
/// deadline race in one `select!`, so no handler ever observes a half
/// applied resolution.
pub struct Room {
    id: ID<Self>,
    engine: Engine,
    timer: Timer,
    table: Table,
    inbox: UnboundedReceiver<Inbound>,
}

impl Room {
    pub fn new(
        id: ID<Self>,
        players: &[ID<PlayerState>],
        config: TimerConfig,
    ) -> (Self, UnboundedSender<Inbound>) {
        let (tx, inbox) = unbounded_channel();
        let room = Self {
            id,
            engine: Engine::new(id, players, config.defense),
            timer: Timer::new(config),
            table: Table::default(),
            inbox,
        };
        (room, tx)
    }

    /// Drains the inbox until every sender is dropped. The deadline arm is
    /// polled first so a defense timeout is never starved by frame traffic;
    /// the race loser becomes a no-op inside the engine.
    pub async fn run(mut self, done: oneshot::Sender<()>) {
        log::debug!("[room {}] starting game loop", self.id);
        loop {
            tokio::select! {
                biased;
                _ = Self::expiry(self.timer.deadline()) => {
                    self.timer.clear();
                    let events = self.engine.timeout();
                    self.sync_timer(&events);
                    self.publish(&events);
                }
                inbound = self.inbox.recv() => match inbound {
                    Some(Inbound::Attach(player, sender)) => self.table.attach(player, sender),
                    Some(Inbound::Frame(player, text)) => self.handle(player, &text),
                    Some(Inbound::Detach(player)) => self.table.detach(player),
                    None => break,
                },
            }
        }
        log::info!("[room {}] game loop ended", self.id);
        let _ = done.send(());
    }

    fn handle(&mut self, player: ID<PlayerState>, text: &str) {
        let command = match Protocol::decode(text).and_then(Protocol::command) {
            Ok(command) => command,
            Err(e) => {
                log::debug!("[room {}] bad frame from {}: {}", self.id, player, e);
                return self.table.unicast(player, &ServerMessage::rejected(e));
            }
        };
        // the claimed actor must be the player this socket is bound to
        if command.actor().is_some_and(|actor| actor != player) {
            log::debug!("[room {}] {} sent a frame for another player", self.id, player);
            return self.table.unicast(
                player,
                &ServerMessage::rejected(mcl_combat::Reject::from(
                    mcl_combat::TurnError::NotYourSocket,
                )),
            );
        }
        log::debug!("[room {}] {}", self.id, command);
        let result = match command {
            Command::StartGame => self.engine.start(),
            Command::DeclareAttack {
                attacker,
                target,
                cards,
                correlation,
            } => self.engine.declare(attacker, target, cards, correlation),
            Command::RespondDefense {
                correlation,
                defender,
                cards,
            } => self.engine.respond(&correlation, defender, cards),
        };
        match result {
            Ok(events) => {
                self.sync_timer(&events);
                self.publish(&events);
            }
            Err(reject) => self.table.unicast(player, &ServerMessage::rejected(reject)),
        }
    }

    /// Keeps the deadline in lockstep with the engine. A fresh defend
    /// request restarts the countdown; otherwise the timer is cleared only
    /// when nothing awaits a defense, since an idempotent replay must not
    /// cancel a live countdown.
    fn sync_timer(&mut self, events: &[Event]) {
        if events.iter().any(Event::is_defend_request) {
            self.timer.start_defense();
        } else if self.engine.awaiting().is_none() {
            self.timer.clear();
        }
    }

    /// Defend requests go to their defender alone; everything else is
    /// public knowledge.
    fn publish(&self, events: &[Event]) {
        for event in events {
            log::debug!("[room {}] {}", self.id, event);
            match event {
                Event::DefendRequest { defender, .. } => {
                    self.table.unicast(*defender, &Protocol::encode(event))
                }
                _ => self.table.broadcast(&Protocol::encode(event)),
            }
        }
    }

    /// Pends forever while no deadline is armed.
    async fn expiry(deadline: Option<tokio::time::Instant>) {
        match deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}

impl mcl_core::Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcl_cards::Card;
    use std::time::Duration;
    use tokio::sync::mpsc::UnboundedReceiver;

    async fn recv(rx: &mut UnboundedReceiver<String>) -> String {
        tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("message within deadline")
            .expect("channel open")
    }
    async fn recv_until(rx: &mut UnboundedReceiver<String>, tag: &str) -> String {
        loop {
            let json = recv(rx).await;
            if json.contains(&format!(r#""type":"{}""#, tag)) {
                return json;
            }
        }
    }
    fn config() -> TimerConfig {
        TimerConfig {
            defense: Duration::from_millis(50),
        }
    }
    fn frame(msg: &ClientMessage) -> String {
        serde_json::to_string(msg).unwrap()
    }

    #[tokio::test]
    async fn timeout_resolves_over_the_wire() {
        let players = vec![ID::default(), ID::default()];
        let (room, tx) = Room::new(ID::default(), &players, config());
        let (done, _) = oneshot::channel();
        tokio::spawn(room.run(done));
        let (out0, mut rx0) = unbounded_channel();
        let (out1, mut rx1) = unbounded_channel();
        tx.send(Inbound::Attach(players[0], out0)).unwrap();
        tx.send(Inbound::Attach(players[1], out1)).unwrap();
        tx.send(Inbound::Frame(players[0], frame(&ClientMessage::StartGame)))
            .unwrap();
        recv_until(&mut rx1, "game_started").await;
        let declare = ClientMessage::DeclareAttack {
            attacker: players[0].to_string(),
            target: players[1].to_string(),
            cards: vec![Card::attack("slash", 10, 2)],
            correlation_id: None,
        };
        tx.send(Inbound::Frame(players[0], frame(&declare))).unwrap();
        // defend request reaches the defender alone
        let request = recv_until(&mut rx1, "defend_request").await;
        assert!(request.contains(r#""health_damage":10"#));
        // nobody responds: the deadline resolves it
        let resolved = recv_until(&mut rx1, "attack_resolved").await;
        assert!(resolved.contains(r#""health_damage_applied":10"#));
        assert!(resolved.contains(r#""health_after":90"#));
        // the attacker saw the announcement and resolution but no request
        let announced = recv_until(&mut rx0, "attack_announced").await;
        assert!(announced.contains(&players[1].to_string()));
        let mirrored = recv_until(&mut rx0, "attack_resolved").await;
        assert!(!mirrored.contains(r#""type":"defend_request""#));
    }

    #[tokio::test]
    async fn defense_response_beats_the_deadline() {
        let players = vec![ID::default(), ID::default()];
        let (room, tx) = Room::new(
            ID::default(),
            &players,
            TimerConfig {
                defense: Duration::from_secs(30),
            },
        );
        let (done, _) = oneshot::channel();
        tokio::spawn(room.run(done));
        let (out1, mut rx1) = unbounded_channel();
        tx.send(Inbound::Attach(players[1], out1)).unwrap();
        tx.send(Inbound::Frame(players[0], frame(&ClientMessage::StartGame)))
            .unwrap();
        let declare = ClientMessage::DeclareAttack {
            attacker: players[0].to_string(),
            target: players[1].to_string(),
            cards: vec![Card::attack("slash", 10, 2)],
            correlation_id: None,
        };
        tx.send(Inbound::Frame(players[0], frame(&declare))).unwrap();
        let request = recv_until(&mut rx1, "defend_request").await;
        let parsed: serde_json::Value = serde_json::from_str(&request).unwrap();
        let correlation = parsed["correlation_id"].as_str().unwrap().to_string();
        let respond = ClientMessage::RespondDefense {
            correlation_id: correlation,
            defender: players[1].to_string(),
            cards: vec![Card::defense("shield", 3, 1)],
        };
        tx.send(Inbound::Frame(players[1], frame(&respond))).unwrap();
        let resolved = recv_until(&mut rx1, "attack_resolved").await;
        assert!(resolved.contains(r#""health_damage_applied":7"#));
    }

    #[tokio::test]
    async fn rejections_are_unicast_to_the_offender() {
        let players = vec![ID::default(), ID::default()];
        let (room, tx) = Room::new(ID::default(), &players, config());
        let (done, _) = oneshot::channel();
        tokio::spawn(room.run(done));
        let (out1, mut rx1) = unbounded_channel();
        tx.send(Inbound::Attach(players[1], out1)).unwrap();
        tx.send(Inbound::Frame(players[0], frame(&ClientMessage::StartGame)))
            .unwrap();
        recv_until(&mut rx1, "game_started").await;
        // out of turn
        let declare = ClientMessage::DeclareAttack {
            attacker: players[1].to_string(),
            target: players[0].to_string(),
            cards: vec![Card::attack("slash", 10, 2)],
            correlation_id: None,
        };
        tx.send(Inbound::Frame(players[1], frame(&declare))).unwrap();
        let rejected = recv_until(&mut rx1, "rejected").await;
        assert!(rejected.contains("not your turn"));
        // claiming another player's seat
        let forged = ClientMessage::DeclareAttack {
            attacker: players[0].to_string(),
            target: players[1].to_string(),
            cards: vec![Card::attack("slash", 10, 2)],
            correlation_id: None,
        };
        tx.send(Inbound::Frame(players[1], frame(&forged))).unwrap();
        let rejected = recv_until(&mut rx1, "rejected").await;
        assert!(rejected.contains("not bound to this socket"));
        // malformed json
        tx.send(Inbound::Frame(players[1], "not json".to_string()))
            .unwrap();
        let rejected = recv_until(&mut rx1, "rejected").await;
        assert!(rejected.contains("invalid message"));
    }

    #[tokio::test]
    async fn loop_ends_when_senders_drop() {
        let players = vec![ID::default(), ID::default()];
        let (room, tx) = Room::new(ID::default(), &players, config());
        let (done, rx_done) = oneshot::channel();
        tokio::spawn(room.run(done));
        drop(tx);
        tokio::time::timeout(Duration::from_secs(1), rx_done)
            .await
            .expect("loop ends")
            .expect("done signal sent");
    }
}
