use super::*;
use mcl_cards::Card;
use mcl_combat::AttackOrigin;
use mcl_combat::AttackQueue;
use mcl_combat::AttackQueueItem;
use mcl_combat::AttackStatus;
use mcl_combat::ChainKind;
use mcl_combat::CombatError;
use mcl_combat::CorrelationId;
use mcl_combat::FieldMagic;
use mcl_combat::PlayerState;
use mcl_combat::Reject;
use mcl_combat::RoomError;
use mcl_combat::TurnError;
use mcl_combat::damage;
use mcl_combat::effect;
use mcl_combat::validate;
use mcl_core::ID;
use mcl_core::MAX_CHAIN_DEPTH;
use std::time::Duration;
use std::time::Instant;

/// Room lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Playing,
}

/// Functional core of a live combat room.
///
/// The engine is fully synchronous: every operation takes a command's worth
/// of input, mutates the room state it owns, and returns the events to
/// broadcast. The async shell ([`Room`]) feeds it and handles the defense
/// deadline; chains are processed one hop at a time, so at most one attack
/// awaits a defense at any moment.
///
/// [`Room`]: crate::Room
#[derive(Debug)]
pub struct Engine {
    id: ID<Room>,
    phase: Phase,
    roster: Roster,
    queue: AttackQueue,
    cache: IdempotencyCache,
    defense_window: Duration,
}

impl Engine {
    pub fn new(id: ID<Room>, players: &[ID<PlayerState>], defense_window: Duration) -> Self {
        Self {
            id,
            phase: Phase::Waiting,
            roster: Roster::new(players),
            queue: AttackQueue::default(),
            cache: IdempotencyCache::default(),
            defense_window,
        }
    }
    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    /// Test/debug hook into player state.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    /// The attack currently awaiting a defense response, if any.
    pub fn awaiting(&self) -> Option<&AttackQueueItem> {
        self.queue.awaiting()
    }
    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Initializes player states and the turn pointer, then begins play.
    pub fn start(&mut self) -> Result<Vec<Event>, Reject> {
        if self.phase == Phase::Playing {
            return Err(RoomError::AlreadyPlaying.into());
        }
        self.roster = Roster::new(&self.roster.ids());
        self.phase = Phase::Playing;
        log::info!(
            "[room {}] game started with {} players",
            self.id,
            self.roster.players().len()
        );
        Ok(vec![
            Event::GameStarted {
                players: self.roster.ids(),
                first: self.roster.current(),
            },
            Event::TurnStarted {
                player: self.roster.current(),
                turn: self.roster.turn(),
            },
        ])
    }

    /// Declares an attack for the current-turn player.
    pub fn declare(
        &mut self,
        attacker: ID<PlayerState>,
        target: ID<PlayerState>,
        cards: Vec<Card>,
        correlation: Option<CorrelationId>,
    ) -> Result<Vec<Event>, Reject> {
        if self.phase != Phase::Playing {
            return Err(RoomError::NotInProgress.into());
        }
        // Idempotency short-circuit precedes the turn check: by the time a
        // client retries, the original resolution has advanced the turn.
        if let Some(ref correlation) = correlation {
            if let Some(event) = self.cache.replay(correlation) {
                log::debug!(
                    "[room {}] replaying cached resolution for {}",
                    self.id,
                    correlation
                );
                return Ok(vec![event.clone()]);
            }
        }
        // One attack in flight at a time: the queue may not hold a second
        // AwaitingDefense item while a defender is still on the clock.
        if self.queue.awaiting().is_some() {
            return Err(CombatError::DefensePending.into());
        }
        if !self.roster.contains(attacker) {
            return Err(CombatError::TargetNotFound.into());
        }
        if !self.roster.is_current(attacker) {
            return Err(TurnError::NotYourTurn.into());
        }
        let defender = self
            .roster
            .player(target)
            .ok_or(CombatError::TargetNotFound)?;
        if !defender.alive() {
            return Err(CombatError::TargetEliminated.into());
        }
        let mana = self
            .roster
            .player(attacker)
            .map(|p| p.mental_power())
            .unwrap_or(0);
        validate::validate_play(&cards, mana, self.roster.field())?;
        if cards.len() == 1 && cards[0].kind.is_field_magic() {
            return self.activate_field(attacker, cards, correlation);
        }
        let cost = damage::total_mana_cost(&cards);
        self.roster
            .player_mut(attacker)
            .ok_or(CombatError::TargetNotFound)?
            .spend_mana(cost)?;
        let profile = damage::compute_attack(&cards);
        let item = AttackQueueItem {
            id: ID::default(),
            correlation: correlation.unwrap_or_default(),
            attacker,
            target,
            health_damage: profile.health_damage,
            mental_damage: profile.mental_damage,
            heal: profile.heal,
            cards_used: cards,
            attribute: profile.attribute,
            origin: AttackOrigin::Root,
            status: AttackStatus::Pending,
            created_at: Instant::now(),
        };
        let id = item.id;
        self.queue.enqueue(item);
        Ok(self.process_attack(id))
    }

    /// A lone FieldMagic card replaces the active field and consumes the
    /// turn; no defense is solicited.
    fn activate_field(
        &mut self,
        caster: ID<PlayerState>,
        cards: Vec<Card>,
        correlation: Option<CorrelationId>,
    ) -> Result<Vec<Event>, Reject> {
        let cost = damage::total_mana_cost(&cards);
        self.roster
            .player_mut(caster)
            .ok_or(CombatError::TargetNotFound)?
            .spend_mana(cost)?;
        let field = FieldMagic::from_card(&cards[0], caster);
        let activated = Event::FieldMagicActivated {
            caster,
            name: field.name().to_string(),
            remaining: field.remaining(),
        };
        if let Some(replaced) = self.roster.activate_field(field) {
            log::debug!(
                "[room {}] field magic {} displaced by new activation",
                self.id,
                replaced.name()
            );
        }
        // only client-supplied correlations are retryable
        if let Some(correlation) = correlation {
            self.cache.store(correlation, activated.clone());
        }
        let mut events = vec![activated];
        events.extend(self.begin_turn());
        Ok(events)
    }

    /// Announces the attack and solicits a defense from its target.
    /// Chain hops repoint the turn tracker at their new attacker here.
    fn process_attack(&mut self, id: ID<AttackQueueItem>) -> Vec<Event> {
        let Some(item) = self.queue.get(id) else {
            return vec![];
        };
        let correlation = item.correlation.clone();
        let (attacker, target) = (item.attacker, item.target);
        let (health_damage, mental_damage) = (item.health_damage, item.mental_damage);
        let attribute = item.attribute;
        let cards = item.cards_used.clone();
        self.roster.point_at(attacker);
        self.queue.await_defense(id);
        let expires_at = now_ms() + self.defense_window.as_millis() as u64;
        log::debug!(
            "[room {}] attack {} announced, defense expires at {}",
            self.id,
            correlation,
            expires_at
        );
        vec![
            Event::AttackAnnounced {
                correlation: correlation.clone(),
                attacker,
                target,
                health_damage,
                mental_damage,
                attribute,
                cards,
            },
            Event::DefendRequest {
                correlation,
                attacker,
                defender: target,
                health_damage,
                expires_at,
            },
        ]
    }

    /// Answers the outstanding defend-request.
    pub fn respond(
        &mut self,
        correlation: &CorrelationId,
        defender: ID<PlayerState>,
        cards: Vec<Card>,
    ) -> Result<Vec<Event>, Reject> {
        if self.phase != Phase::Playing {
            return Err(RoomError::NotInProgress.into());
        }
        let item = self
            .queue
            .by_correlation(correlation)
            .ok_or(CombatError::AttackNotFound)?;
        if item.target != defender {
            return Err(CombatError::DefenseNotYours.into());
        }
        let id = item.id;
        let cost = damage::total_mana_cost(&cards);
        self.roster
            .player_mut(defender)
            .ok_or(CombatError::TargetNotFound)?
            .spend_mana(cost)?;
        Ok(self.resolve_attack(id, cards))
    }

    /// Resolves the awaited attack as if the defender played nothing.
    /// No-op when nothing is awaiting (the response won the race).
    pub fn timeout(&mut self) -> Vec<Event> {
        match self.queue.awaiting().map(|i| i.id) {
            Some(id) => {
                log::info!("[room {}] defense window expired", self.id);
                self.resolve_attack(id, vec![])
            }
            None => vec![],
        }
    }

    fn resolve_attack(&mut self, id: ID<AttackQueueItem>, defense: Vec<Card>) -> Vec<Event> {
        let Some(item) = self.queue.get(id).cloned() else {
            return vec![];
        };
        // Past the depth cap, special effects fall through to normal damage.
        let chain = effect::find_special(&defense)
            .map(|(kind, _)| kind)
            .filter(|_| item.depth() < MAX_CHAIN_DEPTH);
        match chain {
            Some(ChainKind::Reflect) => {
                // Self-attacks reflect back onto the same player rather
                // than erroring.
                self.chain_attack(item, defense, ChainKind::Reflect)
            }
            Some(ChainKind::Bounce) => match self.bounce_target(&item) {
                Some(next) => self.chain_attack_to(item, defense, ChainKind::Bounce, next),
                None => self.abort_chain(item, defense),
            },
            None => self.apply_resolution(item, defense),
        }
    }

    /// Reflect: attacker and target swap and the attack loops back through
    /// announcement.
    fn chain_attack(
        &mut self,
        item: AttackQueueItem,
        defense: Vec<Card>,
        kind: ChainKind,
    ) -> Vec<Event> {
        let next = item.attacker;
        self.chain_attack_to(item, defense, kind, next)
    }

    fn chain_attack_to(
        &mut self,
        item: AttackQueueItem,
        defense: Vec<Card>,
        kind: ChainKind,
        next: ID<PlayerState>,
    ) -> Vec<Event> {
        self.queue.remove(item.id);
        log::info!(
            "[room {}] {} chains attack {} to {} (depth {})",
            self.id,
            kind,
            item.correlation,
            next,
            item.depth() + 1
        );
        let marker = self.handoff_marker(&item, defense, kind);
        let hop = AttackQueueItem {
            id: ID::default(),
            correlation: CorrelationId::default(),
            attacker: item.target,
            target: next,
            health_damage: item.health_damage,
            mental_damage: item.mental_damage,
            heal: item.heal,
            cards_used: item.cards_used.clone(),
            attribute: item.attribute,
            origin: AttackOrigin::ChainedFrom {
                parent: item.id,
                kind,
                depth: item.depth() + 1,
            },
            status: AttackStatus::Pending,
            created_at: Instant::now(),
        };
        let hop_id = hop.id;
        self.queue.enqueue(hop);
        let mut events = vec![Event::AttackResolved(marker)];
        events.extend(self.process_attack(hop_id));
        events
    }

    /// Bounce with nobody to bounce to: zero damage anywhere, plain turn
    /// advance.
    fn abort_chain(&mut self, item: AttackQueueItem, defense: Vec<Card>) -> Vec<Event> {
        log::info!(
            "[room {}] bounce aborted for {}: no eligible targets",
            self.id,
            item.correlation
        );
        self.queue.remove(item.id);
        let turn_events = self.begin_turn();
        let marker = self.handoff_marker(&item, defense, ChainKind::Bounce);
        let mut events = vec![Event::AttackResolved(marker)];
        events.extend(turn_events);
        events
    }

    /// Zero-damage "resolved" broadcast for a chain hand-off so the UI can
    /// show the reflect/bounce. The defender takes nothing from this hop.
    fn handoff_marker(
        &self,
        item: &AttackQueueItem,
        defense: Vec<Card>,
        kind: ChainKind,
    ) -> Resolution {
        let (health, mana) = self
            .roster
            .player(item.target)
            .map(|p| (p.health(), p.mental_power()))
            .unwrap_or((0, 0));
        Resolution {
            correlation: item.correlation.clone(),
            attacker: item.attacker,
            target: item.target,
            health_damage_applied: 0,
            mental_damage_applied: 0,
            heal_applied: 0,
            health_before: health,
            health_after: health,
            mana_before: mana,
            mana_after: mana,
            eliminated: false,
            defense_cards: defense,
            applied_debuffs: vec![],
            next_player: self.roster.current(),
            turn: self.roster.turn(),
            chain: Some(kind),
        }
    }

    /// Uniform draw over eligible alive players. By default the original
    /// attacker and the bouncing defender are excluded; the
    /// `inclusive-bounce` feature widens the pool to every alive player.
    fn bounce_target(&self, item: &AttackQueueItem) -> Option<ID<PlayerState>> {
        let pool = self.roster.alive();
        let pool = if cfg!(feature = "inclusive-bounce") {
            pool
        } else {
            pool.into_iter()
                .filter(|id| *id != item.attacker && *id != item.target)
                .collect()
        };
        if pool.is_empty() {
            None
        } else {
            Some(pool[rand::random_range(0..pool.len())])
        }
    }

    /// Terminal resolution: heal, then health damage (reduced by effective
    /// defense), then mental damage (never reduced), then debuffs, then the
    /// turn advances and the payload is cached for replay.
    fn apply_resolution(&mut self, item: AttackQueueItem, defense: Vec<Card>) -> Vec<Event> {
        let applied_defense = if damage::is_defense_effective(item.attribute, &defense) {
            damage::defense_value(&defense)
        } else {
            0
        };
        let final_health_damage = damage::reduce(item.health_damage, applied_defense);
        let Some(target) = self.roster.player_mut(item.target) else {
            log::warn!(
                "[room {}] resolution target {} vanished, dropping attack",
                self.id,
                item.target
            );
            self.queue.remove(item.id);
            return vec![];
        };
        let health_before = target.health();
        let mana_before = target.mental_power();
        let heal_applied = target.heal(item.heal);
        let health_damage_applied = target.apply_health_damage(final_health_damage);
        let mental_damage_applied = target.apply_mental_damage(item.mental_damage);
        let eliminated = !target.alive();
        let applied_debuffs =
            effect::merge_debuffs(target.debuffs_mut(), effect::extract_debuffs(&item.cards_used));
        let health_after = target.health();
        let mana_after = target.mental_power();
        if eliminated {
            log::info!("[room {}] player {} eliminated", self.id, item.target);
        }
        self.queue.remove(item.id);
        let turn_events = self.begin_turn();
        let resolution = Resolution {
            correlation: item.correlation.clone(),
            attacker: item.attacker,
            target: item.target,
            health_damage_applied,
            mental_damage_applied,
            heal_applied,
            health_before,
            health_after,
            mana_before,
            mana_after,
            eliminated,
            defense_cards: defense,
            applied_debuffs,
            next_player: self.roster.current(),
            turn: self.roster.turn(),
            chain: None,
        };
        let resolved = Event::AttackResolved(resolution);
        self.cache.store(item.correlation, resolved.clone());
        let mut events = vec![resolved];
        events.extend(turn_events);
        events
    }

    /// Advances to the next alive player and runs their turn-start tick.
    fn begin_turn(&mut self) -> Vec<Event> {
        self.roster.advance();
        let mut events = Vec::new();
        if let Some(name) = self.roster.tick_field() {
            events.push(Event::FieldMagicExpired { name });
        }
        events.push(Event::TurnStarted {
            player: self.roster.current(),
            turn: self.roster.turn(),
        });
        events
    }
}

/// Milliseconds since the unix epoch, for absolute expiry timestamps.
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
