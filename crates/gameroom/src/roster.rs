use mcl_combat::FieldMagic;
use mcl_combat::FieldTick;
use mcl_combat::PlayerState;
use mcl_core::ID;
use mcl_core::Position;
use mcl_core::TurnNumber;
use mcl_core::Unique;

/// Per-room player registry and turn pointer.
///
/// Owns every PlayerState in the room; the engine is the only mutator.
/// Seat order is fixed at creation and doubles as turn order. The turn
/// counter increments only when the pointer wraps past seat zero.
#[derive(Debug)]
pub struct Roster {
    players: Vec<PlayerState>,
    seat: Position,
    turn: TurnNumber,
    field: Option<FieldMagic>,
}

impl Roster {
    /// Initializes all players at game start: full pools, alive, no debuffs.
    pub fn new(ids: &[ID<PlayerState>]) -> Self {
        Self {
            players: ids.iter().map(|id| PlayerState::new(*id)).collect(),
            seat: 0,
            turn: 0,
            field: None,
        }
    }
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }
    pub fn ids(&self) -> Vec<ID<PlayerState>> {
        self.players.iter().map(|p| p.id()).collect()
    }
    pub fn player(&self, id: ID<PlayerState>) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id() == id)
    }
    pub fn player_mut(&mut self, id: ID<PlayerState>) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.id() == id)
    }
    pub fn contains(&self, id: ID<PlayerState>) -> bool {
        self.player(id).is_some()
    }
    /// Ids of all players still alive, in seat order.
    pub fn alive(&self) -> Vec<ID<PlayerState>> {
        self.players
            .iter()
            .filter(|p| p.alive())
            .map(|p| p.id())
            .collect()
    }
    /// The player whose turn it currently is.
    pub fn current(&self) -> ID<PlayerState> {
        self.players[self.seat].id()
    }
    pub fn is_current(&self, id: ID<PlayerState>) -> bool {
        self.current() == id
    }
    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    /// Repoints the turn tracker at the given player without advancing the
    /// turn counter. Chain hops swap the acting party this way.
    pub fn point_at(&mut self, id: ID<PlayerState>) {
        if let Some(pos) = self.players.iter().position(|p| p.id() == id) {
            self.seat = pos;
        }
    }
    /// Advances to the next alive player in round-robin order, wrapping.
    /// Incrementing the turn counter happens only on wrap. With no other
    /// alive player the pointer stays put.
    pub fn advance(&mut self) -> ID<PlayerState> {
        let n = self.players.len();
        for step in 1..=n {
            let candidate = (self.seat + step) % n;
            if self.players[candidate].alive() {
                if self.seat + step >= n {
                    self.turn += 1;
                }
                self.seat = candidate;
                break;
            }
        }
        self.current()
    }

    pub fn field(&self) -> Option<&FieldMagic> {
        self.field.as_ref()
    }
    /// Activates a field magic, silently replacing any active one.
    pub fn activate_field(&mut self, field: FieldMagic) -> Option<FieldMagic> {
        log::debug!("[roster] field magic {} activated", field.name());
        self.field.replace(field)
    }
    /// Applies the active field magic's per-turn effect to the current
    /// player and decrements its duration. Returns the name of a field
    /// that just expired, if one did.
    pub fn tick_field(&mut self) -> Option<String> {
        let field = self.field.as_mut()?;
        let tick = field.turn_effect();
        let expired = field.tick().then(|| field.name().to_string());
        if let Some(tick) = tick {
            let player = &mut self.players[self.seat];
            match tick {
                FieldTick::Mend(points) => {
                    player.heal(points);
                }
                FieldTick::Inspire(points) => {
                    player.restore_mental(points);
                }
                FieldTick::Drain(points) => {
                    player.apply_mental_damage(points);
                }
            }
        }
        if expired.is_some() {
            self.field = None;
        }
        expired
    }
}
