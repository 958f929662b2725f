use mcl_cards::Attribute;
use mcl_cards::Card;
use mcl_cards::Debuff;
use mcl_combat::ChainKind;
use mcl_combat::CorrelationId;
use mcl_combat::PlayerState;
use mcl_core::ID;
use mcl_core::Points;
use mcl_core::TurnNumber;

/// Everything clients need to render one attack resolution.
///
/// Also the payload cached for idempotent replay: retrying a declare with a
/// known correlation id rebroadcasts this rather than re-running combat.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub correlation: CorrelationId,
    pub attacker: ID<PlayerState>,
    pub target: ID<PlayerState>,
    pub health_damage_applied: Points,
    pub mental_damage_applied: Points,
    pub heal_applied: Points,
    pub health_before: Points,
    pub health_after: Points,
    pub mana_before: Points,
    pub mana_after: Points,
    pub eliminated: bool,
    pub defense_cards: Vec<Card>,
    pub applied_debuffs: Vec<Debuff>,
    pub next_player: ID<PlayerState>,
    pub turn: TurnNumber,
    /// Present (with zero damage applied) on reflect/bounce hand-off
    /// markers; absent on terminal resolutions.
    pub chain: Option<ChainKind>,
}

/// Events broadcast by the engine to all room participants.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Game began; play proceeds in roster order starting at `first`.
    GameStarted {
        players: Vec<ID<PlayerState>>,
        first: ID<PlayerState>,
    },
    /// A new turn began for `player`.
    TurnStarted {
        player: ID<PlayerState>,
        turn: TurnNumber,
    },
    /// An attack was declared and enqueued (informational, for UI).
    AttackAnnounced {
        correlation: CorrelationId,
        attacker: ID<PlayerState>,
        target: ID<PlayerState>,
        health_damage: Points,
        mental_damage: Points,
        attribute: Attribute,
        cards: Vec<Card>,
    },
    /// The defender must respond before the absolute expiry (unix ms).
    DefendRequest {
        correlation: CorrelationId,
        attacker: ID<PlayerState>,
        defender: ID<PlayerState>,
        health_damage: Points,
        expires_at: u64,
    },
    /// An attack hop resolved (terminally, or as a chain hand-off marker).
    AttackResolved(Resolution),
    /// A field magic took hold of the room.
    FieldMagicActivated {
        caster: ID<PlayerState>,
        name: String,
        remaining: u8,
    },
    /// The active field magic ran out of turns.
    FieldMagicExpired { name: String },
}

impl Event {
    /// The correlation id this event settles, if it settles one.
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            Event::AttackResolved(r) => Some(r),
            _ => None,
        }
    }
    pub fn is_defend_request(&self) -> bool {
        matches!(self, Event::DefendRequest { .. })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::GameStarted { players, .. } => {
                write!(f, "game started with {} players", players.len())
            }
            Event::TurnStarted { player, turn } => {
                write!(f, "turn {} for {}", turn, player)
            }
            Event::AttackAnnounced {
                attacker,
                target,
                health_damage,
                ..
            } => write!(f, "{} attacks {} for {}", attacker, target, health_damage),
            Event::DefendRequest {
                defender,
                expires_at,
                ..
            } => write!(f, "{} must defend before {}", defender, expires_at),
            Event::AttackResolved(r) => match r.chain {
                Some(kind) => write!(f, "{} hand-off from {}", kind, r.target),
                None => write!(
                    f,
                    "{} took {} damage{}",
                    r.target,
                    r.health_damage_applied,
                    if r.eliminated { ", eliminated" } else { "" }
                ),
            },
            Event::FieldMagicActivated { name, remaining, .. } => {
                write!(f, "field magic {} active for {} turns", name, remaining)
            }
            Event::FieldMagicExpired { name } => {
                write!(f, "field magic {} expired", name)
            }
        }
    }
}
