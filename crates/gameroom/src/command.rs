use mcl_cards::Card;
use mcl_combat::CorrelationId;
use mcl_combat::PlayerState;
use mcl_core::ID;

/// Typed inbound operations, decoded from the wire by [`Protocol`].
///
/// Each command names the actor it claims to act for; the room shell checks
/// that claim against the socket's bound player before dispatching.
///
/// [`Protocol`]: crate::Protocol
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Initialize player states and the turn pointer, then begin play.
    StartGame,
    /// Declare an attack with the given play.
    DeclareAttack {
        attacker: ID<PlayerState>,
        target: ID<PlayerState>,
        cards: Vec<Card>,
        correlation: Option<CorrelationId>,
    },
    /// Answer an outstanding defend-request.
    RespondDefense {
        correlation: CorrelationId,
        defender: ID<PlayerState>,
        cards: Vec<Card>,
    },
}

impl Command {
    /// The player this command claims to act for, if it claims one.
    pub fn actor(&self) -> Option<ID<PlayerState>> {
        match self {
            Command::StartGame => None,
            Command::DeclareAttack { attacker, .. } => Some(*attacker),
            Command::RespondDefense { defender, .. } => Some(*defender),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::StartGame => write!(f, "start game"),
            Command::DeclareAttack {
                attacker, target, ..
            } => write!(f, "{} declares attack on {}", attacker, target),
            Command::RespondDefense {
                defender, cards, ..
            } => write!(f, "{} defends with {} cards", defender, cards.len()),
        }
    }
}
