use serde::Deserialize;
use serde::Serialize;

/// Lingering affliction applied to a player by attack cards.
///
/// Debuffs accumulate as a set on the afflicted player: re-applying one
/// already present is a no-op and is not reported as newly applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Debuff {
    Poison,
    Weaken,
    Confuse,
    /// Sealed players cannot include Magic cards in a play while a sealing
    /// field magic is active.
    Seal,
}

impl std::fmt::Display for Debuff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poison => write!(f, "poison"),
            Self::Weaken => write!(f, "weaken"),
            Self::Confuse => write!(f, "confuse"),
            Self::Seal => write!(f, "seal"),
        }
    }
}

/// Special effect tag carried by a card.
///
/// Reflect and Bounce on a *defense* play short-circuit damage and chain the
/// attack to a new target. Heal on an *attack* play turns the card's health
/// damage into healing. Debuffs ride along on attack cards and stick to the
/// target on resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    #[default]
    None,
    Reflect,
    Bounce,
    Heal,
    Buff,
    Debuff(Debuff),
}

impl Effect {
    /// True for effects that chain the attack instead of defending it.
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Reflect | Self::Bounce)
    }
    /// True if this card heals instead of damaging.
    pub fn is_heal(&self) -> bool {
        matches!(self, Self::Heal)
    }
    /// Extracts the debuff tag, if any.
    pub fn debuff(&self) -> Option<Debuff> {
        match self {
            Self::Debuff(d) => Some(*d),
            _ => None,
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Reflect => write!(f, "reflect"),
            Self::Bounce => write!(f, "bounce"),
            Self::Heal => write!(f, "heal"),
            Self::Buff => write!(f, "buff"),
            Self::Debuff(d) => write!(f, "debuff:{}", d),
        }
    }
}
