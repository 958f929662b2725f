use serde::Deserialize;
use serde::Serialize;

/// What a card fundamentally is.
///
/// The kind drives play legality: a FieldMagic card must be played alone,
/// at most one Magic card joins a play, and a non-plus Attack card combines
/// only with plus-leveled cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Attack,
    Defense,
    Magic,
    FieldMagic,
}

impl CardKind {
    /// True if this card deals damage as its primary purpose.
    pub fn is_attack(&self) -> bool {
        matches!(self, Self::Attack)
    }
    /// True if this card contributes defense value.
    pub fn is_defense(&self) -> bool {
        matches!(self, Self::Defense)
    }
    /// True if this is a one-shot spell.
    pub fn is_magic(&self) -> bool {
        matches!(self, Self::Magic)
    }
    /// True if this card activates a room-wide passive.
    pub fn is_field_magic(&self) -> bool {
        matches!(self, Self::FieldMagic)
    }
}

impl TryFrom<&str> for CardKind {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "attack" => Ok(Self::Attack),
            "defense" => Ok(Self::Defense),
            "magic" => Ok(Self::Magic),
            "field_magic" => Ok(Self::FieldMagic),
            kind => Err(anyhow::anyhow!("unknown card kind: {}", kind)),
        }
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "attack"),
            Self::Defense => write!(f, "defense"),
            Self::Magic => write!(f, "magic"),
            Self::FieldMagic => write!(f, "field_magic"),
        }
    }
}

impl mcl_core::Arbitrary for CardKind {
    fn random() -> Self {
        match rand::random_range(0..4) {
            0 => Self::Attack,
            1 => Self::Defense,
            2 => Self::Magic,
            _ => Self::FieldMagic,
        }
    }
}
