use mcl_core::Points;

/// Room lifecycle rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    NotFound,
    NotInProgress,
    AlreadyPlaying,
    Full,
}

/// Turn ownership rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    NotYourTurn,
    NotYourSocket,
}

/// Resource affordability rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    InsufficientMana { required: Points, available: Points },
}

/// Combat sequencing rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatError {
    AttackNotFound,
    DefensePending,
    DefenseNotYours,
    QueueUninitialized,
    TargetNotFound,
    TargetEliminated,
}

/// Card-combination legality rejections from play validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    EmptyPlay,
    FieldMagicNotAlone,
    TooManyMagicCards,
    MagicSealed,
    PlusNameMismatch,
    PlusOverstacked,
    AttackNotStandalone,
}

/// Structured rejection delivered only to the offending actor.
///
/// Every variant is recoverable by the caller and guarantees zero shared
/// state mutation (validate-then-mutate discipline). Chain-depth exhaustion
/// is deliberately absent: it falls back to normal damage, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    Room(RoomError),
    Turn(TurnError),
    Resource(ResourceError),
    Combat(CombatError),
    Play(PlayError),
}

impl From<RoomError> for Reject {
    fn from(e: RoomError) -> Self {
        Self::Room(e)
    }
}
impl From<TurnError> for Reject {
    fn from(e: TurnError) -> Self {
        Self::Turn(e)
    }
}
impl From<ResourceError> for Reject {
    fn from(e: ResourceError) -> Self {
        Self::Resource(e)
    }
}
impl From<CombatError> for Reject {
    fn from(e: CombatError) -> Self {
        Self::Combat(e)
    }
}
impl From<PlayError> for Reject {
    fn from(e: PlayError) -> Self {
        Self::Play(e)
    }
}

impl std::fmt::Display for Reject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Room(RoomError::NotFound) => write!(f, "room not found"),
            Self::Room(RoomError::NotInProgress) => write!(f, "room is not in progress"),
            Self::Room(RoomError::AlreadyPlaying) => write!(f, "room is already playing"),
            Self::Room(RoomError::Full) => write!(f, "room is full"),
            Self::Turn(TurnError::NotYourTurn) => write!(f, "not your turn"),
            Self::Turn(TurnError::NotYourSocket) => {
                write!(f, "player is not bound to this socket")
            }
            Self::Resource(ResourceError::InsufficientMana {
                required,
                available,
            }) => write!(
                f,
                "insufficient mana: need {} but have {}",
                required, available
            ),
            Self::Combat(CombatError::AttackNotFound) => {
                write!(f, "attack not found or already resolved")
            }
            Self::Combat(CombatError::DefensePending) => {
                write!(f, "an attack is still awaiting defense")
            }
            Self::Combat(CombatError::DefenseNotYours) => {
                write!(f, "defense request is not addressed to you")
            }
            Self::Combat(CombatError::QueueUninitialized) => {
                write!(f, "attack queue is uninitialized")
            }
            Self::Combat(CombatError::TargetNotFound) => write!(f, "target not found"),
            Self::Combat(CombatError::TargetEliminated) => {
                write!(f, "target is already eliminated")
            }
            Self::Play(PlayError::EmptyPlay) => write!(f, "play contains no cards"),
            Self::Play(PlayError::FieldMagicNotAlone) => {
                write!(f, "field magic must be played alone")
            }
            Self::Play(PlayError::TooManyMagicCards) => {
                write!(f, "at most one magic card per play")
            }
            Self::Play(PlayError::MagicSealed) => {
                write!(f, "magic cards are sealed by the active field")
            }
            Self::Play(PlayError::PlusNameMismatch) => {
                write!(f, "stacked plus cards must share one name")
            }
            Self::Play(PlayError::PlusOverstacked) => {
                write!(f, "too many copies for this plus level")
            }
            Self::Play(PlayError::AttackNotStandalone) => {
                write!(f, "attack card combines only with plus cards")
            }
        }
    }
}

impl std::error::Error for Reject {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_cause() {
        let reject = Reject::from(ResourceError::InsufficientMana {
            required: 9,
            available: 4,
        });
        assert_eq!(reject.to_string(), "insufficient mana: need 9 but have 4");
    }
    #[test]
    fn from_impls_wrap_categories() {
        assert_eq!(
            Reject::from(TurnError::NotYourTurn),
            Reject::Turn(TurnError::NotYourTurn)
        );
        assert_eq!(
            Reject::from(CombatError::AttackNotFound),
            Reject::Combat(CombatError::AttackNotFound)
        );
    }
}
