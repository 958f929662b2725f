//! Card-combination legality, enforced before a play is accepted.

use crate::FieldMagic;
use crate::PlayError;
use crate::Reject;
use crate::ResourceError;
use crate::damage;
use mcl_cards::Card;
use mcl_core::MAX_MAGIC_PER_PLAY;
use mcl_core::Points;

/// Validates a play against combination rules and mana affordability.
///
/// Rules, in check order:
/// - the play is non-empty
/// - a FieldMagic card is played alone
/// - at most one Magic-kind card per play
/// - no Magic-kind card while a sealing field magic is active
/// - total mana cost is affordable
/// - co-played plus cards share one name and stay within `plus_level + 1`
/// - a non-plus Attack card combines only with plus-leveled cards
pub fn validate_play(
    cards: &[Card],
    mana_available: Points,
    field: Option<&FieldMagic>,
) -> Result<(), Reject> {
    if cards.is_empty() {
        return Err(PlayError::EmptyPlay.into());
    }
    if cards.iter().any(|c| c.kind.is_field_magic()) && cards.len() > 1 {
        return Err(PlayError::FieldMagicNotAlone.into());
    }
    if cards.iter().filter(|c| c.kind.is_magic()).count() > MAX_MAGIC_PER_PLAY {
        return Err(PlayError::TooManyMagicCards.into());
    }
    if field.is_some_and(FieldMagic::seals_magic) && cards.iter().any(|c| c.kind.is_magic()) {
        return Err(PlayError::MagicSealed.into());
    }
    let cost = damage::total_mana_cost(cards);
    if cost > mana_available {
        return Err(ResourceError::InsufficientMana {
            required: cost,
            available: mana_available,
        }
        .into());
    }
    let plus = cards.iter().filter(|c| c.is_plus()).collect::<Vec<_>>();
    if let Some(first) = plus.first() {
        if plus.iter().any(|c| c.name != first.name) {
            return Err(PlayError::PlusNameMismatch.into());
        }
        if plus.len() > first.plus_level as usize + 1 {
            return Err(PlayError::PlusOverstacked.into());
        }
    }
    // a non-plus Attack tolerates no other non-plus card of any kind
    if cards.iter().any(|c| c.kind.is_attack() && !c.is_plus())
        && cards.iter().filter(|c| !c.is_plus()).count() > 1
    {
        return Err(PlayError::AttackNotStandalone.into());
    }
    Ok(())
}
