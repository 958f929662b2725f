use mcl_cards::Card;
use mcl_cards::Debuff;
use mcl_cards::Effect;
use mcl_core::FIELD_MAGIC_DURATION;
use mcl_core::FIELD_MAGIC_TICK;
use mcl_core::ID;
use mcl_core::Points;
use mcl_core::Unique;

use crate::PlayerState;

/// Adjustment an active field magic applies to the player whose turn starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTick {
    /// Restore health (elimination stays irreversible, so this never revives).
    Mend(Points),
    /// Restore mental power.
    Inspire(Points),
    /// Drain mental power. Never touches health, so a field tick alone
    /// cannot eliminate a player.
    Drain(Points),
}

/// Room-wide duration-limited passive activated by a FieldMagic card.
///
/// At most one is active per room; activating a new one silently replaces
/// the old. Duration decrements once per turn start and the field is
/// removed when it reaches zero.
#[derive(Debug, Clone)]
pub struct FieldMagic {
    id: ID<FieldMagic>,
    name: String,
    caster: ID<PlayerState>,
    remaining: u8,
    effect: Effect,
}

impl FieldMagic {
    /// Activates the field from a played FieldMagic card.
    pub fn from_card(card: &Card, caster: ID<PlayerState>) -> Self {
        Self {
            id: ID::default(),
            name: card.name.clone(),
            caster,
            remaining: FIELD_MAGIC_DURATION,
            effect: card.effect,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn caster(&self) -> ID<PlayerState> {
        self.caster
    }
    pub fn remaining(&self) -> u8 {
        self.remaining
    }
    pub fn effect(&self) -> Effect {
        self.effect
    }
    /// Whether Magic-kind cards are unplayable while this field holds.
    pub fn seals_magic(&self) -> bool {
        matches!(self.effect, Effect::Debuff(Debuff::Seal))
    }
    /// Per-turn pool adjustment for the player whose turn is starting.
    pub fn turn_effect(&self) -> Option<FieldTick> {
        match self.effect {
            Effect::Heal => Some(FieldTick::Mend(FIELD_MAGIC_TICK)),
            Effect::Buff => Some(FieldTick::Inspire(FIELD_MAGIC_TICK)),
            Effect::Debuff(_) => Some(FieldTick::Drain(FIELD_MAGIC_TICK)),
            _ => None,
        }
    }
    /// Decrements remaining duration; true once the field has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

impl Unique for FieldMagic {
    fn id(&self) -> ID<FieldMagic> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_its_duration() {
        let card = Card::field_magic("mist", 3, Effect::Buff);
        let mut field = FieldMagic::from_card(&card, ID::default());
        for _ in 0..FIELD_MAGIC_DURATION - 1 {
            assert!(!field.tick());
        }
        assert!(field.tick());
        assert_eq!(field.remaining(), 0);
    }
    #[test]
    fn seal_field_blocks_magic() {
        let card = Card::field_magic("null zone", 4, Effect::Debuff(Debuff::Seal));
        let field = FieldMagic::from_card(&card, ID::default());
        assert!(field.seals_magic());
        assert_eq!(field.turn_effect(), Some(FieldTick::Drain(FIELD_MAGIC_TICK)));
    }
    #[test]
    fn buff_field_restores_mental() {
        let card = Card::field_magic("clarity", 3, Effect::Buff);
        let field = FieldMagic::from_card(&card, ID::default());
        assert_eq!(
            field.turn_effect(),
            Some(FieldTick::Inspire(FIELD_MAGIC_TICK))
        );
    }
}
