use super::Attribute;
use super::CardKind;
use super::Effect;
use mcl_core::ID;
use mcl_core::Points;
use mcl_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// An immutable card instance as it participates in one play.
///
/// Cards are value records: the engine never mutates them, and a play
/// snapshots the exact instances used so resolution broadcasts can echo
/// them back to clients. `plus_level` 0 means standalone; a plus card of
/// level L may stack with up to L other same-name copies (L+1 total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: ID<Card>,
    pub name: String,
    pub kind: CardKind,
    pub health_damage: Points,
    pub mental_damage: Points,
    pub defense: Points,
    pub mana_cost: Points,
    pub plus_level: u8,
    pub attribute: Attribute,
    pub effect: Effect,
}

impl Card {
    /// A bare attack card dealing `health_damage` for `mana_cost`.
    pub fn attack(name: &str, health_damage: Points, mana_cost: Points) -> Self {
        Self {
            id: ID::default(),
            name: name.to_string(),
            kind: CardKind::Attack,
            health_damage,
            mental_damage: 0,
            defense: 0,
            mana_cost,
            plus_level: 0,
            attribute: Attribute::None,
            effect: Effect::None,
        }
    }
    /// A bare defense card worth `defense` for `mana_cost`.
    pub fn defense(name: &str, defense: Points, mana_cost: Points) -> Self {
        Self {
            id: ID::default(),
            name: name.to_string(),
            kind: CardKind::Defense,
            health_damage: 0,
            mental_damage: 0,
            defense,
            mana_cost,
            plus_level: 0,
            attribute: Attribute::None,
            effect: Effect::None,
        }
    }
    /// A magic card; damage and effect set via the with_* combinators.
    pub fn magic(name: &str, mana_cost: Points) -> Self {
        Self {
            id: ID::default(),
            name: name.to_string(),
            kind: CardKind::Magic,
            health_damage: 0,
            mental_damage: 0,
            defense: 0,
            mana_cost,
            plus_level: 0,
            attribute: Attribute::None,
            effect: Effect::None,
        }
    }
    /// A field magic card activating a room-wide passive.
    pub fn field_magic(name: &str, mana_cost: Points, effect: Effect) -> Self {
        Self {
            id: ID::default(),
            name: name.to_string(),
            kind: CardKind::FieldMagic,
            health_damage: 0,
            mental_damage: 0,
            defense: 0,
            mana_cost,
            plus_level: 0,
            attribute: Attribute::None,
            effect,
        }
    }
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = attribute;
        self
    }
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
    pub fn with_mental_damage(mut self, mental_damage: Points) -> Self {
        self.mental_damage = mental_damage;
        self
    }
    pub fn with_health_damage(mut self, health_damage: Points) -> Self {
        self.health_damage = health_damage;
        self
    }
    pub fn with_plus_level(mut self, plus_level: u8) -> Self {
        self.plus_level = plus_level;
        self
    }
    /// True for Reflect/Bounce cards, which contribute no defense value.
    pub fn is_special(&self) -> bool {
        self.effect.is_special()
    }
    /// True for plus-leveled (stackable) variants.
    pub fn is_plus(&self) -> bool {
        self.plus_level > 0
    }
}

impl Unique for Card {
    fn id(&self) -> ID<Card> {
        self.id
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.kind)?;
        if self.plus_level > 0 {
            write!(f, " +{}", self.plus_level)?;
        }
        if self.attribute.is_some() {
            write!(f, " ({})", self.attribute)?;
        }
        Ok(())
    }
}
