//! Damage, defense, and mana arithmetic.
//!
//! Pure functions over played card sets. All arithmetic is integer; any
//! future derived multiplier must floor toward zero.

use mcl_cards::Attribute;
use mcl_cards::Card;
use mcl_core::Points;

/// Aggregate offensive output of one play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackProfile {
    pub health_damage: Points,
    pub mental_damage: Points,
    pub heal: Points,
    pub attribute: Attribute,
}

/// Sums per-card damage across a play. Cards tagged Heal contribute their
/// health-damage amount to `heal` instead. The play's attribute is that of
/// the first card declaring one.
pub fn compute_attack(cards: &[Card]) -> AttackProfile {
    let mut profile = AttackProfile {
        health_damage: 0,
        mental_damage: 0,
        heal: 0,
        attribute: Attribute::None,
    };
    for card in cards {
        if card.effect.is_heal() {
            profile.heal += card.health_damage;
        } else {
            profile.health_damage += card.health_damage;
            profile.mental_damage += card.mental_damage;
        }
        if profile.attribute == Attribute::None {
            profile.attribute = card.attribute;
        }
    }
    profile
}

/// Sums defense values of a play. Reflect/Bounce cards contribute zero:
/// they redirect the attack rather than absorb it.
pub fn defense_value(cards: &[Card]) -> Points {
    cards
        .iter()
        .filter(|c| !c.is_special())
        .map(|c| c.defense)
        .sum()
}

/// Whether the defense play blocks an attack of the given attribute.
/// Some defense card must be present and win the attribute matchup; Dark
/// and unattributed attacks are blocked by any defense card played.
pub fn is_defense_effective(attack: Attribute, defense: &[Card]) -> bool {
    defense.iter().any(|c| attack.countered_by(c.attribute))
}

/// `max(0, damage - defense)`. Only health damage is ever reduced;
/// mental damage bypasses defense entirely.
pub fn reduce(damage: Points, defense: Points) -> Points {
    (damage - defense).max(0)
}

/// Total mana cost of a play, used to validate affordability and to deduct.
pub fn total_mana_cost(cards: &[Card]) -> Points {
    cards.iter().map(|c| c.mana_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcl_cards::Effect;

    #[test]
    fn attack_sums_damage_across_cards() {
        let cards = vec![
            Card::attack("slash", 10, 2),
            Card::magic("hex", 3).with_mental_damage(4),
        ];
        let profile = compute_attack(&cards);
        assert_eq!(profile.health_damage, 10);
        assert_eq!(profile.mental_damage, 4);
        assert_eq!(profile.heal, 0);
    }
    #[test]
    fn heal_cards_accumulate_into_heal() {
        let cards = vec![
            Card::attack("slash", 10, 2),
            Card::magic("mend", 2)
                .with_health_damage(6)
                .with_effect(Effect::Heal),
        ];
        let profile = compute_attack(&cards);
        assert_eq!(profile.health_damage, 10);
        assert_eq!(profile.heal, 6);
    }
    #[test]
    fn attribute_is_first_declared() {
        let cards = vec![
            Card::attack("slash", 5, 1),
            Card::attack("ember", 5, 1).with_attribute(Attribute::Fire),
            Card::attack("tide", 5, 1).with_attribute(Attribute::Water),
        ];
        assert_eq!(compute_attack(&cards).attribute, Attribute::Fire);
    }
    #[test]
    fn special_cards_contribute_zero_defense() {
        let cards = vec![
            Card::defense("shield", 5, 1),
            Card::defense("mirror", 9, 2).with_effect(Effect::Reflect),
        ];
        assert_eq!(defense_value(&cards), 5);
    }
    #[test]
    fn reduce_never_negative() {
        assert_eq!(reduce(10, 3), 7);
        assert_eq!(reduce(3, 10), 0);
        assert_eq!(reduce(0, 0), 0);
    }
    #[test]
    fn fire_blocked_only_by_water() {
        let water = vec![Card::defense("wave", 5, 1).with_attribute(Attribute::Water)];
        let plain = vec![Card::defense("shield", 5, 1)];
        assert!(is_defense_effective(Attribute::Fire, &water));
        assert!(!is_defense_effective(Attribute::Fire, &plain));
    }
    #[test]
    fn unattributed_attack_blocked_by_any_defense_card() {
        let plain = vec![Card::defense("shield", 3, 1)];
        assert!(is_defense_effective(Attribute::None, &plain));
        assert!(!is_defense_effective(Attribute::None, &[]));
    }
    #[test]
    fn dark_blocked_by_any_defense_card() {
        let plain = vec![Card::defense("shield", 3, 1)];
        assert!(is_defense_effective(Attribute::Dark, &plain));
        assert!(!is_defense_effective(Attribute::Dark, &[]));
    }
    #[test]
    fn mana_cost_is_plain_sum() {
        let cards = vec![
            Card::attack("slash", 10, 2),
            Card::magic("hex", 3),
            Card::defense("shield", 5, 0),
        ];
        assert_eq!(total_mana_cost(&cards), 5);
        assert_eq!(total_mana_cost(&[]), 0);
    }
}
