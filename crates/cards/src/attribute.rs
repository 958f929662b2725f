use serde::Deserialize;
use serde::Serialize;

/// Elemental attribute of a card.
///
/// Attributes gate whether a defense earns its value. The matchup table is
/// deliberately small: Dark is blocked by any defense, Light only by Light,
/// Fire only by Water, Water only by Fire, and unattributed attacks by any
/// defense card played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    #[default]
    None,
    Fire,
    Water,
    Light,
    Dark,
}

impl Attribute {
    /// Whether a defense card of attribute `defense` blocks an attack of
    /// this attribute. Card presence is judged by the caller; this is the
    /// pure attribute matchup.
    pub fn countered_by(&self, defense: Attribute) -> bool {
        match self {
            Self::Fire => defense == Self::Water,
            Self::Water => defense == Self::Fire,
            Self::Light => defense == Self::Light,
            Self::Dark => true,
            Self::None => true,
        }
    }
    /// True for any attribute other than None.
    pub fn is_some(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl TryFrom<&str> for Attribute {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "none" => Ok(Self::None),
            "fire" => Ok(Self::Fire),
            "water" => Ok(Self::Water),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            attr => Err(anyhow::anyhow!("unknown attribute: {}", attr)),
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Fire => write!(f, "fire"),
            Self::Water => write!(f, "water"),
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl mcl_core::Arbitrary for Attribute {
    fn random() -> Self {
        match rand::random_range(0..5) {
            0 => Self::None,
            1 => Self::Fire,
            2 => Self::Water,
            3 => Self::Light,
            _ => Self::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_only_countered_by_water() {
        assert!(Attribute::Fire.countered_by(Attribute::Water));
        assert!(!Attribute::Fire.countered_by(Attribute::Fire));
        assert!(!Attribute::Fire.countered_by(Attribute::Light));
        assert!(!Attribute::Fire.countered_by(Attribute::None));
    }
    #[test]
    fn water_only_countered_by_fire() {
        assert!(Attribute::Water.countered_by(Attribute::Fire));
        assert!(!Attribute::Water.countered_by(Attribute::Water));
    }
    #[test]
    fn light_only_countered_by_light() {
        assert!(Attribute::Light.countered_by(Attribute::Light));
        assert!(!Attribute::Light.countered_by(Attribute::Dark));
    }
    #[test]
    fn dark_and_none_countered_by_anything() {
        for defense in [Attribute::None, Attribute::Fire, Attribute::Dark] {
            assert!(Attribute::Dark.countered_by(defense));
            assert!(Attribute::None.countered_by(defense));
        }
    }
    #[test]
    fn random_attribute_display_parses_back() {
        use mcl_core::Arbitrary;
        for attribute in (0..).map(|_| Attribute::random()).take(32) {
            assert_eq!(
                attribute,
                Attribute::try_from(attribute.to_string().as_str()).unwrap()
            );
        }
    }
    #[test]
    fn random_matchup_has_at_most_one_elemental_counter() {
        use mcl_core::Arbitrary;
        let elements = [Attribute::Fire, Attribute::Water, Attribute::Light];
        for attack in (0..).map(|_| Attribute::random()).take(32) {
            let counters = elements
                .iter()
                .filter(|defense| attack.countered_by(**defense))
                .count();
            match attack {
                Attribute::None | Attribute::Dark => assert_eq!(counters, elements.len()),
                _ => assert_eq!(counters, 1),
            }
        }
    }
}
