use super::ResourceError;
use mcl_cards::Debuff;
use mcl_core::ID;
use mcl_core::MAX_HEALTH;
use mcl_core::MAX_MENTAL_POWER;
use mcl_core::Points;
use mcl_core::Unique;
use std::collections::HashSet;

/// Per-player combat pools and status.
///
/// Owned exclusively by the room's roster and mutated only inside attack
/// resolution (or explicit test hooks). Every mutation clamps to `[0, max]`;
/// reaching zero health flips `alive` off irreversibly for this game.
/// Mental power doubles as the mana pool.
#[derive(Debug, Clone)]
pub struct PlayerState {
    id: ID<PlayerState>,
    health: Points,
    max_health: Points,
    mental_power: Points,
    max_mental_power: Points,
    alive: bool,
    debuffs: HashSet<Debuff>,
}

impl PlayerState {
    /// A freshly initialized player at game start: full pools, alive, clean.
    pub fn new(id: ID<PlayerState>) -> Self {
        Self {
            id,
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            mental_power: MAX_MENTAL_POWER,
            max_mental_power: MAX_MENTAL_POWER,
            alive: true,
            debuffs: HashSet::new(),
        }
    }
    pub fn health(&self) -> Points {
        self.health
    }
    pub fn max_health(&self) -> Points {
        self.max_health
    }
    pub fn mental_power(&self) -> Points {
        self.mental_power
    }
    pub fn max_mental_power(&self) -> Points {
        self.max_mental_power
    }
    pub fn alive(&self) -> bool {
        self.alive
    }
    pub fn debuffs(&self) -> &HashSet<Debuff> {
        &self.debuffs
    }
    pub fn debuffs_mut(&mut self) -> &mut HashSet<Debuff> {
        &mut self.debuffs
    }

    /// Applies health damage, clamped at zero. Eliminates the player when
    /// health reaches zero. Returns the damage actually absorbed.
    pub fn apply_health_damage(&mut self, damage: Points) -> Points {
        let absorbed = damage.max(0).min(self.health);
        self.health -= absorbed;
        if self.health == 0 {
            self.alive = false;
        }
        absorbed
    }
    /// Applies mental damage, clamped at zero. Never reduced by defense.
    pub fn apply_mental_damage(&mut self, damage: Points) -> Points {
        let absorbed = damage.max(0).min(self.mental_power);
        self.mental_power -= absorbed;
        absorbed
    }
    /// Heals up to max health. Elimination is irreversible: healing a dead
    /// player is a no-op. Returns the amount actually restored.
    pub fn heal(&mut self, amount: Points) -> Points {
        if !self.alive {
            return 0;
        }
        let restored = amount.max(0).min(self.max_health - self.health);
        self.health += restored;
        restored
    }
    /// Restores mental power up to its max.
    pub fn restore_mental(&mut self, amount: Points) -> Points {
        let restored = amount.max(0).min(self.max_mental_power - self.mental_power);
        self.mental_power += restored;
        restored
    }
    /// Deducts mana if affordable; rejects without mutation otherwise.
    pub fn spend_mana(&mut self, cost: Points) -> Result<(), ResourceError> {
        if cost > self.mental_power {
            return Err(ResourceError::InsufficientMana {
                required: cost,
                available: self.mental_power,
            });
        }
        self.mental_power -= cost.max(0);
        Ok(())
    }

    /// Test/debug hook: force pools to given values, preserving invariants.
    pub fn set_health(&mut self, health: Points) {
        self.health = health.clamp(0, self.max_health);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

impl Unique for PlayerState {
    fn id(&self) -> ID<PlayerState> {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> PlayerState {
        PlayerState::new(ID::default())
    }

    #[test]
    fn starts_at_full_pools() {
        let p = player();
        assert_eq!(p.health(), MAX_HEALTH);
        assert_eq!(p.mental_power(), MAX_MENTAL_POWER);
        assert!(p.alive());
        assert!(p.debuffs().is_empty());
    }
    #[test]
    fn health_clamps_at_zero_and_eliminates() {
        let mut p = player();
        p.set_health(5);
        assert_eq!(p.apply_health_damage(12), 5);
        assert_eq!(p.health(), 0);
        assert!(!p.alive());
    }
    #[test]
    fn elimination_is_irreversible() {
        let mut p = player();
        p.set_health(0);
        assert_eq!(p.heal(50), 0);
        assert!(!p.alive());
    }
    #[test]
    fn heal_clamps_at_max() {
        let mut p = player();
        p.set_health(95);
        assert_eq!(p.heal(20), 5);
        assert_eq!(p.health(), MAX_HEALTH);
    }
    #[test]
    fn insufficient_mana_rejected_without_mutation() {
        let mut p = player();
        p.apply_mental_damage(95);
        assert!(p.spend_mana(10).is_err());
        assert_eq!(p.mental_power(), 5);
        assert!(p.spend_mana(5).is_ok());
        assert_eq!(p.mental_power(), 0);
    }
    #[test]
    fn mental_damage_clamps_at_zero() {
        let mut p = player();
        assert_eq!(p.apply_mental_damage(150), MAX_MENTAL_POWER);
        assert_eq!(p.mental_power(), 0);
    }
}
