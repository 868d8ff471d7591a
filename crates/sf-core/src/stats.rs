//! Combat stat block shared by players and enemies.

use serde::{Deserialize, Serialize};

/// Hit points and combat attributes.
///
/// `hp` may drop below zero when a blow overkills; anything at or below zero
/// counts as dead. `hp` never exceeds `max_hp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points (always positive).
    pub max_hp: i32,
    /// Attack strength.
    pub power: i32,
    /// Damage mitigation.
    pub defense: i32,
    /// Turn-order priority (higher acts first).
    pub speed: i32,
}

impl CombatStats {
    /// Create a stat block at full health.
    ///
    /// `max_hp` is raised to 1 and the other attributes to 0 if given less.
    pub fn new(max_hp: i32, power: i32, defense: i32, speed: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            power: power.max(0),
            defense: defense.max(0),
            speed: speed.max(0),
        }
    }

    /// Whether these stats belong to a living combatant.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Subtract damage from hp. The result may go negative.
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = self.hp.saturating_sub(amount.max(0));
    }

    /// Restore up to `amount` hp without passing `max_hp`.
    /// Returns how much was actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_hp - self.hp).max(0);
        self.hp += healed;
        healed
    }

    /// Set hp back to `max_hp`.
    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Hit points as shown to the player (never negative).
    pub fn display_hp(&self) -> i32 {
        self.hp.max(0)
    }
}

/// Anything that can take part in an encounter.
pub trait Combatant {
    /// Display name.
    fn name(&self) -> &str;

    /// The combatant's stat block.
    fn stats(&self) -> &CombatStats;

    /// Mutable access to the stat block.
    fn stats_mut(&mut self) -> &mut CombatStats;

    /// Whether the combatant can still act.
    fn is_alive(&self) -> bool {
        self.stats().is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_at_full_health() {
        let stats = CombatStats::new(20, 4, 1, 3);
        assert_eq!(stats.hp, 20);
        assert_eq!(stats.max_hp, 20);
        assert!(stats.is_alive());
    }

    #[test]
    fn new_raises_out_of_range_stats() {
        let stats = CombatStats::new(0, -1, -2, -3);
        assert_eq!(stats.max_hp, 1);
        assert_eq!(stats.hp, 1);
        assert_eq!((stats.power, stats.defense, stats.speed), (0, 0, 0));
    }

    #[test]
    fn damage_can_overkill() {
        let mut stats = CombatStats::new(5, 1, 0, 1);
        stats.take_damage(8);
        assert_eq!(stats.hp, -3);
        assert!(!stats.is_alive());
        assert_eq!(stats.display_hp(), 0);
    }

    #[test]
    fn heal_is_capped() {
        let mut stats = CombatStats::new(10, 1, 0, 1);
        stats.take_damage(4);
        assert_eq!(stats.heal(10), 4);
        assert_eq!(stats.hp, 10);
        assert_eq!(stats.heal(3), 0);
    }

    #[test]
    fn restore_full() {
        let mut stats = CombatStats::new(10, 1, 0, 1);
        stats.take_damage(7);
        stats.restore_full();
        assert_eq!(stats.hp, 10);
    }
}
