//! Enemy model and bestiary.

use crate::stats::{CombatStats, Combatant};

/// A hostile combatant. Enemies are built fresh for every encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    /// Display name.
    pub name: String,
    /// Combat stats.
    pub stats: CombatStats,
    /// Experience granted when the encounter is won.
    pub xp_drop: u32,
    /// Gold granted when the encounter is won.
    pub gold_drop: u32,
}

impl Enemy {
    /// Create an enemy from a stat block and its rewards.
    pub fn new(name: impl Into<String>, stats: CombatStats, xp_drop: u32, gold_drop: u32) -> Self {
        Self {
            name: name.into(),
            stats,
            xp_drop,
            gold_drop,
        }
    }

    /// Reduce power, never below zero.
    pub fn weakened(mut self, by: i32) -> Self {
        self.stats.power = (self.stats.power - by).max(0);
        self
    }

    /// A roadside cutthroat.
    pub fn bandit() -> Self {
        Self::new("Bandit", CombatStats::new(14, 5, 1, 4), 15, 6)
    }

    /// The market watch.
    pub fn town_guard() -> Self {
        Self::new("Town Guard", CombatStats::new(20, 6, 3, 3), 20, 4)
    }

    /// The animated stone that guards the crystal.
    pub fn stone_sentinel() -> Self {
        Self::new("Stone Sentinel", CombatStats::new(24, 7, 4, 1), 35, 0)
    }

    /// The warden at the Spire's gate.
    pub fn gatekeeper() -> Self {
        Self::new("Gatekeeper", CombatStats::new(28, 8, 3, 4), 45, 20)
    }

    /// The guardian of the heart chamber.
    pub fn heart_warden() -> Self {
        Self::new("Heart Warden", CombatStats::new(34, 9, 4, 5), 60, 30)
    }

    /// The voice behind the whispers.
    pub fn shadow_queen() -> Self {
        Self::new("Shadow Queen", CombatStats::new(45, 11, 5, 8), 120, 0)
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn stats(&self) -> &CombatStats {
        &self.stats
    }

    fn stats_mut(&mut self) -> &mut CombatStats {
        &mut self.stats
    }
}
