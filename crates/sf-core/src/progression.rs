//! Experience, levelling, and item use.

use crate::item::Item;
use crate::player::Player;

/// Max hp gained per level.
pub const HP_PER_LEVEL: i32 = 8;
/// Power gained per level.
pub const POWER_PER_LEVEL: i32 = 2;
/// Defense gained per level.
pub const DEFENSE_PER_LEVEL: i32 = 1;

/// One applied level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// The level reached.
    pub level: u32,
    /// New maximum hit points.
    pub max_hp: i32,
    /// Experience needed for the following level.
    pub next_xp: u32,
}

impl std::fmt::Display for LevelUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LEVEL UP! You are now level {} ({} HP).",
            self.level, self.max_hp
        )
    }
}

/// What happened when an item was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUse {
    /// The item restored hit points.
    Healed {
        /// The consumed item.
        item: Item,
        /// Hit points actually restored.
        amount: i32,
    },
    /// The item had no effect beyond being used up.
    Used {
        /// The consumed item.
        item: Item,
    },
}

impl std::fmt::Display for ItemUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healed { item, amount } => {
                write!(f, "You use the {} and recover {amount} HP.", item.name)
            }
            Self::Used { item } => write!(f, "You use the {}.", item.name),
        }
    }
}

/// Grow an experience threshold by a factor of 1.6, rounding down.
pub fn grow_threshold(next_xp: u32) -> u32 {
    let grown = u64::from(next_xp) * 8 / 5;
    u32::try_from(grown).unwrap_or(u32::MAX)
}

impl Player {
    /// Add experience and apply every level-up it pays for, in order.
    pub fn gain_xp(&mut self, amount: u32) -> Vec<LevelUp> {
        self.xp = self.xp.saturating_add(amount);
        self.record(format!("Gained {amount} XP."));

        let mut level_ups = Vec::new();
        while self.next_xp > 0 && self.xp >= self.next_xp {
            self.xp -= self.next_xp;
            level_ups.push(self.level_up());
        }
        level_ups
    }

    fn level_up(&mut self) -> LevelUp {
        self.level = self.level.saturating_add(1);
        self.stats.max_hp = self.stats.max_hp.saturating_add(HP_PER_LEVEL);
        self.stats.restore_full();
        self.stats.power = self.stats.power.saturating_add(POWER_PER_LEVEL);
        self.stats.defense = self.stats.defense.saturating_add(DEFENSE_PER_LEVEL);
        self.next_xp = grow_threshold(self.next_xp);
        self.record(format!("Reached level {}.", self.level));
        log::info!("{} reached level {}", self.name, self.level);

        LevelUp {
            level: self.level,
            max_hp: self.stats.max_hp,
            next_xp: self.next_xp,
        }
    }

    /// Consume the item at `index`. Out of range indices do nothing.
    ///
    /// The item is removed whether or not it has an effect.
    pub fn use_item(&mut self, index: usize) -> Option<ItemUse> {
        if index >= self.inventory.len() {
            return None;
        }
        let item = self.inventory.remove(index);
        if item.is_healing() {
            let amount = self.stats.heal(item.heal);
            self.record(format!("Used {} and healed {amount} HP.", item.name));
            Some(ItemUse::Healed { item, amount })
        } else {
            Some(ItemUse::Used { item })
        }
    }
}
