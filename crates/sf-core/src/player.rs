//! Player state: inventory, journal, and story flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::stats::{CombatStats, Combatant};

/// Starting maximum hit points.
pub const BASE_HP: i32 = 30;
/// Starting power.
pub const BASE_POWER: i32 = 5;
/// Starting defense.
pub const BASE_DEFENSE: i32 = 2;
/// Starting speed.
pub const BASE_SPEED: i32 = 5;
/// Experience needed for the first level-up.
pub const BASE_NEXT_XP: u32 = 50;
/// Starting gold.
pub const BASE_GOLD: u32 = 10;

/// A story flag value.
///
/// Serialised untagged, so flags read as plain JSON booleans and strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A yes/no decision.
    Bool(bool),
    /// A named decision.
    Text(String),
}

impl FlagValue {
    /// Whether the flag counts as set.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(_) => true,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for FlagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Display name.
    pub name: String,
    /// Combat stats.
    pub stats: CombatStats,
    /// Current level (starts at 1).
    pub level: u32,
    /// Experience towards the next level.
    pub xp: u32,
    /// Experience needed for the next level.
    pub next_xp: u32,
    /// Carried items in acquisition order.
    pub inventory: Vec<Item>,
    /// Gold on hand.
    pub gold: u32,
    /// Append-only record of notable events.
    pub journal: Vec<String>,
    /// Story decisions, never cleared.
    pub flags: BTreeMap<String, FlagValue>,
}

impl Player {
    /// Create a fresh level 1 player with the base stats and two potions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: CombatStats::new(BASE_HP, BASE_POWER, BASE_DEFENSE, BASE_SPEED),
            level: 1,
            xp: 0,
            next_xp: BASE_NEXT_XP,
            inventory: vec![Item::minor_potion(), Item::minor_potion()],
            gold: BASE_GOLD,
            journal: Vec::new(),
            flags: BTreeMap::new(),
        }
    }

    /// Append an entry to the journal.
    pub fn record(&mut self, entry: impl Into<String>) {
        self.journal.push(entry.into());
    }

    /// Whether a flag is present and set.
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.get(key).is_some_and(FlagValue::is_set)
    }

    /// Get a flag value.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.flags.get(key)
    }

    /// Record a story decision.
    pub fn set_flag(&mut self, key: impl Into<String>, value: impl Into<FlagValue>) {
        let key = key.into();
        let value = value.into();
        log::debug!("flag {key} = {value}");
        self.flags.insert(key, value);
    }

    /// Add an item to the end of the inventory.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Whether an item with this name is carried.
    pub fn has_item(&self, name: &str) -> bool {
        self.inventory.iter().any(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Spend gold if enough is on hand. Returns false and spends nothing otherwise.
    pub fn spend(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new("Wanderer")
    }
}

impl Combatant for Player {
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
