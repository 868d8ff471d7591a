//! Item model and catalog.

use serde::{Deserialize, Serialize};

/// Something the player can carry.
///
/// Items are immutable once created. A `heal` of zero marks a key item that
/// has no effect when used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Flavour text.
    pub description: String,
    /// Hit points restored on use.
    pub heal: i32,
    /// Power bonus. Not applied anywhere yet.
    pub power: i32,
}

impl Item {
    /// Create an item.
    pub fn new(name: impl Into<String>, description: impl Into<String>, heal: i32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            heal: heal.max(0),
            power: 0,
        }
    }

    /// Set the power bonus.
    pub fn with_power(mut self, power: i32) -> Self {
        self.power = power;
        self
    }

    /// Whether using this item restores hit points.
    pub fn is_healing(&self) -> bool {
        self.heal > 0
    }

    /// Menu label, e.g. `Minor Potion (+10 HP)`.
    pub fn label(&self) -> String {
        if self.is_healing() {
            format!("{} (+{} HP)", self.name, self.heal)
        } else {
            self.name.clone()
        }
    }

    /// A small healing draught.
    pub fn minor_potion() -> Self {
        Self::new("Minor Potion", "A cloudy red draught. Restores a little health.", 10)
    }

    /// A strong healing draught.
    pub fn elixir() -> Self {
        Self::new("Elixir", "A shimmering vial that knits wounds closed.", 25)
    }

    /// The stranger's map showing the hidden trail.
    pub fn old_map() -> Self {
        Self::new("Old Map", "A stained map marking a trail through the ruins.", 0)
    }

    /// The crystal from the ruins.
    pub fn moon_crystal() -> Self {
        Self::new("Moon Crystal", "Cold to the touch. It hums near the Spire.", 0).with_power(2)
    }

    /// The key to the Spire's side door.
    pub fn iron_key() -> Self {
        Self::new("Iron Key", "Heavy and pitted. Fits an old lock.", 0)
    }
}
