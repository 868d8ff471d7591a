//! Core types for Spirefall.
//!
//! Provides the shared combat stat block, the player and enemy models, the
//! item catalog, experience and item progression, and the chooser
//! abstraction every interactive decision point goes through.

pub mod choice;
pub mod enemy;
pub mod error;
pub mod item;
pub mod player;
pub mod progression;
pub mod stats;

pub use choice::{Chooser, ScriptedChooser, resolve_choice};
pub use enemy::Enemy;
pub use error::{CoreError, CoreResult};
pub use item::Item;
pub use player::{FlagValue, Player};
pub use progression::{ItemUse, LevelUp};
pub use stats::{CombatStats, Combatant};
