//! Damage rolls and turn-based combat for Spirefall.
//!
//! The combat engine runs one encounter at a time: it orders participants
//! by speed, asks the player for an action each round, lets every living
//! enemy strike back, and pays out experience and gold on victory.

pub mod combat;
pub mod damage;
pub mod error;

pub use combat::{Actor, CombatAction, CombatEvent, CombatOutcome, CombatState, Encounter};
pub use damage::damage;
pub use error::{MechError, MechResult};
