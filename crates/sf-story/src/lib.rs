//! Scene graph, endings, save files, and game session for Spirefall.
//!
//! The story is a directed graph of scenes keyed by [`SceneId`]. Each scene
//! inspects the player's flags and inventory, asks for a decision, maybe
//! runs a fight, and returns a [`Transition`]: the next scene, death, or
//! one of five endings. [`Game`] drives the graph from a top-level menu and
//! handles saving and loading.

pub mod config;
pub mod ending;
pub mod error;
pub mod report;
pub mod save;
pub mod scene;
pub mod scenes;
pub mod session;
pub mod story;

pub use config::GameConfig;
pub use ending::Ending;
pub use error::{StoryError, StoryResult};
pub use save::SaveData;
pub use scene::{Scene, SceneId, StoryContext, Transition};
pub use session::{Game, GameOver};
pub use story::Story;
