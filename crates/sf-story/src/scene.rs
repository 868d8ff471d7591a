//! Scene identifiers, transitions, and the context scenes run in.

use rand::Rng;
use rand::rngs::StdRng;
use sf_core::{Chooser, Enemy, Player};
use sf_mechanics::{CombatOutcome, Encounter};

use crate::ending::Ending;
use crate::error::{StoryError, StoryResult};

/// A node in the story graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// Emberfall, where the game begins.
    Village,
    /// The Rusty Lantern tavern.
    Tavern,
    /// The Emberfall market.
    Market,
    /// Where the roads split.
    Crossroads,
    /// The old road, prone to ambushes.
    Road,
    /// The hermit's waystation by the river.
    Waystation,
    /// The ruins on the hidden trail.
    Ruins,
    /// The Spire's gate.
    SpireApproach,
    /// The chamber of the heart.
    HeartChamber,
    /// Resolution of the heart decision.
    Finale,
}

impl SceneId {
    /// The scene a new game starts in.
    pub const START: SceneId = SceneId::Village;

    /// All scenes.
    pub const ALL: [SceneId; 10] = [
        SceneId::Village,
        SceneId::Tavern,
        SceneId::Market,
        SceneId::Crossroads,
        SceneId::Road,
        SceneId::Waystation,
        SceneId::Ruins,
        SceneId::SpireApproach,
        SceneId::HeartChamber,
        SceneId::Finale,
    ];

    /// Identifier used in save files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Village => "village",
            Self::Tavern => "tavern",
            Self::Market => "market",
            Self::Crossroads => "crossroads",
            Self::Road => "road",
            Self::Waystation => "waystation",
            Self::Ruins => "ruins",
            Self::SpireApproach => "spire_approach",
            Self::HeartChamber => "heart_chamber",
            Self::Finale => "finale",
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SceneId {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| StoryError::UnknownScene(s.to_string()))
    }
}

/// What a scene hands back to the story engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move on to another scene.
    Continue(SceneId),
    /// The player died. Terminal.
    Death,
    /// The story is over. Terminal.
    Ending(Ending),
}

/// A story node.
pub trait Scene {
    /// The identifier this scene is registered under.
    fn id(&self) -> SceneId;

    /// Play the scene and decide where the story goes next.
    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition>;
}

/// Everything a scene may read or change.
pub struct StoryContext<'a> {
    /// The player, including flags and inventory.
    pub player: &'a mut Player,
    /// Where decisions come from and narration goes.
    pub chooser: &'a mut dyn Chooser,
    /// Randomness for gambling, ambushes, theft, and combat.
    pub rng: &'a mut StdRng,
}

impl<'a> StoryContext<'a> {
    /// Bundle the pieces a scene needs.
    pub fn new(player: &'a mut Player, chooser: &'a mut dyn Chooser, rng: &'a mut StdRng) -> Self {
        Self {
            player,
            chooser,
            rng,
        }
    }

    /// Show narration.
    pub fn say(&mut self, text: &str) {
        self.chooser.say(text);
    }

    /// Offer labelled options and return the value attached to the chosen one.
    pub fn pick<T: Copy>(&mut self, prompt: &str, options: &[(&str, T)]) -> StoryResult<T> {
        let labels: Vec<String> = options.iter().map(|(label, _)| label.to_string()).collect();
        let index = self.chooser.choose(prompt, &labels)?;
        options
            .get(index)
            .map(|(_, value)| *value)
            .ok_or_else(|| sf_core::CoreError::NoOptions.into())
    }

    /// Roll against a probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0))
    }

    /// Run an encounter against `enemies`.
    pub fn fight(&mut self, enemies: Vec<Enemy>) -> StoryResult<CombatOutcome> {
        let mut encounter = Encounter::new(enemies)?;
        let outcome = encounter.run(&mut *self.player, &mut *self.chooser, &mut *self.rng)?;
        Ok(outcome)
    }
}
