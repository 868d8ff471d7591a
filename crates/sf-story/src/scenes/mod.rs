//! The scenes of the story.
//!
//! Scenes are grouped by region: the village of Emberfall, the wilds
//! between the village and the Spire, and the Spire itself.

mod spire;
mod village;
mod wilds;

pub use spire::{Finale, HeartChamber, SpireApproach};
pub use village::{Market, Tavern, Village};
pub use wilds::{Crossroads, Road, Ruins, Waystation};

use crate::scene::Scene;

/// Every scene in the standard story.
pub fn all() -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(Village),
        Box::new(Tavern),
        Box::new(Market),
        Box::new(Crossroads),
        Box::new(Road),
        Box::new(Waystation),
        Box::new(Ruins),
        Box::new(SpireApproach),
        Box::new(HeartChamber),
        Box::new(Finale),
    ]
}

#[cfg(test)]
pub(crate) mod testing {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sf_core::{Player, ScriptedChooser};

    use crate::error::StoryResult;
    use crate::scene::{Scene, StoryContext, Transition};

    /// Run one scene with scripted answers and a seeded rng.
    pub fn play(
        scene: &dyn Scene,
        player: &mut Player,
        answers: &[&str],
        seed: u64,
    ) -> (StoryResult<Transition>, ScriptedChooser) {
        let mut chooser = ScriptedChooser::new(answers.iter().copied());
        let mut rng = StdRng::seed_from_u64(seed);
        let result = {
            let mut ctx = StoryContext::new(player, &mut chooser, &mut rng);
            scene.advance(&mut ctx)
        };
        (result, chooser)
    }

    /// A player strong enough to win any scripted fight in one blow.
    pub fn champion() -> Player {
        let mut player = Player::default();
        player.stats.power = 500;
        player.stats.speed = 100;
        player.stats.max_hp = 500;
        player.stats.hp = 500;
        player
    }
}
