//! Game session: the top-level menu loop.
//!
//! `Game` owns the player, the current scene, the random number generator,
//! and the scene registry. [`Game::run`] offers the menu (Continue, Status,
//! Journal, Save, Load, Quit) until the story ends or the player quits.

use std::path::PathBuf;

use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sf_core::{Chooser, Player};

use crate::config::GameConfig;
use crate::ending::Ending;
use crate::error::{StoryError, StoryResult};
use crate::report;
use crate::save::{SaveData, read_save, write_save};
use crate::scene::{SceneId, StoryContext, Transition};
use crate::story::Story;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Continue,
    Status,
    Journal,
    Save,
    Load,
    Quit,
}

const MENU: [(&str, MenuOption); 6] = [
    ("Continue", MenuOption::Continue),
    ("Status", MenuOption::Status),
    ("Journal", MenuOption::Journal),
    ("Save", MenuOption::Save),
    ("Load", MenuOption::Load),
    ("Quit", MenuOption::Quit),
];

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameOver {
    /// The player died.
    Death,
    /// The story reached an ending.
    Ending(Ending),
    /// The player quit from the menu.
    Quit,
    /// The story graph led somewhere it cannot go.
    Broken(String),
}

/// A game in progress.
#[derive(Debug)]
pub struct Game {
    player: Player,
    scene: SceneId,
    rng: StdRng,
    story: Story,
    config: GameConfig,
}

impl Game {
    /// Start a new game at the first scene.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            player: Player::new(config.player_name.clone()),
            scene: SceneId::START,
            rng,
            story: Story::standard(),
            config,
        }
    }

    /// Replace the scene registry.
    pub fn with_story(mut self, story: Story) -> Self {
        self.story = story;
        self
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The scene the next Continue will play.
    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Move to another scene.
    pub fn set_scene(&mut self, scene: SceneId) {
        self.scene = scene;
    }

    /// Play the current scene once.
    ///
    /// Returns `Some` when the story is over.
    pub fn step(&mut self, chooser: &mut dyn Chooser) -> StoryResult<Option<GameOver>> {
        let transition = {
            let mut ctx = StoryContext::new(&mut self.player, chooser, &mut self.rng);
            self.story.advance(self.scene, &mut ctx)?
        };
        match transition {
            Transition::Continue(next) => {
                self.scene = next;
                Ok(None)
            }
            Transition::Death => {
                info!("player died in {}", self.scene);
                Ok(Some(GameOver::Death))
            }
            Transition::Ending(ending) => {
                info!("reached the {ending} ending");
                Ok(Some(GameOver::Ending(ending)))
            }
        }
    }

    /// Run the menu loop until the game is over.
    ///
    /// Input that runs dry ends the loop with an error. A scene with no
    /// registered handler ends it with [`GameOver::Broken`].
    pub fn run(&mut self, chooser: &mut dyn Chooser) -> StoryResult<GameOver> {
        let labels: Vec<String> = MENU.iter().map(|(label, _)| label.to_string()).collect();
        loop {
            let index = chooser.choose("What will you do?", &labels)?;
            let option = MENU.get(index).map(|(_, option)| *option);
            match option {
                Some(MenuOption::Continue) => match self.step(chooser) {
                    Ok(None) => {}
                    Ok(Some(over)) => {
                        announce(&over, chooser);
                        return Ok(over);
                    }
                    Err(StoryError::UnknownScene(name)) => {
                        let message =
                            format!("The story cannot continue: no scene named '{name}'.");
                        warn!("{message}");
                        chooser.say(&message);
                        return Ok(GameOver::Broken(message));
                    }
                    Err(e) => return Err(e),
                },
                Some(MenuOption::Status) => {
                    chooser.say(&format!("Location: {}", self.scene));
                    chooser.say(&report::status(&self.player));
                }
                Some(MenuOption::Journal) => chooser.say(&report::journal(&self.player)),
                Some(MenuOption::Save) => match self.save() {
                    Ok(path) => chooser.say(&format!("Game saved to {}.", path.display())),
                    Err(e) => chooser.say(&format!("Could not save: {e}")),
                },
                Some(MenuOption::Load) => match self.load() {
                    Ok(()) => chooser.say(&format!("Game loaded. You are at the {}.", self.scene)),
                    Err(StoryError::SaveNotFound(path)) => {
                        chooser.say(&format!("No save file at {}.", path.display()));
                    }
                    Err(e) => chooser.say(&format!("Could not load: {e}")),
                },
                Some(MenuOption::Quit) => {
                    chooser.say("Farewell.");
                    return Ok(GameOver::Quit);
                }
                None => return Err(sf_core::CoreError::NoOptions.into()),
            }
        }
    }

    /// Write the current state to the configured save path.
    pub fn save(&self) -> StoryResult<PathBuf> {
        let path = self.config.save_path.clone();
        write_save(&path, &SaveData::capture(&self.player, self.scene))?;
        Ok(path)
    }

    /// Replace the current state with the configured save.
    ///
    /// On any failure the game is left as it was.
    pub fn load(&mut self) -> StoryResult<()> {
        let data = match read_save(&self.config.save_path) {
            Ok(data) => data,
            Err(e) => {
                if let StoryError::SaveNotFound(path) = &e {
                    warn!("no save file at {}", path.display());
                }
                return Err(e);
            }
        };
        let (player, scene) = data.restore()?;
        self.player = player;
        self.scene = scene;
        Ok(())
    }
}

fn announce(over: &GameOver, chooser: &mut dyn Chooser) {
    match over {
        GameOver::Death => chooser.say("You have fallen. Your journey ends here."),
        GameOver::Ending(ending) => {
            chooser.say(&format!("THE END: {}", ending.title()));
            chooser.say(ending.text());
        }
        GameOver::Quit | GameOver::Broken(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::{CoreError, ScriptedChooser};
    use tempfile::TempDir;

    fn game(dir: &TempDir) -> Game {
        let config = GameConfig::default()
            .with_seed(3)
            .with_save_path(dir.path().join("save.json"));
        Game::new(config)
    }

    #[test]
    fn quit_from_the_menu() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        let mut chooser = ScriptedChooser::new(["Quit"]);
        assert_eq!(game.run(&mut chooser).unwrap(), GameOver::Quit);
        assert_eq!(game.scene(), SceneId::START);
    }

    #[test]
    fn status_and_journal() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        let mut chooser = ScriptedChooser::new(["Status", "Journal", "Quit"]);
        game.run(&mut chooser).unwrap();
        assert!(chooser.said("Location: village"));
        assert!(chooser.said("Wanderer"));
        assert!(chooser.said("Your journal is empty."));
    }

    #[test]
    fn save_then_load_restores_position() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        let mut chooser = ScriptedChooser::new([
            "Continue",
            "Visit the market",
            "Save",
            "Continue",
            "Leave",
            "Load",
            "Quit",
        ]);
        game.run(&mut chooser).unwrap();
        assert!(dir.path().join("save.json").exists());
        assert!(chooser.said("Game saved to"));
        assert!(chooser.said("Game loaded. You are at the market."));
        assert_eq!(game.scene(), SceneId::Market);
    }

    #[test]
    fn missing_save_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        game.player_mut().gold = 77;
        let mut chooser = ScriptedChooser::new(["Load", "Quit"]);
        game.run(&mut chooser).unwrap();
        assert!(chooser.said("No save file at"));
        assert_eq!(game.player().gold, 77);
        assert_eq!(game.scene(), SceneId::START);
    }

    #[test]
    fn unregistered_scene_breaks_gracefully() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir).with_story(Story::empty());
        let mut chooser = ScriptedChooser::new(["Continue"]);
        match game.run(&mut chooser).unwrap() {
            GameOver::Broken(message) => assert!(message.contains("village")),
            other => panic!("expected a broken story, got {other:?}"),
        }
        assert!(chooser.said("The story cannot continue"));
    }

    #[test]
    fn finale_announces_the_ending() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        game.set_scene(SceneId::Finale);
        game.player_mut().set_flag("destroyed_heart", true);
        let mut chooser = ScriptedChooser::new(["Continue"]);
        let over = game.run(&mut chooser).unwrap();
        assert_eq!(over, GameOver::Ending(Ending::Liberator));
        assert!(chooser.said(Ending::Liberator.title()));
    }

    #[test]
    fn death_ends_the_game() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        game.set_scene(SceneId::HeartChamber);
        game.player_mut().stats.hp = 1;
        game.player_mut().stats.speed = 0;
        let mut chooser = ScriptedChooser::new(["Continue"]);
        assert_eq!(game.run(&mut chooser).unwrap(), GameOver::Death);
        assert!(chooser.said("You have fallen."));
    }

    #[test]
    fn running_out_of_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        let mut chooser = ScriptedChooser::new(["Status"]);
        assert!(matches!(
            game.run(&mut chooser),
            Err(StoryError::Core(CoreError::InputClosed))
        ));
    }

    #[test]
    fn step_moves_between_scenes() {
        let dir = TempDir::new().unwrap();
        let mut game = game(&dir);
        let mut chooser = ScriptedChooser::new(["Visit the tavern"]);
        assert_eq!(game.step(&mut chooser).unwrap(), None);
        assert_eq!(game.scene(), SceneId::Tavern);
    }
}
