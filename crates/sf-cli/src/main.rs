//! Terminal front end for Spirefall.

mod display;
mod terminal;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::info;
use sf_core::Chooser;
use sf_story::config::DEFAULT_SAVE_PATH;
use sf_story::{Game, GameConfig, StoryError, StoryResult};

use crate::display::{MAX_WIDTH, MIN_WIDTH};
use crate::terminal::TerminalChooser;

#[derive(Parser)]
#[command(
    name = "spirefall",
    about = "Spirefall: a text role-playing game in the shadow of the Spire",
    version
)]
struct Cli {
    /// Load the save file before the first menu
    #[arg(short, long)]
    load: bool,

    /// Save file used by Save and Load
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SAVE_PATH)]
    save: PathBuf,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Name of your character
    #[arg(long)]
    name: Option<String>,

    /// Wrap narration at this many columns
    #[arg(long, default_value_t = 78)]
    width: usize,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    builder.parse_env("RUST_LOG");
    builder.target(env_logger::Target::Stderr);
    builder.format(|fmt, record| writeln!(fmt, "[{}] {}", record.level(), record.args()));
    builder.init();
}

fn run(cli: Cli) -> StoryResult<()> {
    let mut config = GameConfig::default().with_save_path(cli.save);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(name) = cli.name {
        config = config.with_player_name(name);
    }

    let mut game = Game::new(config);
    let mut chooser = TerminalChooser::stdio(cli.width.clamp(MIN_WIDTH, MAX_WIDTH));

    chooser.say("SPIREFALL");
    chooser.say(&format!(
        "Welcome, {}. The Spire waits beyond Emberfall.",
        game.player().name
    ));

    if cli.load {
        match game.load() {
            Ok(()) => chooser.say(&format!("Save loaded. You are at the {}.", game.scene())),
            Err(StoryError::SaveNotFound(path)) => chooser.say(&format!(
                "No save file at {}. Starting a new game.",
                path.display()
            )),
            Err(e) => chooser.say(&format!("Could not load: {e}. Starting a new game.")),
        }
    }

    let over = game.run(&mut chooser)?;
    info!("session over: {over:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["spirefall"]);
        assert!(!cli.load);
        assert_eq!(cli.save, PathBuf::from(DEFAULT_SAVE_PATH));
        assert_eq!(cli.seed, None);
        assert_eq!(cli.width, 78);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn flags() {
        let cli = Cli::parse_from([
            "spirefall", "-l", "--save", "run.json", "--seed", "9", "--name", "Ash", "-vv",
        ]);
        assert!(cli.load);
        assert_eq!(cli.save, PathBuf::from("run.json"));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.name.as_deref(), Some("Ash"));
        assert_eq!(cli.verbose, 2);
    }
}
