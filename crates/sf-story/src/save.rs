//! Save files.
//!
//! A save is a single JSON snapshot of the player and the current scene.
//! Every field is optional on load: anything missing takes the value a
//! freshly created player would have, so older or hand-edited saves still
//! load.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use sf_core::{CombatStats, FlagValue, Item, Player};

use crate::error::{StoryError, StoryResult};
use crate::scene::SceneId;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// A save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    /// Format version.
    pub version: u32,
    /// When the snapshot was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Identifier of the scene to resume in.
    pub scene: String,
    /// The player.
    pub player: PlayerRecord,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: None,
            scene: SceneId::START.to_string(),
            player: PlayerRecord::default(),
        }
    }
}

impl SaveData {
    /// Snapshot the player in `scene`, stamped with the current time.
    pub fn capture(player: &Player, scene: SceneId) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Some(Utc::now()),
            scene: scene.to_string(),
            player: PlayerRecord::from(player),
        }
    }

    /// Rebuild the player and scene. Fails if the scene is unknown.
    pub fn restore(self) -> StoryResult<(Player, SceneId)> {
        let scene: SceneId = self.scene.parse()?;
        Ok((Player::from(self.player), scene))
    }
}

/// The player as it appears on disk: stats flattened into the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRecord {
    /// Player name.
    pub name: String,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Attack power.
    pub power: i32,
    /// Defense.
    pub defense: i32,
    /// Speed.
    pub speed: i32,
    /// Level.
    pub level: u32,
    /// Experience towards the next level.
    pub xp: u32,
    /// Experience needed for the next level.
    pub next_xp: u32,
    /// Carried items, in order of acquisition.
    pub inventory: Vec<Item>,
    /// Gold.
    pub gold: u32,
    /// Journal entries.
    pub journal: Vec<String>,
    /// Story flags.
    pub flags: BTreeMap<String, FlagValue>,
}

impl Default for PlayerRecord {
    fn default() -> Self {
        Self::from(&Player::default())
    }
}

impl From<&Player> for PlayerRecord {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            hp: player.stats.hp,
            max_hp: player.stats.max_hp,
            power: player.stats.power,
            defense: player.stats.defense,
            speed: player.stats.speed,
            level: player.level,
            xp: player.xp,
            next_xp: player.next_xp,
            inventory: player.inventory.clone(),
            gold: player.gold,
            journal: player.journal.clone(),
            flags: player.flags.clone(),
        }
    }
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Self {
        let mut player = Player::new(record.name);
        player.stats = CombatStats::new(record.max_hp, record.power, record.defense, record.speed);
        player.stats.hp = record.hp.min(player.stats.max_hp);
        player.level = record.level.max(1);
        player.next_xp = record.next_xp.max(1);
        // xp stays below the threshold
        player.xp = record.xp.min(player.next_xp - 1);
        player.inventory = record.inventory;
        player.gold = record.gold;
        player.journal = record.journal;
        player.flags = record.flags;
        player
    }
}

/// Write `data` to `path` as pretty-printed JSON.
pub fn write_save(path: &Path, data: &SaveData) -> StoryResult<()> {
    let json = serde_json::to_string_pretty(data)?;
    std::fs::write(path, json)?;
    info!("saved game to {}", path.display());
    Ok(())
}

/// Read a save from `path`.
pub fn read_save(path: &Path) -> StoryResult<SaveData> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StoryError::SaveNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    let data: SaveData = serde_json::from_str(&json)?;
    info!("loaded save from {} (version {})", path.display(), data.version);
    Ok(data)
}
