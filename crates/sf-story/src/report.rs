//! Status and journal views.

use comfy_table::{ContentArrangement, Table};
use sf_core::Player;

/// The player's stats, pack, and story flags as a table.
pub fn status(player: &Player) -> String {
    let stats = &player.stats;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Stat", "Value"]);

    table.add_row(vec!["Name".to_string(), player.name.clone()]);
    table.add_row(vec!["Level".to_string(), player.level.to_string()]);
    table.add_row(vec![
        "HP".to_string(),
        format!("{}/{}", stats.display_hp(), stats.max_hp),
    ]);
    table.add_row(vec!["Power".to_string(), stats.power.to_string()]);
    table.add_row(vec!["Defense".to_string(), stats.defense.to_string()]);
    table.add_row(vec!["Speed".to_string(), stats.speed.to_string()]);
    table.add_row(vec![
        "XP".to_string(),
        format!("{}/{}", player.xp, player.next_xp),
    ]);
    table.add_row(vec!["Gold".to_string(), player.gold.to_string()]);

    let pack = if player.inventory.is_empty() {
        "-".to_string()
    } else {
        player
            .inventory
            .iter()
            .map(|item| item.label())
            .collect::<Vec<_>>()
            .join("\n")
    };
    table.add_row(vec!["Pack".to_string(), pack]);

    if !player.flags.is_empty() {
        let flags = player
            .flags
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec!["Flags".to_string(), flags]);
    }

    table.to_string()
}

/// Numbered journal entries, oldest first.
pub fn journal(player: &Player) -> String {
    if player.journal.is_empty() {
        return "Your journal is empty.".to_string();
    }
    player
        .journal
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}. {entry}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
