//! Randomised damage rolls.

use rand::Rng;

/// Roll damage for one blow.
///
/// The base is `power - defense` (never below zero). A positive base is
/// spread uniformly over `[floor(base * 0.8), floor(base * 1.2)]`; a zero
/// base rolls `[0, 1]`. The result is always at least 1.
pub fn damage<R: Rng>(attacker_power: i32, defender_defense: i32, rng: &mut R) -> i32 {
    let base = attacker_power.saturating_sub(defender_defense).max(0);
    let (low, high) = spread(base);
    let roll = rng.random_range(low..=high);
    log::trace!("damage roll {attacker_power} vs {defender_defense}: {roll} in [{low}, {high}]");
    roll.max(1)
}

/// The closed range a damage roll is drawn from.
pub fn spread(base: i32) -> (i32, i32) {
    if base > 0 {
        let base = i64::from(base);
        let low = base * 4 / 5;
        let high = base * 6 / 5;
        (clamp_i32(low), clamp_i32(high))
    } else {
        (0, 1)
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
