//! The Spire: its gate, the heart chamber, and the finale.

use sf_core::Enemy;

use crate::ending::Ending;
use crate::error::StoryResult;
use crate::scene::{Scene, SceneId, StoryContext, Transition};

/// Power the crystal drains from the Gatekeeper.
pub const CRYSTAL_WEAKENING: i32 = 2;

/// The Spire's gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpireApproach;

impl Scene for SpireApproach {
    fn id(&self) -> SceneId {
        SceneId::SpireApproach
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("The Spire rises black against the sky. A hooded Gatekeeper bars the great door.");
        let crystal = ctx.player.has_flag("has_crystal");
        if crystal {
            ctx.say("The Moon Crystal hums in your pack. The Gatekeeper flinches.");
        }

        if ctx.player.has_flag("has_key") {
            ctx.say("The iron key turns with a groan in the side door. You slip inside unseen.");
            ctx.player.set_flag("used_side_door", true);
            ctx.player.record("Entered the Spire through the side door.");
            return Ok(Transition::Continue(SceneId::HeartChamber));
        }

        let mut gatekeeper = Enemy::gatekeeper();
        if crystal {
            gatekeeper = gatekeeper.weakened(CRYSTAL_WEAKENING);
        }
        if !ctx.fight(vec![gatekeeper])?.survived() {
            return Ok(Transition::Death);
        }
        ctx.player.record("Got past the Gatekeeper.");
        Ok(Transition::Continue(SceneId::HeartChamber))
    }
}

#[derive(Debug, Clone, Copy)]
enum HeartChoice {
    Claim,
    Seal,
    Destroy,
    Leave,
}

/// The chamber at the top of the Spire.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeartChamber;

impl Scene for HeartChamber {
    fn id(&self) -> SceneId {
        SceneId::HeartChamber
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("At the top of the stair a great heart of red stone beats in the dark. Its Warden wakes.");
        if !ctx.fight(vec![Enemy::heart_warden()])?.survived() {
            return Ok(Transition::Death);
        }

        ctx.say("The heart pulses, waiting.");
        let mut options = vec![("Claim the heart", HeartChoice::Claim)];
        if ctx.player.has_flag("has_crystal") {
            options.push(("Seal the heart with the crystal", HeartChoice::Seal));
        }
        options.push(("Destroy the heart", HeartChoice::Destroy));
        options.push(("Walk away", HeartChoice::Leave));

        let (flag, entry) = match ctx.pick("What will you do with the heart?", &options)? {
            HeartChoice::Claim => ("claimed_heart", "Claimed the heart of the Spire."),
            HeartChoice::Seal => ("sealed_heart", "Sealed the heart with the Moon Crystal."),
            HeartChoice::Destroy => ("destroyed_heart", "Destroyed the heart of the Spire."),
            HeartChoice::Leave => ("walked_away", "Walked away from the heart."),
        };
        ctx.player.set_flag(flag, true);
        ctx.player.record(entry);
        Ok(Transition::Continue(SceneId::Finale))
    }
}

/// Resolves the heart decision into one of the five endings.
///
/// Flags are checked in priority order: claimed, sealed, destroyed. A
/// claimed heart heard through the whispers summons the Shadow Queen first.
#[derive(Debug, Clone, Copy, Default)]
pub struct Finale;

impl Scene for Finale {
    fn id(&self) -> SceneId {
        SceneId::Finale
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        let ending = if ctx.player.has_flag("claimed_heart") {
            if ctx.player.has_flag("heard_whispers") {
                ctx.say("The whispers gather into a shape: the Shadow Queen, come to collect.");
                if !ctx.fight(vec![Enemy::shadow_queen()])?.survived() {
                    return Ok(Transition::Death);
                }
                Ending::Power
            } else {
                Ending::Ruler
            }
        } else if ctx.player.has_flag("sealed_heart") {
            Ending::Guardian
        } else if ctx.player.has_flag("destroyed_heart") {
            Ending::Liberator
        } else {
            Ending::Wanderer
        };

        ctx.player.record(format!("Reached the {} ending.", ending.key()));
        Ok(Transition::Ending(ending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::{champion, play};
    use sf_core::Player;

    #[test]
    fn side_door_skips_the_gatekeeper() {
        let mut player = Player::default();
        player.set_flag("has_key", true);
        let (t, chooser) = play(&SpireApproach, &mut player, &[], 1);
        assert_eq!(t.unwrap(), Transition::Continue(SceneId::HeartChamber));
        assert!(!chooser.said("Battle!"));
        assert!(chooser.prompts.is_empty());
        assert!(player.has_flag("used_side_door"));
    }

    #[test]
    fn gatekeeper_fight() {
        let mut player = champion();
        let (t, chooser) = play(&SpireApproach, &mut player, &["Attack"], 1);
        assert_eq!(t.unwrap(), Transition::Continue(SceneId::HeartChamber));
        assert!(chooser.said("Battle! You face: Gatekeeper."));
    }

    #[test]
    fn gatekeeper_can_kill() {
        let mut player = Player::default();
        player.stats.hp = 1;
        player.stats.speed = 0;
        let (t, _) = play(&SpireApproach, &mut player, &[], 1);
        assert_eq!(t.unwrap(), Transition::Death);
    }

    #[test]
    fn seal_needs_the_crystal() {
        let mut player = champion();
        let (t, chooser) = play(&HeartChamber, &mut player, &["Attack", "Seal", "Destroy"], 1);
        assert_eq!(t.unwrap(), Transition::Continue(SceneId::Finale));
        assert!(chooser.said("invalid choice"));
        assert!(player.has_flag("destroyed_heart"));

        let mut player = champion();
        player.set_flag("has_crystal", true);
        let (t, _) = play(&HeartChamber, &mut player, &["Attack", "Seal"], 1);
        assert_eq!(t.unwrap(), Transition::Continue(SceneId::Finale));
        assert!(player.has_flag("sealed_heart"));
    }

    #[test]
    fn claimed_heart_alone_is_ruler() {
        let mut player = Player::default();
        player.set_flag("claimed_heart", true);
        let (t, chooser) = play(&Finale, &mut player, &[], 1);
        assert_eq!(t.unwrap(), Transition::Ending(Ending::Ruler));
        assert!(chooser.prompts.is_empty());
        assert!(!chooser.said("Shadow Queen"));
    }

    #[test]
    fn claimed_heart_with_whispers_fights_the_queen() {
        let mut player = champion();
        player.set_flag("claimed_heart", true);
        player.set_flag("heard_whispers", true);
        let (t, chooser) = play(&Finale, &mut player, &["Attack"], 1);
        assert_eq!(t.unwrap(), Transition::Ending(Ending::Power));
        assert!(chooser.said("Battle! You face: Shadow Queen."));
    }

    #[test]
    fn fleeing_the_queen_is_still_power() {
        let mut player = champion();
        player.set_flag("claimed_heart", true);
        player.set_flag("heard_whispers", true);
        let (t, chooser) = play(&Finale, &mut player, &["Flee"; 30], 5);
        assert_eq!(t.unwrap(), Transition::Ending(Ending::Power));
        assert!(chooser.said("You slip away from the fight."));
        assert!(!player.journal.iter().any(|j| j.starts_with("Defeated")));
    }

    #[test]
    fn losing_to_the_queen_is_death() {
        let mut player = Player::default();
        player.stats.hp = 1;
        player.set_flag("claimed_heart", true);
        player.set_flag("heard_whispers", true);
        let (t, _) = play(&Finale, &mut player, &[], 1);
        assert_eq!(t.unwrap(), Transition::Death);
    }

    #[test]
    fn ending_priority() {
        let cases: [(&[&str], Ending); 5] = [
            (&["claimed_heart", "sealed_heart", "destroyed_heart"], Ending::Ruler),
            (&["sealed_heart", "destroyed_heart"], Ending::Guardian),
            (&["destroyed_heart"], Ending::Liberator),
            (&["walked_away"], Ending::Wanderer),
            (&[], Ending::Wanderer),
        ];
        for (flags, expected) in cases {
            let mut player = Player::default();
            for flag in flags {
                player.set_flag(*flag, true);
            }
            let (t, _) = play(&Finale, &mut player, &[], 1);
            assert_eq!(t.unwrap(), Transition::Ending(expected), "flags {flags:?}");
        }
    }

    #[test]
    fn whispers_without_claim_do_nothing() {
        let mut player = Player::default();
        player.set_flag("heard_whispers", true);
        player.set_flag("sealed_heart", true);
        let (t, _) = play(&Finale, &mut player, &[], 1);
        assert_eq!(t.unwrap(), Transition::Ending(Ending::Guardian));
    }
}
