//! The wilds between Emberfall and the Spire.

use sf_core::{Enemy, Item};
use sf_mechanics::CombatOutcome;

use crate::error::StoryResult;
use crate::scene::{Scene, SceneId, StoryContext, Transition};

/// Ambush chance on the old road.
pub const AMBUSH_CHANCE: f64 = 0.6;
/// Ambush chance when the map shows the safer verges.
pub const AMBUSH_CHANCE_WITH_MAP: f64 = 0.3;
/// Price of the hermit's iron key.
pub const KEY_PRICE: u32 = 20;

/// Where the roads split.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crossroads;

impl Scene for Crossroads {
    fn id(&self) -> SceneId {
        SceneId::Crossroads
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        let mut options = vec![
            ("Take the old road", SceneId::Road),
            ("Follow the river to the waystation", SceneId::Waystation),
        ];
        if ctx.player.has_flag("has_map") {
            ctx.say(
                "A weathered signpost points two ways. Your map marks a third: \
                 a hidden trail winding into the ruins.",
            );
            options.push(("Take the hidden trail", SceneId::Ruins));
        } else {
            ctx.say("A weathered signpost points two ways: the old road and the river path.");
        }

        let next = ctx.pick("Which way?", &options)?;
        Ok(Transition::Continue(next))
    }
}

/// The old road. Bandits lie in wait more often than not.
#[derive(Debug, Clone, Copy, Default)]
pub struct Road;

impl Scene for Road {
    fn id(&self) -> SceneId {
        SceneId::Road
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        if !ctx.player.has_flag("travelled_road") {
            ctx.player.set_flag("travelled_road", true);
            ctx.player.record("Took the old road.");
        }

        let ambush_chance = if ctx.player.has_flag("has_map") {
            AMBUSH_CHANCE_WITH_MAP
        } else {
            AMBUSH_CHANCE
        };

        if ctx.chance(ambush_chance) {
            ctx.say("Two figures step out from behind the rocks, blades drawn.");
            match ctx.fight(vec![Enemy::bandit(), Enemy::bandit()])? {
                CombatOutcome::Lost => return Ok(Transition::Death),
                CombatOutcome::Fled => ctx.say("You leave the bandits behind you."),
                CombatOutcome::Won { .. } => ctx.player.record("Survived an ambush on the road."),
            }
        } else {
            ctx.say("The road is quiet. Crows watch you pass.");
        }

        let next = ctx.pick(
            "The Spire looms ahead.",
            &[
                ("Press on to the Spire", SceneId::SpireApproach),
                ("Turn back to the crossroads", SceneId::Crossroads),
            ],
        )?;
        Ok(Transition::Continue(next))
    }
}

#[derive(Debug, Clone, Copy)]
enum WaystationAction {
    Rest,
    BuyKey,
    Leave,
}

/// A hermit's waystation on the river.
#[derive(Debug, Clone, Copy, Default)]
pub struct Waystation;

impl Scene for Waystation {
    fn id(&self) -> SceneId {
        SceneId::Waystation
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("A hermit tends a fire in a stone hut by the river. Keys hang from the rafters.");

        let mut options = Vec::new();
        if !ctx.player.has_flag("rested") {
            options.push(("Rest by the fire", WaystationAction::Rest));
        }
        if !ctx.player.has_flag("has_key") {
            options.push(("Buy the iron key (20 gold)", WaystationAction::BuyKey));
        }
        options.push(("Continue to the Spire", WaystationAction::Leave));

        match ctx.pick("What will you do?", &options)? {
            WaystationAction::Rest => {
                ctx.player.stats.restore_full();
                ctx.player.set_flag("rested", true);
                ctx.player.record("Rested at the hermit's waystation.");
                ctx.say("You sleep deeply and wake restored.");
                Ok(Transition::Continue(SceneId::Waystation))
            }
            WaystationAction::BuyKey => {
                if ctx.player.spend(KEY_PRICE) {
                    ctx.player.add_item(Item::iron_key());
                    ctx.player.set_flag("has_key", true);
                    ctx.player.record("Bought an iron key from the hermit.");
                    ctx.say("\"It opens the side door,\" the hermit says. \"Mind what's inside.\"");
                } else {
                    ctx.say("The hermit shakes their head. \"Twenty gold. No less.\"");
                }
                Ok(Transition::Continue(SceneId::Waystation))
            }
            WaystationAction::Leave => Ok(Transition::Continue(SceneId::SpireApproach)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RuinsAction {
    TakeCrystal,
    Listen,
    Leave,
}

/// The ruins on the hidden trail, home to the crystal and the whispers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ruins;

impl Scene for Ruins {
    fn id(&self) -> SceneId {
        SceneId::Ruins
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("Broken columns ring a dry fountain. Something pale glows in the basin.");

        let mut options = Vec::new();
        if !ctx.player.has_flag("has_crystal") && !ctx.player.has_flag("fled_sentinel") {
            options.push(("Take the crystal", RuinsAction::TakeCrystal));
        }
        if !ctx.player.has_flag("heard_whispers") {
            options.push(("Listen to the whispers", RuinsAction::Listen));
        }
        options.push(("Leave for the Spire", RuinsAction::Leave));

        match ctx.pick("What will you do?", &options)? {
            RuinsAction::TakeCrystal => {
                ctx.say("As your hand closes on the crystal, the fountain's statue steps down.");
                match ctx.fight(vec![Enemy::stone_sentinel()])? {
                    CombatOutcome::Lost => return Ok(Transition::Death),
                    CombatOutcome::Fled => {
                        ctx.player.set_flag("fled_sentinel", true);
                        ctx.say("You flee, and the crystal stays where it lies.");
                    }
                    CombatOutcome::Won { .. } => {
                        ctx.player.add_item(Item::moon_crystal());
                        ctx.player.set_flag("has_crystal", true);
                        ctx.player.record("Took the Moon Crystal from the ruins.");
                    }
                }
                Ok(Transition::Continue(SceneId::Ruins))
            }
            RuinsAction::Listen => {
                ctx.say(
                    "A voice like cold silk: \"Take the heart, and you will need me.\" \
                     It knows your name.",
                );
                ctx.player.set_flag("heard_whispers", true);
                ctx.player.record("Heard a voice whispering in the ruins.");
                Ok(Transition::Continue(SceneId::Ruins))
            }
            RuinsAction::Leave => Ok(Transition::Continue(SceneId::SpireApproach)),
        }
    }
}
