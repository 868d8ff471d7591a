//! Emberfall: the village, its tavern, and its market.

use sf_core::{Enemy, Item};

use crate::error::StoryResult;
use crate::scene::{Scene, SceneId, StoryContext, Transition};

/// Gold staked on one game of dice.
pub const GAMBLE_STAKE: u32 = 5;
/// Gold won on a winning throw.
pub const GAMBLE_WIN: u32 = 10;
/// Price of the stranger's map.
pub const MAP_PRICE: u32 = 15;
/// Price of a potion at the market.
pub const POTION_PRICE: u32 = 8;
/// Chance that stealing from the market goes unnoticed.
pub const THEFT_CHANCE: f64 = 0.4;

/// The starting village.
#[derive(Debug, Clone, Copy, Default)]
pub struct Village;

impl Scene for Village {
    fn id(&self) -> SceneId {
        SceneId::Village
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say(
            "Emberfall huddles in the long shadow of the Spire. Smoke curls from \
             the tavern chimney and the market stalls are open.",
        );

        let next = ctx.pick(
            "Where will you go?",
            &[
                ("Visit the tavern", SceneId::Tavern),
                ("Visit the market", SceneId::Market),
                ("Set out for the Spire", SceneId::Crossroads),
            ],
        )?;

        if next == SceneId::Crossroads && !ctx.player.has_flag("left_village") {
            ctx.player.set_flag("left_village", true);
            ctx.player.record("Set out from Emberfall towards the Spire.");
        }
        Ok(Transition::Continue(next))
    }
}

#[derive(Debug, Clone, Copy)]
enum TavernAction {
    Gamble,
    Rumours,
    BuyMap,
    Leave,
}

/// The Rusty Lantern: dice, rumours, and a stranger with a map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tavern;

impl Scene for Tavern {
    fn id(&self) -> SceneId {
        SceneId::Tavern
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("The Rusty Lantern is warm and loud. Dice rattle at a corner table.");

        let mut options = Vec::new();
        if ctx.player.gold >= GAMBLE_STAKE {
            options.push(("Gamble (5 gold)", TavernAction::Gamble));
        }
        options.push(("Listen to rumours", TavernAction::Rumours));
        if !ctx.player.has_flag("has_map") {
            options.push(("Buy the stranger's map (15 gold)", TavernAction::BuyMap));
        }
        options.push(("Leave", TavernAction::Leave));

        match ctx.pick("What will you do?", &options)? {
            TavernAction::Gamble => {
                if ctx.chance(0.5) {
                    ctx.player.gold = ctx.player.gold.saturating_add(GAMBLE_WIN);
                    ctx.say("The dice fall your way. You win 10 gold.");
                    ctx.player.record("Won 10 gold at dice.");
                } else {
                    ctx.player.gold = ctx.player.gold.saturating_sub(GAMBLE_STAKE);
                    ctx.say("Snake eyes. You lose your stake.");
                    ctx.player.record("Lost 5 gold at dice.");
                }
                Ok(Transition::Continue(SceneId::Tavern))
            }
            TavernAction::Rumours => {
                ctx.say(
                    "A drover leans close. \"There's a crystal in the old ruins, off the \
                     hidden trail. And they say the Spire's side door still opens to an \
                     iron key.\"",
                );
                if !ctx.player.has_flag("heard_rumours") {
                    ctx.player.set_flag("heard_rumours", true);
                    ctx.player.record("Heard rumours of a crystal and an iron key.");
                }
                Ok(Transition::Continue(SceneId::Tavern))
            }
            TavernAction::BuyMap => {
                if ctx.player.spend(MAP_PRICE) {
                    ctx.player.add_item(Item::old_map());
                    ctx.player.set_flag("has_map", true);
                    ctx.player.record("Bought a map of the hidden trail.");
                    ctx.say("The stranger slides a stained map across the table.");
                } else {
                    ctx.say("The stranger eyes your purse and shakes their head.");
                }
                Ok(Transition::Continue(SceneId::Tavern))
            }
            TavernAction::Leave => Ok(Transition::Continue(SceneId::Village)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MarketAction {
    Buy,
    Steal,
    Leave,
}

/// The market, where potions can be bought or stolen.
#[derive(Debug, Clone, Copy, Default)]
pub struct Market;

impl Scene for Market {
    fn id(&self) -> SceneId {
        SceneId::Market
    }

    fn advance(&self, ctx: &mut StoryContext<'_>) -> StoryResult<Transition> {
        ctx.say("Stalls sell bread, rope, and little red potions. A guard watches the crowd.");

        let mut options = vec![("Buy a potion (8 gold)", MarketAction::Buy)];
        if !ctx.player.has_flag("thief") && !ctx.player.has_flag("caught_stealing") {
            options.push(("Steal an elixir", MarketAction::Steal));
        }
        options.push(("Leave", MarketAction::Leave));

        match ctx.pick("What will you do?", &options)? {
            MarketAction::Buy => {
                if ctx.player.spend(POTION_PRICE) {
                    ctx.player.add_item(Item::minor_potion());
                    ctx.say("You buy a Minor Potion.");
                } else {
                    ctx.say("You cannot afford it.");
                }
                Ok(Transition::Continue(SceneId::Market))
            }
            MarketAction::Steal => {
                if ctx.chance(THEFT_CHANCE) {
                    ctx.player.add_item(Item::elixir());
                    ctx.player.set_flag("thief", true);
                    ctx.player.record("Stole an elixir from the market.");
                    ctx.say("Your fingers close on a vial and no one notices.");
                    return Ok(Transition::Continue(SceneId::Market));
                }

                ctx.say("\"Thief!\" The guard draws steel.");
                if !ctx.fight(vec![Enemy::town_guard()])?.survived() {
                    return Ok(Transition::Death);
                }
                ctx.player.set_flag("caught_stealing", true);
                ctx.player.record("Was caught stealing in the market.");
                Ok(Transition::Continue(SceneId::Market))
            }
            MarketAction::Leave => Ok(Transition::Continue(SceneId::Village)),
        }
    }
}
