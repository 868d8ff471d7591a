//! Encounter state machine and round resolution.
//!
//! Turn order is fixed when the encounter starts: the player followed by
//! the enemies, stably sorted by descending speed. Each round every living
//! participant acts once. The player's defense drops by 2 (never below 0)
//! at the end of every round, which undoes a Defend from that round.

pub mod action;

pub use action::{Actor, CombatAction, CombatEvent};

use rand::Rng;
use sf_core::{Chooser, Combatant, Enemy, LevelUp, Player};

use crate::damage::damage;
use crate::error::{MechError, MechResult};

/// Defense granted by Defend and removed at the end of every round.
pub const DEFEND_BONUS: i32 = 2;

/// Chance that a flee attempt succeeds.
pub const FLEE_CHANCE: f64 = 0.5;

const ACTIONS: [&str; 4] = ["Attack", "Use Item", "Defend", "Flee"];

/// Where an encounter stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatState {
    /// Still fighting.
    Ongoing,
    /// Every enemy is down.
    PlayerWon,
    /// The player is down.
    PlayerLost,
    /// The player escaped.
    PlayerFled,
}

/// How an encounter ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    /// Every enemy fell; rewards were paid out.
    Won {
        /// Experience granted.
        xp: u32,
        /// Gold granted.
        gold: u32,
        /// Level-ups triggered by the experience.
        level_ups: Vec<LevelUp>,
    },
    /// The player died.
    Lost,
    /// The player escaped.
    Fled,
}

impl CombatOutcome {
    /// Whether the story may carry on. Fleeing counts.
    pub fn survived(&self) -> bool {
        !matches!(self, Self::Lost)
    }
}

/// Roll a flee attempt.
pub fn attempt_flee<R: Rng>(rng: &mut R) -> bool {
    rng.random_bool(FLEE_CHANCE)
}

/// The order participants act in each round.
///
/// The player comes first in the list before sorting, so on a speed tie the
/// player acts before the enemy.
pub fn turn_order(player: &Player, enemies: &[Enemy]) -> Vec<Actor> {
    let mut order: Vec<(Actor, i32)> = std::iter::once((Actor::Player, player.stats.speed))
        .chain(
            enemies
                .iter()
                .enumerate()
                .map(|(i, e)| (Actor::Enemy(i), e.stats.speed)),
        )
        .collect();
    // sort_by is stable
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().map(|(actor, _)| actor).collect()
}

/// One combat session between the player and a group of enemies.
#[derive(Debug, Clone)]
pub struct Encounter {
    /// The enemies, in the order they were introduced.
    pub enemies: Vec<Enemy>,
    /// Current round number (0 before the first round).
    pub round: u32,
    /// Log of all resolved actions.
    pub log: Vec<CombatEvent>,
    state: CombatState,
    order: Vec<Actor>,
}

impl Encounter {
    /// Create an encounter against `enemies`.
    pub fn new(enemies: Vec<Enemy>) -> MechResult<Self> {
        if enemies.is_empty() {
            return Err(MechError::NoEnemies);
        }
        Ok(Self {
            enemies,
            round: 0,
            log: Vec::new(),
            state: CombatState::Ongoing,
            order: Vec::new(),
        })
    }

    /// Where the encounter stands.
    pub fn state(&self) -> CombatState {
        self.state
    }

    /// The turn order fixed at the start of the encounter.
    pub fn order(&self) -> &[Actor] {
        &self.order
    }

    /// Fight until the player wins, dies, or escapes.
    pub fn run<R: Rng>(
        &mut self,
        player: &mut Player,
        chooser: &mut dyn Chooser,
        rng: &mut R,
    ) -> MechResult<CombatOutcome> {
        let names: Vec<&str> = self.enemies.iter().map(|e| e.name.as_str()).collect();
        chooser.say(&format!("Battle! You face: {}.", names.join(", ")));
        log::info!("encounter started against {}", names.join(", "));

        self.order = turn_order(player, &self.enemies);
        self.state = CombatState::Ongoing;

        while player.is_alive() && self.enemies.iter().any(Enemy::is_alive) {
            self.round += 1;
            log::debug!("round {}", self.round);
            self.play_round(player, chooser, rng)?;
            if self.state == CombatState::PlayerFled {
                log::info!("player fled in round {}", self.round);
                return Ok(CombatOutcome::Fled);
            }
            player.stats.defense = player.stats.defense.saturating_sub(DEFEND_BONUS).max(0);
        }

        if !player.is_alive() {
            self.state = CombatState::PlayerLost;
            player.record(format!("Fell in battle against {}.", names_of(&self.enemies)));
            chooser.say("You collapse. The world goes dark.");
            log::info!("player lost after {} rounds", self.round);
            return Ok(CombatOutcome::Lost);
        }

        self.state = CombatState::PlayerWon;
        Ok(self.pay_out(player, chooser))
    }

    fn play_round<R: Rng>(
        &mut self,
        player: &mut Player,
        chooser: &mut dyn Chooser,
        rng: &mut R,
    ) -> MechResult<()> {
        let order = self.order.clone();
        for actor in order {
            if !player.is_alive() {
                break;
            }
            match actor {
                Actor::Player => {
                    self.player_turn(player, chooser, rng)?;
                    if self.state == CombatState::PlayerFled {
                        return Ok(());
                    }
                }
                Actor::Enemy(i) => {
                    if self.enemies[i].is_alive() {
                        self.enemy_turn(i, player, chooser, rng);
                    }
                }
            }
        }
        Ok(())
    }

    fn player_turn<R: Rng>(
        &mut self,
        player: &mut Player,
        chooser: &mut dyn Chooser,
        rng: &mut R,
    ) -> MechResult<()> {
        chooser.say(&self.status_line(player));
        let options: Vec<String> = ACTIONS.iter().map(|s| s.to_string()).collect();
        let action = match chooser.choose("What will you do?", &options)? {
            0 => self.player_attack(player, chooser, rng)?,
            1 => use_item(player, chooser)?,
            2 => {
                player.stats.defense = player.stats.defense.saturating_add(DEFEND_BONUS);
                chooser.say("You raise your guard.");
                CombatAction::Defend
            }
            _ => {
                let escaped = attempt_flee(rng);
                if escaped {
                    self.state = CombatState::PlayerFled;
                    chooser.say("You slip away from the fight.");
                } else {
                    chooser.say("You try to run, but cannot break away!");
                }
                CombatAction::Flee { escaped }
            }
        };
        self.log_event(Actor::Player, action);
        Ok(())
    }

    fn player_attack<R: Rng>(
        &mut self,
        player: &Player,
        chooser: &mut dyn Chooser,
        rng: &mut R,
    ) -> MechResult<CombatAction> {
        let living: Vec<usize> = (0..self.enemies.len())
            .filter(|&i| self.enemies[i].is_alive())
            .collect();
        let target = if living.len() == 1 {
            living[0]
        } else {
            let labels: Vec<String> = living
                .iter()
                .map(|&i| {
                    let e = &self.enemies[i];
                    format!("{} ({} HP)", e.name, e.stats.display_hp())
                })
                .collect();
            let pick = chooser.choose("Attack which enemy?", &labels)?;
            *living.get(pick).ok_or(sf_core::CoreError::NoOptions)?
        };

        let enemy = &mut self.enemies[target];
        let dealt = damage(player.stats.power, enemy.stats.defense, rng);
        enemy.stats.take_damage(dealt);
        chooser.say(&format!("You strike the {} for {dealt} damage.", enemy.name));
        if !enemy.is_alive() {
            chooser.say(&format!("The {} falls.", enemy.name));
        }
        Ok(CombatAction::Attack {
            target: Actor::Enemy(target),
            damage: dealt,
        })
    }

    fn enemy_turn<R: Rng>(
        &mut self,
        index: usize,
        player: &mut Player,
        chooser: &mut dyn Chooser,
        rng: &mut R,
    ) {
        let enemy = &self.enemies[index];
        let dealt = damage(enemy.stats.power, player.stats.defense, rng);
        player.stats.take_damage(dealt);
        chooser.say(&format!("The {} hits you for {dealt} damage.", enemy.name));
        self.log_event(
            Actor::Enemy(index),
            CombatAction::Attack {
                target: Actor::Player,
                damage: dealt,
            },
        );
    }

    fn pay_out(&self, player: &mut Player, chooser: &mut dyn Chooser) -> CombatOutcome {
        let xp: u32 = self.enemies.iter().map(|e| e.xp_drop).sum();
        let gold: u32 = self.enemies.iter().map(|e| e.gold_drop).sum();

        player.record(format!("Defeated {}.", names_of(&self.enemies)));
        chooser.say(&format!("Victory! You gain {xp} XP and {gold} gold."));
        let level_ups = player.gain_xp(xp);
        for level_up in &level_ups {
            chooser.say(&level_up.to_string());
        }
        player.gold = player.gold.saturating_add(gold);
        log::info!("player won: {xp} xp, {gold} gold, {} level-ups", level_ups.len());

        CombatOutcome::Won {
            xp,
            gold,
            level_ups,
        }
    }

    fn status_line(&self, player: &Player) -> String {
        let foes: Vec<String> = self
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| format!("{} {}/{}", e.name, e.stats.display_hp(), e.stats.max_hp))
            .collect();
        format!(
            "-- Round {} -- You {}/{} HP | {}",
            self.round,
            player.stats.display_hp(),
            player.stats.max_hp,
            foes.join(" | ")
        )
    }

    fn log_event(&mut self, actor: Actor, action: CombatAction) {
        log::debug!("round {} {actor:?}: {action}", self.round);
        self.log.push(CombatEvent {
            round: self.round,
            actor,
            action,
        });
    }
}

fn use_item(player: &mut Player, chooser: &mut dyn Chooser) -> MechResult<CombatAction> {
    if player.inventory.is_empty() {
        chooser.say("Your pack is empty.");
        return Ok(CombatAction::UseItem { item: None });
    }

    let mut labels: Vec<String> = player.inventory.iter().map(|i| i.label()).collect();
    labels.push("Back".to_string());
    let pick = chooser.choose("Use which item?", &labels)?;

    match player.use_item(pick) {
        Some(used) => {
            chooser.say(&used.to_string());
            let name = match &used {
                sf_core::ItemUse::Healed { item, .. } | sf_core::ItemUse::Used { item } => {
                    item.name.clone()
                }
            };
            Ok(CombatAction::UseItem { item: Some(name) })
        }
        None => Ok(CombatAction::UseItem { item: None }),
    }
}

fn names_of(enemies: &[Enemy]) -> String {
    enemies
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sf_core::{CombatStats, Item, ScriptedChooser};

    fn enemy(name: &str, hp: i32, power: i32, defense: i32, speed: i32) -> Enemy {
        Enemy::new(name, CombatStats::new(hp, power, defense, speed), 10, 3)
    }

    #[test]
    fn empty_encounter_error() {
        assert!(matches!(Encounter::new(Vec::new()), Err(MechError::NoEnemies)));
    }

    #[test]
    fn turn_order_is_stable_by_speed() {
        let player = Player::default(); // speed 5
        let enemies = vec![
            enemy("Tie", 5, 1, 0, 5),
            enemy("Fast", 5, 1, 0, 7),
            enemy("Slow", 5, 1, 0, 3),
            enemy("Tie2", 5, 1, 0, 5),
        ];
        assert_eq!(
            turn_order(&player, &enemies),
            [
                Actor::Enemy(1),
                Actor::Player,
                Actor::Enemy(0),
                Actor::Enemy(3),
                Actor::Enemy(2),
            ]
        );
    }

    #[test]
    fn weak_enemy_falls_within_three_attacks() {
        let mut player = Player::default();
        player.inventory.clear();
        assert_eq!(player.stats.power, 5);
        let mut encounter = Encounter::new(vec![enemy("Rat", 5, 0, 2, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Attack", "Attack", "Attack"]);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert!(matches!(outcome, CombatOutcome::Won { .. }));
        assert_eq!(encounter.state(), CombatState::PlayerWon);

        let attacks: Vec<i32> = encounter
            .log
            .iter()
            .filter_map(|e| match e.action {
                CombatAction::Attack {
                    target: Actor::Enemy(_),
                    damage,
                } => Some(damage),
                _ => None,
            })
            .collect();
        assert!((2..=3).contains(&attacks.len()), "took {} attacks", attacks.len());
        assert!(attacks.iter().all(|d| (2..=4).contains(d)));
    }

    #[test]
    fn victory_pays_out_rewards() {
        let mut player = Player::default();
        player.stats.power = 100;
        let start_gold = player.gold;
        let mut encounter =
            Encounter::new(vec![enemy("A", 5, 1, 0, 1), enemy("B", 5, 1, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Attack", "1", "Attack"]);
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert_eq!(
            outcome,
            CombatOutcome::Won {
                xp: 20,
                gold: 6,
                level_ups: Vec::new()
            }
        );
        assert_eq!(player.gold, start_gold + 6);
        assert_eq!(player.xp, 20);
        assert!(player.journal.iter().any(|j| j == "Defeated A, B."));
        assert!(chooser.said("Victory!"));
    }

    #[test]
    fn dead_enemies_do_not_act() {
        let mut player = Player::default();
        player.stats.power = 100;
        let mut encounter = Encounter::new(vec![enemy("Slowpoke", 3, 20, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Attack"]);
        let mut rng = StdRng::seed_from_u64(5);

        encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert!(encounter.log.iter().all(|e| e.actor == Actor::Player));
        assert_eq!(player.stats.hp, player.stats.max_hp);
    }

    #[test]
    fn player_death_halts_round() {
        let mut player = Player::default();
        player.stats.hp = 1;
        let mut encounter = Encounter::new(vec![
            enemy("Brute", 50, 40, 0, 9),
            enemy("Lackey", 50, 40, 0, 8),
        ])
        .unwrap();
        let mut chooser = ScriptedChooser::new(Vec::<String>::new());
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert_eq!(outcome, CombatOutcome::Lost);
        assert!(!outcome.survived());
        assert_eq!(encounter.state(), CombatState::PlayerLost);
        assert_eq!(encounter.log.len(), 1);
        assert!(chooser.prompts.is_empty());
        assert!(player.journal.iter().any(|j| j.starts_with("Fell in battle")));
    }

    #[test]
    fn defense_rolls_back_every_round_and_never_goes_negative() {
        let mut player = Player::default();
        assert_eq!(player.stats.defense, 2);
        let mut encounter = Encounter::new(vec![enemy("Wall", 10_000, 0, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Defend", "Attack", "Attack", "Defend"]);
        let mut rng = StdRng::seed_from_u64(8);

        // the script runs dry in round five
        let result = encounter.run(&mut player, &mut chooser, &mut rng);
        assert!(matches!(
            result,
            Err(MechError::Core(sf_core::CoreError::InputClosed))
        ));
        assert_eq!(encounter.round, 5);
        // +2 -2, -2, -2 (clamped), +2 -2
        assert_eq!(player.stats.defense, 0);
    }

    #[test]
    fn enemy_hits_against_raised_guard() {
        let mut player = Player::default();
        player.stats.speed = 10;
        assert_eq!(player.stats.defense, 2);
        let mut encounter = Encounter::new(vec![enemy("Brute", 10_000, 10, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Defend"]);
        let mut rng = StdRng::seed_from_u64(4);

        let result = encounter.run(&mut player, &mut chooser, &mut rng);
        assert!(matches!(
            result,
            Err(MechError::Core(sf_core::CoreError::InputClosed))
        ));
        assert_eq!(encounter.log[0].action, CombatAction::Defend);
        let CombatAction::Attack { target, damage } = encounter.log[1].action else {
            panic!("expected the enemy to attack, got {:?}", encounter.log[1]);
        };
        assert_eq!(target, Actor::Player);
        // 10 power against 2 + 2 defense
        let (low, high) = crate::damage::spread(6);
        assert!((low..=high).contains(&damage), "hit for {damage}");
        assert_eq!(player.stats.hp, player.stats.max_hp - damage);
    }

    #[test]
    fn defend_at_the_defense_limit_does_not_overflow() {
        let mut player = Player::default();
        player.stats.defense = i32::MAX;
        let mut encounter = Encounter::new(vec![enemy("Wall", 10_000, 0, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Defend"]);
        let mut rng = StdRng::seed_from_u64(8);

        let result = encounter.run(&mut player, &mut chooser, &mut rng);
        assert!(result.is_err());
        assert_eq!(player.stats.defense, i32::MAX - DEFEND_BONUS);
    }

    struct Stubborn;

    impl Chooser for Stubborn {
        fn choose(&mut self, _prompt: &str, options: &[String]) -> sf_core::CoreResult<usize> {
            // "Attack" from the action menu, then an index past the end
            Ok(if options.len() == ACTIONS.len() { 0 } else { 99 })
        }

        fn say(&mut self, _text: &str) {}
    }

    #[test]
    fn out_of_range_target_is_an_error() {
        let mut player = Player::default();
        player.stats.speed = 10;
        let mut encounter =
            Encounter::new(vec![enemy("A", 5, 1, 0, 1), enemy("B", 5, 1, 0, 1)]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let result = encounter.run(&mut player, &mut Stubborn, &mut rng);
        assert!(matches!(
            result,
            Err(MechError::Core(sf_core::CoreError::NoOptions))
        ));
        assert!(encounter.enemies.iter().all(|e| e.stats.hp == 5));
    }

    #[test]
    fn using_a_potion_in_combat() {
        let mut player = Player::default();
        player.stats.hp = 10;
        player.stats.power = 100;
        let mut encounter = Encounter::new(vec![enemy("Gnat", 1, 0, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Use Item", "Minor Potion", "Attack"]);
        let mut rng = StdRng::seed_from_u64(2);

        encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert_eq!(player.inventory.len(), 1);
        assert!(chooser.said("recover 10 HP"));
        assert_eq!(
            encounter.log[0].action,
            CombatAction::UseItem {
                item: Some("Minor Potion".to_string())
            }
        );
    }

    #[test]
    fn cancelling_item_menu_keeps_inventory() {
        let mut player = Player::default();
        player.stats.power = 100;
        player.inventory = vec![Item::iron_key()];
        let mut encounter = Encounter::new(vec![enemy("Gnat", 1, 0, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Use Item", "Back", "Attack"]);
        let mut rng = StdRng::seed_from_u64(2);

        encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert_eq!(player.inventory, [Item::iron_key()]);
        assert_eq!(encounter.log[0].action, CombatAction::UseItem { item: None });
    }

    #[test]
    fn empty_pack_consumes_the_turn() {
        let mut player = Player::default();
        player.inventory.clear();
        player.stats.power = 100;
        let mut encounter = Encounter::new(vec![enemy("Gnat", 1, 0, 0, 1)]).unwrap();
        let mut chooser = ScriptedChooser::new(["Use Item", "Attack"]);
        let mut rng = StdRng::seed_from_u64(2);

        encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
        assert!(chooser.said("Your pack is empty."));
        assert_eq!(encounter.round, 2);
    }

    #[test]
    fn flee_leaves_hp_untouched() {
        let mut fled_first_round = 0;
        for seed in 0..50 {
            let mut player = Player::default();
            player.stats.speed = 10;
            let mut encounter = Encounter::new(vec![enemy("Ogre", 40, 0, 0, 1)]).unwrap();
            let mut chooser = ScriptedChooser::new(["Flee"; 40]);
            let mut rng = StdRng::seed_from_u64(seed);

            let outcome = encounter.run(&mut player, &mut chooser, &mut rng).unwrap();
            assert_eq!(outcome, CombatOutcome::Fled);
            assert!(outcome.survived());
            assert_eq!(encounter.enemies[0].stats.hp, 40);
            if encounter.round == 1 {
                fled_first_round += 1;
                assert_eq!(player.stats.hp, player.stats.max_hp);
            }
        }
        assert!(fled_first_round > 0);
    }

    #[test]
    fn flee_succeeds_about_half_the_time() {
        let mut rng = StdRng::seed_from_u64(1234);
        let trials = 10_000;
        let escapes = (0..trials).filter(|_| attempt_flee(&mut rng)).count();
        assert!((4_500..=5_500).contains(&escapes), "escaped {escapes} times");
    }
}
