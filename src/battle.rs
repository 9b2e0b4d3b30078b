use log::trace;
use rand::Rng;

use crate::engine::{perform, Action, Character};
use crate::players::{Player, ScriptedEnemy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    PlayerWon,
    PlayerLost,
}

pub fn outcome(player: &Character, enemy: &Character) -> Outcome {
    if player.is_dead() {
        Outcome::PlayerLost
    } else if enemy.is_dead() {
        Outcome::PlayerWon
    } else {
        Outcome::Ongoing
    }
}

/// Reward for the learner after a transition: -1 on death, +1 on a kill, 0 otherwise.
pub fn reward(player: &Character, enemy: &Character) -> f64 {
    match outcome(player, enemy) {
        Outcome::PlayerLost => -1.0,
        Outcome::PlayerWon => 1.0,
        Outcome::Ongoing => 0.0,
    }
}

/// Chance that the player moves first this turn.
pub fn player_first_probability(player: &Character, enemy: &Character) -> f64 {
    let player_speed = f64::from(player.agt * 4);
    player_speed / (player_speed + f64::from(enemy.agt))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnReport {
    pub player_first: bool,
    pub player_action: Option<Action>,
    pub enemy_action: Option<Action>,
    /// True when the first actor's move ended the battle before the second could act.
    pub cut_short: bool,
}

/// Resolves one turn: the player's pre-chosen `action` and the enemy's scripted reply,
/// in an order drawn from agility.
pub fn play_turn<R: Rng + ?Sized>(
    player: &mut Character,
    enemy: &mut Character,
    action: Action,
    rng: &mut R,
) -> TurnReport {
    let player_first = rng.gen::<f64>() < player_first_probability(player, enemy);
    let mut report = TurnReport {
        player_first,
        player_action: None,
        enemy_action: None,
        cut_short: false,
    };

    if player_first {
        perform(action, player, enemy, rng);
        report.player_action = Some(action);
        if enemy.is_dead() {
            report.cut_short = true;
        } else {
            report.enemy_action = Some(enemy_turn(player, enemy, rng));
        }
    } else {
        report.enemy_action = Some(enemy_turn(player, enemy, rng));
        if player.is_dead() {
            report.cut_short = true;
        } else {
            perform(action, player, enemy, rng);
            report.player_action = Some(action);
        }
    }

    trace!("turn {:?}: player [{}] enemy [{}]", report, player, enemy);
    report
}

fn enemy_turn<R: Rng + ?Sized>(
    player: &mut Character,
    enemy: &mut Character,
    rng: &mut R,
) -> Action {
    let action = ScriptedEnemy.choose_action(enemy, player, rng);
    perform(action, enemy, player, rng);
    action
}
