use log::debug;
use rand::Rng;

use crate::battle::{outcome, play_turn, reward, Outcome};
use crate::config::Hyperparams;
use crate::encoder::encode_state;
use crate::engine::{reset_battle, Action, Character};
use crate::players::qlearning_player::{argmax_action, select_action};
use crate::players::{Player, QLearningPlayer};
use crate::q_table::QTable;

/// Running win and turn counts over a batch of battles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BattleTally {
    pub episodes: usize,
    pub wins: usize,
    /// Turns summed over won battles only.
    pub winning_turns: usize,
}

impl BattleTally {
    pub fn record(&mut self, result: Outcome, turns: usize) {
        self.episodes += 1;
        if result == Outcome::PlayerWon {
            self.wins += 1;
            self.winning_turns += turns;
        }
    }

    /// Percentage of battles won, 0 when nothing was played.
    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.wins as f64 / self.episodes as f64 * 100.0
    }

    pub fn average_winning_turns(&self) -> f64 {
        if self.wins == 0 {
            return 0.0;
        }
        self.winning_turns as f64 / self.wins as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub win_rate: f64,
    pub average_turns: f64,
}

impl From<&BattleTally> for Evaluation {
    fn from(tally: &BattleTally) -> Self {
        Evaluation {
            win_rate: tally.win_rate(),
            average_turns: tally.average_winning_turns(),
        }
    }
}

fn update_q<R: Rng + ?Sized>(
    player: &Character,
    enemy: &Character,
    prev_state: usize,
    action: Action,
    q_table: &mut QTable,
    params: &Hyperparams,
    rng: &mut R,
) {
    let curr_state = encode_state(player, enemy);
    let best = argmax_action(player, curr_state, q_table, rng);
    let next_max = q_table.get(curr_state, best);
    q_table.td_update(
        prev_state,
        action,
        reward(player, enemy),
        next_max,
        params.alpha,
        params.gamma,
    );
}

/// Runs `params.episodes` epsilon-greedy battles, updating `q_table` after every turn.
///
/// A turn cut short by a kill skips its in-loop update. Every battle then gets one more
/// update for its last (state, action) pair against the terminal state, so a kill landed
/// by the second actor of a turn is credited twice.
pub fn learn<R: Rng + ?Sized>(
    player: &mut Character,
    enemy: &mut Character,
    q_table: &mut QTable,
    params: &Hyperparams,
    rng: &mut R,
) -> BattleTally {
    let mut tally = BattleTally::default();
    for _ in 0..params.episodes {
        let mut turns = 0;
        let mut last = None;
        while outcome(player, enemy) == Outcome::Ongoing {
            turns += 1;
            let prev_state = encode_state(player, enemy);
            let action = select_action(player, enemy, q_table, params.epsilon, rng);
            let report = play_turn(player, enemy, action, rng);
            last = Some((prev_state, action));
            if report.cut_short {
                break;
            }
            update_q(player, enemy, prev_state, action, q_table, params, rng);
        }
        if let Some((prev_state, action)) = last {
            update_q(player, enemy, prev_state, action, q_table, params, rng);
        }
        tally.record(outcome(player, enemy), turns);
        reset_battle(player, enemy);
    }
    debug!(
        "learned {} episodes (epsilon {}), won {}",
        tally.episodes, params.epsilon, tally.wins
    );
    tally
}

/// Plays one battle to the end with `agent` choosing the player's moves. Returns the
/// outcome and number of turns; the characters are left as the battle ended.
pub fn run_episode<P: Player, R: Rng + ?Sized>(
    agent: &P,
    player: &mut Character,
    enemy: &mut Character,
    rng: &mut R,
) -> (Outcome, usize) {
    let mut turns = 0;
    while outcome(player, enemy) == Outcome::Ongoing {
        turns += 1;
        let action = agent.choose_action(player, enemy, rng);
        play_turn(player, enemy, action, rng);
    }
    (outcome(player, enemy), turns)
}

/// Plays `params.episodes` battles without learning. Only epsilon is read from `params`.
pub fn evaluate<R: Rng + ?Sized>(
    player: &mut Character,
    enemy: &mut Character,
    q_table: &QTable,
    params: &Hyperparams,
    rng: &mut R,
) -> Evaluation {
    let agent = QLearningPlayer::new(q_table, params.epsilon);
    let mut tally = BattleTally::default();
    for _ in 0..params.episodes {
        let (result, turns) = run_episode(&agent, player, enemy, rng);
        tally.record(result, turns);
        reset_battle(player, enemy);
    }
    Evaluation::from(&tally)
}
