use rand::Rng;

use crate::encoder::encode_state;
use crate::engine::{Action, Character, HEAL_MP, LIGHT_MP};
use crate::players::player::Player;
use crate::q_table::QTable;

/// Number of spells `c` cannot pay for. That many actions are cut from the tail of
/// `Action::ALL`, which only lines up because heal costs more than light.
pub fn unaffordable_spells(c: &Character) -> usize {
    [HEAL_MP, LIGHT_MP].iter().filter(|&&cost| c.mp < cost).count()
}

pub fn legal_actions(c: &Character) -> &'static [Action] {
    static ORDER: [Action; 3] = Action::ALL;
    &ORDER[..ORDER.len() - unaffordable_spells(c)]
}

/// Highest valued legal action in `state`. Ties are settled one comparison at a time
/// with a coin flip, so later candidates in a three-way tie are favoured.
pub fn argmax_action<R: Rng + ?Sized>(
    c: &Character,
    state: usize,
    q_table: &QTable,
    rng: &mut R,
) -> Action {
    let mut best = Action::Attack;
    for &action in &legal_actions(c)[1..] {
        let q = q_table.get(state, action);
        let best_q = q_table.get(state, best);
        if q > best_q || (q == best_q && rng.gen_bool(0.5)) {
            best = action;
        }
    }
    best
}

/// Epsilon-greedy choice for `p1` fighting `p2`.
pub fn select_action<R: Rng + ?Sized>(
    p1: &Character,
    p2: &Character,
    q_table: &QTable,
    exploration_rate: f64,
    rng: &mut R,
) -> Action {
    if rng.gen::<f64>() < exploration_rate {
        let legal = legal_actions(p1);
        legal[rng.gen_range(0..legal.len())]
    } else {
        argmax_action(p1, encode_state(p1, p2), q_table, rng)
    }
}

/// Acts from a borrowed table without updating it.
pub struct QLearningPlayer<'a> {
    q_table: &'a QTable,
    exploration_rate: f64,
}

impl<'a> QLearningPlayer<'a> {
    pub fn new(q_table: &'a QTable, exploration_rate: f64) -> Self {
        QLearningPlayer {
            q_table,
            exploration_rate,
        }
    }

    pub fn greedy(q_table: &'a QTable) -> Self {
        Self::new(q_table, 0.0)
    }
}

impl Player for QLearningPlayer<'_> {
    fn choose_action<R: Rng + ?Sized>(
        &self,
        me: &Character,
        foe: &Character,
        rng: &mut R,
    ) -> Action {
        select_action(me, foe, self.q_table, self.exploration_rate, rng)
    }
}
