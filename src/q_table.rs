use std::fmt;

use itertools::Itertools;

use crate::encoder::STATE_COUNT;
use crate::engine::Action;

pub const ACTION_COUNT: usize = Action::ALL.len();

/// Dense Q-values indexed by `[state][action]`, all zero on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    values: [[f64; ACTION_COUNT]; STATE_COUNT],
}

impl Default for QTable {
    fn default() -> Self {
        Self::new()
    }
}

impl QTable {
    pub fn new() -> Self {
        QTable {
            values: [[0.0; ACTION_COUNT]; STATE_COUNT],
        }
    }

    pub fn get(&self, state: usize, action: Action) -> f64 {
        self.values[state][action.index()]
    }

    pub fn row(&self, state: usize) -> &[f64; ACTION_COUNT] {
        &self.values[state]
    }

    /// One-step TD blend: `q = (1 - alpha) * q + alpha * (reward + gamma * next_max)`.
    pub fn td_update(
        &mut self,
        state: usize,
        action: Action,
        reward: f64,
        next_max: f64,
        alpha: f64,
        gamma: f64,
    ) {
        let q = &mut self.values[state][action.index()];
        *q = (1.0 - alpha) * *q + alpha * (reward + gamma * next_max);
    }

    pub fn is_untrained(&self) -> bool {
        self.values.iter().flatten().all(|&q| q == 0.0)
    }
}

impl fmt::Display for QTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in 0..STATE_COUNT {
            let mut row = self.row(state).iter().map(|q| format!("{:+.4}", q));
            writeln!(f, "{:>2}: {}", state, row.join(" "))?;
        }
        Ok(())
    }
}
