use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};

/// The four scalars that parameterize one learning or evaluation phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparams {
    pub epsilon: f64,
    pub alpha: f64,
    pub gamma: f64,
    pub episodes: usize,
}

impl Hyperparams {
    pub fn new(epsilon: f64, alpha: f64, gamma: f64, episodes: usize) -> Self {
        Hyperparams {
            epsilon,
            alpha,
            gamma,
            episodes,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_range("epsilon", self.epsilon, 0.0, 1.0, false, "0 <= epsilon <= 1")?;
        check_range("alpha", self.alpha, 0.0, 1.0, true, "0 < alpha <= 1")?;
        check_range("gamma", self.gamma, 0.0, 1.0, false, "0 <= gamma <= 1")
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    exclusive_lo: bool,
    expected: &'static str,
) -> Result<()> {
    let above_lo = if exclusive_lo { value > lo } else { value >= lo };
    if above_lo && value <= hi {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name,
            value,
            expected,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepConfig {
    pub alpha: f64,
    pub gamma: f64,
    pub train_epsilon: f64,
    pub steps: usize,
    pub eval_episodes: usize,
    pub baseline_episodes: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            alpha: 0.01,
            gamma: 0.9,
            train_epsilon: 0.3,
            steps: 10_000,
            eval_episodes: 1000,
            baseline_episodes: 1000,
        }
    }
}

impl SweepConfig {
    /// Learning phase of sweep step `step` trains for `step` episodes.
    pub fn learn_params(&self, step: usize) -> Hyperparams {
        Hyperparams::new(self.train_epsilon, self.alpha, self.gamma, step)
    }

    pub fn eval_params(&self) -> Hyperparams {
        Hyperparams::new(0.0, self.alpha, self.gamma, self.eval_episodes)
    }

    /// Fully random play on the untrained table.
    pub fn baseline_params(&self) -> Hyperparams {
        Hyperparams::new(1.0, self.alpha, self.gamma, self.baseline_episodes)
    }

    pub fn validate(&self) -> Result<()> {
        self.learn_params(1).validate()
    }
}

#[derive(Parser, Debug)]
#[command(name = "qlearner")]
#[command(
    version,
    about = "Sweep Q-learning training against the scripted enemy",
    long_about = None
)]
pub struct SweepArgs {
    /// Learning rate
    #[arg(long, default_value_t = 0.01)]
    pub alpha: f64,

    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    pub gamma: f64,

    /// Exploration rate during learning phases
    #[arg(long, default_value_t = 0.3)]
    pub train_epsilon: f64,

    /// Number of learn/evaluate steps; step i trains for i episodes
    #[arg(long, default_value_t = 10_000)]
    pub steps: usize,

    /// Greedy battles per evaluation phase
    #[arg(long, default_value_t = 1000)]
    pub eval_episodes: usize,

    /// Random-policy battles for the untrained baseline
    #[arg(long, default_value_t = 1000)]
    pub baseline_episodes: usize,

    /// Random seed (a fresh one is drawn and logged when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for sweep.csv and Q-table dumps
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Also write the final table as q0.csv, q1.csv, q2.csv
    #[arg(long)]
    pub dump_q_table: bool,
}

impl SweepArgs {
    pub fn sweep_config(&self) -> Result<SweepConfig> {
        let config = SweepConfig {
            alpha: self.alpha,
            gamma: self.gamma,
            train_epsilon: self.train_epsilon,
            steps: self.steps,
            eval_episodes: self.eval_episodes,
            baseline_episodes: self.baseline_episodes,
        };
        config.validate()?;
        Ok(config)
    }
}
