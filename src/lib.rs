//! Tabular Q-learning for a one-on-one turn-based battle against a scripted enemy.

pub mod battle;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod players;
pub mod q_table;
pub mod sweep;
pub mod trainer;

pub use error::{Error, Result};
