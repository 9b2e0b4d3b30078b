pub mod player;
pub mod qlearning_player;
pub mod scripted_enemy;

pub use player::Player;
pub use qlearning_player::QLearningPlayer;
pub use scripted_enemy::ScriptedEnemy;
