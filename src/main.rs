use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use rand::SeedableRng;
use rand_xoshiro::SplitMix64;

use dq_qlearner::battle::{outcome, play_turn, Outcome};
use dq_qlearner::config::Hyperparams;
use dq_qlearner::engine::{Action, ENEMY_STATS, PLAYER_STATS};
use dq_qlearner::players::{Player, QLearningPlayer};
use dq_qlearner::q_table::QTable;
use dq_qlearner::trainer::learn;

/// Train for a while, then narrate one greedy battle.
#[derive(Parser, Debug)]
#[command(name = "duel", version, about, long_about = None)]
struct Cli {
    /// Episodes to learn before the shown battle
    #[arg(long, default_value_t = 5000)]
    train_episodes: usize,

    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);
    let mut rng = SplitMix64::seed_from_u64(seed);

    let params = Hyperparams::new(0.3, 0.01, 0.9, cli.train_episodes);
    params.validate()?;

    let mut player = PLAYER_STATS;
    let mut enemy = ENEMY_STATS;
    let mut q_table = QTable::new();
    let tally = learn(&mut player, &mut enemy, &mut q_table, &params, &mut rng);
    info!(
        "trained {} episodes, won {:.1}% while exploring",
        tally.episodes,
        tally.win_rate()
    );
    debug!("learned table:\n{}", q_table);

    let agent = QLearningPlayer::greedy(&q_table);
    let mut turn = 0;
    println!("Player {}  |  Enemy {}", player, enemy);
    while outcome(&player, &enemy) == Outcome::Ongoing {
        turn += 1;
        let action = agent.choose_action(&player, &enemy, &mut rng);
        let report = play_turn(&mut player, &mut enemy, action, &mut rng);
        let order = if report.player_first { "player first" } else { "enemy first" };
        let show = |a: Option<Action>| a.map_or_else(|| "-".to_string(), |a| a.to_string());
        println!(
            "--Turn {:>2} ({})-- player: {:<6} enemy: {:<6}",
            turn,
            order,
            show(report.player_action),
            show(report.enemy_action)
        );
        println!("Player {}  |  Enemy {}", player, enemy);
    }
    match outcome(&player, &enemy) {
        Outcome::PlayerWon => println!("--Enemy defeated in {} turns--", turn),
        _ => println!("--Player defeated in {} turns--", turn),
    }
    Ok(())
}
