use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand_xoshiro::SplitMix64;

use dq_qlearner::config::SweepArgs;
use dq_qlearner::engine::{ENEMY_STATS, PLAYER_STATS};
use dq_qlearner::q_table::QTable;
use dq_qlearner::sweep::{run_sweep, write_q_tables, CsvSink};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = SweepArgs::parse();
    let config = args.sweep_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);
    let mut rng = SplitMix64::seed_from_u64(seed);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let mut sink = CsvSink::create(&args.out_dir.join("sweep.csv"))?;

    let mut player = PLAYER_STATS;
    let mut enemy = ENEMY_STATS;
    let mut q_table = QTable::new();
    let points = run_sweep(&config, &mut player, &mut enemy, &mut q_table, &mut sink, &mut rng)?;
    info!("recorded {} sweep points", points.len());

    if args.dump_q_table {
        write_q_tables(&q_table, &args.out_dir)?;
    }
    Ok(())
}
