use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::config::SweepConfig;
use crate::encoder::BUCKETS;
use crate::engine::{Action, Character};
use crate::error::{Error, Result};
use crate::q_table::QTable;
use crate::trainer::{evaluate, learn, Evaluation};

/// One evaluation in a sweep. Step 0 is the random-policy baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub step: usize,
    /// Episodes trained just before this evaluation.
    pub train_episodes: usize,
    pub win_rate: f64,
    pub average_turns: f64,
}

impl SweepPoint {
    fn new(step: usize, train_episodes: usize, eval: Evaluation) -> Self {
        SweepPoint {
            step,
            train_episodes,
            win_rate: eval.win_rate,
            average_turns: eval.average_turns,
        }
    }
}

/// Receives sweep points in order, one per step.
pub trait ResultSink {
    fn record(&mut self, point: &SweepPoint) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub points: Vec<SweepPoint>,
}

impl ResultSink for MemorySink {
    fn record(&mut self, point: &SweepPoint) -> Result<()> {
        self.points.push(*point);
        Ok(())
    }
}

/// Writes one CSV row per point, with a header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        CsvSink {
            writer: csv::Writer::from_writer(writer),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| Error::Io {
            operation: "flush CSV sink".to_string(),
            source: io::Error::new(e.error().kind(), e.error().to_string()),
        })
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn record(&mut self, point: &SweepPoint) -> Result<()> {
        self.writer.serialize(point)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Baseline evaluation, then `config.steps` rounds of learning for `step` episodes
/// followed by a greedy evaluation. `q_table` keeps accumulating across steps.
pub fn run_sweep<S: ResultSink, R: Rng + ?Sized>(
    config: &SweepConfig,
    player: &mut Character,
    enemy: &mut Character,
    q_table: &mut QTable,
    sink: &mut S,
    rng: &mut R,
) -> Result<Vec<SweepPoint>> {
    config.validate()?;
    info!("starting sweep: {:?}", config);

    let mut points = Vec::with_capacity(config.steps + 1);
    let baseline = evaluate(player, enemy, q_table, &config.baseline_params(), rng);
    let point = SweepPoint::new(0, 0, baseline);
    info!(
        "random baseline: win rate {:.1}%, average turns {:.2}",
        point.win_rate, point.average_turns
    );
    sink.record(&point)?;
    points.push(point);

    let report_every = (config.steps / 10).max(1);
    for step in 1..=config.steps {
        learn(player, enemy, q_table, &config.learn_params(step), rng);
        let eval = evaluate(player, enemy, q_table, &config.eval_params(), rng);
        let point = SweepPoint::new(step, step, eval);
        debug!("{:?}", point);
        if step % report_every == 0 || step == config.steps {
            info!(
                "step {}/{}: win rate {:.1}%, average turns {:.2}",
                step, config.steps, point.win_rate, point.average_turns
            );
        }
        sink.record(&point)?;
        points.push(point);
    }
    sink.finish()?;
    Ok(points)
}

/// Writes the values of `action` as a 10x10 grid: row is the player's health bucket,
/// column the enemy's.
pub fn write_q_grid<W: Write>(q_table: &QTable, action: Action, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for player_bucket in 0..BUCKETS {
        let row = (0..BUCKETS).map(|enemy_bucket| {
            q_table
                .get(player_bucket * BUCKETS + enemy_bucket, action)
                .to_string()
        });
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Dumps one grid per action as `q0.csv`, `q1.csv`, `q2.csv` under `dir`.
pub fn write_q_tables(q_table: &QTable, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| Error::Io {
        operation: format!("create directory {}", dir.display()),
        source,
    })?;
    for action in Action::ALL {
        let path = dir.join(format!("q{}.csv", action.index()));
        let file = File::create(&path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        write_q_grid(q_table, action, file)?;
        info!("wrote {} values to {}", action, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ENEMY_STATS, PLAYER_STATS};
    use rand::SeedableRng;
    use rand_xoshiro::SplitMix64;

    fn small_config() -> SweepConfig {
        SweepConfig {
            steps: 5,
            eval_episodes: 20,
            baseline_episodes: 20,
            ..SweepConfig::default()
        }
    }

    #[test]
    fn test_sweep_streams_points_in_order() {
        let mut rng = SplitMix64::seed_from_u64(51);
        let mut player = PLAYER_STATS;
        let mut enemy = ENEMY_STATS;
        let mut table = QTable::new();
        let mut sink = MemorySink::default();
        let points = run_sweep(
            &small_config(),
            &mut player,
            &mut enemy,
            &mut table,
            &mut sink,
            &mut rng,
        )
        .unwrap();

        assert_eq!(points.len(), 6);
        assert_eq!(points, sink.points);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.step, i);
            assert_eq!(point.train_episodes, i);
            assert!((0.0..=100.0).contains(&point.win_rate));
        }
        assert!(!table.is_untrained());
    }

    #[test]
    fn test_sweep_rejects_bad_config() {
        let mut rng = SplitMix64::seed_from_u64(52);
        let mut player = PLAYER_STATS;
        let mut enemy = ENEMY_STATS;
        let mut table = QTable::new();
        let config = SweepConfig {
            alpha: 0.0,
            ..small_config()
        };
        let result = run_sweep(
            &config,
            &mut player,
            &mut enemy,
            &mut table,
            &mut MemorySink::default(),
            &mut rng,
        );
        assert!(matches!(result, Err(Error::InvalidParameter { name: "alpha", .. })));
        assert!(table.is_untrained());
    }

    #[test]
    fn test_csv_sink_rows() {
        let mut sink = CsvSink::new(Vec::new());
        sink.record(&SweepPoint {
            step: 0,
            train_episodes: 0,
            win_rate: 12.5,
            average_turns: 0.0,
        })
        .unwrap();
        sink.record(&SweepPoint {
            step: 1,
            train_episodes: 1,
            win_rate: 50.0,
            average_turns: 7.25,
        })
        .unwrap();
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "step,train_episodes,win_rate,average_turns\n0,0,12.5,0.0\n1,1,50.0,7.25\n"
        );
    }

    #[test]
    fn test_q_grid_layout() {
        let mut table = QTable::new();
        // player bucket 2, enemy bucket 7
        table.td_update(27, Action::Heal, 0.5, 0.0, 1.0, 0.0);
        let mut out = Vec::new();
        write_q_grid(&table, Action::Heal, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), BUCKETS);
        assert_eq!(rows[2], "0,0,0,0,0,0,0,0.5,0,0");
        assert_eq!(rows[0], "0,0,0,0,0,0,0,0,0,0");
    }
}
