use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use skyhop_game::{AirportCatalog, Game, GameConfig, Grade};
use std::collections::BTreeMap;

use super::policy::GameplayStrategy;

/// Outcome of one headless run.
#[derive(Debug, Clone, Serialize)]
pub struct AutoplayRecord {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub hops: u32,
    pub km_total: i64,
    pub fuel_left: f64,
    pub quests_completed: usize,
    pub scores: Vec<u8>,
    pub grades: Vec<Grade>,
    pub fuel_ran_out: bool,
    /// No destination was offered before the turn budget ran out.
    pub stalled: bool,
}

impl AutoplayRecord {
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        mean(self.scores.iter().map(|s| f64::from(*s)))
    }
}

/// Totals over every run of a report.
#[derive(Debug, Clone, Serialize)]
pub struct AutoplayAggregate {
    pub runs: usize,
    pub quests_completed: usize,
    pub mean_score: Option<f64>,
    pub mean_hops: Option<f64>,
    pub grade_counts: BTreeMap<String, usize>,
    pub fuel_outs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoplaySummary {
    pub records: Vec<AutoplayRecord>,
    pub aggregate: AutoplayAggregate,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Play up to `turns` hops with `strategy`.
pub fn run_autoplay<C: AirportCatalog>(
    catalog: C,
    config: &GameConfig,
    seed: u64,
    strategy: GameplayStrategy,
    turns: u32,
) -> Result<AutoplayRecord> {
    let mut game = Game::new(catalog, config.clone(), seed);
    game.start()
        .with_context(|| format!("failed to start game for seed {seed}"))?;
    let mut policy = strategy.create_policy(seed);
    let mut scores = Vec::new();
    let mut grades = Vec::new();
    let mut stalled = false;

    for _ in 0..turns {
        if !game.is_running() {
            break;
        }
        let options = game.options(config.option_limit)?;
        let Some(here) = game.state().map(|s| s.player.location.clone()) else {
            break;
        };
        let target = game.get_target_airport().cloned();
        let Some(choice) = policy.choose(&here, &options, target.as_ref()) else {
            stalled = true;
            break;
        };
        let report = game.pick(choice)?;
        debug!(
            "[{} seed {seed}] {} -> {} burn {:.2}",
            policy.name(),
            here.icao,
            report.destination.icao,
            report.burn
        );
        if let Some(quest) = report.quest_report {
            scores.push(quest.score);
            grades.push(quest.grade);
        }
    }

    let status = game.status()?;
    Ok(AutoplayRecord {
        seed,
        strategy,
        hops: status.hops,
        km_total: status.km_total,
        fuel_left: status.fuel,
        quests_completed: status.points as usize,
        scores,
        grades,
        fuel_ran_out: status.fuel <= 0.0,
        stalled,
    })
}

#[must_use]
pub fn aggregate(records: &[AutoplayRecord]) -> AutoplayAggregate {
    let mut grade_counts = BTreeMap::new();
    for grade in records.iter().flat_map(|r| &r.grades) {
        *grade_counts.entry(grade.to_string()).or_insert(0) += 1;
    }
    AutoplayAggregate {
        runs: records.len(),
        quests_completed: records.iter().map(|r| r.quests_completed).sum(),
        mean_score: mean(
            records
                .iter()
                .flat_map(|r| &r.scores)
                .map(|s| f64::from(*s)),
        ),
        mean_hops: mean(records.iter().map(|r| f64::from(r.hops))),
        grade_counts,
        fuel_outs: records.iter().filter(|r| r.fuel_ran_out).count(),
    }
}
