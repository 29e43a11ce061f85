//! Fans independent tournament runs out over a bounded worker pool.
//!
//! Workers share nothing: each run builds its own table, policy and rng
//! from its sweep point. Results stay paired with the point that
//! produced them no matter which worker finishes first.

use rayon::prelude::*;
use tracing::{event, trace_span};

use crate::config::TournamentConfig;
use crate::errors::SimResult;
use crate::simulator::{TournamentResult, simulate_tournament};

/// One task for the pool: a run id and the two pacing parameters under
/// study. The point travels with its result through the pool.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepPoint {
    pub run_id: u64,
    pub escalation_interval_minutes: f64,
    pub per_turn_seconds: f64,
}

/// Runs batches of tournaments on a fixed-size rayon pool.
pub struct ExperimentRunner {
    pool: rayon::ThreadPool,
    base: TournamentConfig,
}

impl ExperimentRunner {
    pub fn new(workers: usize, base: TournamentConfig) -> SimResult<Self> {
        base.validate()?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;
        Ok(Self { pool, base })
    }

    pub fn base_config(&self) -> &TournamentConfig {
        &self.base
    }

    /// Run every sweep point to completion. Any failing run fails the
    /// whole sweep; there is no retry or partial result.
    pub fn run_sweep(&self, points: &[SweepPoint]) -> SimResult<Vec<(SweepPoint, TournamentResult)>> {
        self.run_sweep_with(points, |point| {
            simulate_tournament(
                point.run_id,
                point.escalation_interval_minutes,
                point.per_turn_seconds,
                &self.base,
            )
        })
    }

    /// Same fan-out with a caller-supplied run function. The simulator
    /// is substituted in tests through this seam.
    pub fn run_sweep_with<F>(
        &self,
        points: &[SweepPoint],
        run: F,
    ) -> SimResult<Vec<(SweepPoint, TournamentResult)>>
    where
        F: Fn(&SweepPoint) -> SimResult<TournamentResult> + Sync,
    {
        let span = trace_span!("run_sweep", points = points.len());
        let _enter = span.enter();

        let results = self.pool.install(|| {
            points
                .par_iter()
                .map(|point| run(point).map(|result| (*point, result)))
                .collect::<SimResult<Vec<_>>>()
        })?;

        event!(
            tracing::Level::INFO,
            runs = results.len(),
            "sweep complete"
        );
        Ok(results)
    }
}

/// Sweep the blind escalation interval over
/// `[center / factor, center * factor)` in fixed steps, holding the
/// per-turn budget at the base value.
pub fn blind_interval_sweep(
    base: &TournamentConfig,
    exploration_factor: f64,
    step_minutes: f64,
) -> Vec<SweepPoint> {
    let center = base.escalation_interval_minutes;
    let mut points = Vec::new();
    let mut interval = center / exploration_factor;
    while interval < center * exploration_factor {
        points.push(SweepPoint {
            run_id: points.len() as u64,
            escalation_interval_minutes: interval,
            per_turn_seconds: base.per_turn_seconds,
        });
        interval += step_minutes;
    }
    points
}

/// Sweep the per-turn budget over `[center / factor, center * factor)`
/// in fixed steps, holding the escalation interval at the base value.
pub fn turn_duration_sweep(
    base: &TournamentConfig,
    exploration_factor: f64,
    step_seconds: f64,
) -> Vec<SweepPoint> {
    let center = base.per_turn_seconds;
    let mut points = Vec::new();
    let mut per_turn = center / exploration_factor;
    while per_turn < center * exploration_factor {
        points.push(SweepPoint {
            run_id: points.len() as u64,
            escalation_interval_minutes: base.escalation_interval_minutes,
            per_turn_seconds: per_turn,
        });
        per_turn += step_seconds;
    }
    points
}

/// A batch of identical runs at the base parameters, used to collect
/// survivor series for the elimination plot.
pub fn survivor_batch(base: &TournamentConfig, games: usize) -> Vec<SweepPoint> {
    (0..games)
        .map(|run_id| SweepPoint {
            run_id: run_id as u64,
            escalation_interval_minutes: base.escalation_interval_minutes,
            per_turn_seconds: base.per_turn_seconds,
        })
        .collect()
}
