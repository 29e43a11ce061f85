use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, event};
use tracing_subscriber::EnvFilter;

use tourney_lab::config::TournamentConfig;
use tourney_lab::errors::SimResult;
use tourney_lab::experiment::{
    ExperimentRunner, blind_interval_sweep, survivor_batch, turn_duration_sweep,
};
use tourney_lab::report::{ExperimentReport, RegressionSeries, SurvivorReport};

/// Run the tournament pacing experiment battery and write the
/// collected series to a JSON report for plotting.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "run-experiments")]
struct Cli {
    /// Number of identical games for the elimination-curve batch
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Center of the blind escalation interval sweep, in minutes
    #[arg(long, default_value_t = 15.0)]
    minutes_per_blind: f64,

    /// Center of the per-turn budget sweep, in seconds
    #[arg(long, default_value_t = 20.0)]
    seconds_per_turn: f64,

    /// Sweeps cover [center / factor, center * factor)
    #[arg(long, default_value_t = 2.0)]
    exploration_factor: f64,

    /// Step between blind-interval sweep points, in minutes
    #[arg(long, default_value_t = 0.25)]
    blind_step: f64,

    /// Step between turn-duration sweep points, in seconds
    #[arg(long, default_value_t = 0.5)]
    turn_step: f64,

    /// Worker pool size
    #[arg(long, default_value_t = 8)]
    workers: usize,

    /// Output path for the JSON report
    #[arg(long, default_value = "experiments.json")]
    out: PathBuf,
}

fn blind_panel(
    runner: &ExperimentRunner,
    factor: f64,
    step: f64,
    per_turn_seconds: f64,
) -> SimResult<RegressionSeries> {
    let base = runner
        .base_config()
        .clone()
        .with_per_turn_seconds(per_turn_seconds);
    let points = blind_interval_sweep(&base, factor, step);
    event!(
        Level::INFO,
        runs = points.len(),
        per_turn_seconds,
        "blind interval sweep"
    );
    let results = runner.run_sweep_with(&points, |point| {
        tourney_lab::simulator::simulate_tournament(
            point.run_id,
            point.escalation_interval_minutes,
            point.per_turn_seconds,
            &base,
        )
    })?;
    Ok(RegressionSeries::from_sweep(
        format!("blind duration correlation @ {per_turn_seconds}s turn duration"),
        "Blind duration (minutes)",
        &results,
        |point| point.escalation_interval_minutes,
    ))
}

fn turn_panel(
    runner: &ExperimentRunner,
    factor: f64,
    step: f64,
    escalation_interval_minutes: f64,
) -> SimResult<RegressionSeries> {
    let base = runner
        .base_config()
        .clone()
        .with_escalation_interval(escalation_interval_minutes);
    let points = turn_duration_sweep(&base, factor, step);
    event!(
        Level::INFO,
        runs = points.len(),
        escalation_interval_minutes,
        "turn duration sweep"
    );
    let results = runner.run_sweep_with(&points, |point| {
        tourney_lab::simulator::simulate_tournament(
            point.run_id,
            point.escalation_interval_minutes,
            point.per_turn_seconds,
            &base,
        )
    })?;
    Ok(RegressionSeries::from_sweep(
        format!("turn duration correlation @ {escalation_interval_minutes}m blind duration"),
        "Turn duration (seconds)",
        &results,
        |point| point.per_turn_seconds,
    ))
}

fn run(cli: Cli) -> SimResult<()> {
    let base = TournamentConfig::default()
        .with_escalation_interval(cli.minutes_per_blind)
        .with_per_turn_seconds(cli.seconds_per_turn);
    let runner = ExperimentRunner::new(cli.workers, base.clone())?;
    let factor = cli.exploration_factor;

    let regressions = vec![
        blind_panel(&runner, factor, cli.blind_step, 20.0)?,
        turn_panel(&runner, factor, cli.turn_step, 10.0)?,
        blind_panel(&runner, factor, cli.blind_step, 40.0)?,
        turn_panel(&runner, factor, cli.turn_step, 20.0)?,
    ];

    let batch = survivor_batch(&base, cli.games);
    event!(Level::INFO, runs = batch.len(), "survivor batch");
    let batch_results = runner.run_sweep(&batch)?;
    let survivor_reports = vec![SurvivorReport::from_batch(&batch_results)];

    let report = ExperimentReport {
        regressions,
        survivor_reports,
    };
    report.write_json(&cli.out)?;
    event!(Level::INFO, out = %cli.out.display(), "report written");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("experiment failed: {err}");
        std::process::exit(1);
    }
}
