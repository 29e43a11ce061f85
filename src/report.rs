//! The data handed across the plotting boundary.
//!
//! Nothing here draws anything. The report is the complete input an
//! external plotting step needs: scatter points for regression panels
//! and raw survivor series for step lines, serialized as one JSON
//! artifact.

use std::fs::File;
use std::path::Path;

use crate::errors::SimResult;
use crate::experiment::SweepPoint;
use crate::simulator::{SurvivorSeries, TournamentResult};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegressionPoint {
    pub x: f64,
    pub y: f64,
}

/// One scatter panel: parameter value against game duration in minutes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegressionSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<RegressionPoint>,
}

impl RegressionSeries {
    pub fn from_sweep<F>(
        title: impl Into<String>,
        x_label: impl Into<String>,
        results: &[(SweepPoint, TournamentResult)],
        x_of: F,
    ) -> Self
    where
        F: Fn(&SweepPoint) -> f64,
    {
        let points = results
            .iter()
            .map(|(point, result)| RegressionPoint {
                x: x_of(point),
                y: result.duration_minutes(),
            })
            .collect();
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: "Game duration (minutes)".to_string(),
            points,
        }
    }
}

/// Survivor series from a batch of identical runs, for the step-line
/// elimination plot.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurvivorReport {
    pub escalation_interval_minutes: f64,
    pub per_turn_seconds: f64,
    pub runs: Vec<SurvivorSeries>,
}

impl SurvivorReport {
    pub fn from_batch(results: &[(SweepPoint, TournamentResult)]) -> Self {
        let (escalation_interval_minutes, per_turn_seconds) = results
            .first()
            .map(|(point, _)| (point.escalation_interval_minutes, point.per_turn_seconds))
            .unwrap_or((0.0, 0.0));
        Self {
            escalation_interval_minutes,
            per_turn_seconds,
            runs: results
                .iter()
                .map(|(_, result)| result.survivors.clone())
                .collect(),
        }
    }
}

/// Everything one experiment battery produced.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExperimentReport {
    pub regressions: Vec<RegressionSeries>,
    pub survivor_reports: Vec<SurvivorReport>,
}

impl ExperimentReport {
    pub fn write_json(&self, path: &Path) -> SimResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::SurvivorSeries;

    fn sweep_results() -> Vec<(SweepPoint, TournamentResult)> {
        [(5.0, 1800.0), (10.0, 3600.0)]
            .iter()
            .enumerate()
            .map(|(run_id, (interval, duration))| {
                let mut survivors = SurvivorSeries::default();
                survivors.record(duration / 60.0, 1);
                (
                    SweepPoint {
                        run_id: run_id as u64,
                        escalation_interval_minutes: *interval,
                        per_turn_seconds: 20.0,
                    },
                    TournamentResult {
                        duration_seconds: *duration,
                        survivors,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_regression_series_maps_parameter_to_minutes() {
        let results = sweep_results();
        let series = RegressionSeries::from_sweep(
            "blind duration correlation @ 20s turn duration",
            "Blind duration (minutes)",
            &results,
            |point| point.escalation_interval_minutes,
        );

        assert_eq!(series.points.len(), 2);
        assert_eq!(series.points[0].x, 5.0);
        assert_eq!(series.points[0].y, 30.0);
        assert_eq!(series.points[1].y, 60.0);
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let results = sweep_results();
        let report = ExperimentReport {
            regressions: vec![RegressionSeries::from_sweep(
                "turn duration correlation @ 15m blind duration",
                "Turn duration (seconds)",
                &results,
                |point| point.per_turn_seconds,
            )],
            survivor_reports: vec![SurvivorReport::from_batch(&results)],
        };

        let json = serde_json::to_string(&report).unwrap();
        let parsed: ExperimentReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
