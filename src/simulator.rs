//! Drives one tournament to completion over a [`TableEngine`].
//!
//! Time is a logical clock: it advances by a fixed per-turn budget once
//! per decision made inside a hand, and never while the table idles
//! between hands. Blinds escalate on a fixed schedule against that
//! clock, one level per hand boundary at most.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{event, trace_span};

use crate::config::TournamentConfig;
use crate::errors::SimResult;
use crate::table::{HoldemTable, TableEngine};

/// One sample of the elimination curve: how many players still held
/// chips when a hand finished.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurvivorSample {
    pub minutes: f64,
    pub players_left: usize,
}

/// Time-indexed record of surviving player counts, appended once per
/// completed hand in simulated-time order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurvivorSeries {
    samples: Vec<SurvivorSample>,
}

impl SurvivorSeries {
    pub fn record(&mut self, minutes: f64, players_left: usize) {
        self.samples.push(SurvivorSample {
            minutes,
            players_left,
        });
    }

    pub fn samples(&self) -> &[SurvivorSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The outcome of one simulated tournament. Immutable once produced.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TournamentResult {
    pub duration_seconds: f64,
    pub survivors: SurvivorSeries,
}

impl TournamentResult {
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }
}

/// Plays hands until fewer than two players hold chips, escalating
/// blinds along the way and sampling the survivor count at every hand
/// boundary.
pub struct TournamentSimulator<E> {
    engine: E,
    config: TournamentConfig,
}

impl<E: TableEngine> TournamentSimulator<E> {
    pub fn new(engine: E, config: TournamentConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { engine, config })
    }

    pub fn run(mut self, rng: &mut StdRng) -> SimResult<TournamentResult> {
        let span = trace_span!("tournament");
        let _enter = span.enter();

        let schedule = self.config.blind_schedule.clone();
        let interval_seconds = self.config.escalation_interval_minutes * 60.0;

        let mut elapsed_seconds = 0.0_f64;
        let mut level_idx = 0_usize;
        let mut survivors = SurvivorSeries::default();

        self.engine.set_blinds(schedule[level_idx]);

        while self.engine.is_game_running() {
            // At most one escalation step per hand boundary, and never
            // past the last level, even when the clock has jumped over
            // several activation times during a long hand.
            if level_idx + 1 < schedule.len()
                && elapsed_seconds > (level_idx as f64 + 1.0) * interval_seconds
            {
                level_idx += 1;
                self.engine.set_blinds(schedule[level_idx]);
                event!(
                    tracing::Level::DEBUG,
                    level_idx,
                    elapsed_seconds,
                    "blinds escalated"
                );
            }

            let summary = self.engine.play_hand(rng)?;
            elapsed_seconds += summary.decisions as f64 * self.config.per_turn_seconds;
            survivors.record(elapsed_seconds / 60.0, self.engine.players_with_chips());
        }

        event!(
            tracing::Level::INFO,
            elapsed_seconds,
            hands = survivors.len(),
            "tournament finished"
        );
        Ok(TournamentResult {
            duration_seconds: elapsed_seconds,
            survivors,
        })
    }
}

/// Run one tournament with the given pacing parameters over a fresh
/// rs_poker-backed table. This is the callable the experiment runner
/// fans out across its worker pool; results are deterministic up to the
/// engine's randomness stream, which is seeded from `run_id`.
pub fn simulate_tournament(
    run_id: u64,
    escalation_interval_minutes: f64,
    per_turn_seconds: f64,
    base: &TournamentConfig,
) -> SimResult<TournamentResult> {
    let config = base
        .clone()
        .with_escalation_interval(escalation_interval_minutes)
        .with_per_turn_seconds(per_turn_seconds);
    let engine = HoldemTable::new(&config)?;
    let mut rng = StdRng::seed_from_u64(run_id);
    TournamentSimulator::new(engine, config)?.run(&mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlindLevel;
    use crate::table::HandSummary;

    use std::cell::RefCell;
    use std::rc::Rc;

    /// Deterministic stand-in for the rules engine: plays a fixed
    /// number of decisions per hand and busts one player at every hand
    /// boundary. Records every blind level the simulator sets so tests
    /// can check the escalation path.
    struct StubEngine {
        stacks: Vec<f32>,
        decisions_per_hand: u64,
        blinds_seen: Rc<RefCell<Vec<BlindLevel>>>,
    }

    impl StubEngine {
        fn new(players: usize, decisions_per_hand: u64) -> Self {
            Self {
                stacks: vec![100.0; players],
                decisions_per_hand,
                blinds_seen: Rc::new(RefCell::new(vec![])),
            }
        }

        fn blinds_seen(&self) -> Rc<RefCell<Vec<BlindLevel>>> {
            self.blinds_seen.clone()
        }
    }

    impl TableEngine for StubEngine {
        fn set_blinds(&mut self, level: BlindLevel) {
            self.blinds_seen.borrow_mut().push(level);
        }

        fn play_hand(&mut self, _rng: &mut StdRng) -> SimResult<HandSummary> {
            if let Some(loser) = self.stacks.iter().rposition(|stack| *stack > 0.0) {
                self.stacks[loser] = 0.0;
            }
            Ok(HandSummary {
                decisions: self.decisions_per_hand,
            })
        }

        fn stacks(&self) -> &[f32] {
            &self.stacks
        }
    }

    fn two_level_config(per_turn_seconds: f64, escalation_interval_minutes: f64) -> TournamentConfig {
        TournamentConfig {
            blind_schedule: vec![BlindLevel::new(5.0, 10.0), BlindLevel::new(10.0, 20.0)],
            escalation_interval_minutes,
            per_turn_seconds,
            ..TournamentConfig::default()
        }
    }

    #[test]
    fn test_three_hands_one_decision_each() {
        // Four players, one bust per hand: the game ends after exactly
        // three hands. One decision per hand at 20s per turn gives an
        // elapsed time of 60 seconds and three survivor samples.
        let engine = StubEngine::new(4, 1);
        let config = two_level_config(20.0, 15.0);
        let mut rng = StdRng::seed_from_u64(0);

        let result = TournamentSimulator::new(engine, config)
            .unwrap()
            .run(&mut rng)
            .unwrap();

        assert_eq!(result.duration_seconds, 60.0);
        assert_eq!(result.survivors.len(), 3);
        assert_eq!(result.survivors.samples()[0].players_left, 3);
        assert_eq!(result.survivors.samples()[2].players_left, 1);
    }

    #[test]
    fn test_survivor_series_is_non_increasing_in_time_order() {
        let engine = StubEngine::new(8, 4);
        let config = two_level_config(20.0, 15.0);
        let mut rng = StdRng::seed_from_u64(0);

        let result = TournamentSimulator::new(engine, config)
            .unwrap()
            .run(&mut rng)
            .unwrap();

        for pair in result.survivors.samples().windows(2) {
            assert!(pair[1].minutes >= pair[0].minutes);
            assert!(pair[1].players_left <= pair[0].players_left);
        }
    }

    #[test]
    fn test_blinds_escalate_one_level_per_hand_boundary() {
        // 40 decisions at 20s is 800 simulated seconds per hand, which
        // crosses the 5 minute escalation interval more than once.
        // Levels must still advance a single step per boundary.
        let engine = StubEngine::new(8, 40);
        let blinds_seen = engine.blinds_seen();
        let schedule = vec![
            BlindLevel::new(5.0, 10.0),
            BlindLevel::new(10.0, 20.0),
            BlindLevel::new(25.0, 50.0),
        ];
        let config = TournamentConfig {
            blind_schedule: schedule.clone(),
            escalation_interval_minutes: 5.0,
            per_turn_seconds: 20.0,
            ..TournamentConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(0);

        TournamentSimulator::new(engine, config)
            .unwrap()
            .run(&mut rng)
            .unwrap();

        // One initial set, then one escalation per boundary until the
        // schedule is exhausted: each level exactly once, in order.
        assert_eq!(*blinds_seen.borrow(), schedule);
    }

    #[test]
    fn test_escalation_never_passes_last_level() {
        // Every hand jumps the clock far past many activation times;
        // the level still only ever reaches the last schedule entry.
        let engine = StubEngine::new(6, 100);
        let blinds_seen = engine.blinds_seen();
        let config = two_level_config(20.0, 1.0);
        let schedule = config.blind_schedule.clone();
        let mut rng = StdRng::seed_from_u64(0);

        TournamentSimulator::new(engine, config)
            .unwrap()
            .run(&mut rng)
            .unwrap();

        let seen = blinds_seen.borrow();
        assert_eq!(*seen, schedule);
        assert_eq!(seen.last(), schedule.last());
    }

    #[test]
    fn test_elapsed_time_counts_only_decisions() {
        let engine = StubEngine::new(3, 5);
        let config = two_level_config(10.0, 60.0);
        let mut rng = StdRng::seed_from_u64(0);

        let result = TournamentSimulator::new(engine, config)
            .unwrap()
            .run(&mut rng)
            .unwrap();

        // Two hands of five decisions at 10 seconds each.
        assert_eq!(result.duration_seconds, 100.0);
        assert_eq!(result.survivors.len(), 2);
    }

    #[test_log::test]
    fn test_full_tournament_on_real_engine_terminates() {
        let config = TournamentConfig {
            blind_schedule: vec![
                BlindLevel::new(10.0, 20.0),
                BlindLevel::new(25.0, 50.0),
                BlindLevel::new(50.0, 100.0),
            ],
            escalation_interval_minutes: 2.0,
            per_turn_seconds: 20.0,
            starting_chips: 200.0,
            player_count: 4,
        };

        let result = simulate_tournament(42, 2.0, 20.0, &config).unwrap();

        assert!(result.duration_seconds > 0.0);
        assert!(!result.survivors.is_empty());
        for pair in result.survivors.samples().windows(2) {
            assert!(pair[1].minutes >= pair[0].minutes);
            assert!(pair[1].players_left <= pair[0].players_left);
        }
        let last = result.survivors.samples().last().unwrap();
        assert!(last.players_left <= 1);
    }
}
