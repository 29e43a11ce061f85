//! The seam between the tournament simulator and the game-rules engine.
//!
//! Everything that the rules engine owns (dealing, betting legality,
//! pot settlement) stays behind [`TableEngine::play_hand`]. The
//! simulator above only ever sees chip counts and a decision count per
//! hand.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rs_poker::arena::action::Action;
use rs_poker::arena::historian::HistorianError;
use rs_poker::arena::{Agent, GameState, Historian, HoldemSimulationBuilder};
use tracing::trace_span;

use crate::config::{BlindLevel, TournamentConfig};
use crate::errors::SimResult;
use crate::policy::{ConservativePolicy, PolicyAgent, agent_rng};

/// What the simulator learns from one completed hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandSummary {
    /// Number of player decision points inside the hand. Forced blinds
    /// and deals do not count, every fold/check/call/raise does.
    pub decisions: u64,
}

/// A table that can play hands of poker until fewer than two players
/// hold chips. The production implementation wraps the rs_poker arena;
/// tests substitute deterministic stubs.
pub trait TableEngine {
    /// Set the blind level used for all subsequently started hands.
    fn set_blinds(&mut self, level: BlindLevel);

    /// Play one hand to completion, mutating the chip counts.
    fn play_hand(&mut self, rng: &mut StdRng) -> SimResult<HandSummary>;

    /// Current per-seat chip counts, busted seats included.
    fn stacks(&self) -> &[f32];

    fn players_with_chips(&self) -> usize {
        self.stacks().iter().filter(|stack| **stack > 0.0).count()
    }

    /// A hand can only start while at least two players hold chips.
    fn is_game_running(&self) -> bool {
        self.players_with_chips() >= 2
    }
}

/// Historian that counts player decision points. Failed actions still
/// consumed a turn on the simulated clock, so they count too.
struct DecisionCounter {
    decisions: Rc<RefCell<u64>>,
}

impl DecisionCounter {
    fn new(decisions: Rc<RefCell<u64>>) -> Self {
        Self { decisions }
    }
}

impl Historian for DecisionCounter {
    fn record_action(
        &mut self,
        _id: u128,
        _game_state: &GameState,
        action: Action,
    ) -> Result<(), HistorianError> {
        if matches!(action, Action::PlayedAction(_) | Action::FailedAction(_)) {
            *self.decisions.try_borrow_mut()? += 1;
        }
        Ok(())
    }
}

/// A single-table No-Limit Hold'em game backed by the rs_poker arena.
/// Chip counts persist across hands; the dealer button walks to the
/// next live seat after every hand.
pub struct HoldemTable {
    stacks: Vec<f32>,
    dealer_idx: usize,
    blinds: BlindLevel,
    policy: ConservativePolicy,
}

impl HoldemTable {
    pub fn new(config: &TournamentConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            stacks: vec![config.starting_chips; config.player_count],
            dealer_idx: 0,
            blinds: config.blind_schedule[0],
            policy: ConservativePolicy,
        })
    }

    fn advance_dealer(&mut self) {
        if self.players_with_chips() == 0 {
            return;
        }
        let mut dealer_idx = (self.dealer_idx + 1) % self.stacks.len();
        while self.stacks[dealer_idx] == 0.0 {
            dealer_idx = (dealer_idx + 1) % self.stacks.len();
        }
        self.dealer_idx = dealer_idx;
    }
}

impl TableEngine for HoldemTable {
    fn set_blinds(&mut self, level: BlindLevel) {
        self.blinds = level;
    }

    fn play_hand(&mut self, rng: &mut StdRng) -> SimResult<HandSummary> {
        let span = trace_span!("play_hand", dealer_idx = self.dealer_idx);
        let _enter = span.enter();

        let agents: Vec<Box<dyn Agent>> = self
            .stacks
            .iter()
            .map(|_| {
                Box::new(PolicyAgent::new(self.policy, agent_rng(rng))) as Box<dyn Agent>
            })
            .collect();

        let decisions = Rc::new(RefCell::new(0u64));
        let historian: Box<dyn Historian> = Box::new(DecisionCounter::new(decisions.clone()));

        let game_state = GameState::new_starting(
            self.stacks.clone(),
            self.blinds.big_blind,
            self.blinds.small_blind,
            0.0,
            self.dealer_idx,
        );

        let mut sim = HoldemSimulationBuilder::default()
            .game_state(game_state)
            .agents(agents)
            .historians(vec![historian])
            .build()?;
        sim.run(rng);

        self.stacks = sim.game_state.stacks.clone();
        self.advance_dealer();

        let decisions = *decisions.borrow();
        Ok(HandSummary { decisions })
    }

    fn stacks(&self) -> &[f32] {
        &self.stacks
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;

    use super::*;

    fn small_config() -> TournamentConfig {
        TournamentConfig {
            blind_schedule: vec![BlindLevel::new(10.0, 20.0), BlindLevel::new(20.0, 40.0)],
            escalation_interval_minutes: 5.0,
            per_turn_seconds: 20.0,
            starting_chips: 500.0,
            player_count: 4,
        }
    }

    #[test_log::test]
    fn test_play_hand_conserves_chips() {
        let config = small_config();
        let mut table = HoldemTable::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(420);

        assert!(table.is_game_running());
        let summary = table.play_hand(&mut rng).unwrap();

        assert!(summary.decisions > 0);
        let total: f32 = table.stacks().iter().sum();
        assert_relative_eq!(total, 2000.0);
    }

    #[test_log::test]
    fn test_dealer_button_moves_between_hands() {
        let config = small_config();
        let mut table = HoldemTable::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        table.play_hand(&mut rng).unwrap();
        if table.is_game_running() {
            table.play_hand(&mut rng).unwrap();
        }

        // The button never parks on a busted seat.
        assert!(table.stacks()[table.dealer_idx] > 0.0);
    }

    #[test_log::test]
    fn test_blind_escalation_applies_to_next_hand() {
        let config = small_config();
        let mut table = HoldemTable::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        table.set_blinds(BlindLevel::new(20.0, 40.0));
        table.play_hand(&mut rng).unwrap();

        // Blinds were posted at the escalated level, so at least the
        // big blind moved even if everyone folded.
        let total: f32 = table.stacks().iter().sum();
        assert_relative_eq!(total, 2000.0);
        assert!(table.stacks().iter().any(|stack| *stack != 500.0));
    }
}
