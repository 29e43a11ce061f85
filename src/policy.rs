//! The decision policy behind every seat in a simulated tournament.
//!
//! The policy is deliberately passive. It never folds when checking is
//! free, it second-guesses itself before raising, and when it does
//! raise it overwhelmingly chooses the minimum.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore, SeedableRng};
use rs_poker::arena::action::AgentAction;
use rs_poker::arena::{Agent, GameState};
use tracing::event;

use crate::moves::{ActionChoice, ActionKind, LegalMoveSet};

/// A decision policy maps one legal-move set to one action. It never
/// mutates engine state and carries no failure modes; an inconsistent
/// move set is the engine's contract to prevent.
pub trait DecisionPolicy {
    fn choose(&self, moves: &LegalMoveSet, rng: &mut dyn RngCore) -> ActionChoice;
}

/// Selection weights for a surviving raise: minimum, moderate, maximum.
/// The moderate raise is twice the minimum, capped at the maximum.
const RAISE_WEIGHTS: [u32; 3] = [3, 1, 1];

/// A biased-random, risk-averse policy.
///
/// The action is drawn uniformly from the legal kinds, except that
/// folding is never considered while checking is available, and a first
/// draw of raise is redrawn once (raise can still come up again).
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use tourney_lab::moves::{ActionKind, LegalMoveSet};
/// use tourney_lab::policy::{ConservativePolicy, DecisionPolicy};
///
/// let moves = LegalMoveSet::new(
///     vec![ActionKind::Fold, ActionKind::Check],
///     0.0,
///     100.0,
///     None,
/// );
/// let mut rng = StdRng::seed_from_u64(420);
/// let choice = ConservativePolicy::default().choose(&moves, &mut rng);
/// assert_eq!(choice.kind, ActionKind::Check);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConservativePolicy;

impl ConservativePolicy {
    /// One uniform draw over the legal kinds, with folding pruned while
    /// checking is available. The pruning is policy, not an engine rule.
    fn sample_kind(&self, moves: &LegalMoveSet, rng: &mut dyn RngCore) -> ActionKind {
        let can_check = moves.contains(ActionKind::Check);
        let kinds: Vec<ActionKind> = moves
            .kinds()
            .iter()
            .copied()
            .filter(|kind| !(can_check && *kind == ActionKind::Fold))
            .collect();

        // The engine never presents an empty move set while a hand is
        // running, so the fallback is unreachable in practice.
        kinds.choose(rng).copied().unwrap_or(ActionKind::Fold)
    }

    /// Pick the raise-to amount from `{min: 3, moderate: 1, max: 1}`.
    fn raise_amount(&self, lo: f32, hi: f32, rng: &mut dyn RngCore) -> f32 {
        let moderate = (lo * 2.0).min(hi);
        let pool = [lo, moderate, hi];
        let weighted: Vec<(f32, u32)> = pool.iter().copied().zip(RAISE_WEIGHTS).collect();
        weighted
            .choose_weighted(rng, |(_, weight)| *weight)
            .map(|(amount, _)| *amount)
            .unwrap_or(lo)
    }

    fn resolve(&self, kind: ActionKind, moves: &LegalMoveSet, rng: &mut dyn RngCore) -> ActionChoice {
        match kind {
            ActionKind::Fold => ActionChoice::fold(),
            ActionKind::Check => ActionChoice::check(moves.call_amount()),
            ActionKind::Call => ActionChoice::call(moves.call_amount()),
            ActionKind::AllIn => ActionChoice::all_in(moves.all_in_amount()),
            ActionKind::Raise => match moves.raise_range() {
                Some((lo, hi)) => ActionChoice::raise(self.raise_amount(lo, hi, rng)),
                // A raise kind without a range never comes out of a
                // well-formed move set; degrade to a call.
                None => ActionChoice::call(moves.call_amount()),
            },
        }
    }
}

impl DecisionPolicy for ConservativePolicy {
    fn choose(&self, moves: &LegalMoveSet, rng: &mut dyn RngCore) -> ActionChoice {
        let first = self.sample_kind(moves, rng);

        // Think twice before raising: one independent redraw, which may
        // well land on raise again.
        let kind = if first == ActionKind::Raise {
            self.sample_kind(moves, rng)
        } else {
            first
        };

        self.resolve(kind, moves, rng)
    }
}

/// Adapts a [`DecisionPolicy`] to the engine's push-style [`Agent`]
/// callback. The legal-move set is derived fresh from the game state at
/// every decision point and discarded after one use.
pub struct PolicyAgent<P> {
    policy: P,
    rng: StdRng,
}

impl<P: DecisionPolicy> PolicyAgent<P> {
    pub fn new(policy: P, rng: StdRng) -> Self {
        Self { policy, rng }
    }

    pub fn seeded(policy: P, seed: u64) -> Self {
        Self::new(policy, StdRng::seed_from_u64(seed))
    }
}

impl<P: DecisionPolicy> Agent for PolicyAgent<P> {
    fn act(&mut self, _id: u128, game_state: &GameState) -> AgentAction {
        let moves = LegalMoveSet::from_game_state(game_state);
        let choice = self.policy.choose(&moves, &mut self.rng);
        event!(
            tracing::Level::TRACE,
            kind = ?choice.kind,
            amount = choice.amount,
            "policy decision"
        );
        choice.to_agent_action()
    }
}

/// Derive a fresh agent rng from the tournament's rng stream so each
/// seat plays an independent sequence.
pub fn agent_rng(rng: &mut impl Rng) -> StdRng {
    StdRng::seed_from_u64(rng.random())
}
