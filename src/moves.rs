use rs_poker::arena::GameState;
use rs_poker::arena::action::AgentAction;

/// The kinds of action a player may choose from at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// The legal actions at a single decision point, together with the
/// parameter ranges needed to resolve them into concrete bets.
///
/// A move set is derived fresh from the engine's `GameState` before each
/// decision and discarded afterwards. All amounts use the engine's
/// total-bet convention: the number of chips the player will have
/// committed for the round after the action.
#[derive(Debug, Clone, PartialEq)]
pub struct LegalMoveSet {
    kinds: Vec<ActionKind>,
    call_amount: f32,
    all_in_amount: f32,
    raise_range: Option<(f32, f32)>,
}

impl LegalMoveSet {
    pub fn new(
        kinds: Vec<ActionKind>,
        call_amount: f32,
        all_in_amount: f32,
        raise_range: Option<(f32, f32)>,
    ) -> Self {
        Self {
            kinds,
            call_amount,
            all_in_amount,
            raise_range,
        }
    }

    /// Derive the legal moves for the player currently to act.
    ///
    /// The engine validates whatever action is ultimately played; this
    /// derivation only has to be tight enough that the policy never
    /// picks something the engine would reject.
    pub fn from_game_state(game_state: &GameState) -> Self {
        let bet = game_state.current_round_bet();
        let player_bet = game_state.current_round_current_player_bet();
        let stack = game_state.current_player_stack();
        let all_in_amount = player_bet + stack;
        let to_call = bet - player_bet;

        let mut kinds = Vec::with_capacity(4);
        if to_call > 0.0 {
            kinds.push(ActionKind::Fold);
            kinds.push(ActionKind::Call);
        } else {
            kinds.push(ActionKind::Check);
        }

        // The smallest legal raise is the current bet plus the round's
        // minimum raise.
        let min_raise_to = bet + game_state.round_data.min_raise;
        let raise_range = if all_in_amount >= min_raise_to && min_raise_to > bet {
            Some((min_raise_to, all_in_amount))
        } else {
            None
        };

        if raise_range.is_some() {
            kinds.push(ActionKind::Raise);
        } else if all_in_amount > bet {
            // Too short to min-raise but still able to push.
            kinds.push(ActionKind::AllIn);
        }

        Self {
            kinds,
            call_amount: bet,
            all_in_amount,
            raise_range,
        }
    }

    pub fn kinds(&self) -> &[ActionKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// The total bet required to call (equal to the player's committed
    /// chips when checking is available).
    pub fn call_amount(&self) -> f32 {
        self.call_amount
    }

    pub fn all_in_amount(&self) -> f32 {
        self.all_in_amount
    }

    /// Inclusive `(min, max)` total-bet range for a raise, if raising is
    /// legal at all.
    pub fn raise_range(&self) -> Option<(f32, f32)> {
        self.raise_range
    }
}

/// One resolved decision: an action kind and the total bet that goes
/// with it. Zero for a fold, the matched bet for check/call, the chosen
/// raise-to amount for a raise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionChoice {
    pub kind: ActionKind,
    pub amount: f32,
}

impl ActionChoice {
    pub fn fold() -> Self {
        Self {
            kind: ActionKind::Fold,
            amount: 0.0,
        }
    }

    pub fn check(call_amount: f32) -> Self {
        Self {
            kind: ActionKind::Check,
            amount: call_amount,
        }
    }

    pub fn call(call_amount: f32) -> Self {
        Self {
            kind: ActionKind::Call,
            amount: call_amount,
        }
    }

    pub fn raise(amount: f32) -> Self {
        Self {
            kind: ActionKind::Raise,
            amount,
        }
    }

    pub fn all_in(all_in_amount: f32) -> Self {
        Self {
            kind: ActionKind::AllIn,
            amount: all_in_amount,
        }
    }

    /// Translate into the engine's action vocabulary. Checking and
    /// calling are both a bet matching the table's current bet.
    pub fn to_agent_action(self) -> AgentAction {
        match self.kind {
            ActionKind::Fold => AgentAction::Fold,
            ActionKind::Check | ActionKind::Call | ActionKind::Raise => {
                AgentAction::Bet(self.amount)
            }
            ActionKind::AllIn => AgentAction::AllIn,
        }
    }
}
