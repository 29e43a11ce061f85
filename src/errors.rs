use rs_poker::arena::errors::HoldemSimulationError;
use thiserror::Error;

/// Errors surfaced by the simulation driver and the experiment runner.
///
/// There is deliberately no retry or containment here. A failing run
/// bubbles the error up through the worker pool and fails the whole
/// experiment.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("blind schedule is empty")]
    EmptyBlindSchedule,

    #[error("blind schedule must increase monotonically, level {0} does not")]
    NonMonotonicBlinds(usize),

    #[error("small blind exceeds big blind at level {0}")]
    InvertedBlindLevel(usize),

    #[error("tournament requires at least two players, got {0}")]
    NotEnoughPlayers(usize),

    #[error("per-turn seconds must be positive, got {0}")]
    NonPositiveTurnSeconds(f64),

    #[error("escalation interval must be positive, got {0}")]
    NonPositiveEscalationInterval(f64),

    #[error("starting chips must be positive, got {0}")]
    NonPositiveStartingChips(f32),

    #[error(transparent)]
    Simulation(#[from] HoldemSimulationError),

    #[error("worker pool error: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
