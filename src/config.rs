use crate::errors::{SimError, SimResult};

/// One blind level: the forced small and big blind for every hand
/// played while the level is active.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlindLevel {
    pub small_blind: f32,
    pub big_blind: f32,
}

impl BlindLevel {
    pub fn new(small_blind: f32, big_blind: f32) -> Self {
        Self {
            small_blind,
            big_blind,
        }
    }
}

/// Everything a single tournament run needs to know.
///
/// The defaults reproduce the reference experiment setup: eight players
/// with 5000 chips, blinds from 50/100 to 4000/8000 escalating every 15
/// minutes, and a 20 second budget per decision.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TournamentConfig {
    pub blind_schedule: Vec<BlindLevel>,
    pub escalation_interval_minutes: f64,
    pub per_turn_seconds: f64,
    pub starting_chips: f32,
    pub player_count: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            blind_schedule: vec![
                BlindLevel::new(50.0, 100.0),
                BlindLevel::new(100.0, 200.0),
                BlindLevel::new(250.0, 500.0),
                BlindLevel::new(500.0, 1000.0),
                BlindLevel::new(1000.0, 2000.0),
                BlindLevel::new(2000.0, 4000.0),
                BlindLevel::new(4000.0, 8000.0),
            ],
            escalation_interval_minutes: 15.0,
            per_turn_seconds: 20.0,
            starting_chips: 5000.0,
            player_count: 8,
        }
    }
}

impl TournamentConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.blind_schedule.is_empty() {
            return Err(SimError::EmptyBlindSchedule);
        }
        for (idx, level) in self.blind_schedule.iter().enumerate() {
            if level.small_blind > level.big_blind {
                return Err(SimError::InvertedBlindLevel(idx));
            }
        }
        for (idx, pair) in self.blind_schedule.windows(2).enumerate() {
            if pair[1].small_blind <= pair[0].small_blind || pair[1].big_blind <= pair[0].big_blind {
                return Err(SimError::NonMonotonicBlinds(idx + 1));
            }
        }
        if self.player_count < 2 {
            return Err(SimError::NotEnoughPlayers(self.player_count));
        }
        if self.per_turn_seconds <= 0.0 {
            return Err(SimError::NonPositiveTurnSeconds(self.per_turn_seconds));
        }
        if self.escalation_interval_minutes <= 0.0 {
            return Err(SimError::NonPositiveEscalationInterval(
                self.escalation_interval_minutes,
            ));
        }
        if self.starting_chips <= 0.0 {
            return Err(SimError::NonPositiveStartingChips(self.starting_chips));
        }
        Ok(())
    }

    pub fn with_escalation_interval(mut self, minutes: f64) -> Self {
        self.escalation_interval_minutes = minutes;
        self
    }

    pub fn with_per_turn_seconds(mut self, seconds: f64) -> Self {
        self.per_turn_seconds = seconds;
        self
    }
}
