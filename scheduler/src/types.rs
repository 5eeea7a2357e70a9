//! Shared types used by the scheduler subsystem.

use alerts::Direction;
use market::Pair;

/// Lifecycle of a [`crate::PollingScheduler`]. There is no stopped state:
/// termination is the process exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerStatus {
    Idle,
    Running,
}

/// What happened to one pair during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    /// First observation; stored as baseline, never alerts.
    Seeded,

    /// Compared against the baseline, change within threshold.
    Steady { change_pct: f64 },

    /// Change beyond threshold; an alert was emitted.
    Alerted { direction: Direction, change_pct: f64 },

    /// Quote parsed but unusable; baseline left untouched.
    InvalidSample(String),

    /// Fetch failed or timed out; baseline left untouched.
    FetchFailed(String),
}

impl PairOutcome {
    pub fn is_alert(&self) -> bool {
        matches!(self, PairOutcome::Alerted { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PairOutcome::InvalidSample(_) | PairOutcome::FetchFailed(_)
        )
    }
}

/// Result of one fetch-detect-update pass, in completion order.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub outcomes: Vec<(Pair, PairOutcome)>,
}

impl TickReport {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, pair: Pair, outcome: PairOutcome) {
        self.outcomes.push((pair, outcome));
    }

    pub fn outcome(&self, pair: &Pair) -> Option<&PairOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == pair)
            .map(|(_, o)| o)
    }

    pub fn signals(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_alert()).count()
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failure()).count()
    }
}
