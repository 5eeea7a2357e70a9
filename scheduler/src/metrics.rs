use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Minimal counters for operational visibility.
#[derive(Clone, Default, Debug)]
pub struct Counters {
    pub ticks: Arc<AtomicU64>,
    pub quiet_ticks: Arc<AtomicU64>,

    pub alerts: Arc<AtomicU64>,
    pub seeded: Arc<AtomicU64>,

    // per-pair failures
    pub fetch_failures: Arc<AtomicU64>,
    pub invalid_samples: Arc<AtomicU64>,
}

/// Point-in-time copy of [`Counters`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub ticks: u64,
    pub quiet_ticks: u64,
    pub alerts: u64,
    pub seeded: u64,
    pub fetch_failures: u64,
    pub invalid_samples: u64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            quiet_ticks: self.quiet_ticks.load(Ordering::Relaxed),
            alerts: self.alerts.load(Ordering::Relaxed),
            seeded: self.seeded.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            invalid_samples: self.invalid_samples.load(Ordering::Relaxed),
        }
    }
}
