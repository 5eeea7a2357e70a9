use std::time::Duration;

use tracing::{info, warn};

use market::Pair;

use crate::errors::ConfigError;

pub const DEFAULT_INTERVAL_SECS: u64 = 5;
pub const DEFAULT_THRESHOLD: f64 = 0.01;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Monitoring parameters, fixed for the lifetime of a scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Seconds between tick starts.
    pub interval_secs: u64,

    /// Oscillation threshold as a fraction (0.01 = 1%).
    pub threshold: f64,

    /// Non-empty, de-duplicated, in input order.
    pub pairs: Vec<Pair>,

    /// Upper bound for a single quote fetch.
    pub fetch_timeout: Duration,
}

impl MonitorConfig {
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// The pair monitored when none is configured.
    pub fn default_pair() -> Pair {
        Pair {
            base: "BTC".to_string(),
            quote: "USD".to_string(),
        }
    }

    pub fn pair_list(&self) -> String {
        self.pairs
            .iter()
            .map(Pair::id)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Collects raw inputs and resolves them into a valid [`MonitorConfig`].
/// Nothing here is fatal: bad values fall back to defaults with a warning.
#[derive(Debug, Default, Clone)]
pub struct MonitorConfigBuilder {
    interval_secs: Option<u64>,
    threshold: Option<f64>,
    pairs: Vec<Pair>,
    fetch_timeout: Option<Duration>,
}

impl MonitorConfigBuilder {
    pub fn interval_secs(mut self, secs: u64) -> Self {
        self.interval_secs = Some(secs);
        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn pair(mut self, pair: Pair) -> Self {
        self.pairs.push(pair);
        self
    }

    pub fn pairs(mut self, pairs: impl IntoIterator<Item = Pair>) -> Self {
        self.pairs.extend(pairs);
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> MonitorConfig {
        let interval_secs = match self.interval_secs {
            None => DEFAULT_INTERVAL_SECS,
            Some(0) => {
                warn!(
                    default = DEFAULT_INTERVAL_SECS,
                    "interval of 0 seconds is invalid; using default"
                );
                DEFAULT_INTERVAL_SECS
            }
            Some(secs) => secs,
        };

        let threshold = match self.threshold {
            None => DEFAULT_THRESHOLD,
            Some(t) if valid_threshold(t) => t,
            Some(t) => {
                warn!(
                    threshold = t,
                    default = DEFAULT_THRESHOLD,
                    "threshold must be a positive fraction; using default"
                );
                DEFAULT_THRESHOLD
            }
        };

        let mut pairs: Vec<Pair> = Vec::with_capacity(self.pairs.len());
        for pair in self.pairs {
            if pairs.contains(&pair) {
                warn!(pair = %pair, "duplicate pair ignored");
                continue;
            }
            pairs.push(pair);
        }

        if pairs.is_empty() {
            let fallback = MonitorConfig::default_pair();
            info!(pair = %fallback, "no pairs configured; defaulting");
            pairs.push(fallback);
        }

        let fetch_timeout = match self.fetch_timeout {
            Some(t) if !t.is_zero() => t,
            _ => DEFAULT_FETCH_TIMEOUT,
        };

        MonitorConfig {
            interval_secs,
            threshold,
            pairs,
            fetch_timeout,
        }
    }
}

fn valid_threshold(t: f64) -> bool {
    t.is_finite() && t > 0.0
}

/// Parses a user-entered interval in whole seconds.
pub fn parse_interval(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidInterval(raw.trim().to_string())),
    }
}

/// Parses a user-entered threshold fraction (e.g. `0.01`).
pub fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(t) if valid_threshold(t) => Ok(t),
        _ => Err(ConfigError::InvalidThreshold(raw.trim().to_string())),
    }
}
