use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use market::uphold::UpholdClient;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Alert store connection string. `None` disables persistence.
    pub database_url: Option<String>,

    /// Ticker endpoint; the pair id is appended as the last path segment.
    pub ticker_base_url: String,

    /// Per-request bound, applied both by the HTTP client and the scheduler.
    pub fetch_timeout: Duration,

    /// Capacity of the queue between the scheduler and the alert writer.
    /// When full, new alerts are logged but not persisted.
    pub alert_queue_capacity: usize,

    /// JSON log lines instead of the pretty format.
    pub json_logs: bool,

    /// Values that were present but unusable. Reported once the logger is up.
    pub rejected: Vec<(&'static str, String)>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());

        let ticker_base_url = lookup("TICKER_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| UpholdClient::DEFAULT_BASE_URL.to_string());

        let mut rejected = Vec::new();
        let fetch_timeout_ms = parse_or(
            "FETCH_TIMEOUT_MS",
            lookup("FETCH_TIMEOUT_MS"),
            5_000u64,
            &mut rejected,
        );
        let alert_queue_capacity = parse_or(
            "ALERT_QUEUE_CAPACITY",
            lookup("ALERT_QUEUE_CAPACITY"),
            256usize,
            &mut rejected,
        );

        let json_logs = lookup("APP_ENV").as_deref() == Some("production");

        Self {
            database_url,
            ticker_base_url,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms.max(1)),
            alert_queue_capacity: alert_queue_capacity.max(1),
            json_logs,
            rejected,
        }
    }

    pub fn log_rejected(&self) {
        for (key, value) in &self.rejected {
            warn!(key, value = %value, "unusable environment value; default applied");
        }
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
    rejected: &mut Vec<(&'static str, String)>,
) -> T {
    let Some(v) = raw else {
        return default;
    };

    v.trim().parse().unwrap_or_else(|_| {
        rejected.push((key, v));
        default
    })
}
