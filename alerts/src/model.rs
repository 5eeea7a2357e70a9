use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Direction label attached to an alert.
///
/// `Up` is emitted when the symmetric change `100 * (old - new) / mid` is positive,
/// i.e. when the quoted ask dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-once alert record, carrying the interval and threshold in effect when it fired.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub alert_id: Uuid,
    pub pair_id: String,
    pub direction: Direction,
    pub message: String,
    pub interval_secs: u64,
    pub threshold: f64,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(
        pair_id: impl Into<String>,
        direction: Direction,
        interval_secs: u64,
        threshold: f64,
    ) -> Self {
        let pair_id = pair_id.into();
        let message = format!("{pair_id} price has gone {direction}");

        Self {
            alert_id: Uuid::new_v4(),
            pair_id,
            direction,
            message,
            interval_secs,
            threshold,
            created_at: Utc::now(),
        }
    }
}
