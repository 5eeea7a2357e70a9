pub mod config;
pub mod detector;
pub mod engine;
pub mod errors;
pub mod metrics;
pub mod registry;
pub mod types;

pub use config::{MonitorConfig, MonitorConfigBuilder};
pub use detector::{Signal, detect, relative_change};
pub use engine::PollingScheduler;
pub use errors::{ConfigError, SchedulerError};
pub use registry::PairRegistry;
pub use types::{PairOutcome, SchedulerStatus, TickReport};
