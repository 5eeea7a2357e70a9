use thiserror::Error;

/// Invalid monitoring input. Always recovered by falling back to a default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("interval must be a positive whole number of seconds, got `{0}`")]
    InvalidInterval(String),

    #[error("threshold must be a positive fraction (e.g. 0.01), got `{0}`")]
    InvalidThreshold(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler is already running")]
    AlreadyRunning,
}
