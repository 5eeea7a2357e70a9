use thiserror::Error;

/// Rejected pair input at configuration time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PairError {
    #[error("pair identifier is empty")]
    Empty,

    #[error("pair `{0}` must contain exactly one hyphen between two codes")]
    Malformed(String),

    #[error("pair `{0}` contains characters outside A-Z / 0-9")]
    InvalidCharacters(String),
}

/// Failure to obtain a usable quote for one pair in one tick.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from ticker endpoint")]
    Status { status: u16 },

    #[error("malformed ticker payload: {0}")]
    Malformed(String),

    #[error("quote fetch timed out after {0} ms")]
    Timeout(u64),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}

/// A quote that parsed but cannot serve as a comparison baseline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("ask must be a positive finite number, got {0}")]
    InvalidAsk(f64),

    #[error("bid must be a non-negative finite number, got {0}")]
    InvalidBid(f64),
}
