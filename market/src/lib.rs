pub mod errors;
pub mod fetcher;
pub mod types;
pub mod uphold;

pub use errors::{FetchError, PairError, SampleError};
pub use fetcher::QuoteFetcher;
pub use types::{Pair, PriceSample};
