use async_trait::async_trait;

use crate::errors::FetchError;
use crate::types::{Pair, PriceSample};

/// Single-attempt quote source. Implementations must not retry internally:
/// the next scheduler tick is the retry.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch(&self, pair: &Pair) -> Result<PriceSample, FetchError>;
}
