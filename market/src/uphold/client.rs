use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::FetchError;
use crate::fetcher::QuoteFetcher;
use crate::types::{Pair, PriceSample};
use crate::uphold::types::TickerPayload;

/// HTTP client for the Uphold public ticker.
#[derive(Clone)]
pub struct UpholdClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl UpholdClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.uphold.com/v0/ticker";

    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn ticker_url(&self, pair: &Pair) -> String {
        format!("{}/{}", self.base_url, pair.id())
    }

    #[instrument(skip(self), fields(pair = %pair), level = "debug")]
    pub async fn fetch_ticker(&self, pair: &Pair) -> Result<TickerPayload, FetchError> {
        let url = self.ticker_url(pair);

        let resp = self.http.get(&url).send().await.map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        let payload: TickerPayload = serde_json::from_slice(&body)?;

        debug!(ask = %payload.ask, bid = %payload.bid, "ticker fetched");

        Ok(payload)
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_millis() as u64)
        } else {
            FetchError::Http(e)
        }
    }
}

#[async_trait]
impl QuoteFetcher for UpholdClient {
    async fn fetch(&self, pair: &Pair) -> Result<PriceSample, FetchError> {
        let payload = self.fetch_ticker(pair).await?;
        PriceSample::try_from(payload)
    }
}
