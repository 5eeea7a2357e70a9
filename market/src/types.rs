use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::{PairError, SampleError};

/// Two-asset exchange identifier, rendered canonically as `BASE-QUOTE`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pair {
    pub base: String,
    pub quote: String,
}

impl Pair {
    /// Builds a pair from already-split codes, applying the same validation as [`Pair::parse`].
    pub fn new(base: impl AsRef<str>, quote: impl AsRef<str>) -> Result<Self, PairError> {
        Self::parse(&format!("{}-{}", base.as_ref(), quote.as_ref()))
    }

    /// Normalizes user input into canonical form.
    ///
    /// - surrounding whitespace is ignored and codes are uppercased
    /// - `BASE-QUOTE` is taken as-is
    /// - a code without a hyphen is split after its third character
    ///   (`eurusd` -> `EUR-USD`)
    pub fn parse(raw: &str) -> Result<Self, PairError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PairError::Empty);
        }

        let upper = trimmed.to_ascii_uppercase();
        if !upper.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(PairError::InvalidCharacters(trimmed.to_string()));
        }

        // ASCII-only from here on, so byte offsets are char offsets.
        let (base, quote) = match upper.split_once('-') {
            Some(parts) => parts,
            None if upper.len() > 3 => upper.split_at(3),
            None => return Err(PairError::Malformed(trimmed.to_string())),
        };

        if base.is_empty() || quote.is_empty() || quote.contains('-') {
            return Err(PairError::Malformed(trimmed.to_string()));
        }

        Ok(Self {
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }

    pub fn id(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl FromStr for Pair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One ask/bid observation for a pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSample {
    pub ask: f64,
    pub bid: f64,
    pub currency: Option<String>,
}

impl PriceSample {
    pub fn new(ask: f64, bid: f64) -> Self {
        Self {
            ask,
            bid,
            currency: None,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Rejects samples that would poison the next comparison
    /// (zero/negative/NaN ask, negative/NaN bid).
    pub fn validate(&self) -> Result<(), SampleError> {
        if !self.ask.is_finite() || self.ask <= 0.0 {
            return Err(SampleError::InvalidAsk(self.ask));
        }
        if !self.bid.is_finite() || self.bid < 0.0 {
            return Err(SampleError::InvalidBid(self.bid));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_pair_is_unchanged() {
        let p = Pair::parse("EUR-USD").unwrap();
        assert_eq!(p.id(), "EUR-USD");
        assert_eq!(p.base, "EUR");
        assert_eq!(p.quote, "USD");
    }

    #[test]
    fn hyphenless_code_is_split_three_three() {
        assert_eq!(Pair::parse("eurusd").unwrap().id(), "EUR-USD");
        assert_eq!(Pair::parse("  btcusd ").unwrap().to_string(), "BTC-USD");
    }

    #[test]
    fn hyphenless_longer_code_keeps_remainder_as_quote() {
        assert_eq!(Pair::parse("usdusdt").unwrap().id(), "USD-USDT");
    }

    #[test]
    fn lowercase_hyphenated_input_is_uppercased() {
        assert_eq!(Pair::parse("xrp-eur").unwrap().id(), "XRP-EUR");
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert_eq!(Pair::parse("   "), Err(PairError::Empty));
        assert!(matches!(Pair::parse("BTC"), Err(PairError::Malformed(_))));
        assert!(matches!(Pair::parse("-USD"), Err(PairError::Malformed(_))));
        assert!(matches!(Pair::parse("BTC-"), Err(PairError::Malformed(_))));
        assert!(matches!(
            Pair::parse("BTC-USD-EUR"),
            Err(PairError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_non_alphanumeric_codes() {
        assert!(matches!(
            Pair::parse("BTC/USD"),
            Err(PairError::InvalidCharacters(_))
        ));
        assert!(matches!(
            Pair::parse("€UR-USD"),
            Err(PairError::InvalidCharacters(_))
        ));
    }

    #[test]
    fn new_validates_like_parse() {
        assert_eq!(Pair::new("ton", "usdt").unwrap().id(), "TON-USDT");
        assert!(Pair::new("", "USD").is_err());
    }

    #[test]
    fn sample_validation() {
        assert!(PriceSample::new(100.0, 99.5).validate().is_ok());
        assert!(PriceSample::new(100.0, 0.0).validate().is_ok());
        assert_eq!(
            PriceSample::new(0.0, 1.0).validate(),
            Err(SampleError::InvalidAsk(0.0))
        );
        assert_eq!(
            PriceSample::new(-3.0, 1.0).validate(),
            Err(SampleError::InvalidAsk(-3.0))
        );
        assert!(PriceSample::new(f64::NAN, 1.0).validate().is_err());
        assert_eq!(
            PriceSample::new(1.0, -1.0).validate(),
            Err(SampleError::InvalidBid(-1.0))
        );
    }
}
