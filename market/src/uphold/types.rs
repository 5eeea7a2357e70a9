use serde::Deserialize;

use crate::errors::FetchError;
use crate::types::PriceSample;

/// Raw `/v0/ticker/{PAIR}` response. Prices arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPayload {
    pub ask: String,
    pub bid: String,

    #[serde(default)]
    pub currency: Option<String>,
}

impl TryFrom<TickerPayload> for PriceSample {
    type Error = FetchError;

    fn try_from(p: TickerPayload) -> Result<Self, Self::Error> {
        let ask = parse_price("ask", &p.ask)?;
        let bid = parse_price("bid", &p.bid)?;

        Ok(PriceSample {
            ask,
            bid,
            currency: p.currency.filter(|c| !c.is_empty()),
        })
    }
}

fn parse_price(field: &str, raw: &str) -> Result<f64, FetchError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| FetchError::Malformed(format!("{field} `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_numeric_strings() {
        let payload: TickerPayload =
            serde_json::from_str(r#"{"ask":"64012.55","bid":"63990.10","currency":"USD"}"#)
                .unwrap();

        let sample = PriceSample::try_from(payload).unwrap();
        assert_eq!(sample.ask, 64012.55);
        assert_eq!(sample.bid, 63990.10);
        assert_eq!(sample.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn currency_is_optional() {
        let payload: TickerPayload = serde_json::from_str(r#"{"ask":"1.1","bid":"1.0"}"#).unwrap();
        let sample = PriceSample::try_from(payload).unwrap();
        assert_eq!(sample.currency, None);
    }

    #[test]
    fn empty_currency_is_dropped() {
        let payload: TickerPayload =
            serde_json::from_str(r#"{"ask":"1.1","bid":"1.0","currency":""}"#).unwrap();
        assert_eq!(PriceSample::try_from(payload).unwrap().currency, None);
    }

    #[test]
    fn unparsable_price_is_malformed() {
        let payload: TickerPayload =
            serde_json::from_str(r#"{"ask":"n/a","bid":"1.0"}"#).unwrap();
        let err = PriceSample::try_from(payload).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(msg) if msg.contains("ask")));
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        assert!(serde_json::from_str::<TickerPayload>(r#"{"bid":"1.0"}"#).is_err());
    }
}
