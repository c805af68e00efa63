use super::Refusal;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

//////////////////////////////////////////////////////////////////////////////////////
// Functions
//////////////////////////////////////////////////////////////////////////////////////

/// Translate a raw `GLOBAL_QUOTE` payload into a [`QuoteSnapshot`].
///
/// An unknown symbol comes back as `{"Global Quote": {}}`; that is `None`,
/// not an error.
pub fn extran(raw: RawGlobalQuote) -> Result<Option<QuoteSnapshot>> {
    let q = raw.quote;
    if q.symbol.is_empty() {
        if let Some(msg) = raw.refusal.into_message() {
            return Err(Error::Provider(msg));
        }
        return Ok(None);
    }
    Ok(Some(QuoteSnapshot {
        symbol: q.symbol,
        open: q.open,
        high: q.high,
        low: q.low,
        price: q.price,
        volume: q.volume,
        latest_trading_day: q.latest_trading_day,
    }))
}

//////////////////////////////////////////////////////////////////////////////////////
// Schema
//////////////////////////////////////////////////////////////////////////////////////

/// The latest snapshot for one symbol at fetch time; superseded by the next
/// fetch. All fields stay string-typed.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub price: String,
    pub volume: String,
    pub latest_trading_day: String,
}

#[derive(Deserialize, Debug)]
pub struct RawGlobalQuote {
    #[serde(rename = "Global Quote", default)]
    pub quote: RawQuote,

    #[serde(flatten)]
    pub(crate) refusal: Refusal,
}

// Positional field labels, mapped in one place.
#[derive(Deserialize, Debug, Default)]
pub struct RawQuote {
    #[serde(rename = "01. symbol", default)]
    pub symbol: String,

    #[serde(rename = "02. open", default)]
    pub open: String,

    #[serde(rename = "03. high", default)]
    pub high: String,

    #[serde(rename = "04. low", default)]
    pub low: String,

    #[serde(rename = "05. price", default)]
    pub price: String,

    #[serde(rename = "06. volume", default)]
    pub volume: String,

    #[serde(rename = "07. latest trading day", default)]
    pub latest_trading_day: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_fields_come_from_numbered_labels() {
        let raw: RawGlobalQuote = serde_json::from_str(
            r#"{
                "Global Quote": {
                    "01. symbol": "AAPL",
                    "02. open": "148.00",
                    "03. high": "151.00",
                    "04. low": "147.50",
                    "05. price": "150.00",
                    "06. volume": "1000000",
                    "07. latest trading day": "2024-01-02",
                    "08. previous close": "145.00",
                    "09. change": "5.00",
                    "10. change percent": "3.4483%"
                }
            }"#,
        )
        .unwrap();

        let snap = extran(raw).unwrap().unwrap();
        assert_eq!(snap.symbol, "AAPL");
        assert_eq!(snap.open, "148.00");
        assert_eq!(snap.high, "151.00");
        assert_eq!(snap.low, "147.50");
        assert_eq!(snap.price, "150.00");
        assert_eq!(snap.volume, "1000000");
        assert_eq!(snap.latest_trading_day, "2024-01-02");
    }

    #[test]
    fn unknown_symbol_is_none() {
        let raw: RawGlobalQuote = serde_json::from_str(r#"{"Global Quote": {}}"#).unwrap();
        assert_eq!(extran(raw).unwrap(), None);
    }

    #[test]
    fn refusal_note_is_a_provider_error() {
        let raw: RawGlobalQuote =
            serde_json::from_str(r#"{"Note": "rate limited"}"#).unwrap();
        assert!(matches!(extran(raw), Err(Error::Provider(_))));
    }
}
