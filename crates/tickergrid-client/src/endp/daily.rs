use super::Refusal;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

//////////////////////////////////////////////////////////////////////////////////////
// Functions
//////////////////////////////////////////////////////////////////////////////////////

/// Translate a raw `TIME_SERIES_DAILY` payload into a [`DailySeries`].
///
/// The provider emits the series newest-first; that insertion order is kept
/// verbatim (hence [`IndexMap`], not a sorted map) because the chart layer
/// owns the reversal to chronological order.
pub fn extran(raw: RawDaily) -> Result<DailySeries> {
    if raw.series.is_empty() {
        if let Some(msg) = raw.refusal.into_message() {
            return Err(Error::Provider(msg));
        }
    }
    Ok(raw
        .series
        .into_iter()
        .map(|(stamp, bar)| {
            (
                stamp,
                DayBar {
                    open: bar.open,
                    high: bar.high,
                    low: bar.low,
                    close: bar.close,
                    volume: bar.volume,
                },
            )
        })
        .collect())
}

//////////////////////////////////////////////////////////////////////////////////////
// Schema
//////////////////////////////////////////////////////////////////////////////////////

/// Daily history for one symbol, keyed by date stamp in provider order
/// (descending by time):
/// ```json
/// "series": {
///      "2024-01-02": { "open": "10", "high": "12", "low": "9", "close": "11", "volume": "500" },
///      "2024-01-01": { "open": "8", "high": "10", "low": "7", "close": "9", "volume": "300" }
/// }
/// ```
pub type DailySeries = IndexMap<String, DayBar>;

/// OHLCV fields for one trading day, string-typed like everything else at
/// this layer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DayBar {
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

#[derive(Deserialize, Debug)]
pub struct RawDaily {
    #[serde(rename = "Time Series (Daily)", default)]
    pub series: IndexMap<String, RawBar>,

    #[serde(flatten)]
    pub(crate) refusal: Refusal,
}

// Positional field labels, mapped in one place.
#[derive(Deserialize, Debug)]
pub struct RawBar {
    #[serde(rename = "1. open")]
    pub open: String,

    #[serde(rename = "2. high")]
    pub high: String,

    #[serde(rename = "3. low")]
    pub low: String,

    #[serde(rename = "4. close")]
    pub close: String,

    #[serde(rename = "5. volume")]
    pub volume: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_order_is_preserved() {
        let raw: RawDaily = serde_json::from_str(
            r#"{
                "Meta Data": {
                    "1. Information": "Daily Prices (open, high, low, close) and Volumes",
                    "2. Symbol": "TEST"
                },
                "Time Series (Daily)": {
                    "2024-01-02": {"1. open": "10", "2. high": "12", "3. low": "9", "4. close": "11", "5. volume": "500"},
                    "2024-01-01": {"1. open": "8", "2. high": "10", "3. low": "7", "4. close": "9", "5. volume": "300"}
                }
            }"#,
        )
        .unwrap();

        let series = extran(raw).unwrap();
        let stamps: Vec<&str> = series.keys().map(String::as_str).collect();
        assert_eq!(stamps, ["2024-01-02", "2024-01-01"]);

        let newest = &series["2024-01-02"];
        assert_eq!(newest.open, "10");
        assert_eq!(newest.high, "12");
        assert_eq!(newest.low, "9");
        assert_eq!(newest.close, "11");
        assert_eq!(newest.volume, "500");
    }

    #[test]
    fn missing_series_defaults_to_empty() {
        let raw: RawDaily = serde_json::from_str("{}").unwrap();
        assert!(extran(raw).unwrap().is_empty());
    }

    #[test]
    fn refusal_note_is_a_provider_error() {
        let raw: RawDaily = serde_json::from_str(
            r#"{"Error Message": "Invalid API call. Please retry or visit the documentation."}"#,
        )
        .unwrap();
        assert!(matches!(extran(raw), Err(Error::Provider(_))));
    }
}
