use super::Refusal;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

//////////////////////////////////////////////////////////////////////////////////////
// Functions
//////////////////////////////////////////////////////////////////////////////////////

/// Translate a raw `TOP_GAINERS_LOSERS` payload into a [`MoverBoard`].
///
/// The three arrays pass through as received (the provider already orders
/// them); an entirely empty payload that carries a refusal note is reported
/// as a provider error instead of an empty board.
pub fn extran(raw: RawMovers) -> Result<MoverBoard> {
    if raw.most_actively_traded.is_empty() && raw.top_gainers.is_empty() && raw.top_losers.is_empty()
    {
        if let Some(msg) = raw.refusal.into_message() {
            return Err(Error::Provider(msg));
        }
    }
    Ok(MoverBoard {
        most_active: raw.most_actively_traded,
        gainers: raw.top_gainers,
        losers: raw.top_losers,
        last_updated: raw.last_updated,
    })
}

//////////////////////////////////////////////////////////////////////////////////////
// Schema
//////////////////////////////////////////////////////////////////////////////////////

/// One row of an aggregate movers list. Unlike the other endpoints, the
/// provider uses plain field names here, so the record deserializes directly:
/// ```json
/// {
///     "ticker": "AAPL",
///     "price": "150.00",
///     "change_amount": "5.00",
///     "change_percentage": "3.45%",
///     "volume": "1000000"
/// }
/// ```
/// Every field stays string-typed; consumers parse explicitly when they need
/// a number (sign checks, display grouping).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MoverRecord {
    pub ticker: String,
    pub price: String,
    pub change_amount: String,
    pub change_percentage: String,
    pub volume: String,
}

/// The normalized movers board: most actively traded, top gainers, top
/// losers, ordered as received.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MoverBoard {
    pub most_active: Vec<MoverRecord>,
    pub gainers: Vec<MoverRecord>,
    pub losers: Vec<MoverRecord>,
    pub last_updated: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RawMovers {
    #[serde(default)]
    pub most_actively_traded: Vec<MoverRecord>,

    #[serde(default)]
    pub top_gainers: Vec<MoverRecord>,

    #[serde(default)]
    pub top_losers: Vec<MoverRecord>,

    pub last_updated: Option<String>,

    #[serde(flatten)]
    pub(crate) refusal: Refusal,
}
