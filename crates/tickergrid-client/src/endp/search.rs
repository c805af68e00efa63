use super::Refusal;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

//////////////////////////////////////////////////////////////////////////////////////
// Functions
//////////////////////////////////////////////////////////////////////////////////////

/// Translate a raw `SYMBOL_SEARCH` payload into a list of [`SearchMatch`].
///
/// No matches is a valid outcome (unknown keyword); only an empty payload
/// with a refusal note becomes an error.
pub fn extran(raw: RawSearch) -> Result<Vec<SearchMatch>> {
    if raw.best_matches.is_empty() {
        if let Some(msg) = raw.refusal.into_message() {
            return Err(Error::Provider(msg));
        }
    }
    Ok(raw
        .best_matches
        .into_iter()
        .map(|m| SearchMatch {
            symbol: m.symbol,
            name: m.name,
        })
        .collect())
}

//////////////////////////////////////////////////////////////////////////////////////
// Schema
//////////////////////////////////////////////////////////////////////////////////////

/// One search hit, discarded when a newer search supersedes it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub symbol: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct RawSearch {
    #[serde(rename = "bestMatches", default)]
    pub best_matches: Vec<RawMatch>,

    #[serde(flatten)]
    pub(crate) refusal: Refusal,
}

// The provider labels these fields positionally ("1. symbol") rather than
// with stable identifiers; this struct is the single place that mapping
// lives.
#[derive(Deserialize, Debug)]
pub struct RawMatch {
    #[serde(rename = "1. symbol")]
    pub symbol: String,

    #[serde(rename = "2. name")]
    pub name: String,
}
