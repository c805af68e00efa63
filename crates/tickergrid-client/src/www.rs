use crate::error::{Error, Result};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Quote-provider endpoint configuration.
///
/// Every query follows the same wire pattern:
///
/// ```text
/// {base}?function={FUNCTION}&{params}&apikey={token}
/// ```
///
/// The api key is a single static query parameter; there is no token refresh.
#[derive(Debug, Clone)]
pub struct Provider {
    base_url: Url,
    api_key: String,
}

impl Provider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid provider base url: {e}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Read `ALPHAVANTAGE_API_KEY` (required) and `ALPHAVANTAGE_BASE_URL`
    /// (optional override) from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ALPHAVANTAGE_API_KEY")
            .map_err(|_| Error::Config("ALPHAVANTAGE_API_KEY is not set".to_string()))?;
        let base_url =
            std::env::var("ALPHAVANTAGE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url, &api_key)
    }

    fn query(&self, function: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("function", function);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("apikey", &self.api_key);
        }
        url
    }

    /// `TOP_GAINERS_LOSERS` - the aggregate movers board.
    pub fn movers_url(&self) -> Url {
        self.query("TOP_GAINERS_LOSERS", &[])
    }

    /// `SYMBOL_SEARCH` - free-text ticker/company lookup.
    pub fn search_url(&self, keywords: &str) -> Url {
        self.query("SYMBOL_SEARCH", &[("keywords", keywords)])
    }

    /// `GLOBAL_QUOTE` - the latest snapshot for one symbol.
    pub fn quote_url(&self, symbol: &str) -> Url {
        self.query("GLOBAL_QUOTE", &[("symbol", symbol)])
    }

    /// `TIME_SERIES_DAILY` - the daily OHLCV history for one symbol.
    pub fn daily_url(&self, symbol: &str) -> Url {
        self.query("TIME_SERIES_DAILY", &[("symbol", symbol)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> Provider {
        Provider::new(DEFAULT_BASE_URL, "demo").unwrap()
    }

    #[test]
    fn movers_url_follows_wire_pattern() {
        assert_eq!(
            provider().movers_url().as_str(),
            "https://www.alphavantage.co/query?function=TOP_GAINERS_LOSERS&apikey=demo"
        );
    }

    #[test]
    fn search_url_encodes_keywords() {
        assert_eq!(
            provider().search_url("apple inc").as_str(),
            "https://www.alphavantage.co/query?function=SYMBOL_SEARCH&keywords=apple+inc&apikey=demo"
        );
    }

    #[test]
    fn symbol_urls_carry_the_symbol() {
        let p = provider();
        assert_eq!(
            p.quote_url("AAPL").as_str(),
            "https://www.alphavantage.co/query?function=GLOBAL_QUOTE&symbol=AAPL&apikey=demo"
        );
        assert_eq!(
            p.daily_url("IBM").as_str(),
            "https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=IBM&apikey=demo"
        );
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        assert!(matches!(
            Provider::new("not a url", "demo"),
            Err(Error::Config(_))
        ));
    }
}
