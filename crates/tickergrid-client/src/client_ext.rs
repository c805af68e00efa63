use crate::endp::{daily, movers, quote, search};
use crate::error::Result;
use crate::schema::{DailySeries, MoverBoard, QuoteSnapshot, SearchMatch, StockDetail};
use crate::www::Provider;
use reqwest::Client;
use std::future::Future;

pub trait ClientExt {
    fn fetch_movers(&self, provider: &Provider)
        -> impl Future<Output = Result<MoverBoard>> + Send;

    fn fetch_matches(
        &self,
        provider: &Provider,
        keywords: &str,
    ) -> impl Future<Output = Result<Vec<SearchMatch>>> + Send;

    fn fetch_quote(
        &self,
        provider: &Provider,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<QuoteSnapshot>>> + Send;

    fn fetch_daily(
        &self,
        provider: &Provider,
        symbol: &str,
    ) -> impl Future<Output = Result<DailySeries>> + Send;

    fn fetch_detail(
        &self,
        provider: &Provider,
        symbol: &str,
    ) -> impl Future<Output = Result<StockDetail>> + Send;
}

/// Add-on query methods for [`reqwest::Client`], one per query kind.
///
/// [`reqwest::Client`]: https://docs.rs/reqwest/latest/reqwest/struct.Client.html
impl ClientExt for Client {
    /// Fetch the aggregate movers board.
    async fn fetch_movers(&self, provider: &Provider) -> Result<MoverBoard> {
        let url = provider.movers_url();
        log::debug!("Fetching movers board");
        let raw: movers::RawMovers = self.get(url).send().await?.json().await?;
        movers::extran(raw)
    }

    /// Search tickers and company names for `keywords`.
    async fn fetch_matches(
        &self,
        provider: &Provider,
        keywords: &str,
    ) -> Result<Vec<SearchMatch>> {
        let url = provider.search_url(keywords);
        log::debug!("Searching symbols for {keywords:?}");
        let raw: search::RawSearch = self.get(url).send().await?.json().await?;
        search::extran(raw)
    }

    /// Fetch the latest snapshot for a single symbol.
    async fn fetch_quote(&self, provider: &Provider, symbol: &str) -> Result<Option<QuoteSnapshot>> {
        let url = provider.quote_url(symbol);
        log::debug!("[{symbol}] fetching quote snapshot");
        let raw: quote::RawGlobalQuote = self.get(url).send().await?.json().await?;
        quote::extran(raw)
    }

    /// Fetch the daily OHLCV history for a single symbol.
    async fn fetch_daily(&self, provider: &Provider, symbol: &str) -> Result<DailySeries> {
        let url = provider.daily_url(symbol);
        log::debug!("[{symbol}] fetching daily series");
        let raw: daily::RawDaily = self.get(url).send().await?.json().await?;
        daily::extran(raw)
    }

    /// Fetch quote + daily history together; the two requests run
    /// concurrently and settle as one detail result.
    async fn fetch_detail(&self, provider: &Provider, symbol: &str) -> Result<StockDetail> {
        let (quote, series) = futures::join!(
            self.fetch_quote(provider, symbol),
            self.fetch_daily(provider, symbol),
        );
        Ok(StockDetail {
            quote: quote?,
            series: series?,
        })
    }
}
