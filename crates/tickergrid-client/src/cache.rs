use crate::schema::{MoverBoard, SearchMatch, StockDetail};
use std::collections::HashMap;

/// Process-lifetime cache of settled query results, keyed by
/// (query kind, parameters).
///
/// Owned by the caller and injected into the view layer; nothing in here
/// expires on its own. Entries are dropped only by the explicit
/// `invalidate_*` calls a user-triggered refetch makes.
#[derive(Debug, Default)]
pub struct QueryCache {
    movers: Option<MoverBoard>,
    matches: HashMap<String, Vec<SearchMatch>>,
    details: HashMap<String, StockDetail>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movers(&self) -> Option<&MoverBoard> {
        self.movers.as_ref()
    }

    pub fn put_movers(&mut self, board: MoverBoard) {
        self.movers = Some(board);
    }

    pub fn invalidate_movers(&mut self) {
        self.movers = None;
    }

    pub fn matches(&self, keyword: &str) -> Option<&Vec<SearchMatch>> {
        self.matches.get(keyword)
    }

    pub fn put_matches(&mut self, keyword: String, hits: Vec<SearchMatch>) {
        self.matches.insert(keyword, hits);
    }

    pub fn invalidate_matches(&mut self, keyword: &str) {
        self.matches.remove(keyword);
    }

    pub fn detail(&self, symbol: &str) -> Option<&StockDetail> {
        self.details.get(symbol)
    }

    pub fn put_detail(&mut self, symbol: String, detail: StockDetail) {
        self.details.insert(symbol, detail);
    }

    pub fn invalidate_symbol(&mut self, symbol: &str) {
        self.details.remove(symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_independent_per_kind_and_parameter() {
        let mut cache = QueryCache::new();
        cache.put_matches("apple".to_string(), vec![]);
        cache.put_detail("AAPL".to_string(), StockDetail::default());

        assert!(cache.movers().is_none());
        assert!(cache.matches("apple").is_some());
        assert!(cache.matches("ibm").is_none());
        assert!(cache.detail("AAPL").is_some());
        assert!(cache.detail("IBM").is_none());
    }

    #[test]
    fn invalidation_only_touches_the_named_entry() {
        let mut cache = QueryCache::new();
        cache.put_movers(MoverBoard::default());
        cache.put_matches("apple".to_string(), vec![]);
        cache.put_detail("AAPL".to_string(), StockDetail::default());
        cache.put_detail("IBM".to_string(), StockDetail::default());

        cache.invalidate_symbol("AAPL");
        assert!(cache.detail("AAPL").is_none());
        assert!(cache.detail("IBM").is_some());
        assert!(cache.movers().is_some());

        cache.invalidate_movers();
        assert!(cache.movers().is_none());
        assert!(cache.matches("apple").is_some());

        cache.invalidate_matches("apple");
        assert!(cache.matches("apple").is_none());
    }
}
