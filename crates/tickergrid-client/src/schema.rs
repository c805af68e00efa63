pub use crate::endp::daily::{DailySeries, DayBar};
pub use crate::endp::movers::{MoverBoard, MoverRecord};
pub use crate::endp::quote::QuoteSnapshot;
pub use crate::endp::search::SearchMatch;

use serde::{Deserialize, Serialize};

/// Everything the detail view needs for a single symbol: the latest snapshot
/// (may be absent for an unknown symbol) and the daily history,
/// ```json
/// "quote": {
///      "symbol": "AAPL",
///      "price": "150.00"
/// },
/// "series": {
///      "2024-01-02": { "open": "10" },
///      "2024-01-01": { "open": "8" }
/// }
/// ```
/// fetched together as one query lane.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct StockDetail {
    pub quote: Option<QuoteSnapshot>,
    pub series: DailySeries,
}
