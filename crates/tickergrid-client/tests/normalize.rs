//! End-to-end normalization of full provider payloads, as captured from the
//! live endpoints.

use tickergrid_client::endp::{daily, movers, quote, search};
use tickergrid_client::error::Error;

const MOVERS_PAYLOAD: &str = r#"{
    "metadata": "Top gainers, losers, and most actively traded US tickers",
    "last_updated": "2024-01-02 16:15:59 US/Eastern",
    "top_gainers": [
        {"ticker": "AAPL", "price": "150.00", "change_amount": "5.00", "change_percentage": "3.45%", "volume": "1000000"}
    ],
    "top_losers": [
        {"ticker": "XYZ", "price": "9.50", "change_amount": "-0.50", "change_percentage": "-5.0%", "volume": "42000"},
        {"ticker": "QRS", "price": "1.20", "change_amount": "-0.01", "change_percentage": "-0.8264%", "volume": "900"}
    ],
    "most_actively_traded": [
        {"ticker": "TSLA", "price": "250.00", "change_amount": "0.00", "change_percentage": "0.0%", "volume": "98123456"}
    ]
}"#;

const DAILY_PAYLOAD: &str = r#"{
    "Meta Data": {
        "1. Information": "Daily Prices (open, high, low, close) and Volumes",
        "2. Symbol": "TEST",
        "3. Last Refreshed": "2024-01-02",
        "4. Output Size": "Compact",
        "5. Time Zone": "US/Eastern"
    },
    "Time Series (Daily)": {
        "2024-01-02": {"1. open": "10", "2. high": "12", "3. low": "9", "4. close": "11", "5. volume": "500"},
        "2024-01-01": {"1. open": "8", "2. high": "10", "3. low": "7", "4. close": "9", "5. volume": "300"}
    }
}"#;

#[test]
fn movers_payload_normalizes_to_a_board() {
    let raw: movers::RawMovers = serde_json::from_str(MOVERS_PAYLOAD).unwrap();
    let board = movers::extran(raw).unwrap();

    assert_eq!(board.gainers.len(), 1);
    let row = &board.gainers[0];
    assert_eq!(row.ticker, "AAPL");
    assert_eq!(row.price, "150.00");
    assert_eq!(row.change_amount, "5.00");
    assert_eq!(row.change_percentage, "3.45%");
    assert_eq!(row.volume, "1000000");

    // loser order as received
    let losers: Vec<&str> = board.losers.iter().map(|m| m.ticker.as_str()).collect();
    assert_eq!(losers, ["XYZ", "QRS"]);
    assert_eq!(board.most_active[0].ticker, "TSLA");
}

#[test]
fn daily_payload_keeps_descending_provider_order() {
    let raw: daily::RawDaily = serde_json::from_str(DAILY_PAYLOAD).unwrap();
    let series = daily::extran(raw).unwrap();

    let stamps: Vec<&str> = series.keys().map(String::as_str).collect();
    assert_eq!(stamps, ["2024-01-02", "2024-01-01"]);
    assert_eq!(series["2024-01-01"].close, "9");
}

#[test]
fn search_and_quote_payloads_normalize() {
    let raw: search::RawSearch = serde_json::from_str(
        r#"{
            "bestMatches": [
                {"1. symbol": "AAPL", "2. name": "Apple Inc", "3. type": "Equity", "4. region": "United States"},
                {"1. symbol": "AAPL34.SAO", "2. name": "Apple Inc", "3. type": "Equity", "4. region": "Brazil/Sao Paolo"}
            ]
        }"#,
    )
    .unwrap();
    let matches = search::extran(raw).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].symbol, "AAPL");
    assert_eq!(matches[1].symbol, "AAPL34.SAO");

    let raw: quote::RawGlobalQuote = serde_json::from_str(
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
    let snap = quote::extran(raw).unwrap().unwrap();
    assert_eq!(snap.price, "150.00");
    assert_eq!(snap.volume, "1000000");
}

#[test]
fn rate_limited_payloads_surface_the_note_on_every_shape() {
    let note = r#"{"Information": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#;

    let raw: movers::RawMovers = serde_json::from_str(note).unwrap();
    assert!(matches!(movers::extran(raw), Err(Error::Provider(_))));

    let raw: search::RawSearch = serde_json::from_str(note).unwrap();
    assert!(matches!(search::extran(raw), Err(Error::Provider(_))));

    let raw: quote::RawGlobalQuote = serde_json::from_str(note).unwrap();
    assert!(matches!(quote::extran(raw), Err(Error::Provider(_))));

    let raw: daily::RawDaily = serde_json::from_str(note).unwrap();
    assert!(matches!(daily::extran(raw), Err(Error::Provider(_))));
}
