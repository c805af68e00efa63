use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use tickergrid_client::schema::MoverRecord;

const GAIN: Color = Color::Green;
const LOSS: Color = Color::Red;

/// Loss iff the change amount parses strictly negative; zero and anything
/// unparseable count as a gain.
pub fn is_loss(change_amount: &str) -> bool {
    change_amount
        .trim()
        .parse::<f64>()
        .map(|v| v < 0.0)
        .unwrap_or(false)
}

/// Volume with thousands separators, `"1000000"` -> `"$1,000,000"`. The
/// record field itself is never mutated.
pub fn format_volume(volume: &str) -> String {
    let v = volume.trim();
    if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) {
        format!("${}", group_thousands(v))
    } else {
        format!("${v}")
    }
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(bytes.len() + bytes.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// Cell text for one record, in column order.
pub fn row_text(record: &MoverRecord) -> [String; 5] {
    [
        record.ticker.clone(),
        record.price.clone(),
        record.change_amount.clone(),
        record.change_percentage.clone(),
        format_volume(&record.volume),
    ]
}

/// One row per record, input order preserved; the change cells carry the
/// gain/loss color.
pub fn mover_rows(records: &[MoverRecord]) -> Vec<Row<'static>> {
    records
        .iter()
        .map(|record| {
            let change = Style::default().fg(if is_loss(&record.change_amount) {
                LOSS
            } else {
                GAIN
            });
            let [ticker, price, amount, pct, volume] = row_text(record);
            Row::new(vec![
                Cell::from(ticker),
                Cell::from(price),
                Cell::from(amount).style(change),
                Cell::from(pct).style(change),
                Cell::from(volume),
            ])
        })
        .collect()
}

pub fn mover_table<'a>(title: &'a str, records: &[MoverRecord]) -> Table<'a> {
    let header = Row::new(["Ticker", "Price", "Change amount", "Change percentage", "Volume"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    Table::new(
        mover_rows(records),
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(18),
            Constraint::Min(12),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn record(ticker: &str, change_amount: &str) -> MoverRecord {
        MoverRecord {
            ticker: ticker.to_string(),
            price: "1.00".to_string(),
            change_amount: change_amount.to_string(),
            change_percentage: "0.0%".to_string(),
            volume: "100".to_string(),
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn loss_only_when_strictly_negative() {
        assert!(is_loss("-0.01"));
        assert!(is_loss("-5"));
        assert!(!is_loss("0"));
        assert!(!is_loss("0.00"));
        assert!(!is_loss("5.00"));
        // unparseable counts as gain, mirroring a NaN comparison
        assert!(!is_loss(""));
        assert!(!is_loss("n/a"));
    }

    #[test]
    fn volume_gets_thousands_separators() {
        assert_eq!(format_volume("1000000"), "$1,000,000");
        assert_eq!(format_volume("1234"), "$1,234");
        assert_eq!(format_volume("500"), "$500");
        assert_eq!(format_volume("abc"), "$abc");
    }

    #[test]
    fn scenario_row_renders_expected_cells() {
        let record = MoverRecord {
            ticker: "AAPL".to_string(),
            price: "150.00".to_string(),
            change_amount: "5.00".to_string(),
            change_percentage: "3.45%".to_string(),
            volume: "1000000".to_string(),
        };
        assert_eq!(
            row_text(&record),
            [
                "AAPL".to_string(),
                "150.00".to_string(),
                "5.00".to_string(),
                "3.45%".to_string(),
                "$1,000,000".to_string()
            ]
        );
        assert!(!is_loss(&record.change_amount));
    }

    #[test]
    fn one_row_per_record_in_input_order() {
        let records = vec![record("CCC", "1"), record("AAA", "-1"), record("BBB", "0")];
        assert_eq!(mover_rows(&records).len(), 3);

        // drawn order matches input order, not a re-sort
        let backend = TestBackend::new(70, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let table = mover_table("Movers", &records);
                frame.render_widget(table, frame.area());
            })
            .unwrap();

        let screen = screen_text(&terminal);
        let ccc = screen.find("CCC").unwrap();
        let aaa = screen.find("AAA").unwrap();
        let bbb = screen.find("BBB").unwrap();
        assert!(ccc < aaa && aaa < bbb);
    }

    #[test]
    fn empty_input_renders_an_empty_body() {
        assert!(mover_rows(&[]).is_empty());

        let backend = TestBackend::new(70, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let table = mover_table("Movers", &[]);
                frame.render_widget(table, frame.area());
            })
            .unwrap();
        let screen = screen_text(&terminal);
        assert!(screen.contains("Ticker"));
    }
}
