use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tickergrid_client::schema::DailySeries;

//////////////////////////////////////////////////////////////////////////////////////
// Series construction
//////////////////////////////////////////////////////////////////////////////////////

/// One candle, parsed to numbers at this boundary only.
///
/// `tuple()` yields `[open, close, low, high]` - the candlestick rendering
/// convention, not the provider's OHLC field order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub low: f64,
    pub high: f64,
}

impl Candle {
    pub fn tuple(&self) -> [f64; 4] {
        [self.open, self.close, self.low, self.high]
    }

    fn bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Chart-ready daily series: timestamp labels and candles as parallel
/// sequences in ascending chronological order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandleSeries {
    pub labels: Vec<String>,
    pub candles: Vec<Candle>,
}

impl CandleSeries {
    /// Reshape a provider series (newest-first) into ascending order. An
    /// empty series yields an empty chart, never an error.
    pub fn from_daily(series: &DailySeries) -> Self {
        let mut labels = Vec::with_capacity(series.len());
        let mut candles = Vec::with_capacity(series.len());
        for (stamp, bar) in series.iter().rev() {
            labels.push(stamp.clone());
            candles.push(Candle {
                open: num(&bar.open),
                close: num(&bar.close),
                low: num(&bar.low),
                high: num(&bar.high),
            });
        }
        Self { labels, candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }
}

fn num(s: &str) -> f64 {
    s.trim().parse().unwrap_or(f64::NAN)
}

//////////////////////////////////////////////////////////////////////////////////////
// Viewport
//////////////////////////////////////////////////////////////////////////////////////

/// Visible window over the series domain, in percent.
///
/// The default shows the most recent half of the series, not "all data".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub start: u8,
    pub end: u8,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { start: 50, end: 100 }
    }
}

impl Viewport {
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let lo = len * self.start as usize / 100;
        let hi = len * self.end as usize / 100;
        lo..hi.max(lo)
    }

    pub fn zoom_in(&mut self) {
        self.start = (self.start + 10).min(self.end.saturating_sub(10));
    }

    pub fn zoom_out(&mut self) {
        self.start = self.start.saturating_sub(10);
    }

    pub fn pan_left(&mut self) {
        let step = self.start.min(5);
        self.start -= step;
        self.end -= step;
    }

    pub fn pan_right(&mut self) {
        let step = (100 - self.end).min(5);
        self.start += step;
        self.end += step;
    }
}

//////////////////////////////////////////////////////////////////////////////////////
// Rendering
//////////////////////////////////////////////////////////////////////////////////////

const BODY: char = '┃';
const BODY_LOWER: char = '╻';
const BODY_UPPER: char = '╹';
const WICK: char = '│';
const WICK_LOWER: char = '╷';
const WICK_UPPER: char = '╵';

const BULLISH: Color = Color::Green;
const BEARISH: Color = Color::Red;

const Y_AXIS_WIDTH: u16 = 11;
const MIN_GRID_WIDTH: u16 = 10;
const MIN_GRID_HEIGHT: u16 = 4;

/// Draw the candlestick chart for the viewport's window of `series`.
pub fn render(frame: &mut Frame, area: Rect, series: &CandleSeries, viewport: Viewport, symbol: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {symbol} - daily ({} candles) ", series.len()));

    if series.is_empty() {
        let empty = Paragraph::new("no series data")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let height = area.height.saturating_sub(3); // borders + x-axis line
    let width = area.width.saturating_sub(2 + Y_AXIS_WIDTH);
    if height < MIN_GRID_HEIGHT || width < MIN_GRID_WIDTH {
        let narrow = Paragraph::new("terminal too small for the chart")
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(narrow, area);
        return;
    }

    let window = viewport.range(series.len());
    let mut candles = &series.candles[window.clone()];
    let mut labels = &series.labels[window];

    // keep the most recent candles when the window outgrows the columns
    if candles.len() > width as usize {
        let cut = candles.len() - width as usize;
        candles = &candles[cut..];
        labels = &labels[cut..];
    }

    let grid = Grid::new(candles, height, width);
    let mut lines = grid.rows();
    lines.push(x_axis(labels, &grid.positions(), width as usize));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

struct Grid<'a> {
    candles: &'a [Candle],
    min: f64,
    max: f64,
    height: u16,
    width: u16,
}

impl<'a> Grid<'a> {
    fn new(candles: &'a [Candle], height: u16, width: u16) -> Self {
        let (min, max) = bounds(candles);
        Self {
            candles,
            min,
            max,
            height,
            width,
        }
    }

    fn scale(&self, price: f64) -> f64 {
        (price - self.min) / (self.max - self.min) * self.height as f64
    }

    /// Glyph for one candle within the price cell `(row - 1, row]`, rows
    /// counted from the bottom of the grid.
    fn glyph(&self, candle: &Candle, row: u16) -> char {
        let cell_lo = row as f64 - 1.0;
        let cell_hi = row as f64;

        let high = self.scale(candle.high);
        let low = self.scale(candle.low);
        let top = self.scale(candle.open.max(candle.close));
        let bot = self.scale(candle.open.min(candle.close));

        // unparseable fields come through as NaN; leave the column blank
        if !(high.is_finite() && low.is_finite() && top.is_finite() && bot.is_finite()) {
            return ' ';
        }

        let body = overlap(bot, top, cell_lo, cell_hi);
        let wick = overlap(low, high, cell_lo, cell_hi);

        if body >= 0.5 {
            BODY
        } else if body > 0.0 {
            if top <= cell_lo + 0.5 {
                BODY_LOWER
            } else {
                BODY_UPPER
            }
        } else if wick >= 0.5 {
            WICK
        } else if wick > 0.0 {
            if high <= cell_lo + 0.5 {
                WICK_LOWER
            } else {
                WICK_UPPER
            }
        } else {
            ' '
        }
    }

    /// Column of each candle; computed from the index so rounding drift
    /// never accumulates.
    fn positions(&self) -> Vec<usize> {
        let width = self.width as usize;
        let n = self.candles.len();
        let spacing = width as f64 / n as f64;
        (0..n)
            .map(|i| ((i as f64 * spacing).round() as usize).min(width.saturating_sub(1)))
            .collect()
    }

    fn y_label(&self, row: u16) -> String {
        if row % 4 == 0 {
            let price = self.min + row as f64 * (self.max - self.min) / self.height as f64;
            format!("{:>8.2} │ ", price)
        } else {
            format!("{:>8} │ ", "")
        }
    }

    fn rows(&self) -> Vec<Line<'static>> {
        let positions = self.positions();
        let mut lines = Vec::with_capacity(self.height as usize);

        for row in (1..=self.height).rev() {
            let mut cells = vec![(' ', Color::Reset); self.width as usize];
            for (candle, &col) in self.candles.iter().zip(&positions) {
                let ch = self.glyph(candle, row);
                if ch != ' ' {
                    let color = if candle.bullish() { BULLISH } else { BEARISH };
                    cells[col] = (ch, color);
                }
            }

            let mut spans = vec![Span::styled(
                self.y_label(row),
                Style::default().fg(Color::DarkGray),
            )];
            for (ch, color) in cells {
                spans.push(Span::styled(ch.to_string(), Style::default().fg(color)));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

fn bounds(candles: &[Candle]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for c in candles {
        if c.low < lo {
            lo = c.low;
        }
        if c.high > hi {
            hi = c.high;
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let margin = if hi > lo { (hi - lo) * 0.02 } else { 1.0 };
    (lo - margin, hi + margin)
}

fn overlap(a_lo: f64, a_hi: f64, b_lo: f64, b_hi: f64) -> f64 {
    (a_hi.min(b_hi) - a_lo.max(b_lo)).max(0.0)
}

/// First, middle, and last visible dates under their candles.
fn x_axis(labels: &[String], positions: &[usize], width: usize) -> Line<'static> {
    let mut row = vec![' '; width];
    let mut picks = vec![0, labels.len() / 2, labels.len().saturating_sub(1)];
    picks.dedup();

    let mut last_end = 0usize;
    for idx in picks {
        let label = &labels[idx];
        let col = positions.get(idx).copied().unwrap_or(0);
        let start = col.min(width.saturating_sub(label.len()));
        if idx > 0 && start < last_end + 2 {
            continue;
        }
        for (offset, ch) in label.chars().enumerate() {
            if start + offset < width {
                row[start + offset] = ch;
            }
        }
        last_end = start + label.len();
    }

    let padding = format!("{:>width$}", "", width = Y_AXIS_WIDTH as usize);
    Line::from(vec![
        Span::raw(padding),
        Span::styled(row.into_iter().collect::<String>(), Style::default().fg(Color::DarkGray)),
    ])
}
