use crate::app::{App, Focus, LaneState, Route};
use crate::chart;
use crate::table;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use tickergrid_client::schema::SearchMatch;

pub fn draw(frame: &mut Frame, app: &App) {
    match &app.route {
        Route::Dashboard => draw_dashboard(frame, app),
        Route::Stock { symbol } => draw_stock(frame, app, symbol),
    }
}

//////////////////////////////////////////////////////////////////////////////////////
// Dashboard
//////////////////////////////////////////////////////////////////////////////////////

fn draw_dashboard(frame: &mut Frame, app: &App) {
    let matches_height = match &app.matches.state {
        LaneState::Idle => 0,
        LaneState::Loading | LaneState::Failed(_) => 3,
        LaneState::Ready(hits) => (hits.len() as u16 + 2).clamp(3, 8),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Length(matches_height),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0]);
    draw_search_bar(frame, app, chunks[1]);
    draw_matches(frame, app, chunks[2]);
    draw_boards(frame, app, chunks[3]);
    draw_footer(
        frame,
        chunks[4],
        "[Enter] Search  [↑/↓] Pick a match  [Ctrl+R] Refresh  [Esc] Quit",
    );

    if app.overlay_visible() {
        draw_overlay(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Stock Price Checker",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Price, volume and gain or loss of the most actively traded, top gaining and top losing stocks."),
        Line::from("Search for a stock to get a 24 hour snapshot and a daily candlestick chart."),
        Line::from(Span::styled(
            "The free provider tier is limited to 25 requests per day.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let header = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(header, area);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.focus == Focus::Search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let text = if app.focus == Focus::Search {
        format!("{}▏", app.keyword)
    } else {
        app.keyword.clone()
    };
    let bar = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search for a stock (Enter to search) "),
    );
    frame.render_widget(bar, area);
}

fn draw_matches(frame: &mut Frame, app: &App, area: Rect) {
    if area.height == 0 {
        return;
    }
    match &app.matches.state {
        LaneState::Idle => {}
        LaneState::Loading => {
            frame.render_widget(status_line("Searching ...", Color::Cyan), area);
        }
        LaneState::Failed(msg) => {
            frame.render_widget(status_line(msg, Color::Red), area);
        }
        LaneState::Ready(hits) if hits.is_empty() => {
            frame.render_widget(status_line("No matches.", Color::DarkGray), area);
        }
        LaneState::Ready(hits) => {
            let items: Vec<ListItem> = hits.iter().map(match_item).collect();
            let highlight = if app.focus == Focus::Matches {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Matches "))
                .highlight_style(highlight)
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(Some(app.selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn match_item(hit: &SearchMatch) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{:<12}", hit.symbol),
            Style::default().fg(Color::White),
        ),
        Span::styled(hit.name.clone(), Style::default().fg(Color::DarkGray)),
    ]))
}

fn draw_boards(frame: &mut Frame, app: &App, area: Rect) {
    match &app.movers.state {
        LaneState::Idle => {}
        LaneState::Loading => {
            frame.render_widget(status_line("Fetching movers ...", Color::Cyan), area);
        }
        LaneState::Failed(msg) => {
            frame.render_widget(status_line(msg, Color::Red), area);
        }
        LaneState::Ready(board) => {
            let thirds = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                    Constraint::Percentage(33),
                ])
                .split(area);
            frame.render_widget(
                table::mover_table("Most Actively Traded", &board.most_active),
                thirds[0],
            );
            frame.render_widget(table::mover_table("Top Gainers", &board.gainers), thirds[1]);
            frame.render_widget(table::mover_table("Top Losers", &board.losers), thirds[2]);
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////
// Stock detail
//////////////////////////////////////////////////////////////////////////////////////

fn draw_stock(frame: &mut Frame, app: &App, symbol: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(1)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(rows[0]);

    draw_quote_panel(frame, app, symbol, columns[0]);
    draw_chart_panel(frame, app, symbol, columns[1]);
    draw_footer(
        frame,
        rows[1],
        "[Esc] Back  [q] Quit  [Ctrl+R] Refresh  [+/-] Zoom  [←/→] Pan",
    );
}

fn draw_quote_panel(frame: &mut Frame, app: &App, symbol: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Stock Info (24h) ");

    let lines = match &app.detail.state {
        LaneState::Idle => vec![Line::from("")],
        LaneState::Loading => vec![Line::from(Span::styled(
            "Fetching quote ...",
            Style::default().fg(Color::Cyan),
        ))],
        LaneState::Failed(msg) => vec![Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Red),
        ))],
        LaneState::Ready(detail) => {
            let mut lines = vec![Line::from(format!("Symbol : {symbol}"))];
            match &detail.quote {
                Some(q) => {
                    lines.push(Line::from(format!("Opening price: ${}", q.open)));
                    lines.push(Line::from(format!("High: ${}", q.high)));
                    lines.push(Line::from(format!("Low: ${}", q.low)));
                    lines.push(Line::from(format!("Current price: ${}", q.price)));
                    lines.push(Line::from(format!(
                        "Volume: {}",
                        table::format_volume(&q.volume)
                    )));
                    lines.push(Line::from(format!(
                        "Latest trading day: {}",
                        q.latest_trading_day
                    )));
                }
                None => lines.push(Line::from(Span::styled(
                    "No quote data for this symbol.",
                    Style::default().fg(Color::DarkGray),
                ))),
            }
            lines
        }
    };

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

fn draw_chart_panel(frame: &mut Frame, app: &App, symbol: &str, area: Rect) {
    match &app.detail.state {
        LaneState::Idle => {}
        LaneState::Loading => {
            let block = Block::default().borders(Borders::ALL).title(" Chart ");
            let loading = Paragraph::new("Loading ...")
                .style(Style::default().fg(Color::Cyan))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
        }
        LaneState::Failed(msg) => {
            let block = Block::default().borders(Borders::ALL).title(" Chart ");
            let failed = Paragraph::new(msg.clone())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(failed, area);
        }
        LaneState::Ready(_) => {
            chart::render(frame, area, &app.series, app.viewport, symbol);
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////
// Shared pieces
//////////////////////////////////////////////////////////////////////////////////////

fn draw_footer(frame: &mut Frame, area: Rect, hints: &str) {
    let clock = chrono::Local::now().format("%H:%M:%S").to_string();
    let line = Line::from(vec![
        Span::styled(hints.to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(clock, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn status_line(text: &str, color: Color) -> Paragraph<'static> {
    Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL))
}

fn draw_overlay(frame: &mut Frame) {
    let area = centered(frame.area(), 24, 3);
    frame.render_widget(Clear, area);
    let spinner = Paragraph::new("Loading ...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(spinner, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
