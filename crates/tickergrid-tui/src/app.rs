use crate::chart::{CandleSeries, Viewport};
use crate::term::Tui;
use crate::view;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Duration;
use tickergrid_client::schema::{MoverBoard, SearchMatch, StockDetail};
use tickergrid_client::{build_client, ClientExt, Provider, QueryCache};
use tokio::sync::mpsc;

//////////////////////////////////////////////////////////////////////////////////////
// Query lanes
//////////////////////////////////////////////////////////////////////////////////////

/// One route per view: the dashboard, or the detail page for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Dashboard,
    Stock { symbol: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum LaneState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LaneState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LaneState::Loading)
    }
}

impl<T> Default for LaneState<T> {
    fn default() -> Self {
        LaneState::Idle
    }
}

/// An independent asynchronous query stream with its own result slot.
///
/// Every spawned fetch carries a sequence id; only the id of the lane's
/// newest request settles it, so a slow stale response can never overwrite
/// fresher state.
#[derive(Debug, Default)]
pub struct Lane<T> {
    pub state: LaneState<T>,
    seq: u64,
    pending: Option<u64>,
}

impl<T> Lane<T> {
    fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.pending = Some(self.seq);
        self.state = LaneState::Loading;
        self.seq
    }

    fn settle(&mut self, id: u64, outcome: std::result::Result<T, String>) -> bool {
        if !is_current(self.pending, id) {
            return false;
        }
        self.pending = None;
        self.state = match outcome {
            Ok(value) => LaneState::Ready(value),
            Err(msg) => LaneState::Failed(msg),
        };
        true
    }

    fn reset(&mut self) {
        self.pending = None;
        self.state = LaneState::Idle;
    }
}

fn is_current(pending: Option<u64>, id: u64) -> bool {
    pending == Some(id)
}

/// Full-screen overlay rule: page still loading OR the movers request is in
/// flight.
fn overlay(page_loading: bool, movers_loading: bool) -> bool {
    page_loading || movers_loading
}

/// An empty or all-whitespace keyword is rejected locally; no request goes
/// out for it.
fn search_keyword(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Settled lane results, reported back over the update channel.
#[derive(Debug)]
pub enum Update {
    Movers {
        id: u64,
        outcome: std::result::Result<MoverBoard, String>,
    },
    Matches {
        id: u64,
        keyword: String,
        outcome: std::result::Result<Vec<SearchMatch>, String>,
    },
    Detail {
        id: u64,
        symbol: String,
        outcome: std::result::Result<StockDetail, String>,
    },
}

//////////////////////////////////////////////////////////////////////////////////////
// Application state
//////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Search,
    Matches,
}

pub struct App {
    pub route: Route,
    pub focus: Focus,
    pub keyword: String,
    pub selected: usize,
    pub movers: Lane<MoverBoard>,
    pub matches: Lane<Vec<SearchMatch>>,
    pub detail: Lane<StockDetail>,
    pub series: CandleSeries,
    pub viewport: Viewport,
    pub page_loading: bool,
    pub should_quit: bool,
    cache: QueryCache,
    provider: Arc<Provider>,
    client: reqwest::Client,
    tx: mpsc::UnboundedSender<Update>,
}

impl App {
    pub fn new(provider: Provider, route: Route, tx: mpsc::UnboundedSender<Update>) -> Result<Self> {
        Ok(Self {
            route,
            focus: Focus::Search,
            keyword: String::new(),
            selected: 0,
            movers: Lane::default(),
            matches: Lane::default(),
            detail: Lane::default(),
            series: CandleSeries::default(),
            viewport: Viewport::default(),
            page_loading: true,
            should_quit: false,
            cache: QueryCache::new(),
            provider: Arc::new(provider),
            client: build_client()?,
            tx,
        })
    }

    /// Kick off the lanes the starting route needs.
    pub fn boot(&mut self) {
        self.request_movers(false);
        if let Route::Stock { symbol } = self.route.clone() {
            self.request_detail(symbol, false);
        }
    }

    pub fn overlay_visible(&self) -> bool {
        overlay(self.page_loading, self.movers.state.is_loading())
    }

    pub fn request_movers(&mut self, force: bool) {
        if !force {
            if let Some(board) = self.cache.movers() {
                self.movers.state = LaneState::Ready(board.clone());
                return;
            }
        }
        let id = self.movers.begin();
        let client = self.client.clone();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch_movers(&provider).await.map_err(|e| {
                log::error!("Failed to fetch movers: {e:#?}");
                e.to_string()
            });
            let _ = tx.send(Update::Movers { id, outcome });
        });
    }

    pub fn submit_search(&mut self) {
        let Some(keyword) = search_keyword(&self.keyword) else {
            return;
        };
        if let Some(hits) = self.cache.matches(&keyword) {
            self.matches.state = LaneState::Ready(hits.clone());
            self.selected = 0;
            return;
        }
        let id = self.matches.begin();
        self.selected = 0;
        let client = self.client.clone();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch_matches(&provider, &keyword).await.map_err(|e| {
                log::error!("Failed to search symbols: {e:#?}");
                e.to_string()
            });
            let _ = tx.send(Update::Matches { id, keyword, outcome });
        });
    }

    pub fn open_symbol(&mut self, symbol: String) {
        self.route = Route::Stock {
            symbol: symbol.clone(),
        };
        self.request_detail(symbol, false);
    }

    /// Back to the dashboard; the detail view's chart state goes with it.
    pub fn close_stock(&mut self) {
        self.route = Route::Dashboard;
        self.detail.reset();
        self.series = CandleSeries::default();
        self.viewport = Viewport::default();
    }

    fn request_detail(&mut self, symbol: String, force: bool) {
        if !force {
            if let Some(detail) = self.cache.detail(&symbol) {
                self.series = CandleSeries::from_daily(&detail.series);
                self.viewport = Viewport::default();
                self.detail.state = LaneState::Ready(detail.clone());
                return;
            }
        }
        let id = self.detail.begin();
        let client = self.client.clone();
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = client.fetch_detail(&provider, &symbol).await.map_err(|e| {
                log::error!("[{symbol}] failed to fetch detail: {e:#?}");
                e.to_string()
            });
            let _ = tx.send(Update::Detail { id, symbol, outcome });
        });
    }

    /// Explicit user-triggered refetch: the only path that invalidates the
    /// query cache.
    pub fn refresh(&mut self) {
        match self.route.clone() {
            Route::Dashboard => {
                self.cache.invalidate_movers();
                if let Some(keyword) = search_keyword(&self.keyword) {
                    self.cache.invalidate_matches(&keyword);
                }
                self.request_movers(true);
            }
            Route::Stock { symbol } => {
                self.cache.invalidate_symbol(&symbol);
                self.request_detail(symbol, true);
            }
        }
    }

    pub fn apply(&mut self, update: Update) {
        match update {
            Update::Movers { id, outcome } => {
                let applied = match outcome {
                    Ok(board) => {
                        let applied = self.movers.settle(id, Ok(board.clone()));
                        if applied {
                            self.cache.put_movers(board);
                        }
                        applied
                    }
                    Err(msg) => self.movers.settle(id, Err(msg)),
                };
                if !applied {
                    log::warn!("Discarding stale movers result");
                }
            }

            Update::Matches { id, keyword, outcome } => {
                let applied = match outcome {
                    Ok(hits) => {
                        let applied = self.matches.settle(id, Ok(hits.clone()));
                        if applied {
                            self.selected = 0;
                            self.cache.put_matches(keyword, hits);
                        }
                        applied
                    }
                    Err(msg) => self.matches.settle(id, Err(msg)),
                };
                if !applied {
                    log::warn!("Discarding stale search result");
                }
            }

            Update::Detail { id, symbol, outcome } => {
                let applied = match outcome {
                    Ok(detail) => {
                        let applied = self.detail.settle(id, Ok(detail.clone()));
                        if applied {
                            // fresh symbol, fresh chart: series and zoom are
                            // rebuilt, never accumulated
                            self.series = CandleSeries::from_daily(&detail.series);
                            self.viewport = Viewport::default();
                            self.cache.put_detail(symbol.clone(), detail);
                        }
                        applied
                    }
                    Err(msg) => self.detail.settle(id, Err(msg)),
                };
                if !applied {
                    log::warn!("[{symbol}] discarding stale detail result");
                }
            }
        }
    }

    //////////////////////////////////////////////////////////////////////////////////
    // Input
    //////////////////////////////////////////////////////////////////////////////////

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('r') => self.refresh(),
                _ => {}
            }
            return;
        }
        if matches!(self.route, Route::Stock { .. }) {
            self.on_stock_key(key);
        } else {
            self.on_dashboard_key(key);
        }
    }

    fn on_stock_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.close_stock(),
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('+') | KeyCode::Char('=') => self.viewport.zoom_in(),
            KeyCode::Char('-') => self.viewport.zoom_out(),
            KeyCode::Left => self.viewport.pan_left(),
            KeyCode::Right => self.viewport.pan_right(),
            _ => {}
        }
    }

    fn on_dashboard_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => self.submit_search(),
                KeyCode::Char(c) => self.keyword.push(c),
                KeyCode::Backspace => {
                    self.keyword.pop();
                }
                KeyCode::Down => {
                    if matches!(self.matches.state, LaneState::Ready(ref hits) if !hits.is_empty())
                    {
                        self.focus = Focus::Matches;
                    }
                }
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            Focus::Matches => match key.code {
                KeyCode::Up => {
                    if self.selected == 0 {
                        self.focus = Focus::Search;
                    } else {
                        self.selected -= 1;
                    }
                }
                KeyCode::Down => {
                    if let LaneState::Ready(ref hits) = self.matches.state {
                        if self.selected + 1 < hits.len() {
                            self.selected += 1;
                        }
                    }
                }
                KeyCode::Enter => {
                    let symbol = match self.matches.state {
                        LaneState::Ready(ref hits) => {
                            hits.get(self.selected).map(|hit| hit.symbol.clone())
                        }
                        _ => None,
                    };
                    if let Some(symbol) = symbol {
                        self.open_symbol(symbol);
                    }
                }
                KeyCode::Esc => self.focus = Focus::Search,
                _ => {}
            },
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////
// Event loop
//////////////////////////////////////////////////////////////////////////////////////

pub async fn run(provider: Provider, route: Route) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(provider, route, tx)?;
    app.boot();

    let mut tui = Tui::enter()?;
    let mut first_frame = true;

    while !app.should_quit {
        while let Ok(update) = rx.try_recv() {
            app.apply(update);
        }

        tui.terminal.draw(|frame| view::draw(frame, &app))?;
        if first_frame {
            // the initial page load is done once the first frame is up
            first_frame = false;
            app.page_loading = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                // the next draw lays the chart out against the new size
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    Ok(())
}
