use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::components::{insight_lines, render_error_popup, render_loading_indicator, render_price_chart};
use super::events::{self, EventManager, TuiEvent};
use super::layout::{DetailLayout, HomeLayout, TuiLayout};
use super::state::{AppState, LookupRequest, Screen, SearchRequest, ViewState};
use crate::api::{MarketDataProvider, YahooClient};
use crate::database::CompanyStore;
use crate::lookup::{CompanyView, LookupService};
use crate::models::Config;

const SEARCH_PLACEHOLDER: &str = "Search for stocks...";

pub struct EquiTrackerApp<P> {
    service: LookupService<P>,
    pub state: ViewState,
    events: EventManager,
    search_task: Option<JoinHandle<()>>,
    pub should_quit: bool,
}

impl<P: MarketDataProvider + 'static> EquiTrackerApp<P> {
    pub fn new(service: LookupService<P>) -> Self {
        Self {
            service,
            state: ViewState::new(),
            events: EventManager::new(),
            search_task: None,
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.state.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Detail => self.handle_detail_key(key.code),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            // Shortcut chords are not text
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                let request = self.state.push_char(c);
                self.query_changed(request);
            }
            KeyCode::Backspace => {
                let request = self.state.pop_char();
                self.query_changed(request);
            }
            KeyCode::Down => self.state.select_next(),
            KeyCode::Up => self.state.select_previous(),
            KeyCode::Enter => {
                if let Some(symbol) = self.state.selected_symbol().map(str::to_string) {
                    let request = self.state.begin_lookup(&symbol);
                    self.spawn_lookup(request);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, code: KeyCode) {
        // An open popup swallows the first key
        if self.state.dismiss_popup() {
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Esc | KeyCode::Backspace => {
                self.state.go_home();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if let Some(symbol) = self.state.current_symbol().map(str::to_string) {
                    let request = self.state.begin_lookup(&symbol);
                    self.spawn_lookup(request);
                }
            }
            _ => {}
        }
    }

    fn query_changed(&mut self, request: Option<SearchRequest>) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        if let Some(request) = request {
            self.search_task = Some(self.spawn_search(request));
        }
    }

    fn spawn_search(&self, request: SearchRequest) -> JoinHandle<()> {
        let service = self.service.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let result = service
                .search(&request.query)
                .await
                .map_err(|e| format!("Search failed: {}", e));
            let _ = sender.send(TuiEvent::SuggestionsReady {
                generation: request.generation,
                result,
            });
        })
    }

    fn spawn_lookup(&self, request: LookupRequest) {
        let service = self.service.clone();
        let sender = self.events.sender();

        tokio::spawn(async move {
            let result = service
                .lookup(&request.symbol)
                .await
                .map_err(|e| format!("Lookup of {} failed: {}", request.symbol, e));
            let _ = sender.send(TuiEvent::LookupFinished {
                generation: request.generation,
                symbol: request.symbol,
                result,
            });
        });
    }

    /// Apply every result the background tasks have reported so far
    pub fn drain_events(&mut self) {
        while let Some(event) = self.events.try_receive() {
            match event {
                TuiEvent::SuggestionsReady { generation, result } => {
                    self.state.apply_suggestions(generation, result);
                }
                TuiEvent::LookupFinished {
                    generation,
                    symbol,
                    result,
                } => {
                    debug!("Lookup for {} finished (generation {})", symbol, generation);
                    self.state.apply_lookup(generation, &symbol, result);
                }
            }
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        let layout = TuiLayout::new(f.area());

        match self.state.screen {
            Screen::Home => {
                layout.render_header(f, "NSE company lookup");
                self.draw_home(f, layout.content);
            }
            Screen::Detail => {
                let subtitle = format!("Company details • {}", self.service.period().label());
                layout.render_header(f, &subtitle);
                if let Some(view) = &self.state.detail.view {
                    self.draw_detail(f, layout.content, view);
                }
            }
        }

        layout.render_status_bar(f, self.state.screen, &self.state.status.status_text());
    }

    fn draw_home(&self, f: &mut Frame, area: Rect) {
        let home = HomeLayout::new(area);
        let query = &self.state.home.query;

        let input = if query.is_empty() {
            Paragraph::new(Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)))
        } else {
            Paragraph::new(query.as_str())
        };
        f.render_widget(
            input.block(Block::default().borders(Borders::ALL).title("Search")),
            home.search_box,
        );
        f.set_cursor_position((
            home.search_box.x + 1 + query.chars().count() as u16,
            home.search_box.y + 1,
        ));

        let items: Vec<ListItem> = self
            .state
            .home
            .suggestions
            .iter()
            .map(|s| ListItem::new(s.to_string()))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        let mut list_state = ListState::default();
        list_state.select(self.state.home.selected);
        f.render_stateful_widget(list, home.suggestions, &mut list_state);

        if let AppState::Loading { operation } = &self.state.status {
            render_loading_indicator(f, home.notice, &format!("Fetching {}...", operation));
        }
    }

    fn draw_detail(&self, f: &mut Frame, area: Rect, view: &CompanyView) {
        let detail = DetailLayout::new(area);

        let lines: Vec<Line> = view.detail_lines().into_iter().map(Line::from).collect();
        let details = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Details"))
            .wrap(Wrap { trim: true });
        f.render_widget(details, detail.details);

        let title = format!(
            "{} Price History ({})",
            view.company.name,
            self.service.period().label()
        );
        render_price_chart(f, detail.chart, &title, &view.history);

        let insights = Paragraph::new(insight_lines(&view.insights))
            .block(Block::default().borders(Borders::ALL).title("Insights"))
            .wrap(Wrap { trim: true });
        f.render_widget(insights, detail.insights);

        if let Some(message) = &self.state.detail.popup {
            render_error_popup(f, area, message);
        }
    }
}

/// Run the interactive search and detail screens until the user quits
pub async fn run_app(config: &Config) -> Result<()> {
    let store = CompanyStore::new(config.store_config());
    store.init_schema().await?;
    let provider = YahooClient::new(config)?;
    let service = LookupService::new(store, provider, config.history_period);
    let mut app = EquiTrackerApp::new(service);

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = loop {
        app.drain_events();

        if let Err(e) = terminal.draw(|f| app.draw(f)) {
            break Err(e.into());
        }

        // Key polling blocks, so keep it off the worker the lookups run on
        match tokio::task::block_in_place(|| events::poll_key(Duration::from_millis(100))) {
            Ok(Some(key)) => app.handle_key(key),
            Ok(None) => {}
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Cleanup terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}
