use crate::lookup::CompanyView;
use crate::models::CompanySummary;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Detail,
}

/// Status line state
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Idle,
    Loading { operation: String },
    Error { message: String },
    Success { message: String },
}

impl AppState {
    /// Get the current status text for display
    pub fn status_text(&self) -> String {
        match self {
            AppState::Idle => "Ready".to_string(),
            AppState::Loading { operation } => format!("Loading {}...", operation),
            AppState::Error { message } => format!("Error: {}", message),
            AppState::Success { message } => message.clone(),
        }
    }
}

/// Hands out request generations; only the newest one is honoured
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }

    /// Make every outstanding request stale
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub symbol: String,
}

#[derive(Debug, Default)]
pub struct HomeState {
    pub query: String,
    pub suggestions: Vec<CompanySummary>,
    pub selected: Option<usize>,
}

#[derive(Debug, Default)]
pub struct DetailState {
    pub view: Option<CompanyView>,
    pub popup: Option<String>,
}

/// Whole UI state, kept free of terminal types so transitions can be tested
#[derive(Debug)]
pub struct ViewState {
    pub screen: Screen,
    pub status: AppState,
    pub home: HomeState,
    pub detail: DetailState,
    searches: RequestTracker,
    lookups: RequestTracker,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            status: AppState::Idle,
            home: HomeState::default(),
            detail: DetailState::default(),
            searches: RequestTracker::default(),
            lookups: RequestTracker::default(),
        }
    }

    pub fn push_char(&mut self, c: char) -> Option<SearchRequest> {
        self.home.query.push(c);
        self.query_changed()
    }

    pub fn pop_char(&mut self) -> Option<SearchRequest> {
        self.home.query.pop();
        self.query_changed()
    }

    /// An empty query clears the list without asking the store
    fn query_changed(&mut self) -> Option<SearchRequest> {
        let generation = self.searches.next();
        if self.home.query.trim().is_empty() {
            self.home.suggestions.clear();
            self.home.selected = None;
            return None;
        }
        Some(SearchRequest {
            generation,
            query: self.home.query.clone(),
        })
    }

    pub fn apply_suggestions(&mut self, generation: u64, result: Result<Vec<CompanySummary>, String>) {
        if !self.searches.is_current(generation) {
            return;
        }
        match result {
            Ok(suggestions) => {
                self.home.selected = if suggestions.is_empty() { None } else { Some(0) };
                self.home.suggestions = suggestions;
                if matches!(self.status, AppState::Error { .. }) {
                    self.status = AppState::Idle;
                }
            }
            Err(message) => {
                self.home.suggestions.clear();
                self.home.selected = None;
                self.status = AppState::Error { message };
            }
        }
    }

    pub fn select_next(&mut self) {
        let len = self.home.suggestions.len();
        if len == 0 {
            return;
        }
        self.home.selected = Some(match self.home.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        let len = self.home.suggestions.len();
        if len == 0 {
            return;
        }
        self.home.selected = Some(match self.home.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    pub fn selected_symbol(&self) -> Option<&str> {
        self.home
            .selected
            .and_then(|i| self.home.suggestions.get(i))
            .map(|s| s.symbol.as_str())
    }

    /// Start a lookup for `symbol`, superseding any lookup still in flight
    pub fn begin_lookup(&mut self, symbol: &str) -> LookupRequest {
        self.status = AppState::Loading {
            operation: symbol.to_string(),
        };
        LookupRequest {
            generation: self.lookups.next(),
            symbol: symbol.to_string(),
        }
    }

    pub fn apply_lookup(
        &mut self,
        generation: u64,
        symbol: &str,
        result: Result<Option<CompanyView>, String>,
    ) {
        if !self.lookups.is_current(generation) {
            return;
        }
        match result {
            Ok(Some(view)) => {
                self.status = match &view.price_error {
                    Some(_) => AppState::Idle,
                    None => AppState::Success {
                        message: format!("Updated price for {}", symbol),
                    },
                };
                self.detail.popup = view.price_error.clone();
                self.detail.view = Some(view);
                self.screen = Screen::Detail;
            }
            Ok(None) => {
                self.status = AppState::Error {
                    message: format!("{} was not found", symbol),
                };
            }
            Err(message) => {
                self.status = AppState::Error { message };
            }
        }
    }

    pub fn dismiss_popup(&mut self) -> bool {
        self.detail.popup.take().is_some()
    }

    /// Back to the search screen; any lookup still running is dropped on arrival
    pub fn go_home(&mut self) {
        self.screen = Screen::Home;
        self.detail = DetailState::default();
        self.lookups.invalidate();
        self.status = AppState::Idle;
    }

    pub fn current_symbol(&self) -> Option<&str> {
        self.detail.view.as_ref().map(|v| v.company.symbol.as_str())
    }
}
