use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::Screen;

/// Top-level split shared by both screens
pub struct TuiLayout {
    pub header: Rect,
    pub content: Rect,
    pub status_bar: Rect,
}

impl TuiLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(4), // Status bar
            ])
            .split(area);

        Self {
            header: chunks[0],
            content: chunks[1],
            status_bar: chunks[2],
        }
    }

    pub fn render_header(&self, f: &mut Frame, subtitle: &str) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "EquiTracker",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", subtitle), Style::default().fg(Color::Gray)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(header, self.header);
    }

    /// Render the status bar with the key hints for `screen`
    pub fn render_status_bar(&self, f: &mut Frame, screen: Screen, status_text: &str) {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };
        let gray = |t: &'static str| Span::styled(t, Style::default().fg(Color::Gray));

        let hints = match screen {
            Screen::Home => Line::from(vec![
                gray("Type to search • "),
                key("↑/↓", Color::Yellow),
                gray(" to choose • "),
                key("Enter", Color::Green),
                gray(" to open • "),
                key("Esc", Color::Red),
                gray(" to quit"),
            ]),
            Screen::Detail => Line::from(vec![
                key("B", Color::Yellow),
                gray(" back to home • "),
                key("R", Color::Green),
                gray(" to refresh • "),
                key("Q", Color::Red),
                gray(" to quit"),
            ]),
        };

        let status_content = vec![
            hints,
            Line::from(Span::styled(
                status_text.to_string(),
                Style::default().fg(Color::Cyan),
            )),
        ];

        let paragraph = Paragraph::new(status_content)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White));

        f.render_widget(paragraph, self.status_bar);
    }
}

/// Search screen areas
pub struct HomeLayout {
    pub search_box: Rect,
    pub suggestions: Rect,
    pub notice: Rect,
}

impl HomeLayout {
    pub fn new(content: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Search input
                Constraint::Length(12), // Up to ten suggestions plus borders
                Constraint::Min(0),     // Loading notice
            ])
            .split(content);

        Self {
            search_box: chunks[0],
            suggestions: chunks[1],
            notice: chunks[2],
        }
    }
}

/// Detail screen areas
pub struct DetailLayout {
    pub details: Rect,
    pub chart: Rect,
    pub insights: Rect,
}

impl DetailLayout {
    pub fn new(content: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(12), // Ten detail lines plus borders
                Constraint::Min(8),     // Chart
                Constraint::Length(6),  // Insights
            ])
            .split(content);

        Self {
            details: chunks[0],
            chart: chunks[1],
            insights: chunks[2],
        }
    }
}
