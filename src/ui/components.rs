/// UI components and utilities for EquiTracker
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use crate::models::{Insight, PricePoint, Severity};

/// Colour used for an insight of the given severity
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Positive => Color::Green,
        Severity::Negative => Color::Red,
        Severity::Caution => Color::LightYellow,
        Severity::Info => Color::Blue,
    }
}

/// One bullet line per insight, coloured by severity
pub fn insight_lines(insights: &[Insight]) -> Vec<Line<'static>> {
    if insights.is_empty() {
        return vec![Line::from(Span::styled(
            "No insights available",
            Style::default().fg(Color::Gray),
        ))];
    }

    insights
        .iter()
        .map(|insight| {
            Line::from(Span::styled(
                format!("• {}", insight.message),
                Style::default().fg(severity_color(insight.severity)),
            ))
        })
        .collect()
}

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let loading = Paragraph::new(message)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(loading, area);
}

/// Render an error popup over the middle of `area`
pub fn render_error_popup(f: &mut Frame, area: Rect, error: &str) {
    let popup = centered_rect(60, 25, area);
    let text = vec![
        Line::from(error.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Error")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Render the close-price line chart, or a notice when there is no history
pub fn render_price_chart(f: &mut Frame, area: Rect, title: &str, history: &[PricePoint]) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());

    if history.is_empty() {
        let notice = Paragraph::new("No chart available")
            .block(block)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(notice, area);
        return;
    }

    let points: Vec<(f64, f64)> = history
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.close))
        .collect();
    let (min, max) = price_bounds(history);
    let last_index = (history.len() - 1) as f64;

    let first_date = history[0].date.format("%d %b").to_string();
    let last_date = history[history.len() - 1].date.format("%d %b").to_string();

    let datasets = vec![Dataset::default()
        .name("Close")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last_index.max(1.0)])
                .labels(vec![Span::raw(first_date), Span::raw(last_date)]),
        )
        .y_axis(
            Axis::default()
                .title("Price (₹)")
                .style(Style::default().fg(Color::Gray))
                .bounds([min, max])
                .labels(vec![
                    Span::raw(format!("{:.2}", min)),
                    Span::styled(format!("{:.2}", max), Style::default().add_modifier(Modifier::BOLD)),
                ]),
        );

    f.render_widget(chart, area);
}

/// Y-axis bounds with a little headroom; a flat series still gets a visible band
fn price_bounds(history: &[PricePoint]) -> (f64, f64) {
    let min = history.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max = history.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);
    let pad = ((max - min) * 0.05).max(max.abs() * 0.01).max(0.01);
    ((min - pad).max(0.0), max + pad)
}

/// Create a simple ASCII chart from the close series
pub fn create_ascii_chart(history: &[PricePoint], width: usize, height: usize) -> Vec<String> {
    if history.is_empty() || width == 0 || height == 0 {
        return vec!["No data".to_string()];
    }

    let min_val = history.iter().map(|p| p.close).fold(f64::INFINITY, f64::min);
    let max_val = history.iter().map(|p| p.close).fold(f64::NEG_INFINITY, f64::max);

    if (max_val - min_val).abs() < f64::EPSILON {
        return vec!["─".repeat(width.min(history.len())); 1];
    }

    let mut chart = vec![vec![' '; width]; height];

    for (i, point) in history.iter().enumerate() {
        // Spread the series over the full width when it is shorter than the chart
        let col = if history.len() >= width {
            i * width / history.len()
        } else {
            i * (width - 1) / (history.len() - 1).max(1)
        };
        if col >= width {
            break;
        }

        let normalized = (point.close - min_val) / (max_val - min_val);
        let row = ((1.0 - normalized) * (height - 1) as f64).round() as usize;
        let row = row.min(height - 1);

        chart[row][col] = '█';
    }

    chart
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

/// Helper to center a popup of `percent_x` by `percent_y` inside `area`
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
