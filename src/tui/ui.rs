// UI rendering logic
//
// Every frame is a pure projection of `App`: the list and the map both read
// the same selection, nothing here changes it.

use super::app::App;
use crate::catalog::LocalityRecord;
use crate::logging::{LogEntry, LogLevel};
use crate::selection::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Degrees of padding around the plotted localities
const MAP_PADDING: f64 = 0.08;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // List + map
            Constraint::Length(6), // System logs
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_title(f, chunks[0], app);
    render_body(f, chunks[1], app);
    render_logs_panel(f, chunks[2], app);
    render_status(f, chunks[3], app);

    let area = f.area();
    if let Some(toast) = &app.toast {
        toast.render(f, area);
    }
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let title = Paragraph::new(format!(
        " Communes de Haute-Corse ──── {} localities",
        app.catalog.len()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title_top(Line::from(format!(" {} ", app.web_url)).right_aligned()),
    );

    f.render_widget(title, area);
}

fn render_body(f: &mut Frame, area: Rect, app: &mut App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    render_list(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(columns[1]);

    render_map(f, right[0], app);
    render_detail(f, right[1], app);
}

fn render_list(f: &mut Frame, area: Rect, app: &mut App) {
    let height = area.height.saturating_sub(2) as usize; // Account for borders
    let (start, end) = app.visible_range(height);
    let name_width = area.width.saturating_sub(12) as usize;

    let items: Vec<ListItem> = app.catalog.records()[start..end]
        .iter()
        .enumerate()
        .map(|(offset, record)| {
            let idx = start + offset;
            let marker = if app.is_selected(record) { "◉" } else { " " };
            let line = format!(
                "{} {} {}",
                marker,
                pad_to_width(&record.name, name_width),
                record.id
            );

            let style = if idx == app.cursor {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if app.is_selected(record) {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(" Communes ({}) ", app.catalog.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);

    let total = app.catalog.len();
    if total > height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state = ScrollbarState::new(total.saturating_sub(height)).position(start);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let records = app.catalog.records();
    let focus = app.selection.focus;
    let (x_bounds, y_bounds) = map_bounds(records, focus);

    let coords: Vec<(f64, f64)> = records.iter().map(|r| (r.longitude, r.latitude)).collect();
    let selected = app.selection.selected.clone();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Map ── focus {:.4}, {:.4} ", focus.lat, focus.lon)),
        )
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(move |ctx| {
            // Crosshair through the focus point
            ctx.draw(&CanvasLine {
                x1: x_bounds[0],
                y1: focus.lat,
                x2: x_bounds[1],
                y2: focus.lat,
                color: Color::DarkGray,
            });
            ctx.draw(&CanvasLine {
                x1: focus.lon,
                y1: y_bounds[0],
                x2: focus.lon,
                y2: y_bounds[1],
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Cyan,
            });
            ctx.layer();

            if let Some(record) = &selected {
                ctx.print(
                    record.longitude,
                    record.latitude,
                    Span::styled(
                        format!("◉ {}", record.name),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().add_modifier(Modifier::BOLD);

    let lines = match &app.selection.selected {
        Some(record) => vec![
            Line::from(Span::styled(
                record.name.clone(),
                label.fg(Color::Yellow),
            )),
            Line::from(vec![
                Span::styled("Code INSEE: ", label),
                Span::raw(record.id.clone()),
            ]),
            Line::from(vec![
                Span::styled("Création: ", label),
                Span::raw(record.founded_year.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Coordonnées: ", label),
                Span::raw(format!("{}, {}", record.latitude, record.longitude)),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "Sélectionner une commune (↑/↓ puis Entrée)",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Détail "));
    f.render_widget(detail, area);
}

/// Render the system logs panel
pub fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    let height = area.height.saturating_sub(2) as usize; // Account for borders

    let items: Vec<ListItem> = app
        .log_buffer
        .recent(height)
        .iter()
        .map(|entry| ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" System Logs "),
    );

    f.render_widget(list, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let selected = app
        .selection
        .selected
        .as_ref()
        .map(|r| r.name.as_str())
        .unwrap_or("none");

    let status_text = format!(
        " {} │ {} │ ↑↓ move  Enter select  e export  y copy CSV  q quit",
        app.uptime(),
        selected,
    );

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(status, area);
}

/// Canvas bounds covering every locality and the focus, with padding
///
/// Returns `([min_lon, max_lon], [min_lat, max_lat])`.
pub fn map_bounds(records: &[LocalityRecord], focus: Focus) -> ([f64; 2], [f64; 2]) {
    let (mut min_lon, mut max_lon) = (focus.lon, focus.lon);
    let (mut min_lat, mut max_lat) = (focus.lat, focus.lat);

    for r in records {
        min_lon = min_lon.min(r.longitude);
        max_lon = max_lon.max(r.longitude);
        min_lat = min_lat.min(r.latitude);
        max_lat = max_lat.max(r.latitude);
    }

    (
        [min_lon - MAP_PADDING, max_lon + MAP_PADDING],
        [min_lat - MAP_PADDING, max_lat + MAP_PADDING],
    )
}

/// Pad (or truncate with an ellipsis) to a display width
fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        return format!("{}{}", text, " ".repeat(width - current));
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(Color::Blue),
        LogLevel::Debug => Style::default().fg(Color::Gray),
        LogLevel::Trace => Style::default().fg(Color::DarkGray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::ExportConfig;
    use crate::logging::LogBuffer;
    use crate::selection::SelectionState;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    #[test]
    fn bounds_cover_every_locality() {
        let catalog = Catalog::load();
        let (x, y) = map_bounds(catalog.records(), Focus::default());
        for r in catalog.iter() {
            assert!(x[0] < r.longitude && r.longitude < x[1], "{}", r.name);
            assert!(y[0] < r.latitude && r.latitude < y[1], "{}", r.name);
        }
    }

    #[test]
    fn bounds_include_an_outlying_focus() {
        let catalog = Catalog::load();
        let far = Focus::new(41.0, 8.0);
        let (x, y) = map_bounds(catalog.records(), far);
        assert!(x[0] < 8.0 && y[0] < 41.0);
    }

    #[test]
    fn pad_keeps_display_width() {
        assert_eq!(pad_to_width("Aléria", 8), "Aléria  ");
        assert_eq!(pad_to_width("San-Gavino-di-Fiumorbo", 10).width(), 10);
        assert!(pad_to_width("San-Gavino-di-Fiumorbo", 10).ends_with('…'));
    }

    #[test]
    fn draws_list_and_detail() {
        let catalog = Arc::new(Catalog::load());
        let mut state = SelectionState::default();
        state.selected = catalog.find_by_id("2B033").cloned();
        state.focus = Focus::new(42.697283, 9.450881);

        let mut app = App::new(
            catalog,
            state,
            LogBuffer::new(),
            "http://127.0.0.1:8090".to_string(),
            ExportConfig::default(),
        );

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Communes de Haute-Corse"));
        assert!(text.contains("Aghione"));
        assert!(text.contains("Code INSEE: 2B033"));
    }
}
