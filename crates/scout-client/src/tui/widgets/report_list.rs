use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use scout_common::Report;

use super::render_scrollable_list;
use crate::tui::app::App;

/// "just now", "12m ago", "3h ago"
pub(crate) fn age(report: &Report, now: DateTime<Utc>) -> String {
    let Ok(created) = report.created_at_utc() else {
        return String::new();
    };
    let minutes = (now - created).num_minutes();
    match minutes {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{m}m ago"),
        m => format!("{}h ago", m / 60),
    }
}

fn report_lines(app: &App, report: &Report, selected: bool, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let base = if selected { theme.selected } else { ratatui::style::Style::default() };
    let pointer = if selected { "▶ " } else { "  " };

    let verified = if report.is_verified_by_me {
        Span::styled(format!("✔{:<3}", report.verification_count), theme.success)
    } else if report.verification_count > 0 {
        Span::styled(format!("✓{:<3}", report.verification_count), theme.success)
    } else {
        Span::styled("·   ".to_string(), theme.muted)
    };

    let mut first = vec![
        Span::styled(pointer.to_string(), base),
        verified,
        Span::styled(report.location_name.clone(), base.patch(theme.title)),
    ];
    if let Some(line) = &report.transport_line {
        first.push(Span::styled(format!("  [{line}]"), theme.accent));
    }

    let mut second = vec![
        Span::raw("      "),
        Span::styled(format!("{} · {}", report.username, age(report, now)), theme.muted),
    ];
    if let Some(description) = &report.description {
        second.push(Span::styled(format!(" · {description}"), theme.muted));
    }

    vec![Line::from(first), Line::from(second)]
}

pub fn render_report_list(frame: &mut Frame, app: &App, area: Rect) {
    let reports = app.state.reports.reports();
    let block = Block::default()
        .title(Span::styled(format!(" Sightings ({}) ", reports.len()), app.theme.title))
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if reports.is_empty() {
        let (msg, style) = if app.state.reports.is_loading() {
            ("Loading reports…".to_string(), app.theme.muted)
        } else if let Some(err) = app.state.reports.error() {
            (format!("Could not load reports: {err}"), app.theme.error)
        } else {
            ("No sightings nearby. Press 'r' to refresh.".to_string(), app.theme.muted)
        };
        frame.render_widget(
            Paragraph::new(msg).style(style).alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let now = Utc::now();
    let mut lines = Vec::new();
    let mut line_map = Vec::new();
    for (i, report) in reports.iter().enumerate() {
        for line in report_lines(app, report, i == app.selected_report, now) {
            lines.push(line);
            line_map.push(Some(i));
        }
    }

    render_scrollable_list(frame, inner, lines, &line_map, Some(app.selected_report));
}
