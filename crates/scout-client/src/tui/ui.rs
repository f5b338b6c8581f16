use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, Popup};
use super::navigator::{render_tab_bar, Tab};
use super::screens;
use super::widgets::{help_popup::render_help_popup, status_bar::render_status_bar};

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Status line
            Constraint::Length(2), // Tab bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.tab {
        Tab::Map => screens::map::render(frame, app, chunks[1]),
        Tab::Report => screens::report::render(frame, app, chunks[1]),
        Tab::Profile => screens::profile::render(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
    render_tab_bar(frame, app, chunks[3]);

    if let Some(ref popup) = app.popup {
        render_popup(frame, app, popup);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled("  scout", app.theme.title),
        Span::raw("  "),
        Span::styled(app.tab.label(), app.theme.muted),
    ];

    match app.state.auth.user().filter(|_| app.state.auth.is_authenticated()) {
        Some(user) => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(format!("@{}", user.username), app.theme.info));
        }
        None => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("[signed out]", app.theme.muted));
        }
    }

    if app.state.reports.is_loading() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[loading]", app.theme.warning));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_popup(frame: &mut Frame, app: &App, popup: &Popup) {
    match popup {
        Popup::Help => render_help_popup(frame, app),
        Popup::ConfirmDelete { name, .. } => render_confirm_delete(frame, app, name),
    }
}

fn render_confirm_delete(frame: &mut Frame, app: &App, name: &str) {
    let width = 50.min(frame.area().width.saturating_sub(4));
    let area = centered_rect(width, 7, frame.area());

    let block = Block::default()
        .title(" Delete report ")
        .borders(Borders::ALL)
        .border_style(app.theme.error)
        .style(Style::default().bg(Color::Black));

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("  Delete sighting at "),
            Span::styled(name.to_string(), app.theme.title),
            Span::raw("?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[Enter]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Delete  "),
            Span::styled("[Esc]", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(text).block(block), area);
}

/// Helper function to create a centered rect
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
