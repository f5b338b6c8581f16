use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::{App, StatusKind};
use crate::tui::navigator::Tab;

fn keybindings(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.is_editing() {
        return vec![("Enter", "Submit"), ("↑/↓", "Field"), ("Esc", "Done")];
    }
    match app.tab {
        Tab::Map => vec![
            ("?", "Help"),
            ("←↑↓→", "Pan"),
            ("+/-", "Zoom"),
            ("j/k", "Select"),
            ("v", "Verify"),
            ("r", "Refresh"),
            ("q", "Quit"),
        ],
        Tab::Report => vec![
            ("?", "Help"),
            ("e", "Edit"),
            ("a", "Anonymous"),
            ("Enter", "Send"),
            ("q", "Quit"),
        ],
        Tab::Profile if app.state.auth.is_authenticated() => vec![
            ("?", "Help"),
            ("u", "Reload"),
            ("t", "Refresh session"),
            ("o", "Log out"),
            ("q", "Quit"),
        ],
        Tab::Profile => vec![
            ("?", "Help"),
            ("e", "Edit"),
            ("m", "Login/Register"),
            ("Enter", "Submit"),
            ("q", "Quit"),
        ],
    }
}

/// Status message when one is live, otherwise the key hints for the tab.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let style = match msg.kind {
            StatusKind::Success => app.theme.success,
            StatusKind::Error => app.theme.error,
            StatusKind::Info => app.theme.info,
        };
        let line = Line::from(vec![Span::raw("  "), Span::styled(&msg.text, style)]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let mut spans: Vec<Span> = vec![Span::raw("  ")];
    for (i, (key, desc)) in keybindings(app).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", app.theme.muted));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            app.theme.muted.add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), app.theme.muted));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
