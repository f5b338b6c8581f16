use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form_lines;
use crate::tui::app::App;
use crate::tui::form::FormOutcome;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Report a sighting ", app.theme.title))
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let position = app.state.map.report_position();
    let source = if app.state.map.current_location().is_some() {
        "your location"
    } else {
        "map centre"
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Position   ", app.theme.muted),
            Span::raw(format!("{:.5}, {:.5}", position.latitude, position.longitude)),
            Span::styled(format!("  ({source})"), app.theme.muted),
        ]),
        Line::from(""),
    ];
    lines.extend(form_lines(&app.report_form.form, &app.theme, inner.width as usize));
    lines.push(Line::from(""));
    let (check, style) = if app.report_form.anonymous {
        ("[x]", app.theme.accent)
    } else {
        ("[ ]", app.theme.muted)
    };
    lines.push(Line::from(vec![
        Span::styled(format!("  {check} "), style),
        Span::styled("Post anonymously", app.theme.muted),
    ]));
    lines.push(Line::from(""));

    let hint = if app.report_form.form.editing {
        "  Enter to send, Esc to stop editing"
    } else {
        "  Press 'e' to fill in the form, Enter to send"
    };
    lines.push(Line::from(Span::styled(hint, app.theme.muted)));

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.report_form.form.editing {
        if app.report_form.form.handle_key(key) == FormOutcome::Submit {
            app.submit_report();
        }
        return;
    }

    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') => app.report_form.form.editing = true,
        KeyCode::Char('a') => app.report_form.anonymous = !app.report_form.anonymous,
        KeyCode::Char('j') | KeyCode::Down => app.report_form.form.focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.report_form.form.focus_previous(),
        KeyCode::Enter => app.submit_report(),
        _ => {}
    }
}
