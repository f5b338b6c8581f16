use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form_lines;
use crate::tui::app::{App, AuthMode};
use crate::tui::form::FormOutcome;

fn row(app: &App, label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label:<12}"), app.theme.muted),
        Span::raw(value),
    ])
}

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = match (app.state.auth.is_authenticated(), app.auth_form.mode) {
        (true, _) => " Profile ",
        (false, AuthMode::Login) => " Log in ",
        (false, AuthMode::Register) => " Create account ",
    };
    let block = Block::default()
        .title(Span::styled(title, app.theme.title))
        .borders(Borders::ALL)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];

    if let Some(user) = app.state.auth.user().filter(|_| app.state.auth.is_authenticated()) {
        lines.push(row(app, "Username", user.username.clone()));
        lines.push(row(app, "Email", user.email.clone()));
        match &app.profile {
            Some(profile) => {
                lines.push(row(app, "Reports", profile.report_count.to_string()));
                lines.push(row(app, "Member since", profile.created_at.clone()));
            }
            None => lines.push(Line::from(Span::styled(
                "  Press 'u' to load report stats",
                app.theme.muted,
            ))),
        }
    } else {
        lines.extend(form_lines(app.auth_form.active(), &app.theme, inner.width as usize));
        lines.push(Line::from(""));
        let other = match app.auth_form.mode {
            AuthMode::Login => "register",
            AuthMode::Register => "log in",
        };
        let hint = if app.auth_form.active().editing {
            "  Enter to submit, Esc to stop editing".to_string()
        } else {
            format!("  'e' to edit, Enter to submit, 'm' to {other} instead")
        };
        lines.push(Line::from(Span::styled(hint, app.theme.muted)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if app.state.auth.is_authenticated() {
        match key.code {
            KeyCode::Char('u') => app.load_profile(),
            KeyCode::Char('t') => app.refresh_token(),
            KeyCode::Char('o') => app.logout(),
            _ => {}
        }
        return;
    }

    if app.auth_form.active().editing {
        if app.auth_form.active_mut().handle_key(key) == FormOutcome::Submit {
            app.submit_auth();
        }
        return;
    }

    match key.code {
        KeyCode::Char('e') | KeyCode::Char('i') => app.auth_form.active_mut().editing = true,
        KeyCode::Char('m') => app.auth_form.toggle_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.auth_form.active_mut().focus_next(),
        KeyCode::Char('k') | KeyCode::Up => app.auth_form.active_mut().focus_previous(),
        KeyCode::Enter => app.submit_auth(),
        _ => {}
    }
}
