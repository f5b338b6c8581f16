use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::tui::app::App;
use crate::tui::widgets::{map_view::render_map_view, report_list::render_report_list};

const LIST_WIDTH: u16 = 46;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.config.map.access_token().is_none() {
        render_map_view(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LIST_WIDTH)])
        .split(area);

    render_map_view(frame, app, chunks[0]);
    render_report_list(frame, app, chunks[1]);
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Without a credential the tab is only an error panel.
    if app.config.map.access_token().is_none() {
        return;
    }

    match key.code {
        KeyCode::Up => app.pan(1.0, 0.0),
        KeyCode::Down => app.pan(-1.0, 0.0),
        KeyCode::Left => app.pan(0.0, -1.0),
        KeyCode::Right => app.pan(0.0, 1.0),
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),
        KeyCode::Char('c') => app.recenter(),
        KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('k') => app.select_previous(),
        KeyCode::Char('g') => app.selected_report = 0,
        KeyCode::Char('G') => {
            app.selected_report = app.state.reports.reports().len().saturating_sub(1)
        }
        KeyCode::Char('r') => app.refresh_reports(),
        KeyCode::Char('v') => app.verify_selected(),
        KeyCode::Char('d') => app.confirm_delete_selected(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::test_app;
    use crate::tui::worker::ApiRequest;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn keys_do_nothing_without_credential() {
        let (mut app, _) = test_app();
        app.config.map.access_token = None;
        press(&mut app, KeyCode::Char('r'));
        press(&mut app, KeyCode::Up);
        assert!(app.take_requests().is_empty());
        assert!(app.state.map.follow_user_location());
    }

    #[test]
    fn zoom_keys_scale_region() {
        let (mut app, _) = test_app();
        let before = app.state.map.region_or_default().latitude_delta;
        press(&mut app, KeyCode::Char('+'));
        assert!(app.state.map.region_or_default().latitude_delta < before);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert!(app.state.map.region_or_default().latitude_delta > before);
    }

    #[test]
    fn refresh_key_queues_fetch() {
        let (mut app, _) = test_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(matches!(
            app.take_requests().as_slice(),
            [ApiRequest::FetchReports(_)]
        ));
    }

    #[test]
    fn recenter_restores_follow() {
        let (mut app, _) = test_app();
        press(&mut app, KeyCode::Left);
        assert!(!app.state.map.follow_user_location());
        press(&mut app, KeyCode::Char('c'));
        assert!(app.state.map.follow_user_location());
    }
}
