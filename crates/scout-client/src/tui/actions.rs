use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Popup};
use super::navigator::Tab;
use super::screens;
use super::worker::ApiRequest;

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // 1. Popups take the key
    if let Some(popup) = app.popup.take() {
        handle_popup_key(app, popup, key);
        return;
    }

    // 2. A form is being edited: everything goes to the screen
    if app.is_editing() {
        dispatch_to_screen(app, key);
        return;
    }

    // 3. Global shortcuts, then the screen's own keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('?') => app.popup = Some(Popup::Help),
        KeyCode::Tab => app.set_tab(app.tab.next()),
        KeyCode::BackTab => app.set_tab(app.tab.previous()),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(tab) = Tab::from_digit(c) {
                app.set_tab(tab);
            }
        }
        _ => dispatch_to_screen(app, key),
    }
}

fn dispatch_to_screen(app: &mut App, key: KeyEvent) {
    match app.tab {
        Tab::Map => screens::map::handle_key(app, key),
        Tab::Report => screens::report::handle_key(app, key),
        Tab::Profile => screens::profile::handle_key(app, key),
    }
}

fn handle_popup_key(app: &mut App, popup: Popup, key: KeyEvent) {
    match popup {
        // Any key dismisses help
        Popup::Help => {}
        Popup::ConfirmDelete { id, name } => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                tracing::info!(%id, %name, "deleting report");
                app.request(ApiRequest::DeleteReport(id));
            }
            KeyCode::Esc | KeyCode::Char('n') => {}
            _ => app.popup = Some(Popup::ConfirmDelete { id, name }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::tests::{report, test_app};
    use scout_common::api::ReportsResponse;

    use crate::tui::worker::ApiEvent;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn with_reports(app: &mut App) {
        app.handle_api_event(ApiEvent::ReportsLoaded(Ok(ReportsResponse {
            reports: vec![report("a"), report("b")],
            total: 2,
            limit: 50,
            offset: 0,
        })));
    }

    #[test]
    fn tab_keys_cycle_screens() {
        let (mut app, _) = test_app();
        assert_eq!(app.tab, Tab::Map);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Report);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, Tab::Profile);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.tab, Tab::Report);
    }

    #[test]
    fn q_quits_unless_editing() {
        let (mut app, _) = test_app();
        app.set_tab(Tab::Report);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.report_form.form.field(0).value, "q");

        press(&mut app, KeyCode::Esc);
        assert!(app.running);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn digits_are_text_while_editing() {
        let (mut app, _) = test_app();
        app.set_tab(Tab::Report);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.tab, Tab::Report);
    }

    #[test]
    fn delete_needs_confirmation() {
        let (mut app, _) = test_app();
        with_reports(&mut app);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.take_requests().is_empty());

        press(&mut app, KeyCode::Char('x'));
        assert!(matches!(app.popup, Some(Popup::ConfirmDelete { .. })));

        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.take_requests(),
            vec![ApiRequest::DeleteReport("a".to_string())]
        );
        assert!(app.popup.is_none());
    }

    #[test]
    fn cancelled_delete_sends_nothing() {
        let (mut app, _) = test_app();
        with_reports(&mut app);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Esc);
        assert!(app.popup.is_none());
        assert!(app.take_requests().is_empty());
        assert!(app.running);
    }

    #[test]
    fn help_closes_on_any_key() {
        let (mut app, _) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.popup, Some(Popup::Help));
        press(&mut app, KeyCode::Char('z'));
        assert!(app.popup.is_none());
    }
}
