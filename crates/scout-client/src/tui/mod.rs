mod actions;
pub mod app;
pub mod event;
pub mod form;
pub mod navigator;
mod screens;
pub mod theme;
mod ui;
pub mod widgets;
pub mod worker;

pub use app::App;
pub use navigator::Tab;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::{Result, ScoutError};
use crate::services::Services;
use widgets::map_view::MapSignal;

/// Run the TUI application
pub fn run(mut app: App, services: Services) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| ScoutError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| ScoutError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| ScoutError::Tui(e.to_string()))?;

    let res = run_app(&mut terminal, &mut app, &services);

    // Restore terminal
    disable_raw_mode().map_err(|e| ScoutError::Tui(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| ScoutError::Tui(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| ScoutError::Tui(e.to_string()))?;

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, services: &Services) -> Result<()> {
    let events = event::EventHandler::new(250);

    while app.running {
        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| ScoutError::Tui(e.to_string()))?;

        if app.map_visible() {
            app.map_signal(MapSignal::DidFinishLoading);
        }

        for request in app.take_requests() {
            worker::spawn(services.clone(), request, events.sender());
        }

        match events.next()? {
            event::Event::Key(key) => actions::handle_key_event(app, key),
            event::Event::Tick => {
                app.tick();
                if app.map_visible() {
                    app.map_signal(MapSignal::Idle);
                }
            }
            event::Event::Resize(_, _) => {
                if app.map_visible() {
                    app.map_signal(MapSignal::DidFinishRenderingFully);
                }
            }
            event::Event::Api(outcome) => app.handle_api_event(outcome),
        }
    }

    Ok(())
}
