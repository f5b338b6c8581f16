use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};

use crate::config::MAP_TOKEN_PLACEHOLDER;
use crate::tui::app::App;

/// Lifecycle notifications from the map surface. Any of them means the map is
/// drawn and usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSignal {
    /// First frame containing the map was flushed
    DidFinishLoading,
    /// A tick passed with the map on screen
    Idle,
    /// The map was redrawn after a resize
    DidFinishRenderingFully,
}

/// One-shot readiness flag. Once set it stays set for the life of the view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapReadyLatch {
    ready: bool,
}

impl MapReadyLatch {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Returns true only for the signal that flipped the latch.
    pub fn signal(&mut self, signal: MapSignal) -> bool {
        if self.ready {
            return false;
        }
        tracing::debug!(?signal, "map ready");
        self.ready = true;
        true
    }
}

/// Draw the map, or the configuration error panel when no usable credential
/// is configured.
pub fn render_map_view(frame: &mut Frame, app: &App, area: Rect) {
    if app.config.map.access_token().is_none() {
        render_credential_error(frame, app, area);
        return;
    }

    let region = app.state.map.region_or_default();
    let center = region.center();
    let mut title = vec![Span::styled(
        format!(" {:.4}, {:.4} ", center.latitude, center.longitude),
        app.theme.title,
    )];
    if app.state.map.follow_user_location() {
        title.push(Span::styled("following ", app.theme.info));
    }
    if app.state.reports.is_loading() {
        title.push(Span::styled("loading… ", app.theme.warning));
    }

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(app.theme.border);

    let selected_id = app.selected().map(|r| r.id.as_str());
    let reports = app.state.reports.reports();
    let current = app.state.map.current_location();
    let theme = &app.theme;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds(region.x_bounds())
        .y_bounds(region.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: theme.coastline,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for report in reports {
                let location = report.location();
                if !region.contains(&location) {
                    continue;
                }
                let color = if report.verification_count > 0 {
                    theme.verified_marker
                } else {
                    theme.report_marker
                };
                let (symbol, style) = if selected_id == Some(report.id.as_str()) {
                    ("◉", Style::default().fg(color).add_modifier(Modifier::BOLD))
                } else {
                    ("●", Style::default().fg(color))
                };
                ctx.print(location.longitude, location.latitude, Span::styled(symbol, style));
            }

            if let Some(fix) = current {
                if region.contains(&fix) {
                    ctx.print(
                        fix.longitude,
                        fix.latitude,
                        Span::styled("⊕", Style::default().fg(theme.location_marker)),
                    );
                }
            }
        });

    frame.render_widget(canvas, area);
}

fn render_credential_error(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Map Configuration Error ", app.theme.error))
        .borders(Borders::ALL)
        .border_style(app.theme.error);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No map access token is configured.",
            app.theme.error.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Set map.accessToken in ~/.scout.json or export SCOUT_MAP_ACCESS_TOKEN.",
            app.theme.muted,
        )),
        Line::from(Span::styled(
            format!("The value \"{MAP_TOKEN_PLACEHOLDER}\" is a placeholder and is ignored."),
            app.theme.muted,
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
