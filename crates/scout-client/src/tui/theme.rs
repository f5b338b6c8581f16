use ratatui::style::{Color, Modifier, Style};

use crate::config::{Rgb, ThemeColors};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// TUI theme with ratatui styles
#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub muted: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    pub accent: Style,
    pub selected: Style,
    pub border: Style,
    pub title: Style,
    pub tab_active: Style,
    pub tab_inactive: Style,
    pub label: Style,
    /// Coastline colour on the map canvas
    pub coastline: Color,
    pub report_marker: Color,
    pub verified_marker: Color,
    pub location_marker: Color,
}

impl From<&ThemeColors> for TuiTheme {
    fn from(colors: &ThemeColors) -> Self {
        Self {
            muted: Style::default().fg(color(colors.muted)),
            success: Style::default().fg(color(colors.success)),
            warning: Style::default().fg(color(colors.warning)),
            error: Style::default().fg(color(colors.error)),
            info: Style::default().fg(color(colors.info)),
            accent: Style::default().fg(color(colors.accent)),
            selected: Style::default()
                .bg(Color::Rgb(50, 50, 70))
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::Rgb(51, 51, 51)),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            tab_active: Style::default()
                .fg(color(colors.accent))
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(color(colors.muted)),
            label: Style::default()
                .fg(color(colors.info))
                .add_modifier(Modifier::BOLD),
            coastline: Color::Rgb(80, 80, 100),
            report_marker: color(colors.warning),
            verified_marker: color(colors.success),
            location_marker: color(colors.accent),
        }
    }
}
