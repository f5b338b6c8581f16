use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};

use super::app::App;

/// The three screens of the bottom tab bar, in display order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Profile,
    #[default]
    Map,
    Report,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Profile, Tab::Map, Tab::Report];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Profile => "Profile",
            Tab::Map => "Map",
            Tab::Report => "Report",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Profile => 0,
            Tab::Map => 1,
            Tab::Report => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1`, `2`, `3` jump straight to a tab.
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(app.theme.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize / Tab::ALL.len();
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.iter().enumerate() {
        let label = format!("{} {}", i + 1, tab.label());
        let padded = format!("{:^width$}", label, width = width);
        let style = if *tab == app.tab {
            app.theme.tab_active
        } else {
            app.theme.tab_inactive
        };
        spans.push(Span::styled(padded, style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
