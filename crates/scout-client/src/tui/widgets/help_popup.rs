use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::App;
use crate::tui::ui::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tabs",
        &[
            ("Tab/S-Tab", "Next / previous tab"),
            ("1 2 3", "Profile / Map / Report"),
            ("q", "Quit"),
        ],
    ),
    (
        "Map",
        &[
            ("arrows", "Pan"),
            ("+ -", "Zoom in / out"),
            ("c", "Recenter on my location"),
            ("j/k", "Select sighting"),
            ("v", "Verify selected"),
            ("d", "Delete selected"),
            ("r", "Refresh"),
        ],
    ),
    (
        "Report",
        &[
            ("e", "Edit form"),
            ("a", "Toggle anonymous"),
            ("Enter", "Send report"),
        ],
    ),
    (
        "Profile",
        &[
            ("m", "Switch login / register"),
            ("u", "Reload profile"),
            ("t", "Refresh session"),
            ("o", "Log out"),
        ],
    ),
];

pub fn render_help_popup(frame: &mut Frame, app: &App) {
    let height = SECTIONS.iter().map(|(_, keys)| keys.len() + 2).sum::<usize>() + 3;
    let area = centered_rect(50, height as u16, frame.area());

    let block = Block::default()
        .title(" Keybindings ")
        .borders(Borders::ALL)
        .border_style(app.theme.border)
        .style(Style::default().bg(Color::Black));

    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = app.theme.muted;
    let section_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let mut text = vec![Line::from("")];
    for (title, keys) in SECTIONS {
        text.push(Line::from(Span::styled(format!("  {title}"), section_style)));
        for (key, desc) in keys.iter() {
            text.push(Line::from(vec![
                Span::styled(format!("    {key:<11}"), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        text.push(Line::from(""));
    }
    text.push(Line::from(Span::styled("        Press any key to close", desc_style)));

    frame.render_widget(Clear, area);
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    frame.render_widget(Paragraph::new(text), inner);
}
