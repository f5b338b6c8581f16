pub mod help_popup;
pub mod map_view;
pub mod report_list;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Scrollable list that keeps the selected entry in view. `line_map` gives the
/// entry index each line belongs to.
pub(crate) fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    lines: Vec<Line<'static>>,
    line_map: &[Option<usize>],
    selected: Option<usize>,
) {
    let selected_line = line_map
        .iter()
        .position(|i| *i == selected)
        .unwrap_or(0);

    let scroll_offset = if selected_line >= area.height as usize {
        selected_line.saturating_sub(area.height as usize / 2)
    } else {
        0
    };

    let total = lines.len();
    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);

    if total > area.height as usize {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None);
        let mut scrollbar_state = ScrollbarState::new(total).position(scroll_offset);
        frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}
