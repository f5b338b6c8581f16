pub mod map;
pub mod profile;
pub mod report;

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use super::form::{Form, TextField};
use super::theme::TuiTheme;

const LABEL_WIDTH: usize = 10;

/// Keep the tail of `chars` that fits in `width` columns, cursor included.
fn visible_window(chars: &[char], cursor: usize, width: usize) -> usize {
    let mut used = 1; // cursor cell
    let mut start = cursor.min(chars.len());
    while start > 0 {
        let w = chars[start - 1].width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start -= 1;
    }
    start
}

fn field_line(
    field: &TextField,
    focused: bool,
    editing: bool,
    theme: &TuiTheme,
    width: usize,
) -> Line<'static> {
    let label_style = if focused { theme.label } else { theme.muted };
    let marker = if focused { "▸ " } else { "  " };
    let mut spans = vec![
        Span::styled(marker.to_string(), label_style),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label), label_style),
    ];

    let shown: Vec<char> = field.display_value().chars().collect();
    let room = width.saturating_sub(LABEL_WIDTH + 4);

    if focused && editing {
        let cursor = field.cursor.min(shown.len());
        let start = visible_window(&shown, cursor, room);
        let before: String = shown[start..cursor].iter().collect();
        let cursor_char = shown.get(cursor).copied().unwrap_or(' ');
        let after: String = shown.iter().skip(cursor + 1).collect();
        spans.push(Span::raw(before));
        spans.push(Span::styled(
            cursor_char.to_string(),
            Style::default().bg(Color::White).fg(Color::Black),
        ));
        spans.push(Span::raw(after));
    } else if shown.is_empty() {
        spans.push(Span::styled("—".to_string(), theme.muted));
    } else {
        spans.push(Span::raw(shown.into_iter().collect::<String>()));
    }

    Line::from(spans)
}

/// One line per field, with a block cursor in the focused field while editing.
pub(crate) fn form_lines(form: &Form, theme: &TuiTheme, width: usize) -> Vec<Line<'static>> {
    form.fields
        .iter()
        .enumerate()
        .map(|(i, field)| field_line(field, i == form.focus, form.editing, theme, width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_keeps_cursor_visible() {
        let chars: Vec<char> = "abcdefghij".chars().collect();
        assert_eq!(visible_window(&chars, 10, 4), 7);
        assert_eq!(visible_window(&chars, 2, 40), 0);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let chars: Vec<char> = "駅駅駅".chars().collect();
        assert_eq!(visible_window(&chars, 3, 5), 1);
    }
}
