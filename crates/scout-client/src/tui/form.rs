use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line text input with a character-indexed cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    pub cursor: usize,
    pub masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            ..Default::default()
        }
    }

    pub fn masked(label: &'static str) -> Self {
        Self {
            label,
            masked: true,
            ..Default::default()
        }
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Trimmed value, `None` when blank.
    pub fn non_empty(&self) -> Option<String> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    /// What to draw: bullets for masked fields.
    pub fn display_value(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Apply an editing key. Returns false if the key is not an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let mut chars: Vec<char> = self.value.chars().collect();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let cursor = self.cursor.min(chars.len());

        let new_cursor = match key.code {
            KeyCode::Backspace if cursor > 0 => {
                chars.remove(cursor - 1);
                cursor - 1
            }
            KeyCode::Backspace => cursor,
            KeyCode::Delete => {
                if cursor < chars.len() {
                    chars.remove(cursor);
                }
                cursor
            }
            KeyCode::Left => cursor.saturating_sub(1),
            KeyCode::Right => (cursor + 1).min(chars.len()),
            KeyCode::Home => 0,
            KeyCode::End => chars.len(),
            KeyCode::Char('a') if ctrl => 0,
            KeyCode::Char('e') if ctrl => chars.len(),
            KeyCode::Char('u') if ctrl => {
                chars.drain(..cursor);
                0
            }
            KeyCode::Char('k') if ctrl => {
                chars.truncate(cursor);
                cursor
            }
            KeyCode::Char('w') if ctrl => {
                let before: String = chars[..cursor].iter().collect();
                let start = before
                    .trim_end()
                    .rfind(' ')
                    .map(|i| before[..=i].chars().count())
                    .unwrap_or(0);
                chars.drain(start..cursor);
                start
            }
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(c) => {
                chars.insert(cursor, c);
                cursor + 1
            }
            _ => return false,
        };

        self.value = chars.into_iter().collect();
        self.cursor = new_cursor;
        true
    }
}

/// What a key did to a [`Form`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submit,
    /// Editing was left with Esc
    Cancel,
    Changed,
    Ignored,
}

/// A vertical list of text fields with one focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<TextField>,
    pub focus: usize,
    pub editing: bool,
}

impl Form {
    pub fn new(fields: Vec<TextField>) -> Self {
        Self {
            fields,
            focus: 0,
            editing: false,
        }
    }

    pub fn field(&self, index: usize) -> &TextField {
        &self.fields[index]
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.focus = 0;
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_previous(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Keys while editing: Esc leaves, Enter submits, Up/Down move focus,
    /// everything else goes to the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        match key.code {
            KeyCode::Esc => {
                self.editing = false;
                FormOutcome::Cancel
            }
            KeyCode::Enter => FormOutcome::Submit,
            KeyCode::Up | KeyCode::BackTab => {
                self.focus_previous();
                FormOutcome::Changed
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focus_next();
                FormOutcome::Changed
            }
            _ => {
                let focus = self.focus;
                if self.fields[focus].handle_key(key) {
                    FormOutcome::Changed
                } else {
                    FormOutcome::Ignored
                }
            }
        }
    }
}
