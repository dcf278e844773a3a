//! Single-line input field
//!
//! Every insertion is checked against the field's acceptance rule before it
//! lands; a rejected keystroke leaves text and cursor untouched. Deletions are
//! never filtered.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use epochalypse_core::Field;

use crate::config::FieldConfig;

/// What an editing key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Text changed
    Changed,
    /// Insertion refused by the acceptance rule
    Rejected,
    /// Cursor moved, text unchanged
    Moved,
    /// Not an editing key
    Ignored,
}

#[derive(Debug, Clone)]
pub struct InputField {
    field: Field,
    label: String,
    width: u16,
    text: String,
    /// Cursor position in characters
    cursor: usize,
}

impl InputField {
    pub fn new(config: &FieldConfig) -> Self {
        InputField {
            field: config.field,
            label: config.label.clone(),
            width: config.width.max(1),
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text without filtering and move the cursor to the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_count();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Edit {
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let mut buf = [0u8; 4];
                self.insert(c.encode_utf8(&mut buf))
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return Edit::Ignored;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                Edit::Changed
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.char_count() {
                    return Edit::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                Edit::Changed
            }
            // Ctrl+U - Clear to start
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.cursor == 0 {
                    return Edit::Ignored;
                }
                let at = self.byte_index(self.cursor);
                self.text.replace_range(..at, "");
                self.cursor = 0;
                Edit::Changed
            }
            (KeyCode::Left, _) => self.move_to(self.cursor.saturating_sub(1)),
            (KeyCode::Right, _) => self.move_to((self.cursor + 1).min(self.char_count())),
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.move_to(0),
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.move_to(self.char_count())
            }
            _ => Edit::Ignored,
        }
    }

    /// Insert at the cursor if the result passes the acceptance rule
    pub fn insert(&mut self, s: &str) -> Edit {
        if s.is_empty() {
            return Edit::Ignored;
        }
        let at = self.byte_index(self.cursor);
        let mut candidate = String::with_capacity(self.text.len() + s.len());
        candidate.push_str(&self.text[..at]);
        candidate.push_str(s);
        candidate.push_str(&self.text[at..]);

        if !self.field.accepts(&candidate) {
            debug!(field = %self.field, candidate, "input rejected");
            return Edit::Rejected;
        }
        self.text = candidate;
        self.cursor += s.chars().count();
        Edit::Changed
    }

    /// The slice of text that fits in `width` cells, and the cursor column
    /// within it. Scrolls so the cursor stays visible.
    pub fn visible(&self) -> (String, u16) {
        let width = usize::from(self.width);
        let start = if self.cursor >= width {
            self.cursor + 1 - width
        } else {
            0
        };
        let shown: String = self.text.chars().skip(start).take(width).collect();
        let column = u16::try_from(self.cursor - start).unwrap_or(self.width);
        (shown, column)
    }

    fn move_to(&mut self, cursor: usize) -> Edit {
        if cursor == self.cursor {
            return Edit::Ignored;
        }
        self.cursor = cursor;
        Edit::Moved
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}
