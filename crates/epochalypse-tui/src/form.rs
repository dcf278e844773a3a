//! The form: input rows plus the Now button, with focus and key dispatch
//!
//! Leaving or confirming an input row commits it. The form only reports what
//! happened; the caller decides what a commit means.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{trace, warn};

use epochalypse_core::{Field, FieldSink};

use crate::config::FormConfig;
use crate::input::InputField;

/// Something the caller has to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The user finished editing `field`
    Commit { field: Field, text: String },
    /// The Now button was activated
    Now,
    Quit,
}

/// Focus position: an input row by index, or the button after the last row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(usize),
    Button,
}

pub struct Form {
    title: String,
    button_label: String,
    row_spacing: u16,
    label_width: u16,
    show_hints: bool,
    inputs: Vec<InputField>,
    focus: Focus,
}

impl Form {
    pub fn new(config: &FormConfig) -> Self {
        let inputs: Vec<InputField> = config.fields.iter().map(InputField::new).collect();
        let focus = if inputs.is_empty() {
            Focus::Button
        } else {
            Focus::Input(0)
        };
        Form {
            title: config.title.clone(),
            button_label: config.button_label.clone(),
            row_spacing: config.row_spacing,
            label_width: config.label_width(),
            show_hints: config.show_hints,
            inputs,
            focus,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn button_label(&self) -> &str {
        &self.button_label
    }

    pub fn row_spacing(&self) -> u16 {
        self.row_spacing
    }

    pub fn label_width(&self) -> u16 {
        self.label_width
    }

    pub fn show_hints(&self) -> bool {
        self.show_hints
    }

    pub fn inputs(&self) -> &[InputField] {
        &self.inputs
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn input(&self, field: Field) -> Option<&InputField> {
        self.inputs.iter().find(|input| input.field() == field)
    }

    /// Displayed text of `field`, empty if the form has no such row
    pub fn text(&self, field: Field) -> &str {
        self.input(field).map(InputField::text).unwrap_or("")
    }

    /// Programmatic write; bypasses the acceptance rule
    pub fn set_text(&mut self, field: Field, text: &str) {
        if let Some(input) = self.inputs.iter_mut().find(|input| input.field() == field) {
            input.set_text(text);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(FormEvent::Quit);
        }

        match self.focus {
            Focus::Input(index) => self.handle_input_key(index, key),
            Focus::Button => self.handle_button_key(key),
        }
    }

    /// Bracketed paste into the focused row, as one insertion
    pub fn handle_paste(&mut self, text: &str) {
        let Focus::Input(index) = self.focus else {
            return;
        };
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if let Some(input) = self.inputs.get_mut(index) {
            input.insert(&clean);
        }
    }

    fn handle_input_key(&mut self, index: usize, key: KeyEvent) -> Option<FormEvent> {
        let commit = match key.code {
            KeyCode::Enter | KeyCode::Esc => true,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            _ => false,
        };

        let input = self.inputs.get_mut(index)?;
        if commit {
            return Some(FormEvent::Commit {
                field: input.field(),
                text: input.text().to_string(),
            });
        }
        let edit = input.handle_key(key);
        trace!(field = %input.field(), ?edit, "key");
        None
    }

    fn handle_button_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(FormEvent::Now),
            KeyCode::Tab | KeyCode::Down | KeyCode::Right => {
                self.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up | KeyCode::Left => {
                self.focus_prev();
                None
            }
            _ => None,
        }
    }

    /// Rows in order, then the button, then wrap
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Input(index) if index + 1 < self.inputs.len() => Focus::Input(index + 1),
            Focus::Input(_) => Focus::Button,
            Focus::Button if self.inputs.is_empty() => Focus::Button,
            Focus::Button => Focus::Input(0),
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Input(0) => Focus::Button,
            Focus::Input(index) => Focus::Input(index - 1),
            Focus::Button => match self.inputs.len() {
                0 => Focus::Button,
                len => Focus::Input(len - 1),
            },
        };
    }
}

/// Lets `TimeSync` write into a form shared with the event loop
#[derive(Clone)]
pub struct FormSink {
    form: Rc<RefCell<Form>>,
}

impl FormSink {
    pub fn new(form: Rc<RefCell<Form>>) -> Self {
        FormSink { form }
    }
}

impl FieldSink for FormSink {
    fn set_text(&self, field: Field, text: &str) {
        match self.form.try_borrow_mut() {
            Ok(mut form) => form.set_text(field, text),
            Err(_) => warn!(%field, "form busy, field write dropped"),
        }
    }
}
