//! Form configuration

use epochalypse_core::Field;

/// One input row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldConfig {
    pub field: Field,
    pub label: String,
    /// Visible cells; longer text scrolls
    pub width: u16,
}

impl FieldConfig {
    pub fn for_field(field: Field) -> Self {
        FieldConfig {
            field,
            label: field.label().to_string(),
            width: field.width(),
        }
    }
}

/// Form layout and labels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormConfig {
    /// Border title, drawn left aligned
    pub title: String,
    pub button_label: String,
    /// Input rows, top to bottom
    pub fields: Vec<FieldConfig>,
    /// Blank lines between rows
    pub row_spacing: u16,
    /// Key hints on the bottom border
    pub show_hints: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            title: " epochalypse ".to_string(),
            button_label: "Now".to_string(),
            fields: Field::ALL.into_iter().map(FieldConfig::for_field).collect(),
            row_spacing: 1,
            show_hints: true,
        }
    }
}

impl FormConfig {
    /// Width of the label column: longest label plus one space
    pub fn label_width(&self) -> u16 {
        let longest = self
            .fields
            .iter()
            .map(|f| f.label.chars().count())
            .max()
            .unwrap_or(0);
        u16::try_from(longest + 1).unwrap_or(u16::MAX)
    }
}
