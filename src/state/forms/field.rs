//! Form field value objects

use crate::state::classify::{column_status, COLUMN_COUNT};

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Index into the project status columns
    Status(usize),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub required: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self::text_with_value(name, label, String::new())
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            required: false,
        }
    }

    /// Create a status selector starting at the given column
    pub fn status(name: &str, label: &str, column: usize) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Status(column.min(COLUMN_COUNT - 1)),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Get the text value (empty for selectors)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Status(_) => "",
        }
    }

    pub fn is_selector(&self) -> bool {
        matches!(self.value, FieldValue::Status(_))
    }

    /// Push a character to a text field
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from a text field
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Step a selector left or right, wrapping around
    pub fn cycle(&mut self, forward: bool) {
        if let FieldValue::Status(column) = &mut self.value {
            *column = if forward {
                (*column + 1) % COLUMN_COUNT
            } else {
                (*column + COLUMN_COUNT - 1) % COLUMN_COUNT
            };
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Status(column) => column_status(*column).unwrap_or_default().to_string(),
        }
    }
}
