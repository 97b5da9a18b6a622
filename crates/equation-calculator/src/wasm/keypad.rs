//! Keypad layout and keyboard routing
//!
//! Mouse clicks arrive as button element ids and keyboard presses as
//! `KeyboardEvent.key` names; both are resolved to an [`Input`] here.

use super::dom::{DomElement, MockDom};
use crate::core::{Input, Operation};

/// Returns the button label for an input
#[must_use]
pub fn label(input: Input) -> String {
    match input {
        Input::Digit(d) => d.to_string(),
        Input::Decimal => ".".to_string(),
        Input::Operator(op) => op.symbol().to_string(),
        Input::Equals => "=".to_string(),
        Input::Clear => "C".to_string(),
        Input::AllClear => "AC".to_string(),
        Input::Backspace => "⌫".to_string(),
    }
}

/// Returns the DOM element id of the button producing an input
#[must_use]
pub fn button_id(input: Input) -> String {
    match input {
        Input::Digit(d) => format!("btn-{d}"),
        Input::Decimal => "btn-decimal".to_string(),
        Input::Operator(op) => format!("btn-{}", op.name()),
        Input::Equals => "btn-equals".to_string(),
        Input::Clear => "btn-clear".to_string(),
        Input::AllClear => "btn-all-clear".to_string(),
        Input::Backspace => "btn-backspace".to_string(),
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The input this button sends
    pub input: Input,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns the button covers
    pub col_span: usize,
}

impl KeypadButtonDef {
    /// Creates a single-column button
    #[must_use]
    pub fn new(input: Input, row: usize, col: usize) -> Self {
        Self {
            input,
            id: button_id(input),
            row,
            col,
            col_span: 1,
        }
    }

    /// Widens the button over `span` columns
    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.col_span = span.max(1);
        self
    }

    /// Returns true if the button covers the grid cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && col >= self.col && col < self.col + self.col_span
    }
}

/// Keypad layout
///
/// ```text
/// [ AC ] [ C ] [ ⌫ ] [ ÷ ]
/// [ 7  ] [ 8 ] [ 9 ] [ × ]
/// [ 4  ] [ 5 ] [ 6 ] [ - ]
/// [ 1  ] [ 2 ] [ 3 ] [ + ]
/// [ 0  ] [ . ] [    =    ]
/// ```
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let mut buttons = vec![
            KeypadButtonDef::new(Input::AllClear, 0, 0),
            KeypadButtonDef::new(Input::Clear, 0, 1),
            KeypadButtonDef::new(Input::Backspace, 0, 2),
        ];
        for (row, op) in Operation::ALL.into_iter().enumerate() {
            buttons.push(KeypadButtonDef::new(Input::Operator(op), row, 3));
        }
        // digits 7-9, 4-6, 1-3 on rows 1-3
        for row in 1..=3 {
            for col in 0..3 {
                let digit = (3 - row) * 3 + col + 1;
                buttons.push(KeypadButtonDef::new(Input::Digit(digit as u8), row, col));
            }
        }
        buttons.push(KeypadButtonDef::new(Input::Digit(0), 4, 0));
        buttons.push(KeypadButtonDef::new(Input::Decimal, 4, 1));
        buttons.push(KeypadButtonDef::new(Input::Equals, 4, 2).spanning(2));

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button sending an input
    #[must_use]
    pub fn find_button_by_input(&self, input: Input) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.input == input)
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                let mut elem = DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&label(btn.input))
                    .with_class("keypad-btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col));
                if btn.col_span > 1 {
                    elem = elem.with_attr("data-span", &btn.col_span.to_string());
                }
                elem
            })
            .collect()
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        let mut keypad = DomElement::new("div")
            .with_id("calc-keypad")
            .with_class("keypad");
        for btn_elem in self.create_dom_elements() {
            keypad = keypad.with_child(btn_elem);
        }
        keypad
    }

    /// Resolves a clicked element id
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Input> {
        self.find_button_by_id(element_id).map(|btn| btn.input)
    }

    /// Maps a keyboard key name to an input
    #[must_use]
    pub fn key_to_input(key: &str) -> Option<Input> {
        let input = match key {
            "." | "," => Input::Decimal,
            "+" => Input::Operator(Operation::Add),
            "-" => Input::Operator(Operation::Subtract),
            "*" | "x" | "X" | "×" => Input::Operator(Operation::Multiply),
            "/" | "÷" => Input::Operator(Operation::Divide),
            "Enter" | "=" => Input::Equals,
            "Backspace" => Input::Backspace,
            "Delete" => Input::Clear,
            "Escape" => Input::AllClear,
            _ => {
                let mut chars = key.chars();
                let digit = chars.next()?.to_digit(10)?;
                if chars.next().is_some() {
                    return None;
                }
                Input::Digit(digit as u8)
            }
        };
        Some(input)
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Adds keypad to an existing calculator DOM
    fn add_keypad(&mut self, keypad: &WasmKeypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &WasmKeypad) {
        let keypad_elem = keypad.create_keypad_element();
        for btn_elem in &keypad_elem.children {
            self.register_element(btn_elem.clone());
        }
        self.register_element(keypad_elem);
    }
}
