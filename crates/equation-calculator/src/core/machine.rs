//! Equation state machine
//!
//! Translates keypad input into edits of the [`EquationBuffer`] and the
//! operand registers, calling the [`Dispatcher`] when an operator chains a
//! calculation or `=` finishes one.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::CalculatorConfig;
use crate::core::{
    format_number, format_outcome, parse_operand, CalcResult, Dispatcher, EquationBuffer,
    Operation, Token,
};

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    /// A digit key (0-9)
    Digit(u8),
    /// The decimal point
    Decimal,
    /// One of the four operators
    Operator(Operation),
    /// Finish the equation
    Equals,
    /// Clear the operand being typed
    Clear,
    /// Reset everything
    AllClear,
    /// Delete the last character
    Backspace,
}

/// Calculator state: equation buffer, operand registers, pending operator
/// and reset flag
///
/// Every handler takes `&mut self` and runs to completion. Sharing one
/// machine between threads needs a lock around the whole instance.
#[derive(Debug, Clone)]
pub struct EquationMachine {
    buffer: EquationBuffer,
    first_operand: Option<CalcResult<f64>>,
    second_operand: Option<CalcResult<f64>>,
    pending: Option<Operation>,
    /// Next digit or decimal starts a new operand segment
    reset: bool,
    /// Unrounded value behind a collapsed result, until its text is edited
    carried: Option<f64>,
    precision: usize,
}

impl Default for EquationMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationMachine {
    /// Creates a machine in its initial state
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a machine using the configured result precision
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            buffer: EquationBuffer::new(),
            first_operand: None,
            second_operand: None,
            pending: None,
            reset: false,
            carried: None,
            precision: config.precision,
        }
    }

    /// Returns the display string (never empty)
    #[must_use]
    pub fn display(&self) -> String {
        self.buffer.render(self.precision)
    }

    /// Returns the whole expression, including the chained prefix
    #[must_use]
    pub fn expression(&self) -> String {
        self.buffer.render_expression(self.precision)
    }

    /// Returns the equation buffer
    #[must_use]
    pub fn buffer(&self) -> &EquationBuffer {
        &self.buffer
    }

    /// Returns the first operand register
    #[must_use]
    pub fn first_operand(&self) -> Option<&CalcResult<f64>> {
        self.first_operand.as_ref()
    }

    /// Returns the second operand register
    #[must_use]
    pub fn second_operand(&self) -> Option<&CalcResult<f64>> {
        self.second_operand.as_ref()
    }

    /// Returns the operator awaiting its second operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operation> {
        self.pending
    }

    /// Returns true if the next digit starts a new operand
    #[must_use]
    pub fn is_reset_pending(&self) -> bool {
        self.reset
    }

    /// Applies one input event and returns the new display
    pub fn apply(&mut self, input: Input) -> String {
        let shown = match input {
            Input::Digit(d) => self.on_digit(d),
            Input::Decimal => self.on_decimal(),
            Input::Operator(op) => self.on_operator(op),
            Input::Equals => self.on_equals(),
            Input::Clear => self.on_clear(),
            Input::AllClear => self.on_all_clear(),
            Input::Backspace => self.on_backspace(),
        };
        debug!(?input, %shown, "applied input");
        shown
    }

    /// Appends a digit to the current operand
    pub fn on_digit(&mut self, digit: u8) -> String {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            warn!(digit, "ignoring out-of-range digit");
            return self.display();
        };

        if self.reset {
            self.start_segment(ch.to_string());
        } else {
            self.carried = None;
            match self.buffer.last_operand_mut() {
                Some(segment) => {
                    // no leading zeros: "0" then "5" is "5"
                    if segment.trim_start_matches('-') == "0" {
                        segment.pop();
                    }
                    segment.push(ch);
                }
                None => self.buffer.push(Token::Operand(ch.to_string())),
            }
        }
        self.display()
    }

    /// Adds a decimal point to the current operand
    pub fn on_decimal(&mut self) -> String {
        if self.reset || self.buffer.last_operand().is_none() {
            self.start_segment("0.".to_string());
        } else if let Some(segment) = self.buffer.last_operand_mut() {
            if segment.contains('.') {
                trace!("second decimal point ignored");
            } else {
                segment.push('.');
                self.carried = None;
            }
        }
        self.display()
    }

    /// Handles an operator key
    ///
    /// The first operator stores the operand; with a second operand entered
    /// the pending operation is evaluated and chained; pressed again without
    /// a new operand it replaces the previous operator.
    pub fn on_operator(&mut self, op: Operation) -> String {
        let value = self.active_value();

        if self.first_operand.is_none() {
            match self.buffer.result().cloned() {
                // continue from the finished equation's result
                Some(Ok(total)) => self.carry(total),
                Some(err) => self.buffer.reset_to(format_outcome(&err, self.precision)),
                None => {}
            }
            if self.buffer.is_empty() {
                self.buffer.push(Token::Operand("0".to_string()));
            }
            self.push_operator(op);
            self.first_operand = Some(value);
        } else if let (Some(pending), Some(first), false) =
            (self.pending, self.first_operand.clone(), self.reset)
        {
            let result = Dispatcher::evaluate_outcomes(pending, &first, &value);
            debug!(%pending, ?first, ?value, ?result, "chained evaluation");
            self.second_operand = Some(value);
            let Ok(total) = result else {
                self.finish(result);
                return self.display();
            };
            self.buffer.fold(total);
            self.buffer.push(Token::Operator(op));
            self.first_operand = Some(Ok(total));
        } else {
            self.push_operator(op);
        }

        self.pending = Some(op);
        self.reset = true;
        self.display()
    }

    /// Evaluates the pending operation
    ///
    /// Does nothing unless a first operand, an operator and a freshly typed
    /// second operand are all present.
    pub fn on_equals(&mut self) -> String {
        let (Some(first), Some(pending), false) =
            (self.first_operand.clone(), self.pending, self.reset)
        else {
            trace!("equals ignored, no second operand");
            return self.display();
        };

        let second = self.active_value();
        let result = Dispatcher::evaluate_outcomes(pending, &first, &second);
        debug!(%pending, ?first, ?second, ?result, "equals");
        self.finish(result);
        self.display()
    }

    /// Clears the operand being typed
    ///
    /// Right after an operator, a result or another clear this is an
    /// all-clear.
    pub fn on_clear(&mut self) -> String {
        if self.reset || self.buffer.is_terminated() {
            return self.on_all_clear();
        }
        if !self.buffer.truncate_to_last_operator() {
            self.first_operand = None;
            self.pending = None;
        }
        self.second_operand = None;
        self.carried = None;
        self.reset = true;
        self.display()
    }

    /// Resets every register and empties the buffer
    pub fn on_all_clear(&mut self) -> String {
        self.buffer.clear();
        self.first_operand = None;
        self.second_operand = None;
        self.pending = None;
        self.reset = false;
        self.carried = None;
        self.display()
    }

    /// Deletes the last character
    ///
    /// On a finished equation the buffer collapses to its result instead.
    /// The collapsed result keeps its full precision until it is edited.
    pub fn on_backspace(&mut self) -> String {
        if let Some(result) = self.buffer.result().cloned() {
            return match result {
                Ok(value) => {
                    self.collapse_to(value);
                    self.display()
                }
                Err(_) => self.on_all_clear(),
            };
        }

        match self.buffer.pop() {
            Some(Token::Operand(mut text)) => {
                self.carried = None;
                text.pop();
                if !text.is_empty() && text != "-" {
                    self.buffer.push(Token::Operand(text));
                }
            }
            Some(Token::Operator(_) | Token::Equals | Token::Result(_)) | None => {}
        }
        self.resync();
        self.display()
    }

    /// Value of the operand segment an operator or equals applies to
    fn active_value(&self) -> CalcResult<f64> {
        if let Some(result) = self.buffer.result() {
            return result.clone();
        }
        match (self.buffer.last_operand(), self.carried) {
            (Some(_), Some(exact)) if self.buffer.tokens().len() == 1 => Ok(exact),
            (Some(text), _) => parse_operand(text),
            (None, _) => self.first_operand.clone().unwrap_or(Ok(0.0)),
        }
    }

    fn push_operator(&mut self, op: Operation) {
        if !self.buffer.replace_trailing_operator(op) {
            self.buffer.push(Token::Operator(op));
        }
    }

    fn start_segment(&mut self, text: String) {
        if self.buffer.is_terminated() {
            self.buffer.clear();
        }
        match self.buffer.last_operand_mut() {
            Some(segment) => *segment = text,
            None => self.buffer.push(Token::Operand(text)),
        }
        self.second_operand = None;
        self.carried = None;
        self.reset = false;
    }

    fn finish(&mut self, result: CalcResult<f64>) {
        self.buffer.push(Token::Equals);
        self.buffer.push(Token::Result(result));
        self.first_operand = None;
        self.second_operand = None;
        self.pending = None;
        self.carried = None;
        self.reset = true;
    }

    /// Replaces the buffer with `value`, remembering it unrounded
    fn carry(&mut self, value: f64) {
        self.buffer.reset_to(format_number(value, self.precision));
        self.carried = Some(value);
    }

    /// Keeps only `value`, shown as a result the next digit replaces
    fn collapse_to(&mut self, value: f64) {
        self.carry(value);
        self.first_operand = None;
        self.second_operand = None;
        self.pending = None;
        self.reset = true;
    }

    /// Re-derives the registers from the buffer after a deletion
    fn resync(&mut self) {
        if let Some(total) = self.buffer.exposed_fold() {
            self.collapse_to(total);
            return;
        }

        match self.buffer.tokens().last() {
            Some(Token::Operator(op)) => {
                self.pending = Some(*op);
                self.reset = true;
            }
            Some(Token::Operand(text)) => {
                if parse_operand(text).is_err() {
                    // only the error marker is left
                    self.on_all_clear();
                    return;
                }
                self.reset = false;
                if !self.buffer.has_operator() {
                    self.first_operand = None;
                    self.pending = None;
                }
            }
            _ => {
                self.first_operand = None;
                self.pending = None;
                self.reset = false;
            }
        }
        self.second_operand = None;
    }
}
