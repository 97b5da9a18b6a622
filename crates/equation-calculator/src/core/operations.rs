//! Operation dispatcher: symbol to binary arithmetic function

use crate::core::{CalcError, CalcResult};
use serde::{Deserialize, Serialize};

/// The four keypad operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operation {
    /// Every operator, in keypad order from top to bottom
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the symbol written into the equation
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Looks up an operator by its display symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Short name used in element ids
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }
}

impl TryFrom<char> for Operation {
    type Error = CalcError;

    fn try_from(symbol: char) -> CalcResult<Self> {
        Self::from_symbol(symbol).ok_or(CalcError::UnknownOperator(symbol))
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stateless dispatcher evaluating one binary operation
///
/// Results are always finite: division by zero and overflow come back as
/// errors, which the display renders as the error marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// Addition: a + b
    #[must_use]
    pub fn add(a: f64, b: f64) -> f64 {
        a + b
    }

    /// Subtraction: a - b
    #[must_use]
    pub fn subtract(a: f64, b: f64) -> f64 {
        a - b
    }

    /// Multiplication: a * b
    #[must_use]
    pub fn multiply(a: f64, b: f64) -> f64 {
        a * b
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Evaluates `op` on two finite operands
    pub fn evaluate(op: Operation, a: f64, b: f64) -> CalcResult<f64> {
        for operand in [a, b] {
            if !operand.is_finite() {
                return Err(CalcError::InvalidOperand(operand.to_string()));
            }
        }
        let raw = match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b)?,
        };
        Self::check_overflow(raw)
    }

    /// Evaluates with operands that may already carry an error
    ///
    /// The first error wins, so a non-numeric operand surfaces as the
    /// error marker exactly like a division by zero.
    pub fn evaluate_outcomes(
        op: Operation,
        a: &CalcResult<f64>,
        b: &CalcResult<f64>,
    ) -> CalcResult<f64> {
        let a = a.clone()?;
        let b = b.clone()?;
        Self::evaluate(op, a, b)
    }

    fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }
}
