//! Core calculator module: dispatcher, equation buffer and state machine
//!
//! Everything in here is platform independent. The browser layer in
//! [`crate::wasm`] only translates clicks and key presses into [`Input`]s.

mod equation;
pub mod machine;
mod operations;

pub use equation::{EquationBuffer, Token};
pub use machine::{EquationMachine, Input};
pub use operations::{Dispatcher, Operation};

/// Display text shown in place of a result when an evaluation fails
pub const ERROR_MARKER: &str = "Error";

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Operand text that does not parse to a finite number
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),
    /// Symbol outside the operator set
    #[error("Unknown operator: {0}")]
    UnknownOperator(char),
    /// Rejected calculator configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Parses an operand segment into a finite number
///
/// Anything that is not a finite decimal number (the error marker, a lone
/// sign, `inf`) is reported as [`CalcError::InvalidOperand`].
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidOperand(text.to_string())),
    }
}

/// Formats a number for display, trimming trailing zeros
///
/// `precision` caps the number of fraction digits.
#[must_use]
pub fn format_number(n: f64, precision: usize) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        // avoid "-0"
        return format!("{:.0}", n + 0.0);
    }
    let s = format!("{n:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Renders an evaluation outcome the way the display shows it
#[must_use]
pub fn format_outcome(outcome: &CalcResult<f64>, precision: usize) -> String {
    match outcome {
        Ok(value) => format_number(*value, precision),
        Err(_) => ERROR_MARKER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_division_by_zero() {
        let err = CalcError::DivisionByZero;
        assert_eq!(format!("{err}"), "Division by zero");
    }

    #[test]
    fn test_calc_error_display_overflow() {
        let err = CalcError::Overflow;
        assert_eq!(format!("{err}"), "Overflow: result exceeds maximum value");
    }

    #[test]
    fn test_calc_error_display_invalid_operand() {
        let err = CalcError::InvalidOperand("Error".into());
        assert_eq!(format!("{err}"), "Invalid operand: Error");
    }

    #[test]
    fn test_calc_error_display_unknown_operator() {
        assert_eq!(
            CalcError::UnknownOperator('%').to_string(),
            "Unknown operator: %"
        );
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }

    // ===== parse_operand tests =====

    #[test]
    fn test_parse_operand_integer() {
        assert_eq!(parse_operand("41"), Ok(41.0));
    }

    #[test]
    fn test_parse_operand_trailing_decimal_point() {
        assert_eq!(parse_operand("12."), Ok(12.0));
        assert_eq!(parse_operand("0."), Ok(0.0));
    }

    #[test]
    fn test_parse_operand_negative_result() {
        assert_eq!(parse_operand("-2.5"), Ok(-2.5));
    }

    #[test]
    fn test_parse_operand_rejects_marker_and_specials() {
        for text in [ERROR_MARKER, "-", "", "inf", "NaN"] {
            assert!(
                matches!(parse_operand(text), Err(CalcError::InvalidOperand(_))),
                "{text} should be rejected"
            );
        }
    }

    // ===== format_number tests =====

    #[test]
    fn test_format_number_integer() {
        assert_eq!(format_number(42.0, 10), "42");
    }

    #[test]
    fn test_format_number_decimal() {
        assert_eq!(format_number(3.5, 10), "3.5");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-5.0, 10), "-5");
    }

    #[test]
    fn test_format_number_negative_zero() {
        assert_eq!(format_number(-0.0, 10), "0");
    }

    #[test]
    fn test_format_number_float_noise_trimmed() {
        assert_eq!(format_number(0.1 + 0.2, 10), "0.3");
    }

    #[test]
    fn test_format_number_precision() {
        assert_eq!(format_number(1.0 / 3.0, 4), "0.3333");
    }

    #[test]
    fn test_format_number_large() {
        assert_eq!(format_number(1e20, 10), "100000000000000000000");
    }

    #[test]
    fn test_format_outcome_error_marker() {
        assert_eq!(format_outcome(&Err(CalcError::DivisionByZero), 10), "Error");
        assert_eq!(format_outcome(&Ok(49.0), 10), "49");
    }
}
