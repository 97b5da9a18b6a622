//! Equation buffer modeled as typed tokens
//!
//! The buffer keeps the whole expression the user typed. While a chain is in
//! progress the already evaluated prefix is shown as its running total; once
//! the equation is finished with `=` the full expression is shown again.

use crate::core::{format_number, format_outcome, CalcResult, Operation};

/// One element of the equation
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Digits of an operand segment, possibly with one decimal point
    Operand(String),
    /// An operator between two operands
    Operator(Operation),
    /// The equals marker
    Equals,
    /// Evaluated result following the equals marker
    Result(CalcResult<f64>),
}

impl Token {
    fn render_into(&self, out: &mut String, precision: usize) {
        match self {
            Self::Operand(text) => out.push_str(text),
            Self::Operator(op) => out.push(op.symbol()),
            Self::Equals => out.push('='),
            Self::Result(outcome) => out.push_str(&format_outcome(outcome, precision)),
        }
    }
}

/// Running total that replaces a prefix of the tokens on screen
#[derive(Debug, Clone, PartialEq)]
struct Fold {
    /// Tokens before this index are represented by `total`
    at: usize,
    total: f64,
}

/// The equation shown to the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquationBuffer {
    tokens: Vec<Token>,
    fold: Option<Fold>,
}

impl EquationBuffer {
    /// Creates an empty buffer (displayed as `0`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tokens of the full expression
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns true if nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns true once the equals marker is present
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.tokens.contains(&Token::Equals)
    }

    /// Returns true if any operator is present
    #[must_use]
    pub fn has_operator(&self) -> bool {
        self.tokens.iter().any(|t| matches!(t, Token::Operator(_)))
    }

    /// Returns the result of a finished equation
    #[must_use]
    pub fn result(&self) -> Option<&CalcResult<f64>> {
        match self.tokens.last() {
            Some(Token::Result(outcome)) => Some(outcome),
            _ => None,
        }
    }

    /// Returns the trailing operand segment, if the buffer ends with one
    #[must_use]
    pub fn last_operand(&self) -> Option<&str> {
        match self.tokens.last() {
            Some(Token::Operand(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub(crate) fn last_operand_mut(&mut self) -> Option<&mut String> {
        match self.tokens.last_mut() {
            Some(Token::Operand(text)) => Some(text),
            _ => None,
        }
    }

    /// Returns the trailing operator, if the buffer ends with one
    #[must_use]
    pub fn last_operator(&self) -> Option<Operation> {
        match self.tokens.last() {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub(crate) fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.tokens.clear();
        self.fold = None;
    }

    /// Replaces the whole buffer with a single operand
    pub(crate) fn reset_to(&mut self, operand: String) {
        self.clear();
        self.tokens.push(Token::Operand(operand));
    }

    /// Swaps the trailing operator; false if the buffer does not end with one
    pub(crate) fn replace_trailing_operator(&mut self, op: Operation) -> bool {
        match self.tokens.last_mut() {
            Some(Token::Operator(current)) => {
                *current = op;
                true
            }
            _ => false,
        }
    }

    /// Drops everything after the last operator
    ///
    /// Without an operator the buffer empties. Returns whether an operator
    /// was kept.
    pub(crate) fn truncate_to_last_operator(&mut self) -> bool {
        match self
            .tokens
            .iter()
            .rposition(|t| matches!(t, Token::Operator(_)))
        {
            Some(idx) => {
                self.tokens.truncate(idx + 1);
                true
            }
            None => {
                self.clear();
                false
            }
        }
    }

    /// Shows everything entered so far as `total`
    pub(crate) fn fold(&mut self, total: f64) {
        self.fold = Some(Fold {
            at: self.tokens.len(),
            total,
        });
    }

    /// Running total whose operator has been deleted again
    ///
    /// Returns the total when backspacing removed every token after the
    /// folded prefix.
    pub(crate) fn exposed_fold(&self) -> Option<f64> {
        self.fold
            .as_ref()
            .filter(|fold| self.tokens.len() <= fold.at)
            .map(|fold| fold.total)
    }

    /// Renders the display string
    #[must_use]
    pub fn render(&self, precision: usize) -> String {
        if self.tokens.is_empty() {
            return "0".to_string();
        }
        match &self.fold {
            Some(fold) if !self.is_terminated() && self.tokens.len() > fold.at => {
                let mut out = format_number(fold.total, precision);
                for token in &self.tokens[fold.at..] {
                    token.render_into(&mut out, precision);
                }
                out
            }
            _ => self.render_expression(precision),
        }
    }

    /// Renders the full expression without folding
    #[must_use]
    pub fn render_expression(&self, precision: usize) -> String {
        if self.tokens.is_empty() {
            return "0".to_string();
        }
        let mut out = String::new();
        for token in &self.tokens {
            token.render_into(&mut out, precision);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalcError;

    fn operand(text: &str) -> Token {
        Token::Operand(text.to_string())
    }

    fn buffer(tokens: Vec<Token>) -> EquationBuffer {
        let mut buf = EquationBuffer::new();
        for t in tokens {
            buf.push(t);
        }
        buf
    }

    #[test]
    fn test_empty_renders_zero() {
        let buf = EquationBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.render(10), "0");
        assert_eq!(buf.render_expression(10), "0");
    }

    #[test]
    fn test_render_expression() {
        let buf = buffer(vec![
            operand("41"),
            Token::Operator(Operation::Add),
            operand("8"),
            Token::Equals,
            Token::Result(Ok(49.0)),
        ]);
        assert!(buf.is_terminated());
        assert_eq!(buf.render(10), "41+8=49");
        assert_eq!(buf.result(), Some(&Ok(49.0)));
    }

    #[test]
    fn test_render_error_result() {
        let buf = buffer(vec![
            operand("10"),
            Token::Operator(Operation::Divide),
            operand("0"),
            Token::Equals,
            Token::Result(Err(CalcError::DivisionByZero)),
        ]);
        assert_eq!(buf.render(10), "10÷0=Error");
    }

    #[test]
    fn test_fold_shows_running_total() {
        let mut buf = buffer(vec![operand("12"), Token::Operator(Operation::Add), operand("7")]);
        buf.fold(19.0);
        buf.push(Token::Operator(Operation::Subtract));
        assert_eq!(buf.render(10), "19-");
        assert_eq!(buf.render_expression(10), "12+7-");

        buf.push(operand("1"));
        assert_eq!(buf.render(10), "19-1");
    }

    #[test]
    fn test_fold_ignored_once_terminated() {
        let mut buf = buffer(vec![operand("12"), Token::Operator(Operation::Add), operand("7")]);
        buf.fold(19.0);
        buf.push(Token::Operator(Operation::Subtract));
        buf.push(operand("1"));
        buf.push(Token::Equals);
        buf.push(Token::Result(Ok(18.0)));
        assert_eq!(buf.render(10), "12+7-1=18");
    }

    #[test]
    fn test_exposed_fold() {
        let mut buf = buffer(vec![operand("12"), Token::Operator(Operation::Add), operand("7")]);
        buf.fold(19.0);
        buf.push(Token::Operator(Operation::Subtract));
        assert_eq!(buf.exposed_fold(), None);
        buf.pop();
        assert_eq!(buf.exposed_fold(), Some(19.0));
    }

    #[test]
    fn test_replace_trailing_operator() {
        let mut buf = buffer(vec![operand("5"), Token::Operator(Operation::Add)]);
        assert!(buf.replace_trailing_operator(Operation::Multiply));
        assert_eq!(buf.render(10), "5×");
        assert_eq!(buf.last_operator(), Some(Operation::Multiply));

        let mut no_op = buffer(vec![operand("5")]);
        assert!(!no_op.replace_trailing_operator(Operation::Multiply));
    }

    #[test]
    fn test_truncate_to_last_operator() {
        let mut buf = buffer(vec![
            operand("5"),
            Token::Operator(Operation::Add),
            operand("32"),
        ]);
        assert!(buf.truncate_to_last_operator());
        assert_eq!(buf.render(10), "5+");

        let mut single = buffer(vec![operand("32")]);
        assert!(!single.truncate_to_last_operator());
        assert!(single.is_empty());
    }

    #[test]
    fn test_reset_to_drops_fold() {
        let mut buf = buffer(vec![operand("1"), Token::Operator(Operation::Add)]);
        buf.fold(1.0);
        buf.reset_to("8".into());
        assert_eq!(buf.tokens(), &[operand("8")]);
        assert_eq!(buf.exposed_fold(), None);
    }

    #[test]
    fn test_fold_rounds_only_on_screen() {
        let mut buf = buffer(vec![operand("10"), Token::Operator(Operation::Divide), operand("3")]);
        buf.fold(10.0 / 3.0);
        buf.push(Token::Operator(Operation::Add));
        assert_eq!(buf.render(4), "3.3333+");
        buf.pop();
        assert_eq!(buf.exposed_fold(), Some(10.0 / 3.0));
    }

    #[test]
    fn test_last_operand() {
        let buf = buffer(vec![operand("12.5")]);
        assert_eq!(buf.last_operand(), Some("12.5"));
        assert!(!buf.has_operator());
    }
}
