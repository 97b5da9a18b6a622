//! Unified calculator driver
//!
//! Behavioural checks are written once against [`CalculatorDriver`] and run
//! against both the bare [`EquationMachine`] and the page-level
//! [`WasmDriver`](crate::wasm::WasmDriver).

use crate::core::{EquationMachine, Input, Operation};

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```
/// use equation_calculator::driver::{CalculatorDriver, EngineDriver};
///
/// let mut driver = EngineDriver::new();
/// assert_eq!(driver.enter("12+7-"), "19-");
/// assert_eq!(driver.enter("1="), "12+7-1=18");
/// ```
pub trait CalculatorDriver {
    /// Sends one input and returns the new display
    fn press(&mut self, input: Input) -> String;

    /// Gets the current display
    fn display(&self) -> String;

    /// Sends a whole key sequence, see [`inputs_from_sequence`]
    fn enter(&mut self, sequence: &str) -> String {
        let mut display = self.display();
        for input in inputs_from_sequence(sequence) {
            display = self.press(input);
        }
        display
    }

    /// Resets the calculator
    fn all_clear(&mut self) {
        self.press(Input::AllClear);
    }
}

/// Turns a compact key sequence into inputs
///
/// Digits, `.`, the operator symbols (`+ - × ÷` or `* /`) and `=` map
/// directly; `C` is clear, `A` is all-clear and `<` is backspace. Other
/// characters are skipped.
#[must_use]
pub fn inputs_from_sequence(sequence: &str) -> Vec<Input> {
    sequence
        .chars()
        .filter_map(|ch| match ch {
            '0'..='9' => ch.to_digit(10).map(|d| Input::Digit(d as u8)),
            '.' => Some(Input::Decimal),
            '=' => Some(Input::Equals),
            'C' => Some(Input::Clear),
            'A' => Some(Input::AllClear),
            '<' => Some(Input::Backspace),
            '*' => Some(Input::Operator(Operation::Multiply)),
            '/' => Some(Input::Operator(Operation::Divide)),
            other => Operation::from_symbol(other).map(Input::Operator),
        })
        .collect()
}

/// Driver running directly against the state machine
#[derive(Debug, Default)]
pub struct EngineDriver {
    machine: EquationMachine,
}

impl EngineDriver {
    /// Creates a driver with a fresh machine
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver around an existing machine
    #[must_use]
    pub fn with_machine(machine: EquationMachine) -> Self {
        Self { machine }
    }

    /// Returns the underlying machine
    #[must_use]
    pub fn machine(&self) -> &EquationMachine {
        &self.machine
    }
}

impl CalculatorDriver for EngineDriver {
    fn press(&mut self, input: Input) -> String {
        self.machine.apply(input)
    }

    fn display(&self) -> String {
        self.machine.display()
    }
}

// ===== Unified Test Specifications =====
// These work with ANY CalculatorDriver implementation

/// Verifies digit entry and a simple equation
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.display(), "0");

    assert_eq!(driver.enter("4"), "4");
    assert_eq!(driver.enter("1"), "41");
    assert_eq!(driver.enter("+"), "41+");
    assert_eq!(driver.enter("8"), "41+8");
    assert_eq!(driver.enter("="), "41+8=49");

    // no leading zeros
    driver.all_clear();
    assert_eq!(driver.enter("005"), "5");
}

/// Verifies each operator once
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (sequence, expected) in [
        ("2+3=", "2+3=5"),
        ("10-4=", "10-4=6"),
        ("6×7=", "6×7=42"),
        ("20÷4=", "20÷4=5"),
        ("7÷2=", "7÷2=3.5"),
        ("3-5=", "3-5=-2"),
    ] {
        driver.all_clear();
        assert_eq!(driver.enter(sequence), expected, "sequence {sequence}");
    }
}

/// Verifies that an operator evaluates the pending operation and chains
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("12+7-"), "19-");
    assert_eq!(driver.enter("1="), "12+7-1=18");

    // (a op b) op2 c gives the same result as the two-step evaluation
    for (head, tail) in [("2×3", "+4"), ("9-4", "×3"), ("8÷2", "-1")] {
        driver.all_clear();
        let chained = driver.enter(&format!("{head}{tail}="));

        driver.all_clear();
        let partial = driver.enter(&format!("{head}="));
        let partial = result_of(&partial);
        driver.all_clear();
        let stepwise = driver.enter(&format!("{partial}{tail}="));

        assert_eq!(result_of(&chained), result_of(&stepwise), "chain {head}{tail}");
    }
}

/// Text after the last `=` of a finished equation
fn result_of(display: &str) -> &str {
    display.rsplit('=').next().unwrap_or(display)
}

/// Verifies that a second operator replaces the first
pub fn verify_operator_substitution<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("5+×"), "5×");
    assert_eq!(driver.enter("2="), "5×2=10");
}

/// Verifies clear and all-clear
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("5+32C"), "5+");
    assert_eq!(driver.enter("4="), "5+4=9");

    assert_eq!(driver.enter("A"), "0");
    assert_eq!(driver.enter("12+7-1A"), "0");
}

/// Verifies backspace on digits and on a finished equation
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("5+3="), "5+3=8");
    assert_eq!(driver.enter("<"), "8");
    assert_eq!(driver.enter("<"), "0");

    driver.all_clear();
    assert_eq!(driver.enter("123<"), "12");
    assert_eq!(driver.enter("<<"), "0");
    assert_eq!(driver.enter("<"), "0");
}

/// Verifies the single-decimal-point guard
pub fn verify_decimal_guard<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("12.3.4"), "12.34");
    assert_eq!(driver.enter("+.5="), "12.34+0.5=12.84");
}

/// Verifies division by zero and recovery from the error
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.all_clear();
    assert_eq!(driver.enter("10÷0="), "10÷0=Error");
    assert_eq!(driver.enter("7"), "7");

    driver.all_clear();
    assert_eq!(driver.enter("5÷0+"), "5÷0=Error");
}

/// Complete verification suite - runs all specifications
pub fn run_full_specification<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_basic_arithmetic(driver);
    verify_chaining(driver);
    verify_operator_substitution(driver);
    verify_clear(driver);
    verify_backspace(driver);
    verify_decimal_guard(driver);
    verify_division_by_zero(driver);
}
