//! Property-based tests for the equation state machine

use equation_calculator::core::{
    format_outcome, parse_operand, Dispatcher, EquationMachine, Input, Operation, Token,
};
use equation_calculator::driver::{CalculatorDriver, EngineDriver};
use equation_calculator::wasm::WasmDriver;
use proptest::prelude::*;

const PRECISION: usize = 10;

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (0u8..=9).prop_map(Input::Digit),
        1 => Just(Input::Decimal),
        2 => operation_strategy().prop_map(Input::Operator),
        1 => Just(Input::Equals),
        1 => Just(Input::Clear),
        1 => Just(Input::AllClear),
        1 => Just(Input::Backspace),
    ]
}

fn inputs_strategy() -> impl Strategy<Value = Vec<Input>> {
    prop::collection::vec(input_strategy(), 0..40)
}

/// Presses the digits of a non-negative integer
fn type_number(machine: &mut EquationMachine, n: u32) {
    for ch in n.to_string().chars() {
        machine.apply(Input::Digit(ch.to_digit(10).unwrap() as u8));
    }
}

/// Operand text with an optional fraction, e.g. "12" or "0.375"
fn decimal_strategy() -> impl Strategy<Value = String> {
    (0u32..10_000, prop::option::of(1u32..1000)).prop_map(|(int, frac)| match frac {
        Some(frac) => format!("{int}.{frac}"),
        None => int.to_string(),
    })
}

/// Presses the keys of an operand typed as text
fn type_text(machine: &mut EquationMachine, text: &str) {
    for ch in text.chars() {
        let input = match ch.to_digit(10) {
            Some(d) => Input::Digit(d as u8),
            None => Input::Decimal,
        };
        machine.apply(input);
    }
}

fn value(text: &str) -> f64 {
    parse_operand(text).unwrap()
}

/// Text after the last `=` of a finished equation
fn result_text(display: &str) -> &str {
    display.rsplit('=').next().unwrap_or(display)
}

fn operands(machine: &EquationMachine) -> Vec<String> {
    machine
        .buffer()
        .tokens()
        .iter()
        .filter_map(|t| match t {
            Token::Operand(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

proptest! {
    /// The display is never empty
    #[test]
    fn prop_display_never_empty(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            prop_assert!(!machine.apply(input).is_empty());
        }
    }

    /// No operand segment holds more than one decimal point
    #[test]
    fn prop_single_decimal_per_operand(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            machine.apply(input);
            for operand in operands(&machine) {
                prop_assert!(operand.matches('.').count() <= 1, "operand {operand}");
            }
        }
    }

    /// Typed operands never carry a leading zero before another digit
    #[test]
    fn prop_no_leading_zero(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            machine.apply(input);
            for operand in operands(&machine) {
                let digits = operand.trim_start_matches('-');
                let mut chars = digits.chars();
                let leading_zero = chars.next() == Some('0')
                    && chars.next().is_some_and(|c| c.is_ascii_digit());
                prop_assert!(!leading_zero, "operand {operand}");
            }
        }
    }

    /// Backspacing long enough always ends at "0" and stays there
    #[test]
    fn prop_backspace_reaches_zero(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            machine.apply(input);
        }
        for _ in 0..1000 {
            machine.apply(Input::Backspace);
        }
        prop_assert_eq!(machine.display(), "0");
        prop_assert_eq!(machine.apply(Input::Backspace), "0");
    }

    /// Pressing equals twice changes nothing the second time
    #[test]
    fn prop_equals_idempotent(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            machine.apply(input);
        }
        let once = machine.apply(Input::Equals);
        prop_assert_eq!(machine.apply(Input::Equals), once);
    }

    /// All-clear always returns to the initial state
    #[test]
    fn prop_all_clear_resets(inputs in inputs_strategy()) {
        let mut machine = EquationMachine::new();
        for input in inputs {
            machine.apply(input);
        }
        prop_assert_eq!(machine.apply(Input::AllClear), "0");
        prop_assert!(machine.buffer().is_empty());
        prop_assert!(machine.first_operand().is_none());
        prop_assert!(machine.second_operand().is_none());
        prop_assert!(machine.pending_operator().is_none());
    }

    /// a op b op2 c = equals (a op b) op2 c
    ///
    /// `b` stays non-zero: a failing first step finishes the equation early.
    #[test]
    fn prop_chain_law(
        a in 0u32..10_000,
        b in 1u32..10_000,
        c in 0u32..10_000,
        op in operation_strategy(),
        op2 in operation_strategy(),
    ) {
        let mut machine = EquationMachine::new();
        type_number(&mut machine, a);
        machine.apply(Input::Operator(op));
        type_number(&mut machine, b);
        machine.apply(Input::Operator(op2));
        type_number(&mut machine, c);
        let display = machine.apply(Input::Equals);

        let expected = Dispatcher::evaluate(op, f64::from(a), f64::from(b))
            .and_then(|ab| Dispatcher::evaluate(op2, ab, f64::from(c)));
        prop_assert!(
            display.ends_with(&format!("={}", format_outcome(&expected, PRECISION))),
            "display {display}"
        );
    }

    /// The chain law holds for operands with a fraction
    #[test]
    fn prop_chain_law_decimal(
        a in decimal_strategy(),
        b in decimal_strategy(),
        c in decimal_strategy(),
        op in operation_strategy(),
        op2 in operation_strategy(),
    ) {
        prop_assume!(value(&b) != 0.0);
        let mut machine = EquationMachine::new();
        type_text(&mut machine, &a);
        machine.apply(Input::Operator(op));
        type_text(&mut machine, &b);
        machine.apply(Input::Operator(op2));
        type_text(&mut machine, &c);
        let display = machine.apply(Input::Equals);

        let expected = Dispatcher::evaluate(op, value(&a), value(&b))
            .and_then(|ab| Dispatcher::evaluate(op2, ab, value(&c)));
        prop_assert_eq!(result_text(&display), format_outcome(&expected, PRECISION));
    }

    /// Continuing from a result backspaced out of its equation gives the
    /// same answer as continuing straight from `=`
    #[test]
    fn prop_collapsed_result_continues_unrounded(
        a in decimal_strategy(),
        b in decimal_strategy(),
        c in decimal_strategy(),
        op in operation_strategy(),
        op2 in operation_strategy(),
    ) {
        prop_assume!(Dispatcher::evaluate(op, value(&a), value(&b)).is_ok());
        let finish = |collapse: bool| {
            let mut machine = EquationMachine::new();
            type_text(&mut machine, &a);
            machine.apply(Input::Operator(op));
            type_text(&mut machine, &b);
            machine.apply(Input::Equals);
            if collapse {
                machine.apply(Input::Backspace);
            }
            machine.apply(Input::Operator(op2));
            type_text(&mut machine, &c);
            machine.apply(Input::Equals)
        };
        let direct = finish(false);
        let collapsed = finish(true);
        prop_assert_eq!(result_text(&collapsed), result_text(&direct));
    }

    /// The last of several operators pressed in a row wins
    #[test]
    fn prop_operator_substitution(
        a in 0u32..1000,
        b in 1u32..1000,
        ops in prop::collection::vec(operation_strategy(), 1..5),
    ) {
        let last = *ops.last().unwrap();

        let mut substituted = EquationMachine::new();
        type_number(&mut substituted, a);
        for op in &ops {
            substituted.apply(Input::Operator(*op));
        }
        type_number(&mut substituted, b);

        let mut direct = EquationMachine::new();
        type_number(&mut direct, a);
        direct.apply(Input::Operator(last));
        type_number(&mut direct, b);

        prop_assert_eq!(substituted.apply(Input::Equals), direct.apply(Input::Equals));
    }

    /// Backspace on a finished equation leaves its result (or 0 after an error)
    #[test]
    fn prop_backspace_on_result(a in 0u32..1000, b in 0u32..1000, op in operation_strategy()) {
        let mut machine = EquationMachine::new();
        type_number(&mut machine, a);
        machine.apply(Input::Operator(op));
        type_number(&mut machine, b);
        machine.apply(Input::Equals);

        let expected = match Dispatcher::evaluate(op, f64::from(a), f64::from(b)) {
            Ok(value) => format_outcome(&Ok(value), PRECISION),
            Err(_) => "0".to_string(),
        };
        prop_assert_eq!(machine.apply(Input::Backspace), expected);
    }

    /// The mock page shows exactly what the machine shows
    #[test]
    fn prop_page_matches_engine(inputs in inputs_strategy()) {
        let mut engine = EngineDriver::new();
        let mut page = WasmDriver::new();
        for input in inputs {
            prop_assert_eq!(engine.press(input), page.press(input));
        }
    }
}
