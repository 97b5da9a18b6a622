//! Equation Calculator - keypad calculator for the browser
//!
//! A four-operator calculator that shows the whole equation as it is typed.
//! Pressing a second operator evaluates the pending operation and chains
//! from its result; `=` finishes the equation and keeps it on screen.
//!
//! # Layers
//!
//! - [`core`]: operation dispatcher, equation buffer and the state machine
//! - [`wasm`]: keypad layout, keyboard routing, theme toggle and the mock
//!   DOM; `BrowserCalculator` with the `wasm` feature
//! - [`driver`]: one set of behavioural checks run against every frontend
//!
//! # Example
//!
//! ```rust
//! use equation_calculator::prelude::*;
//!
//! let mut machine = EquationMachine::new();
//! for input in [
//!     Input::Digit(1),
//!     Input::Digit(2),
//!     Input::Operator(Operation::Add),
//!     Input::Digit(7),
//!     Input::Operator(Operation::Subtract),
//! ] {
//!     machine.apply(input);
//! }
//! assert_eq!(machine.display(), "19-");
//!
//! machine.apply(Input::Digit(1));
//! assert_eq!(machine.apply(Input::Equals), "12+7-1=18");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;

/// Browser frontend - always available for testing
/// (the mock DOM allows testing without browser bindings)
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::{
        CalcError, CalcResult, Dispatcher, EquationBuffer, EquationMachine, Input, Operation,
        Token, ERROR_MARKER,
    };
    pub use crate::driver::{CalculatorDriver, EngineDriver};
    pub use crate::wasm::{
        MockDom, Theme, ThemeController, ThemeStore, WasmCalculator, WasmDriver, WasmKeypad,
    };
}
