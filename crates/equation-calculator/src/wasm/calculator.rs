//! Browser-facing calculator
//!
//! Ties the [`EquationMachine`] to the keypad, the keyboard and the theme
//! toggle. Nothing in here touches `web-sys`, so the whole page logic runs
//! under `cargo test`.

use tracing::{trace, warn};

use super::dom::THEME_TOGGLE_ID;
use super::keypad::WasmKeypad;
use super::theme::{MemoryThemeStore, Theme, ThemeController, ThemeStore};
use crate::config::CalculatorConfig;
use crate::core::{EquationMachine, Input};

/// Calculator page state
#[derive(Debug)]
pub struct WasmCalculator {
    machine: EquationMachine,
    keypad: WasmKeypad,
    theme: ThemeController,
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmCalculator {
    /// Creates a calculator with default configuration and an in-memory
    /// theme store
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a calculator from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self::with_store(config, Box::new(MemoryThemeStore::new()))
    }

    /// Creates a calculator that persists its theme to `store`
    #[must_use]
    pub fn with_store(config: &CalculatorConfig, store: Box<dyn ThemeStore>) -> Self {
        Self {
            machine: EquationMachine::with_config(config),
            keypad: WasmKeypad::new(),
            theme: ThemeController::load(store, config.default_theme),
        }
    }

    /// Applies one input and returns the new display
    pub fn handle_input(&mut self, input: Input) -> String {
        self.machine.apply(input)
    }

    /// Handles a click on an element
    ///
    /// Keypad buttons feed the machine, the theme toggle switches theme.
    /// Any other element leaves the state untouched.
    pub fn handle_click(&mut self, element_id: &str) -> String {
        if element_id == THEME_TOGGLE_ID {
            self.toggle_theme();
            return self.display();
        }
        match self.keypad.handle_click(element_id) {
            Some(input) => self.handle_input(input),
            None => {
                warn!(element_id, "click on unknown element");
                self.display()
            }
        }
    }

    /// Handles a keyboard key by its `KeyboardEvent.key` name
    pub fn handle_key(&mut self, key: &str) -> String {
        match WasmKeypad::key_to_input(key) {
            Some(input) => self.handle_input(input),
            None => {
                trace!(key, "unmapped key");
                self.display()
            }
        }
    }

    /// Switches between light and dark theme
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    /// Returns the active theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Returns the theme controller
    #[must_use]
    pub fn theme_controller(&self) -> &ThemeController {
        &self.theme
    }

    /// Returns the display string
    #[must_use]
    pub fn display(&self) -> String {
        self.machine.display()
    }

    /// Returns the underlying state machine
    #[must_use]
    pub fn machine(&self) -> &EquationMachine {
        &self.machine
    }

    /// Returns the keypad layout
    #[must_use]
    pub fn keypad(&self) -> &WasmKeypad {
        &self.keypad
    }
}
