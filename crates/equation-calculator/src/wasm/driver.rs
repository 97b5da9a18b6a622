//! WASM driver
//!
//! Implements [`CalculatorDriver`] by clicking keypad buttons on a
//! [`MockDom`], so the shared checks in [`crate::driver`] also cover the
//! page wiring.

use super::calculator::WasmCalculator;
use super::dom::{DomEvent, MockDom, DISPLAY_ID, THEME_TOGGLE_ID};
use super::keypad::{button_id, MockDomKeypadExt};
use super::theme::Theme;
use crate::core::Input;
use crate::driver::CalculatorDriver;

/// WASM driver wrapping the calculator and a mock DOM
#[derive(Debug)]
pub struct WasmDriver {
    calculator: WasmCalculator,
    dom: MockDom,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with a fresh calculator page
    #[must_use]
    pub fn new() -> Self {
        Self::with_calculator(WasmCalculator::new())
    }

    /// Creates a driver around an existing calculator
    #[must_use]
    pub fn with_calculator(calculator: WasmCalculator) -> Self {
        let mut dom = MockDom::calculator();
        dom.add_keypad(calculator.keypad());
        let mut driver = Self { calculator, dom };
        driver.sync_dom();
        driver
    }

    /// Returns a reference to the calculator
    #[must_use]
    pub fn calculator(&self) -> &WasmCalculator {
        &self.calculator
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Simulates a click on an element
    pub fn click(&mut self, element_id: &str) -> String {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let display = self.calculator.handle_click(element_id);
        self.sync_dom();
        display
    }

    /// Simulates a keyboard key
    pub fn press_key(&mut self, key: &str) -> String {
        self.dom.dispatch_event(DomEvent::key_press(key));
        let display = self.calculator.handle_key(key);
        self.sync_dom();
        display
    }

    /// Clicks the theme toggle
    pub fn toggle_theme(&mut self) -> Theme {
        self.click(THEME_TOGGLE_ID);
        self.calculator.theme()
    }

    /// Gets the display element's text
    #[must_use]
    pub fn display_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(DISPLAY_ID)
    }

    /// Copies calculator state into the DOM
    fn sync_dom(&mut self) {
        let display = self.calculator.display();
        self.dom.set_element_text(DISPLAY_ID, &display);
        self.dom.apply_theme(self.calculator.theme());
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, input: Input) -> String {
        self.click(&button_id(input))
    }

    fn display(&self) -> String {
        self.display_element_text().unwrap_or_default().to_string()
    }
}
