//! Browser frontend
//!
//! Everything except `BrowserCalculator` (`wasm` feature) is plain Rust
//! and runs against the [`MockDom`] in native tests.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
mod dom;
mod driver;
mod keypad;
mod theme;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, LocalStorageThemeStore};
pub use calculator::WasmCalculator;
pub use dom::{DomElement, DomEvent, MockDom, DISPLAY_ID, THEME_TOGGLE_ID};
pub use driver::WasmDriver;
pub use keypad::{button_id, label, KeypadButtonDef, MockDomKeypadExt, WasmKeypad};
pub use theme::{MemoryThemeStore, Theme, ThemeController, ThemeStore};
