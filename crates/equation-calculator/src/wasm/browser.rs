//! Browser bindings
//!
//! Wires [`WasmCalculator`] to the real page through `web-sys`: the display
//! element, the theme class on `<html>` and `localStorage` for the theme
//! flag.

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{console, Storage};

use super::calculator::WasmCalculator;
use super::dom::DISPLAY_ID;
use super::theme::{Theme, ThemeStore};
use crate::config::CalculatorConfig;

/// Theme store backed by `window.localStorage`
///
/// Storage can be unavailable (private browsing, sandboxed iframes); reads
/// then return nothing and writes are dropped with a warning.
#[derive(Debug)]
pub struct LocalStorageThemeStore {
    key: String,
}

impl LocalStorageThemeStore {
    /// Creates a store writing under `key`
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Option<Theme> {
        let value = Self::storage()?.get_item(&self.key).ok().flatten()?;
        let theme = Theme::from_name(&value);
        if theme.is_none() {
            warn!(key = %self.key, %value, "ignoring unknown stored theme");
        }
        theme
    }

    fn save(&mut self, theme: Theme) {
        let Some(storage) = Self::storage() else {
            warn!("localStorage unavailable, theme not persisted");
            return;
        };
        if let Err(err) = storage.set_item(&self.key, theme.as_str()) {
            warn!(key = %self.key, ?err, "failed to persist theme");
        }
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    inner: WasmCalculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a calculator with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::build(&CalculatorConfig::default())
    }

    /// Create a calculator from a JSON configuration document
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config =
            CalculatorConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::build(&config))
    }

    fn build(config: &CalculatorConfig) -> Self {
        console_error_panic_hook::set_once();
        let store = LocalStorageThemeStore::new(config.theme_storage_key.clone());
        let calc = Self {
            inner: WasmCalculator::with_store(config, Box::new(store)),
        };
        calc.render();
        calc
    }

    /// Current display string
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.display()
    }

    /// Current theme name (`light` or `dark`)
    #[wasm_bindgen(getter)]
    pub fn theme(&self) -> String {
        self.inner.theme().as_str().to_string()
    }

    /// Handle a click on an element by its id
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, element_id: &str) -> String {
        let display = self.inner.handle_click(element_id);
        self.render();
        display
    }

    /// Handle a `KeyboardEvent.key`
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> String {
        let display = self.inner.handle_key(key);
        self.render();
        display
    }

    /// Switch theme and return the new theme name
    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) -> String {
        let theme = self.inner.toggle_theme();
        self.render();
        theme.as_str().to_string()
    }

    /// Push display text and theme class to the page
    pub fn render(&self) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(display) = document.get_element_by_id(DISPLAY_ID) {
            display.set_text_content(Some(&self.inner.display()));
        }
        if let Some(root) = document.document_element() {
            let theme = self.inner.theme();
            let classes = root.class_list();
            if classes.remove_1(theme.toggled().css_class()).is_err()
                || classes.add_1(theme.css_class()).is_err()
            {
                warn!(theme = theme.as_str(), "failed to apply theme class");
            }
        }
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"Equation calculator initialized".into());
}
