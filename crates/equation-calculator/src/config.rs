//! Calculator configuration

use crate::core::{CalcError, CalcResult};
use crate::wasm::Theme;
use serde::{Deserialize, Serialize};

/// Calculator configuration
///
/// Missing fields fall back to their defaults, so `{}` is a valid
/// configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Maximum number of fraction digits shown in a result
    pub precision: usize,
    /// Key under which the theme flag is persisted
    pub theme_storage_key: String,
    /// Theme used when nothing has been persisted yet
    pub default_theme: Theme,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            precision: Self::DEFAULT_PRECISION,
            theme_storage_key: Self::DEFAULT_THEME_KEY.to_string(),
            default_theme: Theme::Light,
        }
    }
}

impl CalculatorConfig {
    /// Default number of fraction digits
    pub const DEFAULT_PRECISION: usize = 10;

    /// Largest precision an f64 can meaningfully show
    pub const MAX_PRECISION: usize = 15;

    /// Default storage key for the theme flag
    pub const DEFAULT_THEME_KEY: &'static str = "calculator-theme";

    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CalcError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to JSON
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::Config(e.to_string()))
    }

    /// Checks value ranges
    pub fn validate(&self) -> CalcResult<()> {
        if self.precision > Self::MAX_PRECISION {
            return Err(CalcError::Config(format!(
                "precision {} exceeds maximum of {}",
                self.precision,
                Self::MAX_PRECISION
            )));
        }
        if self.theme_storage_key.trim().is_empty() {
            return Err(CalcError::Config("theme_storage_key is empty".into()));
        }
        Ok(())
    }

    /// Set the result precision
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Set the theme storage key
    #[must_use]
    pub fn with_theme_storage_key(mut self, key: impl Into<String>) -> Self {
        self.theme_storage_key = key.into();
        self
    }

    /// Set the fallback theme
    #[must_use]
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }
}
