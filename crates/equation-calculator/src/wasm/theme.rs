//! Light/dark theme toggle with a persisted flag

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Colour theme of the calculator page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// Returns the other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Name stored in the theme flag
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored theme flag
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// CSS class applied to the page root
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
        }
    }
}

/// Where the theme flag is persisted
pub trait ThemeStore: std::fmt::Debug {
    /// Reads the stored theme, if any
    fn load(&self) -> Option<Theme>;

    /// Persists the theme
    fn save(&mut self, theme: Theme);
}

/// In-memory theme store
#[derive(Debug, Default, Clone)]
pub struct MemoryThemeStore {
    stored: Option<Theme>,
}

impl MemoryThemeStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a theme
    #[must_use]
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            stored: Some(theme),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Option<Theme> {
        self.stored
    }

    fn save(&mut self, theme: Theme) {
        self.stored = Some(theme);
    }
}

/// Current theme plus the store it is persisted to
#[derive(Debug)]
pub struct ThemeController {
    theme: Theme,
    store: Box<dyn ThemeStore>,
}

impl ThemeController {
    /// Loads the persisted theme, falling back to `default_theme`
    #[must_use]
    pub fn load(store: Box<dyn ThemeStore>, default_theme: Theme) -> Self {
        let theme = store.load().unwrap_or(default_theme);
        debug!(theme = theme.as_str(), "theme loaded");
        Self { theme, store }
    }

    /// Returns the active theme
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches theme and persists the new flag
    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    /// Sets and persists a theme
    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.store.save(theme);
        debug!(theme = theme.as_str(), "theme saved");
    }

    /// Returns the backing store
    #[must_use]
    pub fn store(&self) -> &dyn ThemeStore {
        self.store.as_ref()
    }
}

impl Default for ThemeController {
    fn default() -> Self {
        Self::load(Box::new(MemoryThemeStore::new()), Theme::default())
    }
}
