//! Light/dark theme preference.

use crate::store::{LocalStore, THEME_KEY};
use crate::Error;
use serde::{Deserialize, Serialize};

const HIGHLIGHT_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.8.0/styles";

const LIGHT_PALETTE: &[(&str, &str)] = &[
    ("--primary-color", "#007bff"),
    ("--secondary-color", "#6c757d"),
    ("--success-color", "#28a745"),
    ("--background-color", "#ffffff"),
    ("--text-color", "#333333"),
    ("--border-color", "#dee2e6"),
    ("--chat-user-bg", "#e9ecef"),
    ("--chat-ai-bg", "#f8f9fa"),
    ("--shadow-color", "rgba(0, 0, 0, 0.1)"),
];

const DARK_PALETTE: &[(&str, &str)] = &[
    ("--primary-color", "#0d6efd"),
    ("--secondary-color", "#adb5bd"),
    ("--success-color", "#198754"),
    ("--background-color", "#1a1a1a"),
    ("--text-color", "#ffffff"),
    ("--border-color", "#404040"),
    ("--chat-user-bg", "#2d2d2d"),
    ("--chat-ai-bg", "#363636"),
    ("--shadow-color", "rgba(255, 255, 255, 0.1)"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// CSS custom properties for this theme.
    pub fn palette(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Theme::Light => LIGHT_PALETTE,
            Theme::Dark => DARK_PALETTE,
        }
    }

    pub fn body_class(&self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    /// Syntax highlighting stylesheet name.
    pub fn code_theme(&self) -> &'static str {
        match self {
            Theme::Light => "github-light",
            Theme::Dark => "github-dark",
        }
    }

    pub fn code_theme_url(&self) -> String {
        format!("{HIGHLIGHT_CDN}/{}.min.css", self.code_theme())
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_dark(dark: bool) -> Theme {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Saved theme, falling back to the system preference when nothing is saved.
pub fn load_theme(store: &LocalStore, system_prefers_dark: bool) -> Result<Theme, Error> {
    Ok(store
        .get::<Theme>(THEME_KEY)?
        .unwrap_or_else(|| Theme::from_dark(system_prefers_dark)))
}

pub fn save_theme(store: &mut LocalStore, theme: Theme) -> Result<(), Error> {
    store.set(THEME_KEY, &theme)
}

/// Flip the current theme and persist the result.
pub fn toggle_theme(store: &mut LocalStore, current: Theme) -> Result<Theme, Error> {
    let next = current.toggled();
    save_theme(store, next)?;
    Ok(next)
}

/// Theme to apply after the system preference changed, or `None` when the
/// user has saved an explicit choice.
pub fn on_system_theme_change(
    store: &LocalStore,
    system_prefers_dark: bool,
) -> Option<Theme> {
    if store.contains(THEME_KEY) {
        None
    } else {
        Some(Theme::from_dark(system_prefers_dark))
    }
}
