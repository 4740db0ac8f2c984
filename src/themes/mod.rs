//! Resume themes.
//!
//! A [`Theme`] is an immutable bundle of style values (fonts, colours, spacing, font
//! sizes and optionally button styles). Themes are looked up by name through a
//! [`ThemeRegistry`], which always falls back to the default theme rather than failing,
//! and are flattened into CSS custom properties by [`apply`].
//!
//! Built-in themes are fully populated. Custom themes loaded from TOML may leave
//! leaves out; missing leaves deserialise as empty strings and the renderer substitutes
//! a literal fallback for them.

mod catalog;
mod registry;
mod variables;

pub use registry::*;
pub use variables::*;

use serde::{Deserialize, Serialize};

/// Name of the theme used whenever a requested theme can't be found.
pub const DEFAULT_THEME: &str = "modern";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub styles: ThemeStyles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeStyles {
    pub font_family: FontFamilies,
    pub colors: Colors,
    pub spacing: Spacing,
    pub font_size: FontSizes,
    /// Optional; themes without it simply don't emit button properties
    pub button: Option<ButtonStyles>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFamilies {
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub text: TextColors,
    pub background: BackgroundColors,
    pub border: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    pub section: String,
    pub item: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub small: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonStyles {
    pub background: String,
    pub text: String,
    pub hover_background: String,
    pub hover_text: String,
    pub border_color: String,
    pub border_width: String,
    pub padding: String,
    pub font_size: String,
    pub font_weight: String,
    pub border_radius: String,
    pub focus_ring_color: String,
}

/// The four colours shown in a theme picker swatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub accent: String,
}

impl Theme {
    pub fn preview_colors(&self) -> PreviewColors {
        let colors = &self.styles.colors;
        PreviewColors {
            primary: colors.primary.clone(),
            secondary: colors.secondary.clone(),
            background: colors.background.primary.clone(),
            accent: colors.background.accent.clone(),
        }
    }
}

/// Returns `value`, or `fallback` if the theme left the leaf empty.
pub fn leaf_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
