//! Flattening themes into CSS custom properties.
//!
//! Every leaf of a theme's style bundle becomes one property named
//! `theme-<dotted path, kebab-cased>`, e.g. `colors.text.primary` becomes
//! `theme-colors-text-primary` and `button.hoverBackground` becomes
//! `theme-button-hover-background`. The document root declares them (as
//! `--theme-...`) so descendants can inherit them.

use super::Theme;

/// Prefix shared by every generated property name.
const PREFIX: &str = "theme";

/// The flattened properties of one theme, in a fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeVariables {
    entries: Vec<(String, String)>,
}

impl ThemeVariables {
    fn push(&mut self, path: &[&str], value: &str) {
        let mut name = PREFIX.to_string();
        for segment in path {
            name.push('-');
            name.push_str(&kebab_case(segment));
        }
        self.entries.push((name, value.to_string()));
    }

    /// Renders the properties as CSS declarations, e.g. `--theme-colors-primary: #0284c7;`.
    ///
    /// Empty values are skipped so a partially specified theme never emits an invalid
    /// declaration.
    pub fn declarations(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(name, value)| (format!("--{name}"), value.clone()))
            .collect()
    }
}

/// Lookups used by the theme checks.
#[cfg(test)]
impl ThemeVariables {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of properties not derived from the optional button bundle.
    pub fn non_button_len(&self) -> usize {
        self.iter()
            .filter(|(name, _)| !name.starts_with("theme-button-"))
            .count()
    }
}

/// Flattens a theme's style bundle into custom properties.
pub fn apply(theme: &Theme) -> ThemeVariables {
    let styles = &theme.styles;
    let mut vars = ThemeVariables::default();

    vars.push(&["name"], &theme.name);

    vars.push(&["fontFamily", "heading"], &styles.font_family.heading);
    vars.push(&["fontFamily", "body"], &styles.font_family.body);

    let colors = &styles.colors;
    vars.push(&["colors", "primary"], &colors.primary);
    vars.push(&["colors", "secondary"], &colors.secondary);
    vars.push(&["colors", "text", "primary"], &colors.text.primary);
    vars.push(&["colors", "text", "secondary"], &colors.text.secondary);
    vars.push(&["colors", "text", "accent"], &colors.text.accent);
    vars.push(&["colors", "background", "primary"], &colors.background.primary);
    vars.push(&["colors", "background", "secondary"], &colors.background.secondary);
    vars.push(&["colors", "background", "accent"], &colors.background.accent);
    vars.push(&["colors", "border"], &colors.border);

    vars.push(&["spacing", "section"], &styles.spacing.section);
    vars.push(&["spacing", "item"], &styles.spacing.item);

    let sizes = &styles.font_size;
    vars.push(&["fontSize", "name"], &sizes.name);
    vars.push(&["fontSize", "title"], &sizes.title);
    vars.push(&["fontSize", "subtitle"], &sizes.subtitle);
    vars.push(&["fontSize", "body"], &sizes.body);
    vars.push(&["fontSize", "small"], &sizes.small);

    if let Some(button) = &styles.button {
        vars.push(&["button", "background"], &button.background);
        vars.push(&["button", "text"], &button.text);
        vars.push(&["button", "hoverBackground"], &button.hover_background);
        vars.push(&["button", "hoverText"], &button.hover_text);
        vars.push(&["button", "borderColor"], &button.border_color);
        vars.push(&["button", "borderWidth"], &button.border_width);
        vars.push(&["button", "padding"], &button.padding);
        vars.push(&["button", "fontSize"], &button.font_size);
        vars.push(&["button", "fontWeight"], &button.font_weight);
        vars.push(&["button", "borderRadius"], &button.border_radius);
        vars.push(&["button", "focusRingColor"], &button.focus_ring_color);
    }

    vars
}

/// `hoverBackground` -> `hover-background`
fn kebab_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 4);
    for c in segment.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::ThemeRegistry;

    #[test]
    fn can_kebab_case_segments() {
        assert_eq!(kebab_case("primary"), "primary");
        assert_eq!(kebab_case("fontFamily"), "font-family");
        assert_eq!(kebab_case("focusRingColor"), "focus-ring-color");
    }

    #[test]
    fn flattens_every_leaf() {
        let theme = ThemeRegistry::builtin().resolve("classic");
        let vars = apply(theme);
        assert_eq!(vars.non_button_len(), 19);
        assert_eq!(vars.len(), 30);
        assert_eq!(vars.get("theme-name"), Some("classic"));
        assert_eq!(vars.get("theme-font-family-heading"), Some("Merriweather, serif"));
        assert_eq!(vars.get("theme-colors-text-primary"), Some("#111827"));
        assert_eq!(vars.get("theme-colors-background-accent"), Some("#eff6ff"));
        assert_eq!(vars.get("theme-font-size-subtitle"), Some("1.375rem"));
        assert_eq!(vars.get("theme-button-hover-background"), Some("#1e3a8a"));
    }

    #[test]
    fn omits_button_properties_when_absent() {
        let mut theme = ThemeRegistry::builtin().resolve("modern").clone();
        theme.styles.button = None;
        let vars = apply(&theme);
        assert_eq!(vars.len(), 19);
        assert!(vars.iter().all(|(name, _)| !name.starts_with("theme-button")));
    }

    #[test]
    fn is_deterministic() {
        let theme = ThemeRegistry::builtin().resolve("creative");
        assert_eq!(apply(theme), apply(theme));
    }

    #[test]
    fn declarations_skip_empty_values() {
        let theme: Theme = toml::from_str("name = \"bare\"\n[styles.colors]\nprimary = \"red\"\n")
            .expect("can parse theme");
        let declarations = apply(&theme).declarations();
        assert_eq!(
            declarations,
            vec![
                ("--theme-name".to_string(), "bare".to_string()),
                ("--theme-colors-primary".to_string(), "red".to_string()),
            ]
        );
    }
}
