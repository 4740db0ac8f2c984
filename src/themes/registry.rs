use super::{catalog, PreviewColors, Theme, DEFAULT_THEME};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::path::Path;

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(|| ThemeRegistry {
    themes: catalog::builtin(),
});

/// A fixed, ordered catalog of themes.
///
/// Lookups never fail: any name that isn't in the catalog resolves to the `modern`
/// theme. The registry is built once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    /// The five built-in themes.
    pub fn builtin() -> &'static ThemeRegistry {
        &BUILTIN
    }

    /// The built-in themes followed by every `*.toml` theme found in `dir`.
    ///
    /// Custom themes can't shadow a built-in (or earlier custom) theme; duplicates are
    /// skipped with a warning.
    pub fn with_custom_themes<P: AsRef<Path>>(dir: P) -> Result<ThemeRegistry> {
        let dir = dir.as_ref();
        let mut themes = catalog::builtin();

        let mut paths = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read theme directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("toml"))
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();
        // read_dir order is platform dependent
        paths.sort();

        for path in paths {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read theme {}", path.display()))?;
            let theme: Theme = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse theme {}", path.display()))?;

            if themes.iter().any(|t| t.name == theme.name) {
                tracing::warn!(
                    "Ignoring theme `{}` from {}: a theme with that name already exists",
                    theme.name,
                    path.display()
                );
                continue;
            }
            tracing::debug!("Loaded custom theme `{}` from {}", theme.name, path.display());
            themes.push(theme);
        }

        Ok(ThemeRegistry { themes })
    }

    /// Looks up a theme by name, falling back to the default theme.
    pub fn resolve(&self, name: &str) -> &Theme {
        self.get(name)
            .or_else(|| self.get(DEFAULT_THEME))
            .unwrap_or_else(|| BUILTIN.default_theme())
    }

    /// Looks up a theme by name without falling back.
    pub fn get(&self, name: &str) -> Option<&Theme> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Theme names in declaration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn preview_colors(&self, name: &str) -> PreviewColors {
        self.resolve(name).preview_colors()
    }

    fn default_theme(&self) -> &Theme {
        self.themes
            .iter()
            .find(|t| t.name == DEFAULT_THEME)
            .expect("built-in catalog contains the default theme")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::apply;

    #[test]
    fn lists_builtin_themes_in_order() {
        assert_eq!(
            ThemeRegistry::builtin().list_names(),
            vec!["modern", "classic", "minimal", "creative", "professional"]
        );
    }

    #[test]
    fn unknown_theme_falls_back_to_modern() {
        let registry = ThemeRegistry::builtin();
        assert_eq!(registry.resolve("nope"), registry.resolve("modern"));
        assert_eq!(registry.resolve(""), registry.resolve("modern"));
        assert_eq!(registry.resolve("classic").name, "classic");
    }

    #[test]
    fn resolving_twice_is_identical() {
        let registry = ThemeRegistry::builtin();
        for name in registry.list_names() {
            assert_eq!(registry.resolve(name), registry.resolve(name));
        }
    }

    #[test]
    fn preview_colors_use_background_leaves() {
        let registry = ThemeRegistry::builtin();
        let colors = registry.preview_colors("professional");
        assert_eq!(colors.primary, "#047857");
        assert_eq!(colors.secondary, "#065f46");
        assert_eq!(colors.background, "#ffffff");
        assert_eq!(colors.accent, "#ccfbf1");
        assert_eq!(registry.preview_colors("missing"), registry.preview_colors("modern"));
    }

    #[test]
    fn every_builtin_theme_is_fully_populated() {
        let registry = ThemeRegistry::builtin();
        for name in registry.list_names() {
            let vars = apply(registry.resolve(name));
            assert!(vars.non_button_len() >= 19, "theme {name} is incomplete");
            assert!(
                vars.iter().all(|(_, value)| !value.is_empty()),
                "theme {name} has empty leaves"
            );
        }
    }

    #[test]
    fn can_load_custom_themes() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        std::fs::write(
            dir.path().join("sunset.toml"),
            "name = \"sunset\"\n[styles.colors]\nprimary = \"#c2410c\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("modern.toml"), "name = \"modern\"\n[styles]\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a theme").unwrap();

        let registry =
            ThemeRegistry::with_custom_themes(dir.path()).expect("can load custom themes");
        assert_eq!(registry.list_names().len(), 6);
        assert_eq!(registry.resolve("sunset").styles.colors.primary, "#c2410c");
        // the built-in modern theme is not replaced
        assert_eq!(registry.resolve("modern"), ThemeRegistry::builtin().resolve("modern"));
    }
}
