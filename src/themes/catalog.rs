//! The built-in themes, in the order they're offered to users.

use super::*;

pub(super) fn builtin() -> Vec<Theme> {
    vec![modern(), classic(), minimal(), creative(), professional()]
}

const INTER: &str = "Inter, sans-serif";

fn fonts(heading: &str, body: &str) -> FontFamilies {
    FontFamilies {
        heading: heading.to_string(),
        body: body.to_string(),
    }
}

fn colors(
    primary: &str,
    secondary: &str,
    text: [&str; 3],
    background: [&str; 3],
    border: &str,
) -> Colors {
    Colors {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        text: TextColors {
            primary: text[0].to_string(),
            secondary: text[1].to_string(),
            accent: text[2].to_string(),
        },
        background: BackgroundColors {
            primary: background[0].to_string(),
            secondary: background[1].to_string(),
            accent: background[2].to_string(),
        },
        border: border.to_string(),
    }
}

fn spacing(section: &str, item: &str) -> Spacing {
    Spacing {
        section: section.to_string(),
        item: item.to_string(),
    }
}

fn font_sizes(name: &str, title: &str, subtitle: &str) -> FontSizes {
    FontSizes {
        name: name.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        body: "1rem".to_string(),
        small: "0.875rem".to_string(),
    }
}

/// All built-in buttons share their geometry and white text; only the colours differ.
fn button(background: &str, hover_background: &str, focus_ring_color: &str) -> ButtonStyles {
    ButtonStyles {
        background: background.to_string(),
        text: "#ffffff".to_string(),
        hover_background: hover_background.to_string(),
        hover_text: "#ffffff".to_string(),
        border_color: background.to_string(),
        border_width: "1px".to_string(),
        padding: "0.625rem 1.25rem".to_string(),
        font_size: "0.875rem".to_string(),
        font_weight: "600".to_string(),
        border_radius: "0.375rem".to_string(),
        focus_ring_color: focus_ring_color.to_string(),
    }
}

fn modern() -> Theme {
    Theme {
        name: "modern".to_string(),
        styles: ThemeStyles {
            font_family: fonts(INTER, INTER),
            colors: colors(
                "#0284c7",
                "#075985",
                ["#1f2937", "#4b5563", "#0284c7"],
                ["#ffffff", "#f8fafc", "#f0f9ff"],
                "#e2e8f0",
            ),
            spacing: spacing("2rem", "1.5rem"),
            font_size: font_sizes("2.25rem", "1.5rem", "1.25rem"),
            button: Some(button("#0284c7", "#0369a1", "#38bdf8")),
        },
    }
}

fn classic() -> Theme {
    Theme {
        name: "classic".to_string(),
        styles: ThemeStyles {
            font_family: fonts("Merriweather, serif", INTER),
            colors: colors(
                "#1e40af",
                "#1e3a8a",
                ["#111827", "#374151", "#1e40af"],
                ["#ffffff", "#f9fafb", "#eff6ff"],
                "#e5e7eb",
            ),
            spacing: spacing("2.5rem", "1.75rem"),
            font_size: font_sizes("2.5rem", "1.75rem", "1.375rem"),
            button: Some(button("#1e40af", "#1e3a8a", "#60a5fa")),
        },
    }
}

fn minimal() -> Theme {
    Theme {
        name: "minimal".to_string(),
        styles: ThemeStyles {
            font_family: fonts(INTER, INTER),
            colors: colors(
                "#18181b",
                "#27272a",
                ["#18181b", "#52525b", "#18181b"],
                ["#ffffff", "#fafafa", "#f4f4f5"],
                "#e4e4e7",
            ),
            spacing: spacing("2rem", "1.5rem"),
            font_size: font_sizes("2rem", "1.5rem", "1.25rem"),
            button: Some(button("#18181b", "#27272a", "#71717a")),
        },
    }
}

fn creative() -> Theme {
    Theme {
        name: "creative".to_string(),
        styles: ThemeStyles {
            font_family: fonts(INTER, INTER),
            colors: colors(
                "#6d28d9",
                "#5b21b6",
                ["#1f2937", "#4b5563", "#6d28d9"],
                ["#ffffff", "#f5f3ff", "#ede9fe"],
                "#e5e7eb",
            ),
            spacing: spacing("2.25rem", "1.5rem"),
            font_size: font_sizes("2.25rem", "1.625rem", "1.25rem"),
            button: Some(button("#6d28d9", "#5b21b6", "#a78bfa")),
        },
    }
}

fn professional() -> Theme {
    Theme {
        name: "professional".to_string(),
        styles: ThemeStyles {
            font_family: fonts(INTER, INTER),
            colors: colors(
                "#047857",
                "#065f46",
                ["#1f2937", "#374151", "#047857"],
                ["#ffffff", "#f0fdfa", "#ccfbf1"],
                "#e2e8f0",
            ),
            spacing: spacing("2.25rem", "1.5rem"),
            font_size: font_sizes("2.25rem", "1.5rem", "1.25rem"),
            button: Some(button("#047857", "#065f46", "#34d399")),
        },
    }
}
