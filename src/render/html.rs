//! Wrapping a rendered tree in a standalone HTML page for the rasteriser.

use super::stylesheet::generate_stylesheet;
use super::Element;
use crate::themes::Theme;

/// Serialises `root` into a complete HTML document with the base stylesheet inlined.
pub fn to_html_page(root: &Element, title: &str, theme: &Theme) -> String {
    let css = generate_stylesheet(theme);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<title>{title}</title>
<style>
{css}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = html_escape::encode_text(title),
        body = root.to_html(),
    )
}
