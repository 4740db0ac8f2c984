//! Rendering a [`ResumeDocument`] into a themed visual tree.
//!
//! The layout is fixed: a header block, then the Experience, Education and Skills
//! sections in that order. A section whose list is empty is omitted entirely. Entries
//! keep the order they have in the document; nothing is re-sorted by date.
//!
//! Styling comes from the [`Theme`] handed to [`Renderer::new`]. Individual leaves are
//! attributed inline (with a literal fallback if a custom theme leaves one empty), and
//! the whole bundle is also declared as custom properties on the root so the base
//! stylesheet and descendants can inherit it.

mod header;
mod html;
mod sections;
mod stylesheet;
mod tree;

pub use html::to_html_page;
pub use tree::Element;

use crate::document::ResumeDocument;
use crate::themes::{apply, leaf_or, Theme};

/// CSS class on the root element of every rendered resume.
pub const ROOT_CLASS: &str = "resume";

/// The theme leaves the renderer attributes inline, with fallbacks already applied.
pub(crate) struct Palette<'t> {
    pub primary: &'t str,
    pub text_primary: &'t str,
    pub text_secondary: &'t str,
    pub text_accent: &'t str,
    pub background_accent: &'t str,
    pub heading_font: &'t str,
    pub body_font: &'t str,
}

impl<'t> Palette<'t> {
    fn new(theme: &'t Theme) -> Palette<'t> {
        let colors = &theme.styles.colors;
        let fonts = &theme.styles.font_family;
        Palette {
            primary: leaf_or(&colors.primary, "#0284c7"),
            text_primary: leaf_or(&colors.text.primary, "#1f2937"),
            text_secondary: leaf_or(&colors.text.secondary, "#4b5563"),
            text_accent: leaf_or(&colors.text.accent, "#0284c7"),
            background_accent: leaf_or(&colors.background.accent, "#f0f9ff"),
            heading_font: leaf_or(&fonts.heading, "'Inter', sans-serif"),
            body_font: leaf_or(&fonts.body, "'Inter', sans-serif"),
        }
    }
}

/// Renders documents with one theme. Construct it once per theme selection.
pub struct Renderer<'t> {
    theme: &'t Theme,
    palette: Palette<'t>,
}

impl<'t> Renderer<'t> {
    pub fn new(theme: &'t Theme) -> Renderer<'t> {
        Renderer {
            theme,
            palette: Palette::new(theme),
        }
    }

    /// Projects the document into a visual tree. Pure: the document is only read.
    pub fn render(&self, document: &ResumeDocument) -> Element {
        let palette = &self.palette;

        let mut root = Element::new("div")
            .class(ROOT_CLASS)
            .attr("data-theme", &self.theme.name)
            .style("font-family", palette.body_font)
            .style("color", palette.text_primary);
        for (name, value) in apply(self.theme).declarations() {
            root = root.style(name, value);
        }

        root = root.child(header::render(&document.personal_info, palette));

        if let Some(section) = sections::experience(&document.experience, palette) {
            root = root.child(section);
        }
        if let Some(section) = sections::education(&document.education, palette) {
            root = root.child(section);
        }
        if let Some(section) = sections::skills(&document.skills, palette) {
            root = root.child(section);
        }

        root
    }
}
