//! The base stylesheet embedded in every rendered page.
//!
//! Layout lives here; colours and fonts come from the inline attribution on each
//! element. Sizes and spacing read the `--theme-*` custom properties declared on the
//! root, each with a literal fallback so a partial custom theme still lays out.

use crate::themes::{leaf_or, Theme};

/// Generate the stylesheet for one theme.
///
/// The theme only contributes the page colour behind the sheet; the sheet itself is
/// always white so the raster composites cleanly.
pub(super) fn generate_stylesheet(theme: &Theme) -> String {
    let mut css = String::with_capacity(4096);
    css.push_str(&generate_page_styles(theme));
    css.push_str("\n/* Resume */\n");
    css.push_str(RESUME_STYLES);
    css
}

fn generate_page_styles(theme: &Theme) -> String {
    let page_bg = leaf_or(&theme.styles.colors.background.secondary, "#f9fafb");
    format!(
        r#"/* Page */
* {{
    box-sizing: border-box;
}}

html, body {{
    margin: 0;
    padding: 0;
    background-color: {page_bg};
}}
"#
    )
}

const RESUME_STYLES: &str = r#".resume {
    width: 21cm;
    min-height: 29.7cm;
    margin: 0 auto;
    padding: 1.5cm;
    background-color: #ffffff;
    font-size: var(--theme-font-size-body, 1rem);
    line-height: 1.5;
}

.resume .resume-header {
    margin-bottom: var(--theme-spacing-section, 2rem);
}

.resume .profile-picture {
    width: 6rem;
    height: 6rem;
    border-radius: 50%;
    object-fit: cover;
    float: right;
}

.resume .name {
    font-size: var(--theme-font-size-name, 2.25rem);
    font-weight: 700;
    margin: 0;
}

.resume .job-title {
    font-size: var(--theme-font-size-title, 1.25rem);
    font-weight: 500;
    margin: 0.25rem 0 0.75rem;
}

.resume .contact-row {
    display: flex;
    flex-wrap: wrap;
    gap: 1rem;
    font-size: var(--theme-font-size-small, 0.875rem);
}

.resume .contact {
    text-decoration: none;
}

.resume .summary {
    margin-top: 1rem;
}

.resume .section {
    margin-bottom: var(--theme-spacing-section, 2rem);
}

.resume .section-title {
    font-size: var(--theme-font-size-subtitle, 1.125rem);
    font-weight: 600;
    text-transform: uppercase;
    letter-spacing: 0.05em;
    border-bottom: 2px solid;
    padding-bottom: 0.25rem;
    margin: 0 0 1rem;
}

.resume .entry {
    margin-bottom: var(--theme-spacing-item, 1rem);
}

.resume .entry-head {
    display: flex;
    justify-content: space-between;
    align-items: flex-start;
}

.resume .entry-title {
    font-size: var(--theme-font-size-subtitle, 1.125rem);
    font-weight: 600;
    margin: 0;
}

.resume .entry-dates,
.resume .entry-subtitle {
    font-size: var(--theme-font-size-small, 0.875rem);
}

.resume .entry-dates {
    white-space: nowrap;
}

.resume .entry-text {
    margin: 0.5rem 0 0;
}

.resume .bullets {
    margin: 0.5rem 0 0;
    padding-left: 1.25rem;
}

.resume .skill-group {
    margin-bottom: var(--theme-spacing-item, 1rem);
}

.resume .skill-category {
    font-size: var(--theme-font-size-body, 1rem);
    font-weight: 600;
    margin: 0 0 0.5rem;
}

.resume .skill-chips {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
}

.resume .skill-chip {
    border-radius: 9999px;
    padding: 0.25rem 0.75rem;
    font-size: var(--theme-font-size-small, 0.875rem);
}
"#;
