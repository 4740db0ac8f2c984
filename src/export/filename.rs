//! Turning a person's name into a safe PDF filename.

/// Name used when nothing usable survives sanitisation.
pub const FALLBACK_FILENAME: &str = "resume";

/// Sanitises `name` into a lowercase filename stem (no extension).
///
/// Only ASCII alphanumerics, `-`, `_` and `.` survive; whitespace runs become a
/// single `-`. A leading dot is dropped and only the last of several dots is kept.
///
/// ```text
/// "John Doe!!" -> "john-doe"
/// ""           -> "resume"
/// ".pdf"       -> "pdf"
/// "a.pdf"      -> "a"
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') || c.is_whitespace())
        .collect();

    let dashed = kept.split_whitespace().collect::<Vec<&str>>().join("-");
    let undotted = dashed.strip_prefix('.').unwrap_or(&dashed);
    let name = keep_last_dot(undotted);

    if is_degenerate(&name) {
        return FALLBACK_FILENAME.to_string();
    }

    let lower = name.to_ascii_lowercase();
    let stem = match lower.strip_suffix(".pdf") {
        Some(stem) => stem.to_string(),
        None => lower,
    };

    if is_degenerate(&stem) {
        FALLBACK_FILENAME.to_string()
    } else {
        stem
    }
}

fn is_degenerate(name: &str) -> bool {
    name.is_empty() || name == "-" || name.eq_ignore_ascii_case(".pdf")
}

/// Drops every `.` except the last one.
fn keep_last_dot(name: &str) -> String {
    match name.rfind('.') {
        Some(last) => {
            let (head, tail) = name.split_at(last);
            let mut out: String = head.chars().filter(|c| *c != '.').collect();
            out.push_str(tail);
            out
        }
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_dashes_spaces() {
        assert_eq!(sanitize_filename("John Doe!!"), "john-doe");
        assert_eq!(sanitize_filename("  Mary   Jane   Watson "), "mary-jane-watson");
        assert_eq!(sanitize_filename("José Ñúñez"), "jos-ez");
    }

    #[test]
    fn empty_and_degenerate_names_fall_back() {
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename("!!!"), "resume");
        assert_eq!(sanitize_filename("   "), "resume");
        assert_eq!(sanitize_filename("-"), "resume");
        assert_eq!(sanitize_filename("..pdf"), "resume");
    }

    #[test]
    fn leading_dot_is_dropped_before_the_extension_check() {
        // ".pdf" loses its leading dot first, leaving a plain "pdf" stem
        assert_eq!(sanitize_filename(".pdf"), "pdf");
        assert_eq!(sanitize_filename(".PDF"), "pdf");
    }

    #[test]
    fn strips_pdf_extension() {
        assert_eq!(sanitize_filename("a.pdf"), "a");
        assert_eq!(sanitize_filename("Resume.PDF"), "resume");
    }

    #[test]
    fn keeps_only_the_last_dot() {
        assert_eq!(sanitize_filename(".hidden"), "hidden");
        assert_eq!(sanitize_filename("j.r.r. tolkien"), "jrr.-tolkien");
        assert_eq!(sanitize_filename("a..b"), "a.b");
    }

    #[test]
    fn keeps_underscores_and_digits() {
        assert_eq!(sanitize_filename("Agent_007"), "agent_007");
    }
}
