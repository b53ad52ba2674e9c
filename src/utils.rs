//! Small string helpers used by the extractors and `main`.
//!
//! - Display truncation of headlines
//! - Masking of identifiers before they are logged

/// Maximum number of characters of a headline shown in the digest.
pub const TITLE_MAX_CHARS: usize = 60;

/// Marker appended to a headline that was cut.
pub const ELLIPSIS: &str = "...";

/// Truncate a headline for display.
///
/// Counts Unicode scalar values, not bytes, so Korean headlines are cut at the
/// same visual length as Latin ones. Text longer than `max` keeps its first
/// `max` characters followed by [`ELLIPSIS`].
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_title("short", 60), "short");
/// assert_eq!(truncate_title(&"가".repeat(61), 60), format!("{}...", "가".repeat(60)));
/// ```
pub fn truncate_title(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}{}", &s[..cut], ELLIPSIS),
    }
}

/// Keep the first `keep` characters of an identifier and mask the rest.
pub fn mask_identifier(s: &str, keep: usize) -> String {
    let prefix: String = s.chars().take(keep).collect();
    format!("{prefix}***")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_at_limit_untouched() {
        let s = "a".repeat(60);
        assert_eq!(truncate_title(&s, TITLE_MAX_CHARS), s);
    }

    #[test]
    fn test_truncate_title_one_over_limit() {
        let s = "a".repeat(61);
        let result = truncate_title(&s, TITLE_MAX_CHARS);
        assert_eq!(result, format!("{}...", "a".repeat(60)));
        assert_eq!(result.chars().count(), 63);
    }

    #[test]
    fn test_truncate_title_counts_code_points() {
        let s = "코스피".repeat(21); // 63 characters, 189 bytes
        let result = truncate_title(&s, TITLE_MAX_CHARS);
        assert!(result.ends_with(ELLIPSIS));
        assert_eq!(result.chars().count(), 60 + ELLIPSIS.len());
    }

    #[test]
    fn test_truncate_title_empty() {
        assert_eq!(truncate_title("", TITLE_MAX_CHARS), "");
    }

    #[test]
    fn test_mask_identifier() {
        assert_eq!(mask_identifier("-1001234567", 4), "-100***");
        assert_eq!(mask_identifier("12", 4), "12***");
    }
}
