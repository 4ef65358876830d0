//! File names derived from book titles.

/// Name used when a title has no usable characters.
pub const FALLBACK_STEM: &str = "untitled";

/// Reduce a title to a file stem.
///
/// Keeps alphanumeric characters (any script), spaces, hyphens and
/// underscores, then trims trailing whitespace. Leading spaces are kept.
///
/// # Examples
///
/// ```
/// use epubmd::markdown::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("My: Book?"), "My Book");
/// assert_eq!(sanitize_file_stem("???"), "untitled");
/// ```
pub fn sanitize_file_stem(title: &str) -> String {
    let stem: String = title
        .chars()
        .filter(|&c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let stem = stem.trim_end();

    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem.to_string()
    }
}

/// `<sanitized title>.md`
pub fn markdown_file_name(title: &str) -> String {
    format!("{}.md", sanitize_file_stem(title))
}
