//! Safe filename generation utilities

/// Characters rejected by at least one common filesystem
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Maximum length of a sanitized name, in characters
pub const MAX_FILENAME_CHARS: usize = 150;

/// Name used when nothing usable is left of a title
pub const FALLBACK_NAME: &str = "video";

/// Convert a remote title into a name that is safe on common filesystems.
///
/// Reserved characters are dropped, whitespace runs collapse to one space,
/// the ends are trimmed and the result is capped at 150 characters. An empty
/// result becomes `"video"`. Missing titles should be passed as `""`.
pub fn sanitize_filename(title: &str) -> String {
    let stripped: String = title.chars().filter(|c| !RESERVED_CHARS.contains(c)).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    match collapsed.char_indices().nth(MAX_FILENAME_CHARS) {
        // Truncation can expose a space at the cut point
        Some((cut, _)) => collapsed[..cut].trim_end().to_string(),
        None => collapsed,
    }
}

/// Check that a name already satisfies the sanitizer's output rules
pub fn is_sanitized(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_FILENAME_CHARS
        && !name.contains(RESERVED_CHARS)
        && name.trim() == name
        && !name.contains("  ")
        && name.chars().all(|c| c == ' ' || !c.is_whitespace())
}
