//! Map extractor error text to an [`ExtractErrorKind`]
//!
//! yt-dlp only reports failures as human-readable text. The trigger
//! patterns below match its current wording and are the one place that
//! needs updating when that wording changes.

use crate::error::ExtractErrorKind;
use regex::Regex;
use std::sync::LazyLock;

/// Checked in order; the first match wins
static PATTERNS: LazyLock<Vec<(ExtractErrorKind, Regex)>> = LazyLock::new(|| {
    [
        (ExtractErrorKind::Forbidden, r"(?i)\b403\b|forbidden"),
        (
            ExtractErrorKind::MergerUnavailable,
            r"(?i)ffmpeg|merging of multiple formats",
        ),
        (
            ExtractErrorKind::FormatUnavailable,
            r"(?i)requested format|format is not available",
        ),
        (
            ExtractErrorKind::CookieDatabase,
            r"(?i)cookies database|chrome cookies",
        ),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("static pattern")))
    .collect()
});

/// Classify an error message from the extractor
pub fn classify_error(message: &str) -> ExtractErrorKind {
    PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(message))
        .map(|(kind, _)| *kind)
        .unwrap_or(ExtractErrorKind::Other)
}
