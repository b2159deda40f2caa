//! URL validation before handing input to the extractor

use crate::error::VidgrabError;
use url::Url;

/// Trim and validate a user-supplied video or playlist URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted; the
/// extractor decides whether the site itself is supported.
pub fn normalize_url(input: &str) -> Result<String, VidgrabError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(VidgrabError::InvalidUrl("Please enter a URL".to_string()));
    }

    let parsed = Url::parse(trimmed)?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(VidgrabError::InvalidUrl(format!(
                "Unsupported scheme: {}",
                other
            )))
        }
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(VidgrabError::InvalidUrl("Missing host".to_string()));
    }

    Ok(trimmed.to_string())
}

/// Check if URL looks like a playlist URL
pub fn is_playlist_url(url: &str) -> bool {
    if let Ok(parsed) = Url::parse(url) {
        parsed.path().starts_with("/playlist")
            || parsed.query_pairs().any(|(key, _)| key == "list")
    } else {
        false
    }
}
