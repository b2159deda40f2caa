//! Error types for vidgrab

use std::fmt;
use thiserror::Error;

/// Failure category reported by the extractor binding.
///
/// The orchestrator picks its fallback strategy by matching on this value,
/// never on the raw message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractErrorKind {
    /// HTTP 403 / access forbidden by the source
    Forbidden,
    /// Merging separate streams needs a muxer (ffmpeg) that is not installed
    MergerUnavailable,
    /// The requested format selector matched nothing
    FormatUnavailable,
    /// Cookies could not be read from a local browser profile
    CookieDatabase,
    /// Anything else
    Other,
}

impl fmt::Display for ExtractErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractErrorKind::Forbidden => "forbidden",
            ExtractErrorKind::MergerUnavailable => "merger unavailable",
            ExtractErrorKind::FormatUnavailable => "format unavailable",
            ExtractErrorKind::CookieDatabase => "cookie database",
            ExtractErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Error raised by one call into the external extraction library
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExtractError {
    pub kind: ExtractErrorKind,
    pub message: String,
}

impl ExtractError {
    pub fn new(kind: ExtractErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Main error type for vidgrab operations
#[derive(Debug, Error)]
pub enum VidgrabError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Download failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("yt-dlp not found: {0}")]
    ExtractorNotFound(String),

    #[error("Unexpected extractor output: {0}")]
    ExtractorOutput(String),

    #[error("Cookie file not found: {0}")]
    CookieFileMissing(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),
}

impl VidgrabError {
    /// Kind of the underlying extractor failure, if this is one
    pub fn extract_kind(&self) -> Option<ExtractErrorKind> {
        match self {
            VidgrabError::Extract(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Hint shown to the user next to the error message
    pub fn remediation(&self) -> Option<&'static str> {
        match self.extract_kind()? {
            ExtractErrorKind::CookieDatabase => Some(
                "Browser cookies could not be read here. Export a cookies.txt file \
                 from your browser and pass it with --cookies.",
            ),
            ExtractErrorKind::Forbidden => Some(
                "403 Forbidden usually means the cookies are expired or the request is being \
                 blocked. Try: (1) re-export cookies.txt while logged in, \
                 (2) export from a private/incognito window and use it immediately, \
                 (3) use another network or try again later if you were rate-limited.",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_display_is_message() {
        let err = ExtractError::new(ExtractErrorKind::Forbidden, "HTTP Error 403: Forbidden");
        assert_eq!(err.to_string(), "HTTP Error 403: Forbidden");

        let err: VidgrabError = err.into();
        assert_eq!(err.to_string(), "Download failed: HTTP Error 403: Forbidden");
    }

    #[test]
    fn test_remediation() {
        let forbidden: VidgrabError =
            ExtractError::new(ExtractErrorKind::Forbidden, "403").into();
        assert!(forbidden.remediation().unwrap().contains("incognito"));

        let cookies: VidgrabError =
            ExtractError::new(ExtractErrorKind::CookieDatabase, "could not find chrome cookies database")
                .into();
        assert!(cookies.remediation().unwrap().contains("--cookies"));

        let other: VidgrabError = ExtractError::new(ExtractErrorKind::Other, "boom").into();
        assert!(other.remediation().is_none());

        assert!(VidgrabError::InvalidUrl("x".into()).remediation().is_none());
    }

    #[test]
    fn test_extract_kind() {
        let err: VidgrabError =
            ExtractError::new(ExtractErrorKind::FormatUnavailable, "nope").into();
        assert_eq!(err.extract_kind(), Some(ExtractErrorKind::FormatUnavailable));
        assert_eq!(VidgrabError::InvalidUrl("x".into()).extract_kind(), None);
    }
}
