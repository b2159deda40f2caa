//! Download request structures

use std::path::PathBuf;

/// Where the extractor should take session cookies from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authentication {
    /// Netscape-format cookie file exported from a browser
    CookieFile(PathBuf),
    /// Name of a locally installed browser (e.g. "firefox")
    Browser(String),
}

/// One URL to download, with optional credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Video or playlist URL
    pub url: String,
    /// Credentials passed to the extractor
    pub authentication: Option<Authentication>,
}

impl DownloadRequest {
    /// Create an unauthenticated request
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            authentication: None,
        }
    }

    /// Attach credentials
    pub fn with_authentication(mut self, authentication: Authentication) -> Self {
        self.authentication = Some(authentication);
        self
    }

    /// Attach credentials if any are given
    pub fn with_optional_authentication(mut self, authentication: Option<Authentication>) -> Self {
        self.authentication = authentication;
        self
    }

    /// Whether the user supplied any credentials
    pub fn has_authentication(&self) -> bool {
        self.authentication.is_some()
    }
}
