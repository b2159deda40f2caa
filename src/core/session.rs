//! Per-run session state handed to request handlers

use crate::core::request::{Authentication, DownloadRequest};
use crate::error::VidgrabError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default download directory, relative to the working directory
pub const DEFAULT_DOWNLOAD_DIR: &str = "downloads";

/// Name an imported cookie file is stored under inside the download directory
pub const STORED_COOKIES_NAME: &str = "_cookies.txt";

/// Credentials and output location shared by the requests of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    download_dir: PathBuf,
    cookie_file: Option<PathBuf>,
    browser: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_DOWNLOAD_DIR)
    }
}

impl Session {
    /// Create a session writing into `download_dir`
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            cookie_file: None,
            browser: None,
        }
    }

    /// Use cookies from a local browser profile
    pub fn with_browser(mut self, browser: impl Into<String>) -> Self {
        self.browser = Some(browser.into());
        self
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Create the download directory if needed
    pub async fn ensure_download_dir(&self) -> Result<&Path, VidgrabError> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        Ok(&self.download_dir)
    }

    /// Copy a user-supplied cookie file into the download directory and use it
    pub async fn import_cookie_file(&mut self, source: &Path) -> Result<PathBuf, VidgrabError> {
        if !tokio::fs::try_exists(source).await? {
            return Err(VidgrabError::CookieFileMissing(
                source.display().to_string(),
            ));
        }

        self.ensure_download_dir().await?;
        let stored = self.download_dir.join(STORED_COOKIES_NAME);
        let bytes = tokio::fs::read(source).await?;
        tokio::fs::write(&stored, bytes).await?;
        info!("Stored cookies from {} at {}", source.display(), stored.display());

        self.cookie_file = Some(stored.clone());
        Ok(stored)
    }

    /// Credentials for the extractor.
    ///
    /// The stored cookie file wins while it is still on disk; otherwise the
    /// browser, if set.
    pub async fn authentication(&self) -> Option<Authentication> {
        if let Some(path) = &self.cookie_file {
            match tokio::fs::try_exists(path).await {
                Ok(true) => return Some(Authentication::CookieFile(path.clone())),
                Ok(false) => debug!("Cookie file {} no longer exists, ignoring", path.display()),
                Err(e) => debug!("Cannot check cookie file {}: {}", path.display(), e),
            }
        }

        self.browser
            .as_ref()
            .map(|name| Authentication::Browser(name.to_lowercase()))
    }

    /// Build a request for `url` carrying this session's credentials
    pub async fn request(&self, url: impl Into<String>) -> DownloadRequest {
        DownloadRequest::new(url).with_optional_authentication(self.authentication().await)
    }
}
