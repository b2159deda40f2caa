//! Binding to the external extraction library
//!
//! Everything site-specific (fetching, authentication, format negotiation,
//! muxing) happens behind the [`Extractor`] trait. The orchestrator only
//! sees [`ExtractOptions`] going in and [`ExtractedInfo`] or a classified
//! error coming out.

pub mod classify;
pub mod ytdlp;

pub use classify::classify_error;
pub use ytdlp::YtDlp;

use crate::core::{Authentication, ExtractedInfo};
use crate::error::VidgrabError;
use std::path::Path;
use std::time::Duration;

/// Best single file, no merging required
pub const FORMAT_BEST: &str = "best";
/// Best single file already in an mp4 container
pub const FORMAT_BEST_MP4: &str = "best[ext=mp4]";
/// Separate video and audio streams merged, falling back to a single file
pub const FORMAT_BEST_MERGED: &str = "bestvideo+bestaudio/best";

/// Container requested when streams are merged
pub const MERGE_FORMAT_MP4: &str = "mp4";

/// Client identity used when the default one gets 403 responses
pub const ALTERNATE_CLIENT: &str = "android";

/// Output template that names files after the provider identifier
pub const PROVIDER_ID_TEMPLATE: &str = "%(id)s.%(ext)s";

/// Options for one extractor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Output path template
    pub output_template: String,
    /// Format selector
    pub format: String,
    /// Container to merge separate streams into
    pub merge_output_format: Option<String>,
    /// Cookie source
    pub cookies: Option<Authentication>,
    /// Alternate client identity
    pub player_client: Option<String>,
    /// Ignore system-wide extractor configuration files
    pub ignore_config: bool,
    /// Network socket timeout passed through to the extractor
    pub socket_timeout: Option<Duration>,
}

impl ExtractOptions {
    /// Primary options: `<dir>/<id>.<ext>`, best stream, mp4 container
    pub fn for_directory(dir: &Path) -> Self {
        Self {
            output_template: dir.join(PROVIDER_ID_TEMPLATE).to_string_lossy().into_owned(),
            format: FORMAT_BEST.to_string(),
            merge_output_format: Some(MERGE_FORMAT_MP4.to_string()),
            cookies: None,
            player_client: None,
            ignore_config: true,
            socket_timeout: None,
        }
    }

    pub fn with_cookies(mut self, cookies: Option<Authentication>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = format.to_string();
        self
    }

    pub fn with_player_client(mut self, client: &str) -> Self {
        self.player_client = Some(client.to_string());
        self
    }

    pub fn with_socket_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.socket_timeout = timeout;
        self
    }
}

/// The external extraction/download library
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Download `url` according to `options` and report what was fetched.
    ///
    /// Failures from the library itself come back as
    /// [`VidgrabError::Extract`] carrying an [`crate::error::ExtractErrorKind`].
    async fn extract(&self, url: &str, options: &ExtractOptions)
        -> Result<ExtractedInfo, VidgrabError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_directory() {
        let options = ExtractOptions::for_directory(Path::new("downloads"));
        assert_eq!(
            options.output_template,
            Path::new("downloads").join("%(id)s.%(ext)s").to_string_lossy()
        );
        assert_eq!(options.format, "best");
        assert_eq!(options.merge_output_format.as_deref(), Some("mp4"));
        assert!(options.ignore_config);
        assert!(options.cookies.is_none());
        assert!(options.player_client.is_none());
    }

    #[test]
    fn test_builders() {
        let options = ExtractOptions::for_directory(Path::new("d"))
            .with_format(FORMAT_BEST_MP4)
            .with_player_client(ALTERNATE_CLIENT)
            .with_cookies(Some(Authentication::Browser("firefox".into())))
            .with_socket_timeout(Some(Duration::from_secs(15)));

        assert_eq!(options.format, "best[ext=mp4]");
        assert_eq!(options.player_client.as_deref(), Some("android"));
        assert_eq!(options.socket_timeout, Some(Duration::from_secs(15)));
        assert!(options.cookies.is_some());
    }
}
