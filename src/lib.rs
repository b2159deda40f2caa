//! # vidgrab - video and playlist downloader
//!
//! Downloads a video or a whole playlist through `yt-dlp` and stores every
//! item under its title, cleaned up to be a valid filename.
//!
//! ## Features
//!
//! - Optional authentication with a cookies.txt file or a browser profile
//! - Automatic fallbacks for 403 responses, missing ffmpeg and
//!   unavailable formats
//! - Filesystem-safe names derived from remote titles
//!
//! ## Example
//!
//! ```rust,no_run
//! use vidgrab::{Downloader, DownloadRequest, YtDlp};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = Downloader::new(YtDlp::default());
//!     let request = DownloadRequest::new("VIDEO_URL");
//!
//!     for path in downloader.download(&request, Path::new("downloads")).await? {
//!         println!("Downloaded: {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod download;
pub mod error;
pub mod extractor;
pub mod utils;

// Re-export main types
pub use crate::core::{Authentication, DownloadRequest, ExtractedInfo, MediaResult, SanitizedFile, Session};
pub use download::Downloader;
pub use error::{ExtractError, ExtractErrorKind, VidgrabError};
pub use extractor::{ExtractOptions, Extractor, YtDlp};
pub use utils::sanitize_filename;

/// Result type alias for vidgrab operations
pub type Result<T> = std::result::Result<T, VidgrabError>;
