//! Command line argument parsing

use crate::core::{Session, DEFAULT_DOWNLOAD_DIR};
use crate::extractor::ytdlp::DEFAULT_BINARY;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// vidgrab - download videos and playlists with filesystem-safe names
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Video or playlist URL
    pub url: Option<String>,

    /// Netscape-format cookies.txt exported from a logged-in browser
    #[arg(long, value_name = "FILE")]
    pub cookies: Option<PathBuf>,

    /// Read cookies from a local browser profile (e.g. 'firefox', 'chrome')
    #[arg(long, value_name = "BROWSER")]
    pub cookies_from_browser: Option<String>,

    /// Download directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_DOWNLOAD_DIR)]
    pub output: PathBuf,

    /// yt-dlp executable
    #[arg(long, value_name = "PATH", env = "VIDGRAB_YTDLP", default_value = DEFAULT_BINARY)]
    pub ytdlp: PathBuf,

    /// Network socket timeout passed to yt-dlp (e.g., 15s, 1m)
    #[arg(long, value_name = "DURATION")]
    pub socket_timeout: Option<humantime::Duration>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet output (only errors)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// URL with surrounding whitespace removed, if one was given
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Get socket timeout as Duration
    pub fn socket_timeout_duration(&self) -> Option<Duration> {
        self.socket_timeout.map(Into::into)
    }

    /// Session for this run, without the cookie file.
    ///
    /// The cookie file is imported separately since that touches the disk.
    pub fn session(&self) -> Session {
        let session = Session::new(&self.output);
        match &self.cookies_from_browser {
            Some(browser) => session.with_browser(browser),
            None => session,
        }
    }

    /// Get output verbosity level
    pub fn verbosity_level(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }

    /// Default log filter when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbosity_level() {
            VerbosityLevel::Quiet => "warn",
            VerbosityLevel::Normal => "info",
            VerbosityLevel::Verbose => "debug",
        }
    }
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Quiet (only errors)
    Quiet,
    /// Normal
    Normal,
    /// Verbose (debug info)
    Verbose,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            url: None,
            cookies: None,
            cookies_from_browser: None,
            output: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            ytdlp: PathBuf::from(DEFAULT_BINARY),
            socket_timeout: None,
            verbose: false,
            quiet: false,
        }
    }
}
