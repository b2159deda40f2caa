//! Console output for the command-line shell

use crate::cli::args::VerbosityLevel;
use crate::error::VidgrabError;
use crate::utils::mime_from_path;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output formatter for vidgrab
pub struct OutputFormatter {
    verbosity: VerbosityLevel,
    spinner: Option<ProgressBar>,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            spinner: None,
        }
    }

    /// Show a spinner while the extractor runs
    pub fn start_spinner(&mut self, message: &str) -> Option<ProgressBar> {
        if self.verbosity == VerbosityLevel::Quiet {
            return None;
        }

        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));

        self.spinner = Some(spinner.clone());
        Some(spinner)
    }

    /// Stop and clear the spinner
    pub fn finish_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Print info message
    pub fn info(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("ℹ️  {}", message);
        }
    }

    /// Print success message
    pub fn success(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            println!("✅ {}", message.green());
        }
    }

    /// Print warning message
    pub fn warning(&self, message: &str) {
        if self.verbosity != VerbosityLevel::Quiet {
            eprintln!("⚠️  {}", message.yellow());
        }
    }

    /// Print error message
    pub fn error(&self, message: &str) {
        eprintln!("❌ {}", message.red());
    }

    /// Print a failed download and what the user can do about it
    pub fn print_failure(&self, error: &VidgrabError) {
        self.error(&format!("Download failed: {}", failure_text(error)));
        if let Some(hint) = error.remediation() {
            eprintln!("💡 {}", hint);
        }
    }

    /// Print download start message
    pub fn print_download_start(&self, url: &str, output_dir: &Path) {
        if self.verbosity == VerbosityLevel::Quiet {
            return;
        }

        println!("🚀 Starting download...");
        println!("🔗 URL: {}", url);
        println!("💾 Output: {}", output_dir.display());
        println!();
    }

    /// Print the downloaded files with their MIME types
    pub fn print_files(&self, files: &[PathBuf], elapsed: Duration) {
        if files.is_empty() {
            self.warning("No videos were downloaded. Please check the URL.");
            return;
        }

        // File paths always go to stdout so they can be piped, even in quiet mode
        if self.verbosity == VerbosityLevel::Quiet {
            for path in files {
                println!("{}", path.display());
            }
            return;
        }

        self.success(&format!(
            "Downloaded {} video(s) in {}",
            files.len(),
            human_elapsed(elapsed)
        ));
        for path in files {
            println!("📥 {}", format_file_line(path));
        }
    }

    /// Print help text
    pub fn print_help(&self) {
        println!("vidgrab - video and playlist downloader");
        println!();
        println!("Usage: vidgrab [OPTIONS] <URL>");
        println!();
        println!("Examples:");
        println!("  vidgrab VIDEO_URL");
        println!("  vidgrab --cookies cookies.txt PLAYLIST_URL");
        println!("  vidgrab --cookies-from-browser firefox --output ./videos VIDEO_URL");
        println!();
        println!("For more information, run: vidgrab --help");
    }
}

/// The extractor's own message for extractor failures, the full error otherwise
fn failure_text(error: &VidgrabError) -> String {
    match error {
        VidgrabError::Extract(e) => e.message.clone(),
        other => other.to_string(),
    }
}

/// `name (mime, size)` for one downloaded file
fn format_file_line(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let size = std::fs::metadata(path).map(|m| m.len()).ok();

    match size {
        Some(size) => format!("{} ({}, {})", name, mime_from_path(path), human_size(size)),
        None => format!("{} ({})", name, mime_from_path(path)),
    }
}

/// File size in binary units, one decimal above bytes
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Elapsed time rounded to whole seconds, e.g. `1m 30s`
fn human_elapsed(elapsed: Duration) -> String {
    humantime::format_duration(Duration::from_secs(elapsed.as_secs())).to_string()
}
