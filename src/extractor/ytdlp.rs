//! yt-dlp executable as the extraction library

use crate::core::{Authentication, ExtractedInfo};
use crate::error::{ExtractError, VidgrabError};
use crate::extractor::{classify_error, ExtractOptions, Extractor};
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tracing::{debug, warn};

/// Default executable name looked up on `PATH`
pub const DEFAULT_BINARY: &str = "yt-dlp";

/// Runs the `yt-dlp` binary once per extract call
#[derive(Debug, Clone)]
pub struct YtDlp {
    binary: PathBuf,
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl YtDlp {
    /// Use the given binary path or name
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Check that the binary runs and return its version string
    pub async fn version(&self) -> Result<String, VidgrabError> {
        let output = tokio::process::Command::new(&self.binary)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                VidgrabError::ExtractorNotFound(format!("{}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(VidgrabError::ExtractorNotFound(format!(
                "{} --version exited with {}",
                self.binary.display(),
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Command-line arguments for one call
    pub fn build_args(url: &str, options: &ExtractOptions) -> Vec<String> {
        let mut args = Vec::new();

        if options.ignore_config {
            args.push("--ignore-config".to_string());
        }

        args.extend([
            "--no-warnings".to_string(),
            "--no-progress".to_string(),
            // Keep going past broken playlist entries; they come back as null
            "--ignore-errors".to_string(),
            "--no-simulate".to_string(),
            "--dump-single-json".to_string(),
            "-o".to_string(),
            options.output_template.clone(),
            "-f".to_string(),
            options.format.clone(),
        ]);

        if let Some(merge) = &options.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(merge.clone());
        }

        match &options.cookies {
            Some(Authentication::CookieFile(path)) => {
                args.push("--cookies".to_string());
                args.push(path.to_string_lossy().into_owned());
            }
            Some(Authentication::Browser(browser)) => {
                args.push("--cookies-from-browser".to_string());
                args.push(browser.clone());
            }
            None => {}
        }

        if let Some(client) = &options.player_client {
            args.push("--extractor-args".to_string());
            args.push(format!("youtube:player_client={}", client));
        }

        if let Some(timeout) = options.socket_timeout {
            args.push("--socket-timeout".to_string());
            args.push(timeout.as_secs().max(1).to_string());
        }

        // End of options, so a URL starting with '-' is never read as a flag
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }

    /// Turn a finished process into extracted info or a classified error.
    ///
    /// A non-zero exit is only accepted for a playlist document, where
    /// `--ignore-errors` leaves failed entries as `null`. A failed single
    /// item is an error even when its info JSON was printed.
    fn interpret(output: Output) -> Result<ExtractedInfo, VidgrabError> {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let document = match stdout.lines().rev().find(|line| !line.trim().is_empty()) {
            Some(line) => match serde_json::from_str::<serde_json::Value>(line) {
                Ok(serde_json::Value::Null) => None,
                Ok(value) => Some(value),
                Err(e) if output.status.success() => {
                    return Err(VidgrabError::ExtractorOutput(format!(
                        "invalid JSON from yt-dlp: {}",
                        e
                    )))
                }
                Err(e) => {
                    debug!("Ignoring unparsable stdout from failed run: {}", e);
                    None
                }
            },
            None => None,
        };

        match document {
            Some(value) if output.status.success() => ExtractedInfo::from_json(value),
            Some(value) if value.get("entries").is_some() => {
                warn!(
                    "yt-dlp exited with {} but reported playlist results: {}",
                    output.status,
                    error_message(&output).unwrap_or_default()
                );
                ExtractedInfo::from_json(value)
            }
            _ if output.status.success() => Err(VidgrabError::ExtractorOutput(
                "yt-dlp produced no info document".to_string(),
            )),
            _ => {
                let message = error_message(&output)
                    .unwrap_or_else(|| format!("yt-dlp exited with {}", output.status));
                let kind = classify_error(&message);
                debug!("yt-dlp failed ({}): {}", kind, message);
                Err(ExtractError::new(kind, message).into())
            }
        }
    }
}

/// The `ERROR:` lines from stderr, or all of stderr if there are none
fn error_message(output: &Output) -> Option<String> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let errors: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("ERROR:"))
        .collect();

    let message = if errors.is_empty() {
        stderr.trim().to_string()
    } else {
        errors.join("\n")
    };
    (!message.is_empty()).then_some(message)
}

#[async_trait::async_trait]
impl Extractor for YtDlp {
    async fn extract(
        &self,
        url: &str,
        options: &ExtractOptions,
    ) -> Result<ExtractedInfo, VidgrabError> {
        let args = Self::build_args(url, options);
        debug!("Running {} {:?}", self.binary.display(), args);

        let output = tokio::process::Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                VidgrabError::ExtractorNotFound(format!("{}: {}", self.binary.display(), e))
            })?;

        Self::interpret(output)
    }
}
