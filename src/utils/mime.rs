//! MIME type guessing for downloaded files

use std::path::Path;

/// Generic binary MIME type used for unknown extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Get MIME type from file extension
pub fn mime_from_ext(extension: &str) -> &'static str {
    let ext = extension.trim_start_matches('.').to_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => OCTET_STREAM,
    }
}

/// Get MIME type for a file path, based on its extension
pub fn mime_from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(mime_from_ext)
        .unwrap_or(OCTET_STREAM)
}
