//! Media metadata reported by the extractor

use crate::error::VidgrabError;
use serde::Deserialize;
use std::path::PathBuf;

/// One downloaded item as described by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaResult {
    /// Provider identifier, also the temporary file stem
    #[serde(rename = "id", default)]
    pub provider_id: Option<String>,
    /// Display title
    #[serde(default)]
    pub title: Option<String>,
    /// Final container extension
    #[serde(rename = "ext", default)]
    pub file_extension: Option<String>,
}

impl MediaResult {
    /// Create a new MediaResult
    pub fn new(provider_id: &str, title: &str, file_extension: &str) -> Self {
        Self {
            provider_id: Some(provider_id.to_string()),
            title: Some(title.to_string()),
            file_extension: Some(file_extension.to_string()),
        }
    }

    /// Title to build the final filename from: title, then id, then nothing
    pub fn display_title(&self) -> &str {
        non_empty(&self.title)
            .or_else(|| non_empty(&self.provider_id))
            .unwrap_or("")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Result of one extractor call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedInfo {
    /// A single video
    Single(MediaResult),
    /// A playlist; `None` entries failed or were unavailable
    Playlist { entries: Vec<Option<MediaResult>> },
}

impl ExtractedInfo {
    /// Build from the extractor's JSON info document.
    ///
    /// Any document carrying an `entries` key is a playlist, whatever its `_type`.
    pub fn from_json(value: serde_json::Value) -> Result<Self, VidgrabError> {
        if !value.is_object() {
            return Err(VidgrabError::ExtractorOutput(
                "info document is not a JSON object".to_string(),
            ));
        }

        match value.get("entries") {
            Some(entries) => {
                let entries = match entries {
                    serde_json::Value::Array(items) => items
                        .iter()
                        .map(|item| match item {
                            serde_json::Value::Object(_) => {
                                serde_json::from_value(item.clone()).map(Some)
                            }
                            _ => Ok(None),
                        })
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => Vec::new(),
                };
                Ok(ExtractedInfo::Playlist { entries })
            }
            None => Ok(ExtractedInfo::Single(serde_json::from_value(value)?)),
        }
    }

    /// Items in order, with missing playlist entries as `None`
    pub fn items(&self) -> Vec<Option<&MediaResult>> {
        match self {
            ExtractedInfo::Single(media) => vec![Some(media)],
            ExtractedInfo::Playlist { entries } => entries.iter().map(Option::as_ref).collect(),
        }
    }
}

/// A downloaded file after renaming to its sanitized title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedFile {
    pub path: PathBuf,
}

impl SanitizedFile {
    /// Final file name, for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
