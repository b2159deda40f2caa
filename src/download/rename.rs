//! Moving provider-named downloads to their sanitized titles

use crate::core::{MediaResult, SanitizedFile};
use crate::error::VidgrabError;
use crate::utils::{is_sanitized, sanitize_filename};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions probed when the reported one does not match a file on disk
pub const CANDIDATE_EXTENSIONS: [&str; 4] = ["mp4", "webm", "mkv", "m4a"];

/// Suffix for files moved aside while a batch of renames is in progress
const STAGING_SUFFIX: &str = "vidgrab-staging";

/// Find `<dir>/<provider_id>.<ext>` for a downloaded item
pub async fn find_provider_file(
    media: &MediaResult,
    dir: &Path,
) -> Result<Option<PathBuf>, VidgrabError> {
    let Some(id) = media.provider_id.as_deref().filter(|id| !id.is_empty()) else {
        return Ok(None);
    };

    let reported = media.file_extension.as_deref().filter(|ext| !ext.is_empty());
    let mut extensions: Vec<&str> = reported.into_iter().collect();
    extensions.extend(
        CANDIDATE_EXTENSIONS
            .iter()
            .copied()
            .filter(|ext| Some(*ext) != reported),
    );

    for ext in extensions {
        let candidate = dir.join(format!("{}.{}", id, ext));
        if tokio::fs::try_exists(&candidate).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// `<dir>/<sanitized title>.<ext of source>`
fn sanitized_target(media: &MediaResult, source: &Path, dir: &Path) -> PathBuf {
    let ext = source
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = sanitize_filename(media.display_title());
    debug_assert!(is_sanitized(&stem));
    dir.join(format!("{}.{}", stem, ext))
}

/// Rename the provider-named file of `media` to `<sanitized title>.<ext>`.
///
/// An existing file at the target is replaced. Returns `None` when the item
/// left no file behind.
pub async fn rename_to_sanitized(
    media: &MediaResult,
    dir: &Path,
) -> Result<Option<SanitizedFile>, VidgrabError> {
    let mut renamed = rename_all(&[Some(media)], dir).await?;
    Ok(renamed.pop().flatten())
}

/// Rename every item's provider file, returning one slot per item.
///
/// All sources are located and moved to staging names before any target is
/// written, so one entry's sanitized name never clobbers another entry's
/// provider file. Items sharing a target resolve to the last one.
pub async fn rename_all(
    items: &[Option<&MediaResult>],
    dir: &Path,
) -> Result<Vec<Option<SanitizedFile>>, VidgrabError> {
    let mut claimed = HashSet::new();
    let mut sources = Vec::with_capacity(items.len());
    for media in items {
        let source = match media {
            Some(media) => find_provider_file(media, dir).await?,
            None => None,
        };
        match source {
            Some(path) if !claimed.insert(path.clone()) => {
                warn!("{} belongs to an earlier entry", path.display());
                sources.push(None);
            }
            other => sources.push(other),
        }
    }

    let mut staged = Vec::with_capacity(items.len());
    for source in &sources {
        let Some(source) = source else {
            staged.push(None);
            continue;
        };
        let mut name = source.as_os_str().to_owned();
        name.push(format!(".{}", STAGING_SUFFIX));
        let staging = PathBuf::from(name);
        tokio::fs::rename(source, &staging).await?;
        staged.push(Some(staging));
    }

    let mut renamed = Vec::with_capacity(items.len());
    for ((media, source), staging) in items.iter().zip(&sources).zip(staged) {
        let (Some(media), Some(source), Some(staging)) = (media, source, staging) else {
            renamed.push(None);
            continue;
        };
        let target = sanitized_target(media, source, dir);
        tokio::fs::rename(&staging, &target).await?;
        debug!("Renamed {} -> {}", source.display(), target.display());
        renamed.push(Some(SanitizedFile { path: target }));
    }

    Ok(renamed)
}
