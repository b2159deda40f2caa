//! Download orchestration: primary call, fallbacks, renames

use crate::core::{DownloadRequest, ExtractedInfo};
use crate::download::fallback::FallbackPlan;
use crate::download::rename::rename_all;
use crate::error::VidgrabError;
use crate::extractor::{ExtractOptions, Extractor};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Which call of a request is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Primary,
    /// 1-based index into the fallback plan
    Fallback(usize),
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Primary => f.write_str("primary attempt"),
            Attempt::Fallback(k) => write!(f, "fallback attempt {}", k),
        }
    }
}

/// Drives the extractor for one request at a time
pub struct Downloader<E> {
    extractor: E,
    socket_timeout: Option<Duration>,
}

impl<E: Extractor> Downloader<E> {
    /// Create a new downloader around an extractor
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            socket_timeout: None,
        }
    }

    /// Set the network timeout passed to the extractor
    pub fn with_socket_timeout(mut self, timeout: Duration) -> Self {
        self.socket_timeout = Some(timeout);
        self
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// Download `request` into `dir` and return the renamed files in item order.
    ///
    /// Playlist entries that produced no file are skipped.
    pub async fn download(
        &self,
        request: &DownloadRequest,
        dir: &Path,
    ) -> Result<Vec<PathBuf>, VidgrabError> {
        tokio::fs::create_dir_all(dir).await?;

        let primary = ExtractOptions::for_directory(dir)
            .with_cookies(request.authentication.clone())
            .with_socket_timeout(self.socket_timeout);

        let info = self
            .extract_with_fallbacks(request, &primary)
            .await?;

        let items = info.items();
        let renamed = rename_all(&items, dir).await?;

        let mut files = Vec::new();
        for (index, (item, file)) in items.iter().zip(renamed).enumerate() {
            let Some(media) = item else {
                debug!("Skipping empty entry #{}", index + 1);
                continue;
            };
            match file {
                Some(file) => {
                    info!("Saved {}", file.file_name());
                    files.push(file.path);
                }
                None => warn!(
                    "No file produced for entry #{} ({})",
                    index + 1,
                    media.provider_id.as_deref().unwrap_or("unknown id")
                ),
            }
        }

        Ok(files)
    }

    /// Run the primary call, then each planned fallback once.
    ///
    /// When every fallback fails the primary error is returned.
    async fn extract_with_fallbacks(
        &self,
        request: &DownloadRequest,
        primary: &ExtractOptions,
    ) -> Result<ExtractedInfo, VidgrabError> {
        info!("{} for {}", Attempt::Primary, request.url);
        let original = match self.extractor.extract(&request.url, primary).await {
            Ok(info) => return Ok(info),
            Err(e) => e,
        };

        let plan = FallbackPlan::for_failure(original.extract_kind(), request.has_authentication());
        if plan.is_empty() {
            debug!("No fallback for: {}", original);
            return Err(original);
        }
        warn!("Download failed ({}), trying fallbacks", original);

        for (index, fallback) in plan.steps().iter().enumerate() {
            let attempt = Attempt::Fallback(index + 1);
            info!("{}: {}", attempt, fallback);
            match self
                .extractor
                .extract(&request.url, &fallback.apply(primary))
                .await
            {
                Ok(info) => {
                    info!("{} succeeded", attempt);
                    return Ok(info);
                }
                Err(e) => debug!("{} failed: {}", attempt, e),
            }
        }

        Err(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Authentication, MediaResult};
    use crate::error::{ExtractError, ExtractErrorKind};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Response = Result<ExtractedInfo, VidgrabError>;

    /// Replays canned responses and records every call's options
    struct MockExtractor {
        responses: Mutex<VecDeque<Response>>,
        calls: Mutex<Vec<ExtractOptions>>,
    }

    impl MockExtractor {
        fn new(responses: Vec<Response>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<ExtractOptions> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Extractor for MockExtractor {
        async fn extract(&self, _url: &str, options: &ExtractOptions) -> Response {
            self.calls.lock().unwrap().push(options.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(fail(ExtractErrorKind::Other, "no more responses")))
        }
    }

    fn fail(kind: ExtractErrorKind, message: &str) -> VidgrabError {
        ExtractError::new(kind, message).into()
    }

    fn single(id: &str, title: &str, ext: &str) -> Response {
        Ok(ExtractedInfo::Single(MediaResult::new(id, title, ext)))
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"media").unwrap();
    }

    fn message_of(err: VidgrabError) -> String {
        match err {
            VidgrabError::Extract(e) => e.message,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    fn authenticated(url: &str) -> DownloadRequest {
        DownloadRequest::new(url).with_authentication(Authentication::CookieFile(
            PathBuf::from("downloads/_cookies.txt"),
        ))
    }

    #[tokio::test]
    async fn test_single_video_renamed() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("downloads");
        touch(&dir, "abc123.mp4");
        touch(&dir, "My Video.mp4");

        let downloader = Downloader::new(MockExtractor::new(vec![single("abc123", "My: Video?", "mp4")]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/v"), &dir)
            .await
            .unwrap();

        assert_eq!(files, vec![dir.join("My Video.mp4")]);
        assert!(!dir.join("abc123.mp4").exists());

        let calls = downloader.extractor().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].format, "best");
        assert_eq!(calls[0].merge_output_format.as_deref(), Some("mp4"));
        assert_eq!(
            calls[0].output_template,
            dir.join("%(id)s.%(ext)s").to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_forbidden_retried_with_alternate_client() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "abc123.mp4");

        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::Forbidden, "HTTP Error 403: Forbidden")),
            single("abc123", "Retried", "mp4"),
        ]));
        let files = downloader
            .download(&authenticated("https://example.com/v"), temp.path())
            .await
            .unwrap();

        assert_eq!(files, vec![temp.path().join("Retried.mp4")]);
        let calls = downloader.extractor().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].player_client, None);
        assert_eq!(calls[1].player_client.as_deref(), Some("android"));
        assert!(matches!(calls[1].cookies, Some(Authentication::CookieFile(_))));
    }

    #[tokio::test]
    async fn test_forbidden_retry_failure_returns_original() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::Forbidden, "original 403")),
            Err(fail(ExtractErrorKind::Other, "retry failed differently")),
        ]));
        let err = downloader
            .download(&authenticated("https://example.com/v"), temp.path())
            .await
            .unwrap_err();

        assert_eq!(message_of(err), "original 403");
        assert_eq!(downloader.extractor().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_forbidden_without_authentication_not_retried() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::Forbidden, "HTTP Error 403: Forbidden")),
            single("abc123", "Never used", "mp4"),
        ]));
        let err = downloader
            .download(&DownloadRequest::new("https://example.com/v"), temp.path())
            .await
            .unwrap_err();

        assert_eq!(err.extract_kind(), Some(ExtractErrorKind::Forbidden));
        assert_eq!(downloader.extractor().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_merger_unavailable_retried_with_single_file_format() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "m1.mp4");

        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::MergerUnavailable, "ffmpeg is not installed")),
            single("m1", "Muxless", "mp4"),
        ]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/v"), temp.path())
            .await
            .unwrap();

        assert_eq!(files, vec![temp.path().join("Muxless.mp4")]);
        let calls = downloader.extractor().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].format, "best[ext=mp4]");
    }

    #[tokio::test]
    async fn test_format_unavailable_walks_selectors() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "f1.webm");

        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::FormatUnavailable, "Requested format is not available")),
            Err(fail(ExtractErrorKind::FormatUnavailable, "still not available")),
            single("f1", "Found it", "webm"),
        ]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/v"), temp.path())
            .await
            .unwrap();

        assert_eq!(files, vec![temp.path().join("Found it.webm")]);
        let formats: Vec<String> = downloader
            .extractor()
            .calls()
            .into_iter()
            .map(|c| c.format)
            .collect();
        assert_eq!(formats, ["best", "bestvideo+bestaudio/best", "best[ext=mp4]"]);
    }

    #[tokio::test]
    async fn test_format_unavailable_exhausted_returns_original() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockExtractor::new(vec![
            Err(fail(ExtractErrorKind::FormatUnavailable, "original format error")),
            Err(fail(ExtractErrorKind::FormatUnavailable, "second")),
            Err(fail(ExtractErrorKind::FormatUnavailable, "third")),
            Err(fail(ExtractErrorKind::FormatUnavailable, "fourth")),
        ]));
        let err = downloader
            .download(&DownloadRequest::new("https://example.com/v"), temp.path())
            .await
            .unwrap_err();

        assert_eq!(message_of(err), "original format error");
        assert_eq!(downloader.extractor().calls().len(), 4);
    }

    #[tokio::test]
    async fn test_other_error_surfaces_immediately() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockExtractor::new(vec![Err(fail(
            ExtractErrorKind::Other,
            "Unsupported URL",
        ))]));
        let err = downloader
            .download(&authenticated("https://example.com/v"), temp.path())
            .await
            .unwrap_err();

        assert_eq!(message_of(err), "Unsupported URL");
        assert_eq!(downloader.extractor().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_playlist_skips_empty_entries() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "p1.mp4");

        let downloader = Downloader::new(MockExtractor::new(vec![Ok(ExtractedInfo::Playlist {
            entries: vec![Some(MediaResult::new("p1", "First: Part", "mp4")), None],
        })]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/list"), temp.path())
            .await
            .unwrap();

        assert_eq!(files, vec![temp.path().join("First Part.mp4")]);
    }

    #[tokio::test]
    async fn test_playlist_title_colliding_with_provider_id() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("x1.mp4"), b"first").unwrap();
        std::fs::write(temp.path().join("b7.mp4"), b"second").unwrap();

        let downloader = Downloader::new(MockExtractor::new(vec![Ok(ExtractedInfo::Playlist {
            entries: vec![
                Some(MediaResult::new("x1", "b7", "mp4")),
                Some(MediaResult::new("b7", "Second", "mp4")),
            ],
        })]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/list"), temp.path())
            .await
            .unwrap();

        assert_eq!(
            files,
            vec![temp.path().join("b7.mp4"), temp.path().join("Second.mp4")]
        );
        assert_eq!(std::fs::read(&files[0]).unwrap(), b"first");
        assert_eq!(std::fs::read(&files[1]).unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_playlist_entry_without_file_is_skipped() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "p2.mkv");

        let downloader = Downloader::new(MockExtractor::new(vec![Ok(ExtractedInfo::Playlist {
            entries: vec![
                Some(MediaResult::new("p1", "Missing", "mp4")),
                Some(MediaResult::new("p2", "Second", "mkv")),
            ],
        })]));
        let files = downloader
            .download(&DownloadRequest::new("https://example.com/list"), temp.path())
            .await
            .unwrap();

        assert_eq!(files, vec![temp.path().join("Second.mkv")]);
    }

    #[tokio::test]
    async fn test_socket_timeout_passed_through() {
        let temp = tempfile::tempdir().unwrap();
        let downloader = Downloader::new(MockExtractor::new(vec![Ok(ExtractedInfo::Playlist {
            entries: Vec::new(),
        })]))
        .with_socket_timeout(Duration::from_secs(20));

        let files = downloader
            .download(&DownloadRequest::new("https://example.com/list"), temp.path())
            .await
            .unwrap();

        assert!(files.is_empty());
        assert_eq!(
            downloader.extractor().calls()[0].socket_timeout,
            Some(Duration::from_secs(20))
        );
    }

    #[test]
    fn test_attempt_display() {
        assert_eq!(Attempt::Primary.to_string(), "primary attempt");
        assert_eq!(Attempt::Fallback(2).to_string(), "fallback attempt 2");
    }
}
