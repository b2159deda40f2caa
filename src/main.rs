//! Main entry point for vidgrab CLI

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidgrab::cli::{Args, OutputFormatter};
use vidgrab::core::Session;
use vidgrab::download::Downloader;
use vidgrab::extractor::YtDlp;
use vidgrab::utils::{is_playlist_url, normalize_url};
use vidgrab::VidgrabError;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.default_log_filter())?;
    debug!("Starting vidgrab with args: {:?}", args);

    let mut formatter = OutputFormatter::new(args.verbosity_level());

    let Some(url) = args.url() else {
        formatter.print_help();
        return Ok(ExitCode::SUCCESS);
    };

    match run(&args, url, &mut formatter).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            formatter.finish_spinner();
            formatter.print_failure(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Handle one download request end to end
async fn run(args: &Args, url: &str, formatter: &mut OutputFormatter) -> Result<(), VidgrabError> {
    let url = normalize_url(url)?;

    let ytdlp = YtDlp::new(&args.ytdlp);
    let version = ytdlp.version().await?;
    info!("Using yt-dlp {} ({})", version, ytdlp.binary().display());

    let session = prepare_session(args).await?;
    let download_dir = session.ensure_download_dir().await?.to_path_buf();

    let mut downloader = Downloader::new(ytdlp);
    if let Some(timeout) = args.socket_timeout_duration() {
        downloader = downloader.with_socket_timeout(timeout);
    }

    let request = session.request(&url).await;
    formatter.print_download_start(&url, &download_dir);
    if is_playlist_url(&url) {
        formatter.info("Playlist URL: every available entry will be downloaded");
    }

    let start_time = Instant::now();
    formatter.start_spinner("Downloading video(s). This may take a while...");
    let files = downloader.download(&request, &download_dir).await?;
    formatter.finish_spinner();

    info!("Download finished: {} file(s)", files.len());
    formatter.print_files(&files, start_time.elapsed());
    Ok(())
}

/// Build the session, importing the cookie file into the download directory
async fn prepare_session(args: &Args) -> Result<Session, VidgrabError> {
    let mut session = args.session();
    if let Some(cookies) = &args.cookies {
        session.import_cookie_file(cookies).await?;
    }
    Ok(session)
}

/// Initialize logging system
fn init_logging(default_filter: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}
