mod api;
mod application;
mod cli;
mod domain;
mod utils;

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use api::{ApiClient, ApiConfig};
use application::{DownloadCoordinator, DownloadEvent};
use cli::Cli;
use domain::{AppError, DownloadPlan};

const FAILURE: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args, ApiConfig::default(), &mut io::stdout()).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            warn!(error = %e, "failed to write to stdout");
            ExitCode::FAILURE
        }
    }
}

/// Run the whole pipeline for `args` and return the process exit status.
///
/// Everything the user sees goes to `out`. `base` supplies the client
/// settings the command line does not cover.
async fn run<W: Write>(args: &[String], base: ApiConfig, out: &mut W) -> io::Result<u8> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(0);
        }
        Err(e) => {
            debug!(error = %e, "argument parsing failed");
            let program = args
                .first()
                .map(String::as_str)
                .unwrap_or("site-cache-downloader");
            writeln!(out, "{}", cli::usage(program))?;
            return Ok(FAILURE);
        }
    };
    if !cli.extra.is_empty() {
        debug!(ignored = ?cli.extra, "ignoring extra arguments");
    }

    let config = ApiConfig {
        timeout: cli.timeout.map(Duration::from_secs),
        ..base
    };
    let api_client = match ApiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            writeln!(out, "Error creating HTTP client: {}", e)?;
            return Ok(FAILURE);
        }
    };
    let coordinator = DownloadCoordinator::new(api_client);

    let site = match coordinator.fetch_site_info(&cli.url).await {
        Ok(site) => site,
        Err(e @ AppError::Network(_)) => {
            writeln!(out, "Error fetching main page: {}", e)?;
            return Ok(FAILURE);
        }
        Err(e) => {
            writeln!(out, "Unable to extract siteInfo: {}", e)?;
            return Ok(FAILURE);
        }
    };

    let manifest = match coordinator.fetch_manifest(&site).await {
        Ok(manifest) => manifest,
        Err(e) => {
            writeln!(out, "Error fetching cache: {}", e)?;
            return Ok(FAILURE);
        }
    };

    let plan = DownloadPlan { site, manifest };
    let mut written = Ok(());
    let report = coordinator
        .download_all(&plan, Path::new(&cli.folder), |event| {
            if written.is_ok() {
                written = print_event(out, event);
            }
        })
        .await;
    written?;

    // Counts the manifest, not the successes
    writeln!(out, "Downloaded {} files to {}", report.total, cli.folder)?;
    if !report.is_complete() {
        warn!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "some files were not downloaded"
        );
    }

    Ok(0)
}

fn print_event<W: Write>(out: &mut W, event: DownloadEvent) -> io::Result<()> {
    match event {
        DownloadEvent::Started { index, total, key } => {
            writeln!(out, "Downloading {}/{}: {}", index, total, key)
        }
        DownloadEvent::Completed(path) => {
            debug!(path = %path.display(), "download complete");
            Ok(())
        }
        DownloadEvent::Failed { key, error } => {
            debug!(key, "skipped");
            writeln!(out, "{}", error)
        }
    }
}
