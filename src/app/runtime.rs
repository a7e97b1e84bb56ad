//! The report run: fetch, filter, reduce, render, write

use crate::app::config::AppConfig;
use crate::pipeline::{generate_reports, render_reports, write_artifacts, Artifact};
use crate::report::select_reports;
use crate::sentry::{recent_events, Cutoff, EventSource, PageFetcher, SentryClient};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub events: usize,
    pub pages: usize,
    /// Pagination stopped on an unexpected response, so reports are partial
    pub truncated: bool,
    pub artifacts: Vec<Artifact>,
    /// Files written; empty on a dry run
    pub written: Vec<PathBuf>,
}

/// Runs every configured report against the live Sentry API
pub async fn run(config: AppConfig) -> Result<RunOutcome> {
    let client = SentryClient::new(&config.sentry).context("Failed to set up Sentry client")?;
    let first_url = client.events_url();
    run_with(&config, client, first_url).await
}

/// Runs every configured report against events served by `fetcher`
pub async fn run_with<F>(config: &AppConfig, fetcher: F, first_url: String) -> Result<RunOutcome>
where
    F: PageFetcher + 'static,
{
    let mut reports = select_reports(&config.reports)?;

    let cutoff = Cutoff::days_ago(config.window_days);
    info!(
        "Collecting events of issue {} newer than {}",
        config.sentry.issue_id, cutoff
    );

    let source = EventSource::new(fetcher, first_url);
    let stats = source.stats();
    let events = recent_events(source.into_stream(), cutoff);

    let consumed = generate_reports(events, &mut reports)
        .await
        .context("Failed to generate reports")?;
    let artifacts = render_reports(&reports).context("Failed to render reports")?;

    info!(
        "Reduced {} events from {} pages into {} reports",
        consumed,
        stats.pages(),
        artifacts.len()
    );
    if stats.truncated() {
        warn!("Sentry pagination ended on an unexpected response; reports cover partial data");
    }

    let written = if config.dry_run {
        for artifact in &artifacts {
            println!("{}: {}", artifact.name, artifact.contents);
        }
        Vec::new()
    } else {
        write_artifacts(&artifacts, &config.output_dir)
            .await
            .with_context(|| {
                format!("Failed to write reports to {}", config.output_dir.display())
            })?
    };

    Ok(RunOutcome {
        events: consumed,
        pages: stats.pages(),
        truncated: stats.truncated(),
        artifacts,
        written,
    })
}
