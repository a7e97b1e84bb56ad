//! Driving events through the reports and persisting their artifacts

use crate::error::{Error, Result};
use crate::report::Report;
use crate::sentry::EventStream;
use futures::TryStreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Rendered output of one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub contents: String,
}

/// Applies every event to every report, in report order
///
/// The first reduce error aborts the run. Returns the number of events
/// consumed.
pub async fn generate_reports(
    mut events: EventStream<'_>,
    reports: &mut [Box<dyn Report>],
) -> Result<usize> {
    let mut consumed = 0;
    while let Some(event) = events.try_next().await? {
        for report in reports.iter_mut() {
            report.reduce(&event)?;
        }
        consumed += 1;
    }
    debug!("Reduced {} events into {} reports", consumed, reports.len());
    Ok(consumed)
}

/// Renders every report; nothing is written until all of them succeed
pub fn render_reports(reports: &[Box<dyn Report>]) -> Result<Vec<Artifact>> {
    reports
        .iter()
        .map(|report| -> Result<Artifact> {
            Ok(Artifact {
                name: report.name().to_string(),
                contents: report.output()?,
            })
        })
        .collect()
}

/// Writes each artifact to `dir/<name>`, replacing earlier runs' files
pub async fn write_artifacts(artifacts: &[Artifact], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).await.map_err(|source| Error::Artifact {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        fs::write(&path, &artifact.contents)
            .await
            .map_err(|source| Error::Artifact {
                path: path.clone(),
                source,
            })?;
        info!("{}: {}", artifact.name, artifact.contents);
        written.push(path);
    }
    Ok(written)
}
