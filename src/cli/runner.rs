//! CLI runner - orchestrates a full export run

use crate::cli::commands::Cli;
use crate::config::ExporterConfig;
use crate::error::{Error, Result};
use crate::export::{run_target, ExportStats};
use crate::graphql::GraphqlClient;
use crate::output::SinkPair;
use crate::progress::ProgressReporter;
use crate::targets::{builtin_targets, ExportTarget};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the export over all built-in targets
    pub async fn run(&self) -> Result<()> {
        let config = ExporterConfig::builder()
            .token(self.cli.token.clone())
            .build()?;
        run_export(&config, builtin_targets()).await
    }
}

/// Run a full export of the given targets
///
/// Every target gets its own sink pair and export loop; the loops run
/// concurrently on one executor and results are reported in enumeration
/// order. A failed target does not stop the others, but it does fail the
/// run.
pub async fn run_export(config: &ExporterConfig, targets: Vec<ExportTarget>) -> Result<()> {
    let run_dir = create_run_dir(&config.output_root)?;
    info!("Writing archives to {}", run_dir.display());
    if config.anonymize() {
        info!("No API token provided: running an anonymized public export");
    }

    let client = GraphqlClient::new(config)?;
    let progress = ProgressReporter::new();

    let mut jobs = Vec::new();
    for target in targets {
        let sinks = SinkPair::create(&run_dir, &target.key)?;
        jobs.push(export_one(&client, target, sinks, &progress, config));
    }
    let results = futures::future::join_all(jobs).await;

    let mut failed = 0usize;
    for (key, result) in &results {
        match result {
            Ok(stats) => info!(
                "{key}: {} records in {} pages ({}ms)",
                stats.records, stats.pages, stats.duration_ms
            ),
            Err(e) => {
                failed += 1;
                error!("{key}: export failed: {e}");
            }
        }
    }
    if failed > 0 {
        return Err(Error::output(format!(
            "{failed} of {} targets failed",
            results.len()
        )));
    }
    Ok(())
}

/// Export one target, keeping its key with the outcome for reporting
async fn export_one(
    client: &GraphqlClient,
    target: ExportTarget,
    sinks: SinkPair,
    progress: &ProgressReporter,
    config: &ExporterConfig,
) -> (String, Result<ExportStats>) {
    let result = run_target(client, &target, sinks, progress, config).await;
    (target.key, result)
}

/// Create the timestamped run directory under the output root
fn create_run_dir(root: &Path) -> Result<PathBuf> {
    let run_dir = root.join(Local::now().format("%Y-%m-%d %H-%M-%S").to_string());
    fs::create_dir_all(&run_dir)?;
    Ok(run_dir)
}
