use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;

use crate::app_config::Config;
use crate::batch::{BatchConverter, FileOutcome};
use crate::cancellation::CancellationToken;
use crate::file_utils::FileManager;

// @module: Application controller for batch transcript conversion

/// Main application controller for transcript-to-subtitle conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

/// Aggregate result of one batch run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files attempted (equals the number of discovered inputs)
    pub attempted: usize,
    /// Files converted successfully
    pub succeeded: usize,
    /// Files that failed with a per-file error
    pub failed: usize,
    /// Files abandoned because cancellation was requested
    pub cancelled: usize,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run the conversion over every transcript file in a directory.
    ///
    /// Discovers `*.json` files (non-recursive, case-insensitive), converts
    /// each through the batch layer, logs per-file outcomes, and reports an
    /// aggregate summary. Per-file failures never abort the run; Ctrl-C
    /// requests cooperative cancellation.
    pub async fn run(&self, input_dir: PathBuf) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!(
                "Input directory does not exist: {:?}",
                input_dir
            ));
        }

        let files = FileManager::find_transcript_files(&input_dir)?;
        if files.is_empty() {
            info!("No .json files found in {:?}, nothing to do.", input_dir);
            return Ok(RunSummary::default());
        }

        let converter = match self.config.max_concurrent_tasks {
            Some(workers) => BatchConverter::new(workers),
            None => BatchConverter::with_available_parallelism(),
        };

        info!(
            "Converting {} file(s) with {} worker(s)...",
            files.len(),
            converter.max_concurrent_tasks()
        );

        // Wire Ctrl-C to the shared cancellation token
        let cancel = CancellationToken::new();
        let signal_cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Cancellation requested, finishing in-flight files...");
                signal_cancel.cancel();
            }
        });

        // Progress bar over files
        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Converting");

        let pb = progress_bar.clone();
        let outcomes = converter
            .convert_all(&files, &cancel, move |completed, _total| {
                pb.set_position(completed as u64);
            })
            .await;

        progress_bar.finish_and_clear();

        let summary = self.report_outcomes(&outcomes);

        let duration = start_time.elapsed();
        info!(
            "Batch complete: {} attempted, {} converted, {} failed, {} cancelled in {}",
            summary.attempted,
            summary.succeeded,
            summary.failed,
            summary.cancelled,
            Self::format_duration(duration)
        );

        Ok(summary)
    }

    /// Log each file's outcome and fold them into a summary
    fn report_outcomes(&self, outcomes: &[FileOutcome]) -> RunSummary {
        let mut summary = RunSummary {
            attempted: outcomes.len(),
            ..RunSummary::default()
        };

        for outcome in outcomes {
            let file_name = outcome
                .input
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match &outcome.result {
                Ok(output) => {
                    info!("Success: {}", output.display());
                    summary.succeeded += 1;
                }
                Err(e) if e.is_cancelled() => {
                    warn!("Cancelled before completing: {}", file_name);
                    summary.cancelled += 1;
                }
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
