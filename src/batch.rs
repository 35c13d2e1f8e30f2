/*!
 * Batch conversion processing.
 *
 * This module contains functionality for converting transcript files in
 * parallel, with support for bounded concurrency, progress tracking,
 * per-file failure isolation, and cooperative cancellation.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;

use crate::cancellation::CancellationToken;
use crate::errors::{ConversionError, RenderError};
use crate::file_utils::FileManager;
use crate::subtitle_renderer::SubtitleTrack;
use crate::transcript::Transcript;

/// Outcome of one file's conversion task
#[derive(Debug)]
pub struct FileOutcome {
    /// Input transcript path
    pub input: PathBuf,

    /// Written subtitle path on success, the per-file error otherwise
    pub result: Result<PathBuf, ConversionError>,
}

/// Convert a single transcript file to a BOM-prefixed SRT file next to it.
///
/// The full pipeline for one unit of work: read bytes, parse the JSON
/// document, render the subtitle track (checking `cancel` between
/// segments), and write the output. Any step failing aborts this file only.
/// The output file is written even when the track is empty, matching the
/// upstream tool.
pub async fn convert_file(
    input: &Path,
    cancel: &CancellationToken,
) -> Result<PathBuf, ConversionError> {
    if cancel.is_cancelled() {
        return Err(RenderError::Cancelled.into());
    }

    let bytes = FileManager::read_bytes(input).map_err(ConversionError::Read)?;
    let transcript = Transcript::from_slice(&bytes)?;
    let track = SubtitleTrack::from_transcript_cancellable(&transcript, cancel)?;

    let output = FileManager::subtitle_output_path(input);
    FileManager::write_subtitle_file(&output, &track.to_srt()).map_err(ConversionError::Write)?;

    Ok(output)
}

/// Batch converter driving one task per input file
pub struct BatchConverter {
    /// Maximum number of files converted concurrently
    max_concurrent_tasks: usize,
}

impl BatchConverter {
    /// Create a converter with an explicit concurrency bound
    pub fn new(max_concurrent_tasks: usize) -> Self {
        Self {
            max_concurrent_tasks: max_concurrent_tasks.max(1),
        }
    }

    /// Create a converter sized to the host's available parallelism
    pub fn with_available_parallelism() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(workers)
    }

    /// Concurrency bound in effect
    pub fn max_concurrent_tasks(&self) -> usize {
        self.max_concurrent_tasks
    }

    /// Convert all input files with bounded concurrency.
    ///
    /// Every file is attempted regardless of other files' failures; a
    /// cancelled batch stops picking up new files but lets in-flight tasks
    /// finish their current segment loop. Outcomes are returned in input
    /// order, one per attempted file.
    pub async fn convert_all(
        &self,
        files: &[PathBuf],
        cancel: &CancellationToken,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Vec<FileOutcome> {
        // Limit concurrent conversions
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_tasks));

        let total_files = files.len();
        let processed_files = Arc::new(AtomicUsize::new(0));

        let results = stream::iter(files.iter().cloned().enumerate())
            .map(|(index, input)| {
                let semaphore = semaphore.clone();
                let cancel = cancel.clone();
                let processed_files = processed_files.clone();
                let progress_callback = progress_callback.clone();

                async move {
                    // Semaphore is never closed while converting
                    let _permit = semaphore.acquire().await.unwrap();

                    let result = convert_file(&input, &cancel).await;

                    let current = processed_files.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total_files);

                    (index, FileOutcome { input, result })
                }
            })
            .buffer_unordered(self.max_concurrent_tasks)
            .collect::<Vec<_>>()
            .await;

        // Restore input order for reporting
        let mut sorted_results = results;
        sorted_results.sort_by_key(|(index, _)| *index);

        sorted_results
            .into_iter()
            .map(|(_, outcome)| outcome)
            .collect()
    }
}

impl Default for BatchConverter {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}
