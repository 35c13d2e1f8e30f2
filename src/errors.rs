/*!
 * Error types for the whisub application.
 *
 * This module contains custom error types for the conversion pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::io;
use thiserror::Error;

/// Errors that can occur while rendering a subtitle track from a transcript
#[derive(Error, Debug)]
pub enum RenderError {
    /// The document parsed but its transcription list is structurally absent
    #[error("transcription list is missing")]
    MissingTranscription,

    /// Cooperative cancellation was observed between segments
    #[error("conversion cancelled")]
    Cancelled,
}

/// Errors that can occur while converting one transcript file.
///
/// Every variant is fatal for that one file only; the batch driver logs the
/// failure and continues with the remaining files. No variant is retried.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Input bytes could not be obtained
    #[error("failed to read input file: {0}")]
    Read(#[source] io::Error),

    /// Input bytes are not well-formed JSON matching the expected shape
    #[error("failed to parse transcription JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rendering failed (missing transcription list or cancellation)
    #[error("{0}")]
    Render(#[from] RenderError),

    /// Output could not be persisted
    #[error("failed to write subtitle file: {0}")]
    Write(#[source] io::Error),
}

impl ConversionError {
    /// Whether this failure was a cancellation rather than a real error
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConversionError::Render(RenderError::Cancelled))
    }
}
