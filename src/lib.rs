/*!
 * # whisub - whisper transcription to SRT subtitles
 *
 * A Rust library for converting whisper-cli transcription JSON (with
 * per-word timing data) into SRT subtitle files.
 *
 * ## Features
 *
 * - Word-level caption timing: each caption's start/end comes from its
 *   first and last real speech token, not the whole segment
 * - Noise-marker filtering (`[_...]` internal tags never shift timing)
 * - Segment-level timing fallback when word-level data is absent or invalid
 * - Parallel batch conversion with per-file failure isolation
 * - Cooperative cancellation (Ctrl-C) between files and between segments
 * - BOM-prefixed output for correct encoding detection downstream
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `transcript`: whisper JSON data model and parsing
 * - `subtitle_renderer`: caption timing resolution and SRT serialization
 * - `batch`: bounded-concurrency fan-out over input files
 * - `file_utils`: file discovery and BOM-prefixed output writing
 * - `app_controller`: main application controller and batch reporting
 * - `app_config`: runtime configuration
 * - `cancellation`: shared cooperative cancellation token
 * - `errors`: custom error types for the conversion pipeline
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod batch;
pub mod cancellation;
pub mod errors;
pub mod file_utils;
pub mod subtitle_renderer;
pub mod transcript;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use batch::{BatchConverter, FileOutcome, convert_file};
pub use cancellation::CancellationToken;
pub use errors::{ConversionError, RenderError};
pub use subtitle_renderer::{Caption, SubtitleTrack, resolve_timing};
pub use transcript::{NOISE_TOKEN_PREFIX, Segment, Timestamps, Token, Transcript};
