use std::fmt;

use crate::cancellation::CancellationToken;
use crate::errors::RenderError;
use crate::transcript::{Segment, Transcript};

// @module: Caption timing resolution and SRT track rendering

/// Resolve the emitted start/end timecodes for one segment.
///
/// The start time is taken from the first speech token, the end time from
/// the last speech token (noise markers and empty tokens are skipped). If
/// either scan comes up empty, or either resolved bound is an empty string,
/// both bounds fall back to the segment-level timing as a pair; a
/// token-derived bound is never mixed with a segment-derived one.
///
/// The returned pair may itself be empty when the segment carries no usable
/// timing at all. That is not an error here; the renderer skips such
/// segments.
pub fn resolve_timing(segment: &Segment) -> (String, String) {
    let start = segment.tokens.iter().find(|t| t.is_speech());
    let end = segment.tokens.iter().rev().find(|t| t.is_speech());

    match (start, end) {
        (Some(first), Some(last))
            if !first.timestamps.from.is_empty() && !last.timestamps.to.is_empty() =>
        {
            (first.timestamps.from.clone(), last.timestamps.to.clone())
        }
        _ => (
            segment.timestamps.from.clone(),
            segment.timestamps.to.clone(),
        ),
    }
}

// @struct: One emitted subtitle block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    // @field: Sequence number (1-based, gapless over emitted captions)
    pub seq_num: usize,

    // @field: Start timecode
    pub start: String,

    // @field: End timecode
    pub end: String,

    // @field: Caption text, whitespace-trimmed
    pub text: String,
}

impl Caption {
    /// Build the caption for a segment, or None when its timing is
    /// unresolvable and the segment must be skipped
    fn from_segment(seq_num: usize, segment: &Segment) -> Option<Self> {
        let (start, end) = resolve_timing(segment);
        if start.is_empty() || end.is_empty() {
            return None;
        }

        Some(Caption {
            seq_num,
            start,
            end,
            text: segment.text.trim().to_string(),
        })
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Ordered collection of captions rendered from one transcript
#[derive(Debug, Clone, Default)]
pub struct SubtitleTrack {
    /// Emitted captions, numbered sequentially from 1
    pub captions: Vec<Caption>,
}

impl SubtitleTrack {
    /// Render a transcript into a subtitle track.
    ///
    /// Fails with [`RenderError::MissingTranscription`] when the
    /// transcription list is structurally absent. Segments whose timing
    /// cannot be resolved are skipped without reserving a sequence number.
    pub fn from_transcript(transcript: &Transcript) -> Result<Self, RenderError> {
        Self::from_transcript_cancellable(transcript, &CancellationToken::new())
    }

    /// Render a transcript, checking the cancellation token between segments
    pub fn from_transcript_cancellable(
        transcript: &Transcript,
        cancel: &CancellationToken,
    ) -> Result<Self, RenderError> {
        let segments = transcript.segments()?;

        let mut captions = Vec::with_capacity(segments.len());
        for segment in segments {
            if cancel.is_cancelled() {
                return Err(RenderError::Cancelled);
            }

            if let Some(caption) = Caption::from_segment(captions.len() + 1, segment) {
                captions.push(caption);
            }
        }

        Ok(SubtitleTrack { captions })
    }

    /// Serialize the track to SRT text.
    ///
    /// Each block is terminated by a blank line; a track with no captions
    /// serializes to the empty string.
    pub fn to_srt(&self) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for caption in &self.captions {
            // Writing into a String cannot fail
            let _ = write!(out, "{}", caption);
        }
        out
    }

    /// Number of emitted captions - used by tests and external consumers
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Whether the track contains no captions
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}
