use serde::Deserialize;

use crate::errors::RenderError;

// @module: Whisper transcription JSON data model

/// Prefix used by whisper-cli for non-speech internal tags such as
/// `[_BEG_]` or `[_TT_42]`. Tokens carrying this prefix never contribute
/// text or timing to a caption.
pub const NOISE_TOKEN_PREFIX: &str = "[_";

/// Start/end timecode pair as emitted by whisper-cli ("HH:MM:SS,mmm").
///
/// Timecodes are treated as opaque strings end to end; the only property
/// the converter inspects is whether a bound is present or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Timestamps {
    /// Start timecode
    #[serde(default)]
    pub from: String,

    /// End timecode
    #[serde(default)]
    pub to: String,
}

impl Timestamps {
    /// Build a pair from two timecode strings - used by tests and builders
    #[allow(dead_code)]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Timestamps {
            from: from.into(),
            to: to.into(),
        }
    }
}

// @struct: One recognized unit within a segment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Token {
    // @field: Token text (word or internal marker)
    #[serde(default)]
    pub text: String,

    // @field: Word-level timing
    #[serde(default)]
    pub timestamps: Timestamps,
}

impl Token {
    /// Whether this token carries speech content usable for timing.
    ///
    /// Empty tokens and noise markers (text starting with `[_`) are
    /// filtered from both caption text resolution and timing scans.
    pub fn is_speech(&self) -> bool {
        !self.text.is_empty() && !self.text.starts_with(NOISE_TOKEN_PREFIX)
    }
}

// @struct: One caption-worthy span of transcript
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Segment {
    // @field: Whole-segment fallback timing
    #[serde(default)]
    pub timestamps: Timestamps,

    // @field: Segment text
    #[serde(default)]
    pub text: String,

    // @field: Constituent tokens in recognition order
    #[serde(default)]
    pub tokens: Vec<Token>,
}

/// Root of one whisper-cli output document.
///
/// A missing or null `transcription` key is structurally invalid input and
/// is kept distinct from an empty-but-present list, which is valid and
/// renders to an empty subtitle track.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcript {
    /// Transcribed segments in original order
    #[serde(default)]
    pub transcription: Option<Vec<Segment>>,
}

impl Transcript {
    /// Parse a transcript document from raw JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Borrow the segment list, rejecting documents where it is absent
    pub fn segments(&self) -> Result<&[Segment], RenderError> {
        self.transcription
            .as_deref()
            .ok_or(RenderError::MissingTranscription)
    }
}
