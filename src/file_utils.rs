use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// UTF-8 byte-order-mark prepended to every subtitle file so downstream
/// players detect the encoding correctly.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Extension of input transcript files (matched case-insensitively)
pub const TRANSCRIPT_EXTENSION: &str = "json";

/// Extension of emitted subtitle files
pub const SUBTITLE_EXTENSION: &str = "srt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    /// Find transcript JSON files directly inside a directory.
    ///
    /// The scan is non-recursive and the extension match is
    /// case-insensitive. Results are sorted for deterministic reporting;
    /// the batch itself makes no cross-file ordering guarantee.
    pub fn find_transcript_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(TRANSCRIPT_EXTENSION) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file's raw bytes
    pub fn read_bytes<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }

    /// Derive the subtitle output path from an input transcript path by
    /// swapping the extension
    pub fn subtitle_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
        input.as_ref().with_extension(SUBTITLE_EXTENSION)
    }

    /// Write subtitle content to a file, prefixed with the UTF-8 BOM.
    ///
    /// The file is written even when `content` is empty; callers that want
    /// to suppress empty outputs decide before calling.
    pub fn write_subtitle_file<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
        let mut data = Vec::with_capacity(UTF8_BOM.len() + content.len());
        data.extend_from_slice(UTF8_BOM);
        data.extend_from_slice(content.as_bytes());
        fs::write(path, data)
    }
}
