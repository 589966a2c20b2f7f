//! Shared types passed between the scanner, the batch encoder, and the CLI.
//!
//! Inputs arrive as [`SourceImage`] (bytes plus the name and MIME type they
//! were declared with); outputs leave as [`EncodedFile`]. The metadata parts
//! serialize into the JSON batch report; raw bytes never do.

use crate::imaging::{OutputFormat, Rect};
use serde::{Deserialize, Serialize};

/// One input image, as read from disk or handed over by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImage {
    /// Display name, usually the file name with extension (`photo.jpg`).
    pub filename: String,
    /// Declared MIME type. Decoding sniffs the content first and only falls
    /// back to this when the bytes are ambiguous.
    pub mime: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl SourceImage {
    pub fn new(filename: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Filename without its final extension.
    pub fn stem(&self) -> &str {
        crate::naming::file_stem(&self.filename)
    }
}

/// One encoded output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFile {
    /// Output file name including extension.
    pub filename: String,
    pub format: OutputFormat,
    pub size: Rect,
    /// Short description shown next to the name: `"1280x720"` or `"WEBP"`.
    pub label: String,
    /// Length of `bytes`, kept for the report.
    pub byte_len: usize,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl EncodedFile {
    /// Labelled with its dimensions.
    pub fn new(filename: String, format: OutputFormat, size: Rect, bytes: Vec<u8>) -> Self {
        Self {
            filename,
            format,
            size,
            label: size.to_string(),
            byte_len: bytes.len(),
            bytes,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn mime(&self) -> &'static str {
        self.format.mime_type()
    }
}
