//! Error types for semitone-codec.

use std::path::PathBuf;
use thiserror::Error;

/// Codec error type.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input file missing or not a parseable audio format.
    #[error("Unreadable audio file {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    /// Decoded audio contained no samples.
    #[error("Audio file {} decoded to zero samples", .path.display())]
    EmptyAudio { path: PathBuf },

    /// Output destination could not be created or written.
    #[error("Failed to write {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    /// Encoder rejected the data or configuration.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Format/feature mismatch (e.g. FLAC with a float bit depth).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Channel lanes of unequal length or no channels at all.
    #[error("Invalid audio data: {0}")]
    InvalidData(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
