//! Centralized error type for the semitone umbrella crate.
//!
//! Maps subsystem errors onto the request-level failure taxonomy so `?`
//! propagates naturally across crate boundaries. Every failure a caller can
//! observe is one of these variants; there is no catch-all.

use std::path::PathBuf;
use thiserror::Error;

use semitone_codec::CodecError;
use semitone_dsp::DspError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file missing or not a parseable audio format.
    #[error("Unreadable input: {0}")]
    UnreadableFile(String),

    /// Input decoded to zero samples.
    #[error("Input {} contains no audio", .0.display())]
    EmptyAudio(PathBuf),

    /// Request parameters outside the accepted domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Output could not be written.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Numeric failure inside the transform chain.
    #[error("Transform failure: {0}")]
    Transform(String),

    /// A run is already in flight on this worker.
    #[error("A processing job is already running")]
    WorkerBusy,

    /// Worker thread could not be spawned, or died without reporting.
    #[error("Worker error: {0}")]
    Worker(String),
}

impl From<CodecError> for PipelineError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Unreadable { .. } => PipelineError::UnreadableFile(e.to_string()),
            CodecError::EmptyAudio { path } => PipelineError::EmptyAudio(path),
            CodecError::Write { .. }
            | CodecError::Encoding(_)
            | CodecError::UnsupportedFormat(_) => {
                PipelineError::WriteFailure(e.to_string())
            }
            CodecError::InvalidData(_) => PipelineError::Transform(e.to_string()),
        }
    }
}

impl From<DspError> for PipelineError {
    fn from(e: DspError) -> Self {
        match e {
            DspError::InvalidParameter(_) => PipelineError::InvalidParameter(e.to_string()),
            DspError::Transform(_) | DspError::Resample(_) => {
                PipelineError::Transform(e.to_string())
            }
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
