//! Error types for semitone-dsp.

use thiserror::Error;

/// DSP error type.
#[derive(Error, Debug)]
pub enum DspError {
    /// Parameter outside the accepted domain (ratio, gain factor).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Numeric failure during resynthesis.
    #[error("Transform error: {0}")]
    Transform(String),

    /// Resampling error.
    #[error("Resampling error: {0}")]
    Resample(String),
}

/// Result type for DSP operations.
pub type Result<T> = std::result::Result<T, DspError>;

// From trait implementations for external library errors at API boundary
// These convert complex external error types to simple strings for user-facing messages

impl From<rubato::ResamplerConstructionError> for DspError {
    fn from(e: rubato::ResamplerConstructionError) -> Self {
        DspError::Resample(e.to_string())
    }
}

impl From<rubato::ResampleError> for DspError {
    fn from(e: rubato::ResampleError) -> Self {
        DspError::Resample(e.to_string())
    }
}
