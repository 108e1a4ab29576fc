//! Processing requests and output naming.

use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Largest accepted pitch shift magnitude, in semitones (four octaves
/// either way). Beyond this the stretch buffers grow without buying any
/// usable output.
pub const MAX_PITCH_SEMITONES: f64 = 48.0;

/// One pitch/volume transformation job. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingRequest {
    /// Audio file to read.
    pub input_path: PathBuf,
    /// Destination for the transformed audio.
    pub output_path: PathBuf,
    /// Pitch shift in semitones; fractional and negative values allowed.
    pub pitch_semitones: f64,
    /// Linear gain multiplier, non-negative.
    pub volume_factor: f64,
}

impl ProcessingRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        pitch_semitones: f64,
        volume_factor: f64,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            pitch_semitones,
            volume_factor,
        }
    }

    /// Build a request whose output name is derived from the input name
    /// and the parameters, placed next to the input.
    pub fn with_derived_output(
        input_path: impl Into<PathBuf>,
        pitch_semitones: f64,
        volume_factor: f64,
    ) -> Self {
        let input_path = input_path.into();
        let output_path =
            derive_output_path(&input_path, pitch_semitones, volume_factor, None);
        Self {
            input_path,
            output_path,
            pitch_semitones,
            volume_factor,
        }
    }

    /// Parameter checks that must pass before any I/O happens.
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.pitch_semitones.is_finite()
            || self.pitch_semitones.abs() > MAX_PITCH_SEMITONES
        {
            return Err(PipelineError::InvalidParameter(format!(
                "pitch shift must be finite and within +/-{MAX_PITCH_SEMITONES} semitones, got {}",
                self.pitch_semitones
            )));
        }
        if !self.volume_factor.is_finite() || self.volume_factor < 0.0 {
            return Err(PipelineError::InvalidParameter(format!(
                "volume factor must be finite and non-negative, got {}",
                self.volume_factor
            )));
        }
        Ok(())
    }
}

/// Derive the output file name from the input name and the applied
/// parameters: `{stem}_pitch_{p}_volume_{v}{ext}`, placed in `dir` or next
/// to the input. Integer-valued parameters print without a decimal point,
/// keeping the historical names stable.
pub fn derive_output_path(
    input: &Path,
    pitch_semitones: f64,
    volume_factor: f64,
    dir: Option<&Path>,
) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|s| format!(".{}", s.to_string_lossy()))
        .unwrap_or_default();

    let name = format!(
        "{stem}_pitch_{}_volume_{}{ext}",
        format_param(pitch_semitones),
        format_param(volume_factor)
    );

    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(name)
}

fn format_param(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
