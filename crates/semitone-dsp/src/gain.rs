//! Linear gain.

use crate::error::{DspError, Result};

/// Multiply every sample by `factor`.
///
/// No clipping is applied; samples may leave the nominal [-1, 1] range and
/// it is the encoder's business how it represents them.
pub fn apply_gain(lane: &mut [f32], factor: f32) -> Result<()> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(DspError::InvalidParameter(format!(
            "gain factor must be finite and non-negative, got {factor}"
        )));
    }
    for sample in lane.iter_mut() {
        *sample *= factor;
    }
    Ok(())
}
