//! Analysis/synthesis windows.

use std::f32::consts::PI;

/// Create a Hann window of the specified size.
pub(crate) fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / size as f32).cos()))
        .collect()
}
