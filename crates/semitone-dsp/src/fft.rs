//! Real-signal FFT helpers on top of rustfft.

use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Forward/inverse transform pair for real frames of a fixed size.
///
/// A real frame of `size` samples transforms to `size / 2 + 1` non-redundant
/// complex bins; the upper half of the spectrum is implied by conjugate
/// symmetry and reconstructed on the way back.
pub(crate) struct RealFft {
    size: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl RealFft {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            size,
            forward: planner.plan_fft_forward(size),
            inverse: planner.plan_fft_inverse(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bins(&self) -> usize {
        self.size / 2 + 1
    }

    /// Forward transform of a (windowed) real frame.
    pub fn forward(&self, frame: &[f32]) -> Vec<Complex32> {
        debug_assert_eq!(frame.len(), self.size);
        let mut buffer: Vec<Complex32> =
            frame.iter().map(|&x| Complex32::new(x, 0.0)).collect();
        self.forward.process(&mut buffer);
        buffer.truncate(self.bins());
        buffer
    }

    /// Inverse transform of the non-redundant bins back to a real frame.
    ///
    /// Scaled by `1/size` so that `inverse(forward(x)) == x`.
    pub fn inverse(&self, bins: &[Complex32]) -> Vec<f32> {
        debug_assert_eq!(bins.len(), self.bins());
        let mut buffer = vec![Complex32::new(0.0, 0.0); self.size];
        buffer[..bins.len()].copy_from_slice(bins);
        for i in 1..self.bins() - 1 {
            buffer[self.size - i] = bins[i].conj();
        }
        self.inverse.process(&mut buffer);
        let scale = 1.0 / self.size as f32;
        buffer.iter().map(|c| c.re * scale).collect()
    }
}
