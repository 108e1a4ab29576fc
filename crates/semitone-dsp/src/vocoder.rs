//! Phase-vocoder time stretching.
//!
//! Consumes analysis frames and resynthesizes a signal whose duration is
//! scaled by a stretch ratio while the spectral content stays put. Output
//! frames are spaced one analysis hop apart; their *source* positions are
//! spaced `hop / ratio` apart, so magnitudes are interpolated between the
//! two nearest analysis frames while bin phases are never interpolated -
//! they are accumulated from the measured per-bin instantaneous frequency.
//! Copying analysis phases directly would decohere neighbouring frames and
//! buzz audibly.

use std::f32::consts::PI;

use rustfft::num_complex::Complex32;

use crate::error::{DspError, Result};
use crate::fft::RealFft;
use crate::stft::{FrameSize, SpectralFrame};
use crate::window::hann_window;

/// Smallest overlap energy still treated as window coverage when
/// normalizing the overlap-add sum.
const OVERLAP_EPS: f32 = 1e-8;

/// Overlap-add resynthesis with phase accumulation.
pub struct PhaseVocoder {
    fft: RealFft,
    window: Vec<f32>,
    hop: usize,
    /// Expected phase advance per hop for each bin's center frequency:
    /// `2 * PI * k * hop / frame_len`.
    expected_advance: Vec<f32>,
}

impl PhaseVocoder {
    pub fn new(frame_size: FrameSize) -> Self {
        let size = frame_size.size();
        let hop = frame_size.hop_size();
        let num_bins = size / 2 + 1;

        let expected_advance: Vec<f32> = (0..num_bins)
            .map(|k| 2.0 * PI * (k as f32) * (hop as f32) / (size as f32))
            .collect();

        Self {
            fft: RealFft::new(size),
            window: hann_window(size),
            hop,
            expected_advance,
        }
    }

    /// Convert a pitch shift in semitones to the duration ratio applied
    /// before resampling: `2^(semitones / 12)`.
    ///
    /// Raising pitch stretches the signal longer (`r > 1`); squeezing it
    /// back to the original sample count then multiplies every frequency
    /// by the same `2^(semitones / 12)`. Lowering pitch runs the other
    /// way.
    pub fn stretch_ratio(semitones: f64) -> f64 {
        2f64.powf(semitones / 12.0)
    }

    /// Resynthesize a time-stretched lane from `frames`.
    ///
    /// `source_len` is the length of the lane the frames were taken from;
    /// the output is exactly `round(source_len * ratio)` samples.
    pub fn stretch(
        &self,
        frames: &[SpectralFrame],
        source_len: usize,
        ratio: f64,
    ) -> Result<Vec<f32>> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(DspError::InvalidParameter(format!(
                "stretch ratio must be finite and positive, got {ratio}"
            )));
        }
        if frames.is_empty() || source_len == 0 {
            return Ok(Vec::new());
        }

        let size = self.fft.size();
        let num_bins = self.fft.bins();
        let hop = self.hop;

        let target_len = ((source_len as f64) * ratio).round().max(1.0) as usize;
        let frame_count = (target_len + hop - 1) / hop;

        // Polar form of every analysis frame, computed once up front.
        let mut mags = Vec::with_capacity(frames.len());
        let mut phases = Vec::with_capacity(frames.len());
        for frame in frames {
            let mut mag = Vec::with_capacity(num_bins);
            let mut phase = Vec::with_capacity(num_bins);
            for bin in &frame.bins {
                let (m, p) = bin.to_polar();
                mag.push(m);
                phase.push(p);
            }
            mags.push(mag);
            phases.push(phase);
        }

        let span = (frame_count - 1) * hop + size;
        let mut out = vec![0.0f32; span];
        let mut overlap = vec![0.0f32; span];

        // Running output phase per bin, seeded from the first frame.
        let mut out_phase = phases[0].clone();
        let mut spectrum = vec![Complex32::new(0.0, 0.0); num_bins];

        for m in 0..frame_count {
            // Source position of this output frame, in frame-index space.
            let pos = m as f64 / ratio;
            let i = (pos.floor() as usize).min(frames.len() - 1);
            let i_next = (i + 1).min(frames.len() - 1);
            let frac = (pos - i as f64).clamp(0.0, 1.0) as f32;

            for k in 0..num_bins {
                let mag = mags[i][k] + (mags[i_next][k] - mags[i][k]) * frac;
                spectrum[k] = Complex32::from_polar(mag, out_phase[k]);
            }

            let frame = self.fft.inverse(&spectrum);
            let start = m * hop;
            for (j, &sample) in frame.iter().enumerate() {
                out[start + j] += sample * self.window[j];
                overlap[start + j] += self.window[j] * self.window[j];
            }

            // Advance the running phase to the next output frame: expected
            // center-frequency advance plus the deviation measured between
            // the two analysis frames bracketing this source position. One
            // output hop equals one analysis hop, so no hop rescaling.
            for k in 0..num_bins {
                let deviation = wrap_phase(
                    phases[i_next][k] - phases[i][k] - self.expected_advance[k],
                );
                out_phase[k] =
                    wrap_phase(out_phase[k] + self.expected_advance[k] + deviation);
            }
        }

        // Normalize by the accumulated window energy; spots the windows
        // never covered stay silent instead of dividing by zero.
        for (sample, &energy) in out.iter_mut().zip(overlap.iter()) {
            if energy > OVERLAP_EPS {
                *sample /= energy;
            }
        }

        out.resize(target_len, 0.0);

        if out.iter().any(|s| !s.is_finite()) {
            return Err(DspError::Transform(
                "non-finite sample after resynthesis".into(),
            ));
        }
        Ok(out)
    }
}

/// Wrap phase to [-PI, PI]
#[inline]
fn wrap_phase(phase: f32) -> f32 {
    let mut p = phase;
    while p > PI {
        p -= 2.0 * PI;
    }
    while p < -PI {
        p += 2.0 * PI;
    }
    p
}
