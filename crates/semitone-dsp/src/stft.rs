//! Short-time Fourier analysis.
//!
//! Splits a mono lane into overlapping Hann-windowed frames and transforms
//! each to the frequency domain. The analyzer is stateless: the same lane
//! and parameters always yield the same frame sequence.

use rustfft::num_complex::Complex32;

use crate::fft::RealFft;
use crate::window::hann_window;

/// Frame length presets for the frequency-resolution / time-smearing
/// trade-off.
///
/// - **Small (1024)**: tighter transients, coarser frequency resolution
/// - **Medium (2048)**: default, balanced
/// - **Large (4096)**: finer frequency resolution, more smearing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSize {
    /// 1024-point frames
    Small = 1024,

    /// 2048-point frames - Default
    #[default]
    Medium = 2048,

    /// 4096-point frames
    Large = 4096,
}

impl FrameSize {
    /// Get the frame length as usize
    pub fn size(&self) -> usize {
        *self as usize
    }

    /// Get the hop length (frame length / 4 = 75% overlap)
    pub fn hop_size(&self) -> usize {
        self.size() / 4
    }
}

/// One analysis frame: the non-redundant complex spectrum of a windowed
/// stretch of the source, taken `offset` samples into its timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFrame {
    /// Position within the frame sequence.
    pub index: usize,
    /// Sample offset of the frame start in the source lane.
    pub offset: usize,
    /// `frame_len / 2 + 1` complex bins.
    pub bins: Vec<Complex32>,
}

/// Windowed STFT analyzer with a fixed frame length and 75% overlap.
pub struct SpectralAnalyzer {
    fft: RealFft,
    window: Vec<f32>,
    hop: usize,
}

impl SpectralAnalyzer {
    pub fn new(frame_size: FrameSize) -> Self {
        let size = frame_size.size();
        Self {
            fft: RealFft::new(size),
            window: hann_window(size),
            hop: frame_size.hop_size(),
        }
    }

    /// Frame length in samples.
    pub fn frame_len(&self) -> usize {
        self.fft.size()
    }

    /// Hop length between consecutive frame starts.
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Bins per frame (`frame_len / 2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.fft.bins()
    }

    /// Produce `ceil(len / hop)` overlapping frames, each Hann-windowed
    /// before the transform. The final frame is zero-padded past the end of
    /// the lane.
    pub fn analyze(&self, lane: &[f32]) -> Vec<SpectralFrame> {
        if lane.is_empty() {
            return Vec::new();
        }

        let size = self.fft.size();
        let frame_count = (lane.len() + self.hop - 1) / self.hop;
        let mut frames = Vec::with_capacity(frame_count);
        let mut windowed = vec![0.0f32; size];

        for index in 0..frame_count {
            let offset = index * self.hop;
            let avail = (lane.len() - offset).min(size);

            for i in 0..avail {
                windowed[i] = lane[offset + i] * self.window[i];
            }
            windowed[avail..].fill(0.0);

            frames.push(SpectralFrame {
                index,
                offset,
                bins: self.fft.forward(&windowed),
            });
        }

        frames
    }
}
