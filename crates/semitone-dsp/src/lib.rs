//! # Semitone DSP
//!
//! Spectral processing blocks for the semitone engine:
//! - **STFT analysis** - overlapping Hann-windowed frames via rustfft
//! - **Phase vocoder** - time-stretching with per-bin phase accumulation
//! - **Resampling** - exact-length windowed-sinc conversion via rubato
//! - **Gain** - linear amplitude scaling
//!
//! Everything here operates on mono lanes of `f32` samples. Multi-channel
//! material is handled by running each lane through the same chain; the
//! umbrella crate owns that orchestration.
//!
//! ## Pitch shifting
//!
//! A pitch shift of `n` semitones is realized in two steps: time-stretch to
//! `r = 2^(n/12)` times the original duration with [`PhaseVocoder::stretch`],
//! then resample back to the original sample count with
//! [`resample_to_length`]. Spreading the original number of output samples
//! across a signal `r` times longer moves every frequency by the same
//! ratio.

pub mod error;
mod fft;
pub mod gain;
pub mod resample;
pub mod stft;
pub mod vocoder;
mod window;

pub use error::{DspError, Result};
pub use gain::apply_gain;
pub use resample::resample_to_length;
pub use stft::{FrameSize, SpectralAnalyzer, SpectralFrame};
pub use vocoder::PhaseVocoder;
