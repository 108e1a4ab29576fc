//! # Semitone - Offline Pitch/Volume Processing
//!
//! Takes an audio file, shifts its pitch by a number of semitones without
//! changing its duration or sample rate, scales its loudness by a linear
//! factor, and writes the result next to the input.
//!
//! ## Architecture
//!
//! Semitone is an umbrella crate that coordinates:
//! - **semitone-codec** - WAV/FLAC file I/O and the `SampleBuffer` model
//! - **semitone-dsp** - STFT analysis, phase-vocoder stretching,
//!   exact-length resampling, gain
//!
//! The pitch shift itself is stretch-then-resample: a phase vocoder
//! scales the signal's duration by `2^(semitones/12)`, then a windowed-sinc
//! resampler brings it back to the original sample count, moving every
//! frequency by `2^(semitones/12)` in the process.
//!
//! ## Quick Start
//!
//! ```ignore
//! use semitone::{PipelineConfig, ProcessingRequest, TransformPipeline};
//!
//! let pipeline = TransformPipeline::new(PipelineConfig::default());
//! let request = ProcessingRequest::with_derived_output("input.wav", 12.0, 0.5);
//! let report = pipeline.run(&request)?;
//! println!("wrote {}", report.output_path.display());
//! ```
//!
//! To keep an interactive caller responsive, submit through
//! [`PipelineWorker`] instead: the run executes on a worker thread and the
//! returned [`JobHandle`] delivers exactly one terminal result.

/// Re-export of semitone-codec for direct access
pub use semitone_codec as codec;

/// Re-export of semitone-dsp for direct access
pub use semitone_dsp as dsp;

pub use semitone_codec::{BitDepth, SampleBuffer};
pub use semitone_dsp::FrameSize;

mod error;
mod params;
mod pipeline;
mod request;
mod worker;

pub use error::{PipelineError, Result};
pub use params::{AtomicF32, ControlParams};
pub use pipeline::{PipelineConfig, ProcessingReport, TransformPipeline};
pub use request::{derive_output_path, ProcessingRequest, MAX_PITCH_SEMITONES};
pub use worker::{JobHandle, PipelineWorker};
