//! Request orchestration: decode, stretch, resample, gain, encode.

use std::path::PathBuf;

use semitone_codec::{self as codec, BitDepth, EncodeConfig, SampleBuffer};
use semitone_dsp::{
    apply_gain, resample_to_length, FrameSize, PhaseVocoder, SpectralAnalyzer,
};

use crate::error::Result;
use crate::request::ProcessingRequest;

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineConfig {
    /// Analysis/synthesis frame length.
    pub frame_size: FrameSize,
    /// Output encoding.
    pub bit_depth: BitDepth,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingReport {
    /// Where the transformed audio landed.
    pub output_path: PathBuf,
    /// Channels written.
    pub channels: usize,
    /// Samples per channel - always equal to the input's.
    pub frames: usize,
    /// Sample rate in Hz - always equal to the input's.
    pub sample_rate: u32,
}

/// Drives one request through decode -> stretch -> resample -> gain ->
/// encode.
///
/// Stateless between runs: identical requests over identical input files
/// produce bit-identical output. Each channel lane is processed
/// independently through the same chain, since phase vocoding is inherently
/// per-channel.
#[derive(Debug, Clone, Default)]
pub struct TransformPipeline {
    config: PipelineConfig,
}

impl TransformPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    pub fn run(&self, request: &ProcessingRequest) -> Result<ProcessingReport> {
        request.validate()?;

        let buffer = codec::decode(&request.input_path)?;
        log::debug!(
            "decoded {}: {} ch x {} frames @ {} Hz",
            request.input_path.display(),
            buffer.channels(),
            buffer.frames(),
            buffer.sample_rate()
        );

        let ratio = PhaseVocoder::stretch_ratio(request.pitch_semitones);
        let analyzer = SpectralAnalyzer::new(self.config.frame_size);
        let vocoder = PhaseVocoder::new(self.config.frame_size);
        let gain = request.volume_factor as f32;

        let (lanes, sample_rate) = buffer.into_lanes();
        let mut processed = Vec::with_capacity(lanes.len());
        for lane in &lanes {
            let spectra = analyzer.analyze(lane);
            let stretched = vocoder.stretch(&spectra, lane.len(), ratio)?;
            let mut resampled = resample_to_length(&stretched, lane.len())?;
            apply_gain(&mut resampled, gain)?;
            processed.push(resampled);
        }

        let output = SampleBuffer::new(processed, sample_rate)?;
        let encode_config = EncodeConfig {
            bit_depth: self.config.bit_depth,
        };
        codec::encode(&output, &request.output_path, &encode_config)?;

        log::info!(
            "wrote {} ({:+.2} semitones, x{} volume)",
            request.output_path.display(),
            request.pitch_semitones,
            request.volume_factor
        );

        Ok(ProcessingReport {
            output_path: request.output_path.clone(),
            channels: output.channels(),
            frames: output.frames(),
            sample_rate,
        })
    }
}
