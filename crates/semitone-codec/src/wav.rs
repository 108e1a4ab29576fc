//! WAV decode and encode using hound.
//!
//! Decoding accepts 8/16/24/32-bit integer PCM and 32-bit float; every
//! integer depth is normalized to [-1.0, 1.0] by its own full-scale value so
//! relative amplitude survives the trip. Encoding supports 16-bit, 24-bit
//! and 32-bit float output.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

use crate::buffer::SampleBuffer;
use crate::error::{CodecError, Result};
use crate::options::{BitDepth, EncodeConfig};

/// Decode a WAV file into a normalized sample buffer.
pub fn decode_wav(path: &Path) -> Result<SampleBuffer> {
    let unreadable = |reason: String| CodecError::Unreadable {
        path: path.to_path_buf(),
        reason,
    };

    let reader = WavReader::open(path).map_err(|e| unreadable(e.to_string()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(unreadable("zero channels".into()));
    }

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| unreadable(e.to_string()))?,
        (SampleFormat::Int, bits @ 1..=32) => {
            let scale = 1.0 / (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| unreadable(e.to_string()))?
        }
        (format, bits) => {
            return Err(unreadable(format!(
                "unsupported sample format {format:?} at {bits} bits"
            )))
        }
    };

    let frames = interleaved.len() / channels;
    if frames == 0 {
        return Err(CodecError::EmptyAudio {
            path: path.to_path_buf(),
        });
    }

    let mut lanes = vec![Vec::with_capacity(frames); channels];
    for (i, &sample) in interleaved.iter().take(frames * channels).enumerate() {
        lanes[i % channels].push(sample);
    }

    SampleBuffer::new(lanes, spec.sample_rate)
}

/// Encode a buffer to a WAV file at its sample rate and channel count.
pub(crate) fn encode_wav_file(
    buffer: &SampleBuffer,
    path: &Path,
    config: &EncodeConfig,
) -> Result<()> {
    let write_failed = |reason: String| CodecError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let (bits_per_sample, sample_format) = match config.bit_depth {
        BitDepth::Int16 => (16, SampleFormat::Int),
        BitDepth::Int24 => (24, SampleFormat::Int),
        BitDepth::Float32 => (32, SampleFormat::Float),
    };
    let spec = WavSpec {
        channels: buffer.channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample,
        sample_format,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| write_failed(e.to_string()))?;

    let frames = buffer.frames();
    match config.bit_depth {
        BitDepth::Int16 => {
            for f in 0..frames {
                for lane in buffer.lanes() {
                    writer
                        .write_sample(float_to_i16(lane[f]))
                        .map_err(|e| write_failed(e.to_string()))?;
                }
            }
        }
        BitDepth::Int24 => {
            for f in 0..frames {
                for lane in buffer.lanes() {
                    writer
                        .write_sample(float_to_i24(lane[f]))
                        .map_err(|e| write_failed(e.to_string()))?;
                }
            }
        }
        BitDepth::Float32 => {
            for f in 0..frames {
                for lane in buffer.lanes() {
                    writer
                        .write_sample(lane[f])
                        .map_err(|e| write_failed(e.to_string()))?;
                }
            }
        }
    }

    writer.finalize().map_err(|e| write_failed(e.to_string()))
}

/// Convert float sample to 16-bit integer with clipping
#[inline]
pub(crate) fn float_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 32767.0) as i16
}

/// Convert float sample to 24-bit integer (stored as i32) with clipping
#[inline]
pub(crate) fn float_to_i24(sample: f32) -> i32 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * 8388607.0) as i32
}
