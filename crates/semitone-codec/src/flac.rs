//! FLAC format encoder using flacenc
//!
//! Supports 16-bit and 24-bit lossless encoding; 32-bit float has no FLAC
//! representation.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config::Encoder as EncoderConfig;
use flacenc::encode_with_fixed_block_size;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::buffer::SampleBuffer;
use crate::error::{CodecError, Result};
use crate::options::{BitDepth, EncodeConfig};
use crate::wav::{float_to_i16, float_to_i24};

/// Samples per FLAC block.
const BLOCK_SIZE: usize = 4096;

/// Encode a buffer to a FLAC file at its sample rate and channel count.
pub(crate) fn encode_flac_file(
    buffer: &SampleBuffer,
    path: &Path,
    config: &EncodeConfig,
) -> Result<()> {
    if config.bit_depth == BitDepth::Float32 {
        return Err(CodecError::UnsupportedFormat(
            "FLAC does not support 32-bit float, use 16-bit or 24-bit".into(),
        ));
    }
    let bits_per_sample = config.bit_depth.bits() as usize;

    // Frame-major interleave, converted to integers.
    let frames = buffer.frames();
    let channels = buffer.channels();
    let mut interleaved = Vec::with_capacity(frames * channels);
    for f in 0..frames {
        for lane in buffer.lanes() {
            let value = match config.bit_depth {
                BitDepth::Int16 => float_to_i16(lane[f]) as i32,
                BitDepth::Int24 => float_to_i24(lane[f]),
                BitDepth::Float32 => unreachable!(),
            };
            interleaved.push(value);
        }
    }

    let encoder_config = EncoderConfig::default()
        .into_verified()
        .map_err(|e| CodecError::Encoding(format!("Invalid FLAC config: {:?}", e)))?;

    let source = MemSource::from_samples(
        &interleaved,
        channels,
        bits_per_sample,
        buffer.sample_rate() as usize,
    );

    let stream = encode_with_fixed_block_size(&encoder_config, source, BLOCK_SIZE)
        .map_err(|e| CodecError::Encoding(format!("FLAC encoding failed: {:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| CodecError::Encoding(format!("Failed to write FLAC stream: {:?}", e)))?;

    let write_failed = |reason: String| CodecError::Write {
        path: path.to_path_buf(),
        reason,
    };
    let mut file = File::create(path).map_err(|e| write_failed(e.to_string()))?;
    file.write_all(&sink.into_inner())
        .map_err(|e| write_failed(e.to_string()))?;

    Ok(())
}
