//! # Semitone Codec
//!
//! Audio file I/O for the semitone engine:
//! - **Decoding**: WAV via hound (8/16/24/32-bit int PCM, 32-bit float),
//!   normalized to [-1.0, 1.0] channel lanes
//! - **Encoding**: WAV via hound, FLAC via flacenc (feature `flac`,
//!   default on), dispatched by the destination extension
//!
//! Output files are written atomically: the encoder targets a `.part`
//! sibling which is renamed into place only on success, so a failed run
//! never leaves a partial file at the destination.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub mod buffer;
pub mod error;
mod options;
mod wav;

#[cfg(feature = "flac")]
mod flac;

pub use buffer::SampleBuffer;
pub use error::{CodecError, Result};
pub use options::{BitDepth, EncodeConfig};
pub use wav::decode_wav;

/// Decode an audio file into a normalized sample buffer.
///
/// WAV is the supported input container; anything else fails as
/// unreadable.
pub fn decode(path: &Path) -> Result<SampleBuffer> {
    wav::decode_wav(path)
}

/// Encode a buffer to `path`, choosing the container from the extension:
/// `.flac` is FLAC (when the `flac` feature is on), everything else is WAV.
///
/// The write is all-or-nothing: data goes to a temporary sibling first and
/// is renamed over `path` once the encoder finishes.
pub fn encode(buffer: &SampleBuffer, path: &Path, config: &EncodeConfig) -> Result<()> {
    let staging = staging_path(path);
    let result = encode_to(buffer, &staging, path, config);
    match result {
        Ok(()) => std::fs::rename(&staging, path).map_err(|e| CodecError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(e) => {
            let _ = std::fs::remove_file(&staging);
            Err(e)
        }
    }
}

/// Encode to `staging`, with the format chosen from `destination`.
fn encode_to(
    buffer: &SampleBuffer,
    staging: &Path,
    destination: &Path,
    config: &EncodeConfig,
) -> Result<()> {
    let is_flac = destination
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("flac"))
        .unwrap_or(false);

    if is_flac {
        #[cfg(feature = "flac")]
        return flac::encode_flac_file(buffer, staging, config);
        #[cfg(not(feature = "flac"))]
        return Err(CodecError::UnsupportedFormat(
            "FLAC support not enabled".into(),
        ));
    }

    wav::encode_wav_file(buffer, staging, config)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".part");
    path.with_file_name(name)
}
