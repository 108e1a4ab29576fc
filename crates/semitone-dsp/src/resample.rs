//! Band-limited resampling to an exact sample count.
//!
//! Uses a windowed-sinc kernel so compression (pitch raised) does not alias
//! and expansion (pitch lowered) does not smear. Callers depend on the
//! output length exactly matching the request, so the resampler's output
//! delay is skipped and the tail flushed before trimming.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};

use crate::error::Result;

/// Input frames fed to the resampler per iteration.
const CHUNK_SIZE: usize = 1024;

fn sinc_parameters() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    }
}

/// Resample a mono lane to exactly `target_len` samples.
///
/// Equal lengths short-circuit to a copy. The conversion ratio is
/// `target_len / input.len()`; the input is zero-flushed past its end until
/// the delayed output covers the requested span.
pub fn resample_to_length(input: &[f32], target_len: usize) -> Result<Vec<f32>> {
    if input.len() == target_len {
        return Ok(input.to_vec());
    }
    if input.is_empty() || target_len == 0 {
        return Ok(vec![0.0; target_len]);
    }

    let ratio = target_len as f64 / input.len() as f64;
    let mut resampler =
        SincFixedIn::<f32>::new(ratio, 1.1, sinc_parameters(), CHUNK_SIZE, 1)?;

    let delay = resampler.output_delay();
    let needed = delay + target_len;
    let mut output: Vec<f32> = Vec::with_capacity(needed + CHUNK_SIZE);
    let mut pos = 0;

    while output.len() < needed {
        let take = resampler.input_frames_next();
        let mut chunk = vec![0.0f32; take];
        if pos < input.len() {
            let copy = take.min(input.len() - pos);
            chunk[..copy].copy_from_slice(&input[pos..pos + copy]);
        }
        pos += take;

        let mut processed = resampler.process(&[chunk], None)?;
        output.append(&mut processed.remove(0));
    }

    let mut trimmed = output.split_off(delay);
    trimmed.truncate(target_len);
    Ok(trimmed)
}
