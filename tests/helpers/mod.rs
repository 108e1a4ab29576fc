//! Shared helpers for integration tests.

// Each test binary uses its own subset of these.
#![allow(dead_code)]

use std::f64::consts::TAU;
use std::path::Path;

/// Generate a mono sine wave.
pub fn sine_wave(freq: f64, sample_rate: u32, duration_secs: f64, amplitude: f32) -> Vec<f32> {
    let count = (sample_rate as f64 * duration_secs).round() as usize;
    (0..count)
        .map(|i| (TAU * freq * i as f64 / sample_rate as f64).sin() as f32 * amplitude)
        .collect()
}

/// Write a mono 16-bit PCM WAV file.
pub fn write_wav_mono(path: &Path, samples: &[f32], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &sample in samples {
        writer
            .write_sample((sample.clamp(-1.0, 1.0) * 32767.0) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

/// Write a stereo 16-bit PCM WAV file.
pub fn write_wav_stereo(path: &Path, left: &[f32], right: &[f32], sample_rate: u32) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for (l, r) in left.iter().zip(right.iter()) {
        writer
            .write_sample((l.clamp(-1.0, 1.0) * 32767.0) as i16)
            .unwrap();
        writer
            .write_sample((r.clamp(-1.0, 1.0) * 32767.0) as i16)
            .unwrap();
    }
    writer.finalize().unwrap();
}

/// Read a WAV file back into normalized channel lanes.
pub fn read_wav(path: &Path) -> (Vec<Vec<f32>>, u32) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.unwrap())
            .collect(),
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.unwrap() as f32 * scale)
                .collect()
        }
    };

    let frames = interleaved.len() / channels;
    let mut lanes = vec![Vec::with_capacity(frames); channels];
    for (i, sample) in interleaved.into_iter().enumerate() {
        lanes[i % channels].push(sample);
    }
    (lanes, spec.sample_rate)
}

/// Dominant frequency in `[lo, hi]`, found by a Goertzel power scan in
/// `step` Hz increments.
pub fn dominant_frequency(samples: &[f32], sample_rate: u32, lo: f64, hi: f64, step: f64) -> f64 {
    let mut best_freq = lo;
    let mut best_power = f64::MIN;
    let mut freq = lo;
    while freq <= hi {
        let power = goertzel_power(samples, sample_rate, freq);
        if power > best_power {
            best_power = power;
            best_freq = freq;
        }
        freq += step;
    }
    best_freq
}

fn goertzel_power(samples: &[f32], sample_rate: u32, freq: f64) -> f64 {
    let omega = TAU * freq / sample_rate as f64;
    let coeff = 2.0 * omega.cos();
    let (mut s1, mut s2) = (0.0f64, 0.0f64);
    for &x in samples {
        let s0 = x as f64 + coeff * s1 - s2;
        s2 = s1;
        s1 = s0;
    }
    s1 * s1 + s2 * s2 - coeff * s1 * s2
}
