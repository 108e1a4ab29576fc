//! End-to-end pipeline tests over real WAV files.

mod helpers;

use std::path::Path;

use semitone::{
    PipelineConfig, PipelineError, ProcessingRequest, TransformPipeline,
};

use helpers::{dominant_frequency, read_wav, sine_wave, write_wav_mono, write_wav_stereo};

fn pipeline() -> TransformPipeline {
    TransformPipeline::new(PipelineConfig::default())
}

#[test]
fn octave_up_doubles_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a440.wav");
    let output = dir.path().join("a440_up.wav");

    let tone = sine_wave(440.0, 44_100, 1.0, 0.5);
    write_wav_mono(&input, &tone, 44_100);

    let request = ProcessingRequest::new(&input, &output, 12.0, 1.0);
    let report = pipeline().run(&request).unwrap();

    // Duration invariant: same sample count, same rate.
    assert_eq!(report.frames, tone.len());
    assert_eq!(report.sample_rate, 44_100);

    let (lanes, rate) = read_wav(&output);
    assert_eq!(rate, 44_100);
    assert_eq!(lanes[0].len(), tone.len());

    // Dominant frequency moves from 440 Hz to ~880 Hz.
    let mid = &lanes[0][4_096..40_000];
    let detected = dominant_frequency(mid, 44_100, 200.0, 1_800.0, 4.0);
    let relative_error = (detected - 880.0).abs() / 880.0;
    assert!(
        relative_error < 0.03,
        "expected ~880 Hz, detected {detected} Hz"
    );
}

#[test]
fn identity_request_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("tone_same.wav");

    let tone = sine_wave(440.0, 44_100, 0.5, 0.5);
    write_wav_mono(&input, &tone, 44_100);

    let request = ProcessingRequest::new(&input, &output, 0.0, 1.0);
    pipeline().run(&request).unwrap();

    let (lanes, _) = read_wav(&output);
    assert_eq!(lanes[0].len(), tone.len());

    // Apart from window ramp-in at the very edges, the signal survives the
    // analysis/resynthesis round trip.
    let skip = 64;
    for (a, b) in tone
        .iter()
        .zip(lanes[0].iter())
        .skip(skip)
        .take(tone.len() - 2 * skip)
    {
        approx::assert_abs_diff_eq!(a, b, epsilon = 0.02);
    }
}

#[test]
fn half_volume_scales_waveform() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("tone_half.wav");

    let tone = sine_wave(440.0, 44_100, 0.5, 0.8);
    write_wav_mono(&input, &tone, 44_100);

    let request = ProcessingRequest::new(&input, &output, 0.0, 0.5);
    pipeline().run(&request).unwrap();

    let (lanes, _) = read_wav(&output);
    let skip = 64;
    for (a, b) in tone
        .iter()
        .zip(lanes[0].iter())
        .skip(skip)
        .take(tone.len() - 2 * skip)
    {
        approx::assert_abs_diff_eq!(a * 0.5, *b, epsilon = 0.02);
    }
}

#[test]
fn fractional_shift_keeps_duration() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("tone_frac.wav");

    let tone = sine_wave(330.0, 22_050, 0.7, 0.4);
    write_wav_mono(&input, &tone, 22_050);

    let request = ProcessingRequest::new(&input, &output, -7.3, 1.2);
    let report = pipeline().run(&request).unwrap();

    assert_eq!(report.frames, tone.len());
    assert_eq!(report.sample_rate, 22_050);

    let (lanes, rate) = read_wav(&output);
    assert_eq!(rate, 22_050);
    assert_eq!(lanes[0].len(), tone.len());
}

#[test]
fn downward_shift_lowers_frequency() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a880.wav");
    let output = dir.path().join("a880_down.wav");

    let tone = sine_wave(880.0, 44_100, 1.0, 0.5);
    write_wav_mono(&input, &tone, 44_100);

    let request = ProcessingRequest::new(&input, &output, -12.0, 1.0);
    pipeline().run(&request).unwrap();

    let (lanes, _) = read_wav(&output);
    let mid = &lanes[0][4_096..40_000];
    let detected = dominant_frequency(mid, 44_100, 200.0, 1_800.0, 4.0);
    let relative_error = (detected - 440.0).abs() / 440.0;
    assert!(
        relative_error < 0.03,
        "expected ~440 Hz, detected {detected} Hz"
    );
}

#[test]
fn stereo_channels_processed_independently() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("duet.wav");
    let output = dir.path().join("duet_up.wav");

    let left = sine_wave(440.0, 44_100, 0.6, 0.5);
    let right = sine_wave(660.0, 44_100, 0.6, 0.5);
    write_wav_stereo(&input, &left, &right, 44_100);

    let request = ProcessingRequest::new(&input, &output, 12.0, 1.0);
    let report = pipeline().run(&request).unwrap();
    assert_eq!(report.channels, 2);

    let (lanes, _) = read_wav(&output);
    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[0].len(), left.len());
    assert_eq!(lanes[1].len(), right.len());

    let mid_l = &lanes[0][4_096..22_000];
    let mid_r = &lanes[1][4_096..22_000];
    let detected_l = dominant_frequency(mid_l, 44_100, 200.0, 2_000.0, 4.0);
    let detected_r = dominant_frequency(mid_r, 44_100, 200.0, 2_000.0, 4.0);
    assert!((detected_l - 880.0).abs() / 880.0 < 0.03, "left: {detected_l}");
    assert!((detected_r - 1_320.0).abs() / 1_320.0 < 0.03, "right: {detected_r}");
}

#[test]
fn identical_requests_are_bit_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let out_a = dir.path().join("a.wav");
    let out_b = dir.path().join("b.wav");

    let tone = sine_wave(523.25, 44_100, 0.5, 0.5);
    write_wav_mono(&input, &tone, 44_100);

    pipeline()
        .run(&ProcessingRequest::new(&input, &out_a, 3.5, 0.75))
        .unwrap();
    pipeline()
        .run(&ProcessingRequest::new(&input, &out_b, 3.5, 0.75))
        .unwrap();

    let bytes_a = std::fs::read(&out_a).unwrap();
    let bytes_b = std::fs::read(&out_b).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn missing_input_is_unreadable_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.wav");

    let request = ProcessingRequest::new(
        Path::new("/no/such/input.wav"),
        &output,
        0.0,
        1.0,
    );
    let result = pipeline().run(&request);

    assert!(matches!(result, Err(PipelineError::UnreadableFile(_))));
    assert!(!output.exists());
}

#[test]
fn zero_length_input_is_empty_audio() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.wav");
    let output = dir.path().join("never.wav");

    write_wav_mono(&input, &[], 44_100);

    let request = ProcessingRequest::new(&input, &output, 0.0, 1.0);
    let result = pipeline().run(&request);

    assert!(matches!(result, Err(PipelineError::EmptyAudio(_))));
    assert!(!output.exists());
}

#[test]
fn invalid_volume_fails_before_io() {
    // The input does not exist; an InvalidParameter result proves the
    // request was rejected before any decode attempt.
    let request = ProcessingRequest::new(
        Path::new("/no/such/input.wav"),
        Path::new("/no/such/output.wav"),
        0.0,
        -1.0,
    );
    let result = pipeline().run(&request);
    assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
}

#[test]
fn invalid_pitch_fails_before_io() {
    let request = ProcessingRequest::new(
        Path::new("/no/such/input.wav"),
        Path::new("/no/such/output.wav"),
        f64::NAN,
        1.0,
    );
    let result = pipeline().run(&request);
    assert!(matches!(result, Err(PipelineError::InvalidParameter(_))));
}

#[test]
fn gain_may_exceed_full_scale_in_float_output() {
    use semitone::BitDepth;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tone.wav");
    let output = dir.path().join("tone_loud.wav");

    let tone = sine_wave(440.0, 44_100, 0.25, 0.5);
    write_wav_mono(&input, &tone, 44_100);

    let config = PipelineConfig {
        bit_depth: BitDepth::Float32,
        ..Default::default()
    };
    let request = ProcessingRequest::new(&input, &output, 0.0, 3.0);
    TransformPipeline::new(config).run(&request).unwrap();

    let (lanes, _) = read_wav(&output);
    let peak = lanes[0].iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!(peak > 1.2, "gain was clamped, peak {peak}");
}
