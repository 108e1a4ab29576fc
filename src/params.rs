//! Live control parameters shared with an interactive control surface.

use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::request::{derive_output_path, ProcessingRequest};

/// Lock-free atomic f32 for parameter updates from another thread.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    /// Create a new AtomicF32 with the given initial value
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Load the current value
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    /// Store a new value
    #[inline]
    pub fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clone for AtomicF32 {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}

/// The two values a control surface edits between submissions.
///
/// Volume is held as a percentage (the reference control surface runs
/// 0-200) and converted to a linear factor when a request is built. The
/// core never displays these; it only snapshots them.
#[derive(Debug, Clone)]
pub struct ControlParams {
    pitch_semitones: AtomicF32,
    volume_percent: AtomicF32,
}

impl ControlParams {
    pub fn new() -> Self {
        Self {
            pitch_semitones: AtomicF32::new(0.0),
            volume_percent: AtomicF32::new(100.0),
        }
    }

    pub fn pitch_semitones(&self) -> f32 {
        self.pitch_semitones.load()
    }

    pub fn set_pitch_semitones(&self, semitones: f32) {
        self.pitch_semitones.store(semitones);
    }

    pub fn volume_percent(&self) -> f32 {
        self.volume_percent.load()
    }

    pub fn set_volume_percent(&self, percent: f32) {
        self.volume_percent.store(percent);
    }

    /// Snapshot the live values into an immutable request, deriving the
    /// output name from the input name. The percentage becomes a linear
    /// factor here and nowhere else.
    pub fn to_request(&self, input: &Path, output_dir: Option<&Path>) -> ProcessingRequest {
        let pitch = self.pitch_semitones.load() as f64;
        let volume = self.volume_percent.load() as f64 / 100.0;
        let output = derive_output_path(input, pitch, volume, output_dir);
        ProcessingRequest::new(input, output, pitch, volume)
    }
}

impl Default for ControlParams {
    fn default() -> Self {
        Self::new()
    }
}
