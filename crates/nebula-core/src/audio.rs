//! Loudness hand-off and smoothing.
//!
//! The platform capture code writes its latest reading into a [`LevelCell`];
//! the animation loop reads it once per tick and feeds a [`VolumeSmoother`].

use crate::constants::VOLUME_SMOOTHING;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Single-slot "latest value" cell shared between a capture thread and the
/// render loop. Readers may see a stale value; nothing ever blocks.
#[derive(Clone, Debug, Default)]
pub struct LevelCell {
    bits: Arc<AtomicU32>,
}

impl LevelCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a reading, clamped to [0, 1]. NaN is stored as 0.
    pub fn store(&self, level: f32) {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        };
        self.bits.store(level.to_bits(), Ordering::Relaxed);
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Pin the level at zero so the smoothed value decays instead of freezing.
    pub fn reset(&self) {
        self.store(0.0);
    }
}

/// Single-pole exponential filter applied once per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeSmoother {
    value: f32,
    factor: f32,
}

impl Default for VolumeSmoother {
    fn default() -> Self {
        Self::new(VOLUME_SMOOTHING)
    }
}

impl VolumeSmoother {
    pub fn new(factor: f32) -> Self {
        Self { value: 0.0, factor }
    }

    /// `value += (raw - value) * factor`; returns the new value.
    pub fn update(&mut self, raw: f32) -> f32 {
        self.value += (raw - self.value) * self.factor;
        self.value
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

/// Whether the microphone is feeding the sketch, and why not if it failed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AudioStatus {
    pub active: bool,
    pub error: Option<String>,
}

impl AudioStatus {
    pub fn started() -> Self {
        Self {
            active: true,
            error: None,
        }
    }

    pub fn stopped() -> Self {
        Self::default()
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            active: false,
            error: Some(message.into()),
        }
    }
}

/// Mean of byte frequency magnitudes normalized by 255.
pub fn average_byte_magnitude(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    (sum as f32 / bins.len() as f32) / 255.0
}

/// Mean absolute amplitude of a block of samples, clamped to [0, 1].
pub fn mean_abs_amplitude(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s.abs()).sum();
    (sum / samples.len() as f32).clamp(0.0, 1.0)
}
