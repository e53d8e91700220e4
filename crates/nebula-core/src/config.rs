//! Runtime tuning for a [`crate::Sketch`].
//!
//! Defaults reproduce the reference look exactly; frontends may override
//! individual fields before constructing the sketch.

use crate::constants::*;
use crate::error::{Result, SketchError};

#[derive(Clone, Debug, PartialEq)]
pub struct SketchConfig {
    /// Particles per pixel of arc length.
    pub particle_density: f32,
    /// Upper bound on particles generated for a single stroke; `None` is uncapped.
    pub max_particles_per_stroke: Option<usize>,
    /// Total live particles before the oldest strokes are evicted; `None` never evicts.
    pub max_live_particles: Option<usize>,
    pub min_point_distance: f32,
    pub min_stroke_points: usize,
    pub core_width: f32,
    pub nebula_width: f32,
    /// Per-tick factor of the single-pole volume filter.
    pub volume_smoothing: f32,
    pub motion: MotionParams,
    /// Paint a faint halo under particles larger than [`GLOW_MIN_RADIUS`].
    pub glow: bool,
    pub background: [f32; 3],
}

/// Coefficients of the flow, ripple and turbulence terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub flow_speed: f32,
    pub ripple_freq: f32,
    pub ripple_speed: f32,
    pub max_ripple_amp: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            flow_speed: FLOW_SPEED,
            ripple_freq: RIPPLE_FREQ,
            ripple_speed: RIPPLE_SPEED,
            max_ripple_amp: MAX_RIPPLE_AMP,
        }
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            particle_density: PARTICLE_DENSITY,
            max_particles_per_stroke: Some(MAX_PARTICLES_PER_STROKE),
            max_live_particles: Some(DEFAULT_MAX_LIVE_PARTICLES),
            min_point_distance: MIN_POINT_DISTANCE,
            min_stroke_points: MIN_STROKE_POINTS,
            core_width: CORE_WIDTH,
            nebula_width: NEBULA_WIDTH,
            volume_smoothing: VOLUME_SMOOTHING,
            motion: MotionParams::default(),
            glow: true,
            background: BACKGROUND_COLOR,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(SketchError::InvalidConfig {
            field,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(SketchError::InvalidConfig {
            field,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(SketchError::InvalidConfig {
            field,
            value,
            reason: "must be finite and non-negative",
        });
    }
    Ok(())
}

impl SketchConfig {
    /// Check every numeric field, returning the first offending one.
    pub fn validate(&self) -> Result<()> {
        positive("particle_density", self.particle_density)?;
        non_negative("min_point_distance", self.min_point_distance)?;
        non_negative("core_width", self.core_width)?;
        non_negative("nebula_width", self.nebula_width)?;
        if !(self.volume_smoothing > 0.0 && self.volume_smoothing <= 1.0) {
            return Err(SketchError::InvalidConfig {
                field: "volume_smoothing",
                value: self.volume_smoothing,
                reason: "must be in (0, 1]",
            });
        }
        if self.min_stroke_points < 2 {
            return Err(SketchError::InvalidConfig {
                field: "min_stroke_points",
                value: self.min_stroke_points as f32,
                reason: "a stroke needs at least two points",
            });
        }
        non_negative("motion.flow_speed", self.motion.flow_speed)?;
        non_negative("motion.ripple_freq", self.motion.ripple_freq)?;
        non_negative("motion.ripple_speed", self.motion.ripple_speed)?;
        non_negative("motion.max_ripple_amp", self.motion.max_ripple_amp)?;
        for c in self.background {
            if !(0.0..=1.0).contains(&c) {
                return Err(SketchError::InvalidConfig {
                    field: "background",
                    value: c,
                    reason: "channels must be in [0, 1]",
                });
            }
        }
        Ok(())
    }
}
