//! Per-frame displacement and brightness of a particle.
//!
//! Every function here is pure: the result depends only on the particle's
//! fixed fields, the clock, the smoothed volume and the ripple center.

use crate::config::MotionParams;
use crate::constants::*;
use crate::particle::Particle;
use glam::Vec2;

/// Slow, spatially varying drift. Independent of sound.
#[inline]
pub fn flow(p: &Particle, t: f32, params: &MotionParams) -> Vec2 {
    let x = (t * params.flow_speed + p.phase + p.origin.y * FLOW_SPATIAL_FREQ).sin() * FLOW_AMP_X;
    let y = (t * params.flow_speed * FLOW_SPEED_Y_RATIO + p.phase + p.origin.x * FLOW_SPATIAL_FREQ)
        .cos()
        * FLOW_AMP_Y;
    Vec2::new(x, y)
}

/// Radial wavefront around `center`; amplitude is linear in `v`.
#[inline]
pub fn ripple(p: &Particle, t: f32, v: f32, center: Vec2, params: &MotionParams) -> Vec2 {
    let d = p.rest_position() - center;
    let r = d.length();
    if r == 0.0 {
        return Vec2::ZERO;
    }
    let offset = (r * params.ripple_freq - t * params.ripple_speed).sin() * (v * params.max_ripple_amp);
    d / r * offset
}

/// Per-particle jitter seeded by the particle's index.
#[inline]
pub fn turbulence(p: &Particle, t: f32, v: f32) -> Vec2 {
    let amp = TURBULENCE_BASE + v * TURBULENCE_SOUND;
    let idx = p.index as f32;
    Vec2::new(
        (t * 2.0 + idx * 0.1).sin() * amp,
        (t * 1.5 + idx * 0.15).cos() * amp,
    )
}

/// Evaluates the motion field with a fixed set of coefficients.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionField {
    pub params: MotionParams,
}

impl MotionField {
    pub fn new(params: MotionParams) -> Self {
        Self { params }
    }

    /// Draw position at time `t` (seconds) with smoothed volume `v`.
    pub fn position(&self, p: &Particle, t: f32, v: f32, center: Vec2) -> Vec2 {
        p.rest_position()
            + flow(p, t, &self.params)
            + ripple(p, t, v, center, &self.params)
            + turbulence(p, t, v)
    }

    /// Base opacity times breathing times sound boost, clamped to 1.
    pub fn alpha(&self, p: &Particle, t: f32, v: f32) -> f32 {
        let breathe = BREATHE_BASE + (t * BREATHE_SPEED + p.phase).sin() * BREATHE_SPAN;
        let boost = 1.0 + v * ALPHA_SOUND_BOOST;
        (p.opacity * breathe * boost).min(1.0)
    }

    #[inline]
    pub fn draw_radius(&self, p: &Particle, v: f32) -> f32 {
        p.size * (1.0 + v * SIZE_SOUND_BOOST)
    }
}
