//! Turns a finished stroke into its particle cloud.

use crate::config::SketchConfig;
use crate::constants::*;
use crate::geometry::{arc_length, centroid, point_on_curve, Point};
use crate::particle::{Layer, Particle};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Subset of [`SketchConfig`] the generator reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorParams {
    pub density: f32,
    pub max_particles: Option<usize>,
    pub core_width: f32,
    pub nebula_width: f32,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self::from(&SketchConfig::default())
    }
}

impl From<&SketchConfig> for GeneratorParams {
    fn from(c: &SketchConfig) -> Self {
        Self {
            density: c.particle_density,
            max_particles: c.max_particles_per_stroke,
            core_width: c.core_width,
            nebula_width: c.nebula_width,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Generated {
    pub particles: Vec<Particle>,
    pub centroid: Vec2,
}

/// `floor(length * density)`, clamped to `cap` when one is set.
pub fn particle_count(length: f32, density: f32, cap: Option<usize>) -> usize {
    let raw = (length * density).floor();
    let n = if raw.is_finite() && raw > 0.0 {
        raw as usize
    } else {
        0
    };
    match cap {
        Some(cap) => n.min(cap),
        None => n,
    }
}

/// Resample `points` by arc length and scatter one particle per sample.
///
/// Fewer than two points or a zero-length stroke yields no particles.
pub fn generate<R: Rng + ?Sized>(
    points: &[Point],
    params: &GeneratorParams,
    rng: &mut R,
) -> Generated {
    if points.len() < 2 {
        return Generated::default();
    }
    let total = arc_length(points);
    if total <= 0.0 || !total.is_finite() {
        return Generated::default();
    }

    let count = particle_count(total, params.density, params.max_particles);
    let mut particles = Vec::with_capacity(count);
    let denom = count.saturating_sub(1).max(1) as f32;

    for i in 0..count {
        let t = i as f32 / denom;
        let Some(anchor) = point_on_curve(points, t * total) else {
            continue;
        };
        particles.push(scatter(anchor, i, params, rng));
    }

    Generated {
        particles,
        centroid: centroid(points),
    }
}

fn scatter<R: Rng + ?Sized>(
    anchor: Vec2,
    index: usize,
    params: &GeneratorParams,
    rng: &mut R,
) -> Particle {
    let layer = Layer::from_uniform(rng.gen::<f32>());
    let lp = layer.params_with(params.core_width, params.nebula_width);

    let angle = rng.gen::<f32>() * TAU;
    let radius = rng.gen::<f32>() * lp.spread_radius;
    let offset = Vec2::new(angle.cos(), angle.sin()) * radius;

    let opacity = lp.opacity_min + rng.gen::<f32>() * (lp.opacity_max - lp.opacity_min);
    let size = (0.5 + rng.gen::<f32>() * 2.0) * lp.size_multiplier;
    let phase = rng.gen::<f32>() * TAU;
    let freq = 0.5 + rng.gen::<f32>() * 1.5;
    let brightness_multiplier = if rng.gen::<f32>() < BRIGHT_PARTICLE_CHANCE {
        BRIGHT_PARTICLE_MULTIPLIER
    } else {
        1.0
    };

    Particle {
        origin: anchor,
        offset,
        size,
        opacity,
        phase,
        freq,
        layer,
        brightness_multiplier,
        index,
    }
}
