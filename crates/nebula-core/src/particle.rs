//! Particle and stroke records.
//!
//! Everything here is fixed when a stroke is committed. Per-frame positions
//! and alphas are recomputed by [`crate::motion`] and never written back.

use crate::constants::*;
use crate::geometry::Point;
use glam::Vec2;

/// Visual category of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Tight to the curve and bright (30%).
    Core,
    /// Medium spread (50%).
    Dust,
    /// Wide and faint (20%).
    Nebula,
}

/// Distribution parameters attached to a [`Layer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerParams {
    pub spread_radius: f32,
    pub opacity_min: f32,
    pub opacity_max: f32,
    pub size_multiplier: f32,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Core, Layer::Dust, Layer::Nebula];

    /// Classify a uniform draw in [0, 1).
    #[inline]
    pub fn from_uniform(r: f32) -> Self {
        if r > CORE_THRESHOLD {
            Layer::Core
        } else if r < NEBULA_THRESHOLD {
            Layer::Nebula
        } else {
            Layer::Dust
        }
    }

    /// Layer parameters for the given base widths.
    pub fn params_with(self, core_width: f32, nebula_width: f32) -> LayerParams {
        match self {
            Layer::Core => LayerParams {
                spread_radius: core_width,
                opacity_min: 0.8,
                opacity_max: 1.0,
                size_multiplier: 0.15,
            },
            Layer::Dust => LayerParams {
                spread_radius: nebula_width,
                opacity_min: 0.3,
                opacity_max: 0.7,
                size_multiplier: 0.2,
            },
            Layer::Nebula => LayerParams {
                spread_radius: nebula_width * NEBULA_SPREAD_SCALE,
                opacity_min: 0.05,
                opacity_max: 0.2,
                size_multiplier: 0.35,
            },
        }
    }

    pub fn params(self) -> LayerParams {
        self.params_with(CORE_WIDTH, NEBULA_WIDTH)
    }
}

/// One glowing dot anchored on a stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Anchor on the resampled curve.
    pub origin: Vec2,
    /// Permanent jitter away from the anchor.
    pub offset: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// Individual animation offset in [0, 2π).
    pub phase: f32,
    /// Reserved: drawn at creation, not read by the motion field.
    pub freq: f32,
    pub layer: Layer,
    /// Reserved: drawn at creation, not read by the renderer.
    pub brightness_multiplier: f32,
    /// Ordinal within the stroke; seeds the turbulence term.
    pub index: usize,
}

impl Particle {
    /// Anchor plus fixed offset, before any motion is applied.
    #[inline]
    pub fn rest_position(&self) -> Vec2 {
        self.origin + self.offset
    }
}

/// A committed stroke and the particles it spawned.
#[derive(Clone, Debug)]
pub struct Stroke {
    pub id: u64,
    pub points: Vec<Point>,
    pub particles: Vec<Particle>,
    pub centroid: Vec2,
}

impl Stroke {
    /// Lowercase base-36 form of the id, nine characters wide.
    pub fn id_string(&self) -> String {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
        let mut n = self.id;
        let mut out = [b'0'; 9];
        for slot in out.iter_mut().rev() {
            *slot = DIGITS[(n % 36) as usize];
            n /= 36;
        }
        out.iter().map(|&c| c as char).collect()
    }
}
