//! Session state: committed strokes, the live stroke, the clock and the
//! smoothed volume, owned together so several sketches can coexist.

use crate::audio::VolumeSmoother;
use crate::capture::StrokeCapture;
use crate::config::SketchConfig;
use crate::error::Result;
use crate::generator::{generate, GeneratorParams};
use crate::geometry::Point;
use crate::motion::MotionField;
use crate::particle::Stroke;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound (exclusive) of stroke ids: nine base-36 digits.
const STROKE_ID_SPACE: u64 = 101_559_956_668_416;

/// Inputs shared by every particle evaluated in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub time: f32,
    pub volume: f32,
    pub center: Vec2,
}

pub struct Sketch<R = StdRng> {
    config: SketchConfig,
    field: MotionField,
    generator: GeneratorParams,
    capture: StrokeCapture,
    strokes: Vec<Stroke>,
    live_particles: usize,
    smoother: VolumeSmoother,
    time_sec: f64,
    rng: R,
}

impl Sketch<StdRng> {
    /// Sketch with an entropy-seeded random source.
    pub fn new(config: SketchConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Sketch whose particle attributes are reproducible from `seed`.
    pub fn seeded(config: SketchConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sketch<R> {
    pub fn with_rng(config: SketchConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            field: MotionField::new(config.motion),
            generator: GeneratorParams::from(&config),
            capture: StrokeCapture::new(config.min_point_distance, config.min_stroke_points),
            smoother: VolumeSmoother::new(config.volume_smoothing),
            strokes: Vec::new(),
            live_particles: 0,
            time_sec: 0.0,
            config,
            rng,
        })
    }

    /// Drop all strokes, the live stroke, and zero the clock and volume.
    pub fn reset(&mut self) {
        self.strokes.clear();
        self.live_particles = 0;
        self.capture = StrokeCapture::new(
            self.config.min_point_distance,
            self.config.min_stroke_points,
        );
        self.smoother.reset();
        self.time_sec = 0.0;
    }

    /// Advance to `time_sec` and fold one raw volume reading into the
    /// smoothed value. Returns the new smoothed volume.
    pub fn tick(&mut self, time_sec: f64, raw_volume: f32) -> f32 {
        self.time_sec = time_sec;
        let raw = if raw_volume.is_finite() {
            raw_volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.smoother.update(raw)
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.capture.pointer_down(p);
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.capture.pointer_move(p)
    }

    /// Finish the live stroke. Returns the id of the committed stroke, or
    /// `None` when the buffer was too short and got discarded.
    pub fn pointer_up(&mut self) -> Option<u64> {
        let points = self.capture.pointer_up()?;
        Some(self.commit(points))
    }

    fn commit(&mut self, points: Vec<Point>) -> u64 {
        let generated = generate(&points, &self.generator, &mut self.rng);
        let id = self.rng.gen_range(0..STROKE_ID_SPACE);
        let stroke = Stroke {
            id,
            points,
            particles: generated.particles,
            centroid: generated.centroid,
        };
        log::debug!(
            "[sketch] stroke {} committed: points={} particles={}",
            stroke.id_string(),
            stroke.points.len(),
            stroke.particles.len()
        );
        self.live_particles += stroke.particles.len();
        self.strokes.push(stroke);
        self.evict_over_budget();
        id
    }

    /// Drop the oldest strokes while the live total exceeds the budget,
    /// always keeping the newest stroke.
    fn evict_over_budget(&mut self) {
        let Some(budget) = self.config.max_live_particles else {
            return;
        };
        let mut evicted = 0usize;
        while self.live_particles > budget && self.strokes.len() - evicted > 1 {
            self.live_particles -= self.strokes[evicted].particles.len();
            evicted += 1;
        }
        if evicted > 0 {
            self.strokes.drain(..evicted);
            log::info!(
                "[sketch] evicted {} stroke(s); live particles={}",
                evicted,
                self.live_particles
            );
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn live_particle_count(&self) -> usize {
        self.live_particles
    }

    /// Points of the stroke being drawn, empty when idle.
    pub fn live_points(&self) -> &[Point] {
        self.capture.points()
    }

    pub fn is_drawing(&self) -> bool {
        self.capture.is_drawing()
    }

    pub fn volume(&self) -> f32 {
        self.smoother.value()
    }

    pub fn time(&self) -> f64 {
        self.time_sec
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn field(&self) -> &MotionField {
        &self.field
    }

    /// Frame inputs for a viewport of `size` pixels; ripples center on it.
    pub fn frame_params(&self, size: Vec2) -> FrameParams {
        FrameParams {
            time: self.time_sec as f32,
            volume: self.smoother.value(),
            center: size * 0.5,
        }
    }
}
