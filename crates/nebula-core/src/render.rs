//! Frame compositing against an immediate-mode 2D surface.
//!
//! The core only needs four primitives; each frontend implements [`Painter`]
//! for its own surface (canvas 2D context on the web, wgpu natively).

use crate::constants::*;
use crate::geometry::Point;
use crate::sketch::Sketch;
use glam::Vec2;
use rand::Rng;

/// Straight alpha, each channel in [0, 1].
pub type Rgba = [f32; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over compositing.
    Normal,
    /// `src * alpha + dst`, the canvas "lighter" operation.
    Additive,
}

pub trait Painter {
    /// Fill the whole surface with an opaque color.
    fn clear(&mut self, rgb: [f32; 3]);
    fn set_blend_mode(&mut self, mode: BlendMode);
    /// Line segment with round caps and joins.
    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}

/// Width of segment `i` (1-indexed) of a live stroke with `count` points:
/// wide at the first point, thinning toward the pen.
#[inline]
pub fn tapered_width(count: usize, i: usize) -> f32 {
    let count = count.max(1) as f32;
    let w = BRUSH_MAX_WIDTH * (count - i as f32) / count;
    w.max(BRUSH_MIN_WIDTH)
}

/// Counters for one painted frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub glows: usize,
    pub skipped: usize,
    pub segments: usize,
}

/// Paint the live stroke as a tapered polyline.
pub fn paint_live_stroke<P: Painter + ?Sized>(painter: &mut P, points: &[Point]) -> usize {
    if points.len() < 2 {
        return 0;
    }
    let n = points.len();
    for i in 1..n {
        painter.stroke_segment(
            points[i - 1].pos(),
            points[i].pos(),
            tapered_width(n, i),
            BRUSH_COLOR,
        );
    }
    n - 1
}

/// Paint one frame of `sketch` onto a surface of `size` pixels.
///
/// Call [`Sketch::tick`] first; this only reads state.
pub fn render_frame<P: Painter + ?Sized, R: Rng>(
    sketch: &Sketch<R>,
    painter: &mut P,
    size: Vec2,
) -> FrameStats {
    let mut stats = FrameStats::default();
    let frame = sketch.frame_params(size);
    let field = sketch.field();
    let glow = sketch.config().glow;

    painter.set_blend_mode(BlendMode::Normal);
    painter.clear(sketch.config().background);

    if sketch.is_drawing() {
        stats.segments = paint_live_stroke(painter, sketch.live_points());
    }

    painter.set_blend_mode(BlendMode::Additive);
    let (t, v) = (frame.time, frame.volume);
    for stroke in sketch.strokes() {
        for p in &stroke.particles {
            let pos = field.position(p, t, v, frame.center);
            let alpha = field.alpha(p, t, v);
            let radius = field.draw_radius(p, v);
            if !glow {
                painter.fill_circle(pos, radius, [1.0, 1.0, 1.0, alpha]);
                stats.particles += 1;
                continue;
            }
            if alpha <= MIN_VISIBLE_ALPHA {
                stats.skipped += 1;
                continue;
            }
            if radius > GLOW_MIN_RADIUS {
                let [r, g, b] = GLOW_COLOR;
                painter.fill_circle(
                    pos,
                    radius * GLOW_RADIUS_SCALE,
                    [r, g, b, alpha * GLOW_ALPHA_SCALE],
                );
                stats.glows += 1;
            }
            painter.fill_circle(pos, radius, [1.0, 1.0, 1.0, alpha * CORE_ALPHA_SCALE]);
            stats.particles += 1;
        }
    }
    stats
}
