//! Polyline helpers for freehand strokes.
//!
//! Strokes arrive as unevenly spaced pointer samples; these functions measure
//! them by arc length so particles can be laid out evenly along the curve.

use glam::Vec2;

/// One recorded pointer sample in display coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Always 1.0 for now; kept so pressure-aware brushes can use it later.
    pub pressure: f32,
    /// Milliseconds, in whatever epoch the host clock uses.
    pub timestamp: f64,
}

impl Point {
    pub fn new(x: f32, y: f32, timestamp: f64) -> Self {
        Self {
            x,
            y,
            pressure: 1.0,
            timestamp,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[inline]
pub fn distance(a: &Point, b: &Point) -> f32 {
    a.pos().distance(b.pos())
}

/// Total length of the polyline through `points`.
pub fn arc_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Arithmetic mean of the sample positions, or zero for an empty slice.
pub fn centroid(points: &[Point]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.pos());
    sum / points.len() as f32
}

/// Position at `target_dist` along the polyline.
///
/// Walks cumulative segment lengths and interpolates inside the first segment
/// whose end reaches `target_dist`. The last segment is used as a fallback so
/// rounding at the very end of the curve still lands on it. Returns `None`
/// for fewer than two points.
pub fn point_on_curve(points: &[Point], target_dist: f32) -> Option<Vec2> {
    if points.len() < 2 {
        return None;
    }
    let last = points.len() - 1;
    let mut current = 0.0f32;
    for j in 1..points.len() {
        let a = points[j - 1].pos();
        let b = points[j].pos();
        let d = a.distance(b);
        if current + d >= target_dist || j == last {
            let local_t = if d == 0.0 {
                0.0
            } else {
                (target_dist - current) / d
            };
            return Some(a.lerp(b, local_t));
        }
        current += d;
    }
    None
}
