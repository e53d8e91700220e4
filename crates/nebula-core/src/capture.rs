//! Pointer-to-stroke state machine: `idle -> drawing -> idle`.

use crate::geometry::{distance, Point};
use crate::constants::{MIN_POINT_DISTANCE, MIN_STROKE_POINTS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

/// Accumulates pointer samples for the stroke being drawn.
#[derive(Clone, Debug)]
pub struct StrokeCapture {
    points: Vec<Point>,
    drawing: bool,
    min_point_distance: f32,
    min_stroke_points: usize,
}

impl Default for StrokeCapture {
    fn default() -> Self {
        Self::new(MIN_POINT_DISTANCE, MIN_STROKE_POINTS)
    }
}

impl StrokeCapture {
    pub fn new(min_point_distance: f32, min_stroke_points: usize) -> Self {
        Self {
            points: Vec::new(),
            drawing: false,
            min_point_distance,
            min_stroke_points,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.drawing {
            CaptureState::Drawing
        } else {
            CaptureState::Idle
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points recorded so far for the live stroke.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start a new stroke at `p`, dropping anything left over.
    pub fn pointer_down(&mut self, p: Point) {
        self.drawing = true;
        self.points.clear();
        self.points.push(p);
    }

    /// Append `p` if it is far enough from the last recorded sample.
    /// Returns whether the point was kept.
    pub fn pointer_move(&mut self, p: Point) -> bool {
        if !self.drawing {
            return false;
        }
        let far_enough = match self.points.last() {
            Some(last) => distance(last, &p) > self.min_point_distance,
            None => true,
        };
        if far_enough {
            self.points.push(p);
        }
        far_enough
    }

    /// Finish the stroke (pointer up, leave or cancel).
    ///
    /// Returns the recorded points when there are enough of them to form a
    /// stroke. The buffer is cleared either way.
    pub fn pointer_up(&mut self) -> Option<Vec<Point>> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        let points = std::mem::take(&mut self.points);
        (points.len() >= self.min_stroke_points).then_some(points)
    }
}
