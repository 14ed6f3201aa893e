//! Shape primitives in screen space
//!
//! Rectangles are anchored at their top-left corner, circles at their
//! centre and segments at their first endpoint.

use glam::DVec2;
use serde::{Deserialize, Serialize};

pub use crate::coords::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

impl Circle {
    pub const fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.cx, self.cy)
    }
}

/// Line segment from `p0` to `p1`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p0: DVec2,
    pub p1: DVec2,
}

impl Segment {
    pub const fn new(p0: DVec2, p1: DVec2) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn direction(&self) -> DVec2 {
        self.p1 - self.p0
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: DVec2) -> DVec2 {
        let dir = self.direction();
        let len_sq = dir.length_squared();
        if crate::almost_zero(len_sq) == 0.0 {
            // Degenerate: behaves as a point
            return self.p0;
        }
        let t = ((p - self.p0).dot(dir) / len_sq).clamp(0.0, 1.0);
        self.p0 + dir * t
    }

    pub fn distance_to(&self, p: DVec2) -> f64 {
        (p - self.closest_point(p)).length()
    }
}

/// The closed set of shapes the collision engine understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rect(Rect),
    Circle(Circle),
    Segment(Segment),
}

impl Shape {
    pub const fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Shape::Rect(Rect::new(x, y, w, h))
    }

    pub const fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Shape::Circle(Circle::new(cx, cy, r))
    }

    pub fn segment(p0: DVec2, p1: DVec2) -> Self {
        Shape::Segment(Segment::new(p0, p1))
    }

    /// Anchor point: top-left, centre or first endpoint
    pub fn position(&self) -> DVec2 {
        match self {
            Shape::Rect(r) => DVec2::new(r.x, r.y),
            Shape::Circle(c) => c.center(),
            Shape::Segment(s) => s.p0,
        }
    }

    pub fn set_position(&mut self, pos: DVec2) {
        let delta = pos - self.position();
        self.translate(delta);
    }

    pub fn translate(&mut self, delta: DVec2) {
        match self {
            Shape::Rect(r) => r.translate(delta),
            Shape::Circle(c) => {
                c.cx += delta.x;
                c.cy += delta.y;
            }
            Shape::Segment(s) => {
                s.p0 += delta;
                s.p1 += delta;
            }
        }
    }

    /// Axis-aligned bounding box
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(r) => *r,
            Shape::Circle(c) => Rect::new(c.cx - c.r, c.cy - c.r, 2.0 * c.r, 2.0 * c.r),
            Shape::Segment(s) => Rect::from_corners(s.p0, s.p1),
        }
    }

    pub fn contains_point(&self, p: DVec2) -> bool {
        super::geometry::contains_point(self, p)
    }
}
