//! Pairwise overlap tests for the shape set
//!
//! All tests are inclusive: touching shapes intersect. Zero-size shapes are
//! treated as points. Near-zero intermediate values are rounded to zero with
//! [`crate::almost_zero`] before any sign test.
//!
//! Circle vs rectangle uses the exact closest-point distance, not the
//! circle's bounding square, so a circle near a corner only hits when it
//! actually reaches the corner.

use glam::DVec2;

use super::shape::{Circle, Rect, Segment, Shape};
use crate::almost_zero;
use crate::consts::ALMOST_ZERO;

/// Do the two shapes overlap?
pub fn intersects(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Rect(a), Shape::Rect(b)) => a.overlaps(b),
        (Shape::Circle(a), Shape::Circle(b)) => circle_circle(a, b),
        (Shape::Segment(a), Shape::Segment(b)) => segment_segment(a, b),
        (Shape::Circle(c), Shape::Rect(r)) | (Shape::Rect(r), Shape::Circle(c)) => {
            circle_rect(c, r)
        }
        (Shape::Segment(s), Shape::Rect(r)) | (Shape::Rect(r), Shape::Segment(s)) => {
            segment_rect(s, r)
        }
        (Shape::Segment(s), Shape::Circle(c)) | (Shape::Circle(c), Shape::Segment(s)) => {
            segment_circle(s, c)
        }
    }
}

/// Is `p` inside (or on the boundary of) the shape?
pub fn contains_point(shape: &Shape, p: DVec2) -> bool {
    match shape {
        Shape::Rect(r) => r.contains(p),
        Shape::Circle(c) => within(p.distance(c.center()), c.r),
        Shape::Segment(s) => on_segment(s, p),
    }
}

/// `value <= limit`, treating near-equality as equal
#[inline]
fn within(value: f64, limit: f64) -> bool {
    almost_zero(value - limit) <= 0.0
}

pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    within(a.center().distance(b.center()), a.r + b.r)
}

pub fn circle_rect(c: &Circle, r: &Rect) -> bool {
    let min = DVec2::new(r.min_x(), r.min_y());
    let max = DVec2::new(r.max_x(), r.max_y());
    let closest = c.center().clamp(min, max);
    within(closest.distance(c.center()), c.r)
}

pub fn segment_circle(s: &Segment, c: &Circle) -> bool {
    within(s.distance_to(c.center()), c.r)
}

pub fn segment_rect(s: &Segment, r: &Rect) -> bool {
    if r.contains(s.p0) || r.contains(s.p1) {
        return true;
    }
    if !Rect::from_corners(s.p0, s.p1).overlaps(r) {
        return false;
    }
    let [tl, tr, br, bl] = r.corners().map(|p| p.to_vec());
    [
        Segment::new(tl, tr),
        Segment::new(tr, br),
        Segment::new(br, bl),
        Segment::new(bl, tl),
    ]
    .iter()
    .any(|side| segment_segment(s, side))
}

/// Orientation tests instead of slope elimination, so vertical segments need
/// no special case. Collinear segments intersect when they share any point.
pub fn segment_segment(s: &Segment, t: &Segment) -> bool {
    match (is_point(s), is_point(t)) {
        (true, true) => almost_zero(s.p0.distance(t.p0)) == 0.0,
        (true, false) => on_segment(t, s.p0),
        (false, true) => on_segment(s, t.p0),
        (false, false) => {
            let d1 = orientation(t.p0, t.p1, s.p0);
            let d2 = orientation(t.p0, t.p1, s.p1);
            let d3 = orientation(s.p0, s.p1, t.p0);
            let d4 = orientation(s.p0, s.p1, t.p1);

            if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
                return true;
            }

            // Touching or collinear: some endpoint lies on the other segment
            (d1 == 0.0 && in_box(t, s.p0))
                || (d2 == 0.0 && in_box(t, s.p1))
                || (d3 == 0.0 && in_box(s, t.p0))
                || (d4 == 0.0 && in_box(s, t.p1))
        }
    }
}

fn is_point(s: &Segment) -> bool {
    almost_zero(s.direction().length_squared()) == 0.0
}

/// Sign of the turn a → b → c, with near-collinear rounded to zero
fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    let ab = b - a;
    let ac = c - a;
    let cross = ab.perp_dot(ac);
    let magnitude = (ab.length() * ac.length()).max(1.0);
    if cross.abs() <= ALMOST_ZERO * magnitude {
        0.0
    } else {
        cross.signum()
    }
}

/// `p` within the segment's bounding box (assumes collinear)
fn in_box(s: &Segment, p: DVec2) -> bool {
    let min = s.p0.min(s.p1);
    let max = s.p0.max(s.p1);
    within(min.x, p.x) && within(p.x, max.x) && within(min.y, p.y) && within(p.y, max.y)
}

fn on_segment(s: &Segment, p: DVec2) -> bool {
    almost_zero(s.distance_to(p)) == 0.0
}
