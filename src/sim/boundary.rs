//! Per-edge boundary policies
//!
//! Each edge of the bounding frame carries its own rule. Rules run once per
//! tick in a fixed order (left, right, top, bottom), so a shape crossing a
//! corner gets both rules applied. A body that spawned outside the frame is
//! left alone until it has overlapped the frame at least once.

use std::fmt;
use std::rc::Rc;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::shape::Rect;
use crate::error::{EngineError, Result};

/// Caller-supplied edge behaviour; receives the body and the frame
pub type CustomRule = Rc<dyn Fn(&mut Body, &Rect)>;

/// What happens when a body crosses one edge
#[derive(Clone, Default, Serialize, Deserialize)]
pub enum EdgeRule {
    /// Leave freely
    #[default]
    None,
    /// Reappear just outside the opposite edge once fully past this one
    Wrap,
    /// Clamp to the edge and reverse the perpendicular velocity
    Bounce,
    /// Clamp to the edge, velocity unchanged
    Fence,
    /// Remove once fully past the edge
    Destroy,
    /// Run a callback while the body breaches the edge
    #[serde(skip)]
    Custom(CustomRule),
}

impl EdgeRule {
    pub fn custom(f: impl Fn(&mut Body, &Rect) + 'static) -> Self {
        EdgeRule::Custom(Rc::new(f))
    }
}

impl fmt::Debug for EdgeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeRule::None => write!(f, "None"),
            EdgeRule::Wrap => write!(f, "Wrap"),
            EdgeRule::Bounce => write!(f, "Bounce"),
            EdgeRule::Fence => write!(f, "Fence"),
            EdgeRule::Destroy => write!(f, "Destroy"),
            EdgeRule::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl PartialEq for EdgeRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EdgeRule::Custom(a), EdgeRule::Custom(b)) => Rc::ptr_eq(a, b),
            (EdgeRule::None, EdgeRule::None)
            | (EdgeRule::Wrap, EdgeRule::Wrap)
            | (EdgeRule::Bounce, EdgeRule::Bounce)
            | (EdgeRule::Fence, EdgeRule::Fence)
            | (EdgeRule::Destroy, EdgeRule::Destroy) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    /// Order rules are evaluated within a tick
    pub const APPLY_ORDER: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Some part of `b` lies beyond this edge
    fn breached(self, b: &Rect, frame: &Rect) -> bool {
        match self {
            Edge::Left => b.min_x() < frame.min_x(),
            Edge::Right => b.max_x() > frame.max_x(),
            Edge::Top => b.min_y() < frame.min_y(),
            Edge::Bottom => b.max_y() > frame.max_y(),
        }
    }

    /// All of `b` lies beyond this edge
    fn cleared(self, b: &Rect, frame: &Rect) -> bool {
        match self {
            Edge::Left => b.max_x() < frame.min_x(),
            Edge::Right => b.min_x() > frame.max_x(),
            Edge::Top => b.max_y() < frame.min_y(),
            Edge::Bottom => b.min_y() > frame.max_y(),
        }
    }

    /// Translation putting `b` back flush against this edge
    fn clamp_offset(self, b: &Rect, frame: &Rect) -> DVec2 {
        match self {
            Edge::Left => DVec2::new(frame.min_x() - b.min_x(), 0.0),
            Edge::Right => DVec2::new(frame.max_x() - b.max_x(), 0.0),
            Edge::Top => DVec2::new(0.0, frame.min_y() - b.min_y()),
            Edge::Bottom => DVec2::new(0.0, frame.max_y() - b.max_y()),
        }
    }

    /// Translation putting `b` just outside the opposite edge
    fn wrap_offset(self, b: &Rect, frame: &Rect) -> DVec2 {
        match self {
            Edge::Left => DVec2::new(frame.max_x() - b.min_x(), 0.0),
            Edge::Right => DVec2::new(frame.min_x() - b.max_x(), 0.0),
            Edge::Top => DVec2::new(0.0, frame.max_y() - b.min_y()),
            Edge::Bottom => DVec2::new(0.0, frame.min_y() - b.max_y()),
        }
    }

    fn reflect(self, velocity: &mut DVec2) {
        match self {
            Edge::Left | Edge::Right => velocity.x = -velocity.x,
            Edge::Top | Edge::Bottom => velocity.y = -velocity.y,
        }
    }
}

/// One rule per edge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPolicy {
    pub top: EdgeRule,
    pub right: EdgeRule,
    pub bottom: EdgeRule,
    pub left: EdgeRule,
}

impl BoundaryPolicy {
    /// Clockwise from the top
    pub fn new(top: EdgeRule, right: EdgeRule, bottom: EdgeRule, left: EdgeRule) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same rule on every edge
    pub fn all(rule: EdgeRule) -> Self {
        Self::new(rule.clone(), rule.clone(), rule.clone(), rule)
    }

    /// One rule for top and bottom, one for left and right
    pub fn symmetric(top_bottom: EdgeRule, left_right: EdgeRule) -> Self {
        Self::new(top_bottom.clone(), left_right.clone(), top_bottom, left_right)
    }

    pub fn rule(&self, edge: Edge) -> &EdgeRule {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    pub fn set(&mut self, edge: Edge, rule: EdgeRule) {
        match edge {
            Edge::Top => self.top = rule,
            Edge::Right => self.right = rule,
            Edge::Bottom => self.bottom = rule,
            Edge::Left => self.left = rule,
        }
    }
}

impl From<EdgeRule> for BoundaryPolicy {
    fn from(rule: EdgeRule) -> Self {
        Self::all(rule)
    }
}

impl From<[EdgeRule; 2]> for BoundaryPolicy {
    fn from([top_bottom, left_right]: [EdgeRule; 2]) -> Self {
        Self::symmetric(top_bottom, left_right)
    }
}

impl From<[EdgeRule; 4]> for BoundaryPolicy {
    fn from([top, right, bottom, left]: [EdgeRule; 4]) -> Self {
        Self::new(top, right, bottom, left)
    }
}

impl TryFrom<Vec<EdgeRule>> for BoundaryPolicy {
    type Error = EngineError;

    /// 1, 2 or 4 rules, CSS shorthand style
    fn try_from(rules: Vec<EdgeRule>) -> Result<Self> {
        let count = rules.len();
        let mut it = rules.into_iter();
        match (count, it.next(), it.next(), it.next(), it.next()) {
            (1, Some(all), ..) => Ok(Self::all(all)),
            (2, Some(tb), Some(lr), ..) => Ok(Self::symmetric(tb, lr)),
            (4, Some(t), Some(r), Some(b), Some(l)) => Ok(Self::new(t, r, b, l)),
            _ => Err(EngineError::InvalidEdgeCount(count)),
        }
    }
}

/// Result of applying a policy for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    Kept,
    Destroyed,
}

/// Apply the body's policy against `frame` for one tick
pub fn apply(body: &mut Body, frame: &Rect) -> BoundaryOutcome {
    if body.is_destroyed() {
        return BoundaryOutcome::Destroyed;
    }
    if !body.has_entered() {
        if body.shape.bounds().overlaps(frame) {
            body.mark_entered();
        } else {
            return BoundaryOutcome::Kept;
        }
    }

    for edge in Edge::APPLY_ORDER {
        let rule = body.policy.rule(edge).clone();
        apply_edge(body, frame, edge, &rule);
        if body.is_destroyed() {
            return BoundaryOutcome::Destroyed;
        }
    }
    BoundaryOutcome::Kept
}

fn apply_edge(body: &mut Body, frame: &Rect, edge: Edge, rule: &EdgeRule) {
    let bounds = body.shape.bounds();
    match rule {
        EdgeRule::None => {}
        EdgeRule::Wrap => {
            if edge.cleared(&bounds, frame) {
                body.shape.translate(edge.wrap_offset(&bounds, frame));
            }
        }
        EdgeRule::Bounce => {
            if edge.breached(&bounds, frame) {
                body.shape.translate(edge.clamp_offset(&bounds, frame));
                edge.reflect(&mut body.kinematics.velocity);
            }
        }
        EdgeRule::Fence => {
            if edge.breached(&bounds, frame) {
                body.shape.translate(edge.clamp_offset(&bounds, frame));
            }
        }
        EdgeRule::Destroy => {
            if edge.cleared(&bounds, frame) {
                body.destroy();
            }
        }
        EdgeRule::Custom(f) => {
            if edge.breached(&bounds, frame) {
                f(body, frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Shape;
    use std::cell::Cell;

    fn frame() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    fn entered(shape: Shape, policy: impl Into<BoundaryPolicy>) -> Body {
        let mut body = Body::new(shape).with_policy(policy);
        body.mark_entered();
        body
    }

    #[test]
    fn test_wrap_left_reappears_at_right_edge() {
        let mut body = entered(
            Shape::rect(-11.0, 50.0, 10.0, 10.0),
            BoundaryPolicy::new(EdgeRule::None, EdgeRule::Wrap, EdgeRule::None, EdgeRule::Wrap),
        );
        body.kinematics.velocity = DVec2::new(-3.0, 0.0);
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Kept);
        assert_eq!(body.shape.position().x, 100.0);
        assert_eq!(body.kinematics.velocity, DVec2::new(-3.0, 0.0));
    }

    #[test]
    fn test_wrap_waits_for_trailing_edge() {
        let mut body = entered(Shape::rect(-9.0, 50.0, 10.0, 10.0), EdgeRule::Wrap);
        apply(&mut body, &frame());
        assert_eq!(body.shape.position().x, -9.0);
    }

    #[test]
    fn test_wrap_bottom_to_top() {
        let mut body = entered(Shape::circle(50.0, 106.0, 5.0), EdgeRule::Wrap);
        apply(&mut body, &frame());
        // Bounding box now ends flush with the top edge
        assert_eq!(body.shape.bounds().max_y(), 0.0);
    }

    #[test]
    fn test_bounce_left_wall() {
        let mut body = entered(Shape::circle(3.0, 50.0, 5.0), EdgeRule::Bounce);
        body.kinematics.velocity = DVec2::new(5.0, 1.0);
        apply(&mut body, &frame());
        assert_eq!(body.kinematics.velocity, DVec2::new(-5.0, 1.0));
        let Shape::Circle(c) = body.shape else {
            panic!("shape changed kind");
        };
        assert_eq!(c.cx - c.r, 0.0);
    }

    #[test]
    fn test_bounce_corner_reverses_both_axes() {
        let mut body = entered(Shape::rect(95.0, 95.0, 10.0, 10.0), EdgeRule::Bounce);
        body.kinematics.velocity = DVec2::new(4.0, 2.0);
        apply(&mut body, &frame());
        assert_eq!(body.kinematics.velocity, DVec2::new(-4.0, -2.0));
        assert_eq!(body.shape.position(), DVec2::new(90.0, 90.0));
    }

    #[test]
    fn test_fence_clamps_without_reflecting() {
        let mut body = entered(Shape::rect(-4.0, 10.0, 10.0, 10.0), EdgeRule::Fence);
        body.kinematics.velocity = DVec2::new(-2.0, 0.0);
        apply(&mut body, &frame());
        assert_eq!(body.shape.position().x, 0.0);
        assert_eq!(body.kinematics.velocity, DVec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_destroy_once_fully_past() {
        let mut body = entered(Shape::rect(95.0, 10.0, 10.0, 10.0), EdgeRule::Destroy);
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Kept);
        body.shape.translate(DVec2::new(10.0, 0.0));
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Destroyed);
        assert!(body.is_destroyed());
    }

    #[test]
    fn test_spawned_outside_is_exempt_until_visible() {
        let mut body = Body::new(Shape::rect(-50.0, 10.0, 10.0, 10.0)).with_policy(EdgeRule::Destroy);
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Kept);
        assert!(!body.has_entered());

        body.shape.translate(DVec2::new(45.0, 0.0));
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Kept);
        assert!(body.has_entered());

        body.shape.translate(DVec2::new(-45.0, 0.0));
        assert_eq!(apply(&mut body, &frame()), BoundaryOutcome::Destroyed);
    }

    #[test]
    fn test_custom_rule_runs_only_when_breached() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let rule = EdgeRule::custom(move |body, frame| {
            seen.set(seen.get() + 1);
            body.shape.set_position(frame.center());
        });
        let mut body = entered(
            Shape::rect(50.0, 50.0, 10.0, 10.0),
            BoundaryPolicy::new(EdgeRule::None, rule, EdgeRule::None, EdgeRule::None),
        );
        apply(&mut body, &frame());
        assert_eq!(calls.get(), 0);

        body.shape.set_position(DVec2::new(95.0, 50.0));
        apply(&mut body, &frame());
        assert_eq!(calls.get(), 1);
        assert_eq!(body.shape.position(), DVec2::new(50.0, 50.0));
    }

    #[test]
    fn test_shorthand_normalization() {
        let p: BoundaryPolicy = [EdgeRule::Bounce, EdgeRule::Wrap].into();
        assert_eq!(p.top, EdgeRule::Bounce);
        assert_eq!(p.bottom, EdgeRule::Bounce);
        assert_eq!(p.left, EdgeRule::Wrap);
        assert_eq!(p.right, EdgeRule::Wrap);

        let p = BoundaryPolicy::try_from(vec![
            EdgeRule::Fence,
            EdgeRule::Wrap,
            EdgeRule::Destroy,
            EdgeRule::None,
        ])
        .unwrap();
        assert_eq!(p.rule(Edge::Top), &EdgeRule::Fence);
        assert_eq!(p.rule(Edge::Right), &EdgeRule::Wrap);
        assert_eq!(p.rule(Edge::Bottom), &EdgeRule::Destroy);
        assert_eq!(p.rule(Edge::Left), &EdgeRule::None);

        assert_eq!(
            BoundaryPolicy::try_from(vec![EdgeRule::Wrap; 3]),
            Err(EngineError::InvalidEdgeCount(3))
        );
        assert_eq!(
            BoundaryPolicy::try_from(vec![EdgeRule::Wrap]).unwrap(),
            BoundaryPolicy::all(EdgeRule::Wrap)
        );
    }

    #[test]
    fn test_policy_json_round_trip() {
        let p = BoundaryPolicy::symmetric(EdgeRule::Bounce, EdgeRule::Wrap);
        let json = serde_json::to_string(&p).unwrap();
        let back: BoundaryPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
