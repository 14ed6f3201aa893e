//! Moving bodies: a shape plus kinematics and a boundary policy

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::boundary::{self, BoundaryOutcome, BoundaryPolicy};
use super::shape::{Rect, Shape};
use crate::coords::{CoordinateFrame, RealPoint};
use crate::render::ShapeStyle;

/// Constant-acceleration state, in the body's motion space per tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kinematics {
    pub velocity: DVec2,
    pub acceleration: DVec2,
}

impl Kinematics {
    /// One Euler step: acceleration into velocity, then velocity into
    /// position. Returns the displacement for this tick.
    pub fn step(&mut self) -> DVec2 {
        self.velocity += self.acceleration;
        self.velocity
    }
}

/// Where a body's position lives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Motion {
    /// Kinematics in screen pixels
    Screen,
    /// Kinematics in real units; the screen position is projected through
    /// the frame every tick, so the body follows zoom and pan
    Real(RealPoint),
}

pub type DestroyCallback = Box<dyn FnOnce(&Body)>;

pub struct Body {
    pub id: u32,
    pub shape: Shape,
    pub kinematics: Kinematics,
    pub motion: Motion,
    pub policy: BoundaryPolicy,
    pub style: ShapeStyle,
    entered: bool,
    destroyed: bool,
    on_destroy: Option<DestroyCallback>,
}

impl Body {
    pub fn new(shape: Shape) -> Self {
        Self {
            id: 0,
            shape,
            kinematics: Kinematics::default(),
            motion: Motion::Screen,
            policy: BoundaryPolicy::default(),
            style: ShapeStyle::default(),
            entered: false,
            destroyed: false,
            on_destroy: None,
        }
    }

    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.kinematics.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: DVec2) -> Self {
        self.kinematics.acceleration = acceleration;
        self
    }

    pub fn with_policy(mut self, policy: impl Into<BoundaryPolicy>) -> Self {
        self.policy = policy.into();
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Drive the body from a real-plane anchor instead of screen pixels
    pub fn anchored(mut self, anchor: RealPoint) -> Self {
        self.motion = Motion::Real(anchor);
        self
    }

    /// Called once when a boundary rule destroys the body
    pub fn on_destroy(mut self, f: impl FnOnce(&Body) + 'static) -> Self {
        self.on_destroy = Some(Box::new(f));
        self
    }

    pub fn has_entered(&self) -> bool {
        self.entered
    }

    pub fn mark_entered(&mut self) {
        self.entered = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Flag for removal; custom rules may call this
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Run the destruction callback if it has not run yet
    pub(crate) fn fire_destroy(&mut self) {
        if let Some(callback) = self.on_destroy.take() {
            callback(self);
        }
    }

    /// Advance one tick: integrate, project, then apply the boundary policy
    pub fn update(&mut self, frame: &CoordinateFrame, bounds: &Rect) -> BoundaryOutcome {
        let delta = self.kinematics.step();
        match &mut self.motion {
            Motion::Screen => self.shape.translate(delta),
            Motion::Real(anchor) => {
                anchor.x += delta.x;
                anchor.y += delta.y;
                self.shape.set_position(frame.real_to_screen(*anchor).to_vec());
            }
        }

        let outcome = boundary::apply(self, bounds);

        // Fold any boundary correction back into the anchor
        if let Motion::Real(anchor) = &mut self.motion {
            let real = frame.screen_to_real(self.shape.position().into());
            *anchor = RealPoint::with_z(real.x, real.y, anchor.z);
        }
        outcome
    }

    /// Re-project an anchored body without moving it (after zoom or pan)
    pub fn sync_to_frame(&mut self, frame: &CoordinateFrame) {
        if let Motion::Real(anchor) = self.motion {
            self.shape.set_position(frame.real_to_screen(anchor).to_vec());
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("shape", &self.shape)
            .field("kinematics", &self.kinematics)
            .field("motion", &self.motion)
            .field("policy", &self.policy)
            .field("entered", &self.entered)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ScreenPoint;
    use crate::sim::EdgeRule;
    use std::cell::Cell;
    use std::rc::Rc;

    fn frame() -> CoordinateFrame {
        CoordinateFrame::centered(200.0, 200.0, 10.0).unwrap()
    }

    #[test]
    fn test_euler_order() {
        let mut k = Kinematics {
            velocity: DVec2::new(1.0, 0.0),
            acceleration: DVec2::new(0.5, -1.0),
        };
        // Acceleration lands in velocity before position moves
        assert_eq!(k.step(), DVec2::new(1.5, -1.0));
        assert_eq!(k.step(), DVec2::new(2.0, -2.0));
    }

    #[test]
    fn test_screen_motion_update() {
        let f = frame();
        let mut body = Body::new(Shape::circle(50.0, 50.0, 5.0))
            .with_velocity(DVec2::new(2.0, 3.0))
            .with_acceleration(DVec2::new(0.0, 1.0));
        body.update(&f, &f.surface_rect());
        assert_eq!(body.shape.position(), DVec2::new(52.0, 54.0));
        assert!(body.has_entered());
    }

    #[test]
    fn test_anchored_motion_follows_zoom() {
        let mut f = frame();
        let mut body = Body::new(Shape::circle(0.0, 0.0, 2.0))
            .anchored(RealPoint::new(1.0, 1.0))
            .with_velocity(DVec2::new(1.0, 0.0));
        body.update(&f, &f.surface_rect());
        // Real (2, 1) at scale 10 around centre (100, 100)
        assert_eq!(body.shape.position(), DVec2::new(120.0, 90.0));

        f.zoom(2.0, ScreenPoint::new(100.0, 100.0)).unwrap();
        body.sync_to_frame(&f);
        assert_eq!(body.shape.position(), DVec2::new(110.0, 95.0));
    }

    #[test]
    fn test_anchored_bounce_updates_anchor() {
        let f = frame();
        let mut body = Body::new(Shape::circle(0.0, 0.0, 5.0))
            .anchored(RealPoint::new(9.0, 0.0))
            .with_velocity(DVec2::new(1.0, 0.0))
            .with_policy(EdgeRule::Bounce);
        body.mark_entered();
        body.update(&f, &f.surface_rect());
        // Clamped so the right edge sits on x = 200, i.e. real x = 9.5
        let Motion::Real(anchor) = body.motion else {
            panic!("motion changed");
        };
        assert!((anchor.x - 9.5).abs() < 1e-12);
        assert_eq!(body.kinematics.velocity, DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_destroy_callback_fires_once() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let mut body = Body::new(Shape::rect(0.0, 0.0, 1.0, 1.0)).on_destroy(move |_| {
            seen.set(seen.get() + 1);
        });
        body.destroy();
        body.fire_destroy();
        body.fire_destroy();
        assert_eq!(calls.get(), 1);
    }
}
