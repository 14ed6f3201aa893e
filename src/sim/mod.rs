//! Shapes, collision and boundary handling, and the per-tick scene
//!
//! Everything here works in screen pixels. Bodies iterate in id order so a
//! tick is deterministic for a given starting state.

pub mod body;
pub mod boundary;
pub mod geometry;
pub mod scene;
pub mod shape;

pub use body::{Body, Kinematics, Motion};
pub use boundary::{BoundaryOutcome, BoundaryPolicy, CustomRule, Edge, EdgeRule};
pub use geometry::{contains_point, intersects};
pub use scene::{RenderContext, Scene, SceneEvent, SceneStats, ZoomRequest};
pub use shape::{Circle, Rect, Segment, Shape};
