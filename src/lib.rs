//! Graph Stage - coordinate, curve and collision engine for animated 2D graphs
//!
//! Core modules:
//! - `coords`: Real-plane / screen-pixel points and the shared coordinate frame
//! - `curve`: Function sampling into broken paths plus fill regions
//! - `zoom`: Zoom controller keeping the frame and every curve consistent
//! - `sim`: Shapes, collision tests, boundary policies and the per-tick scene
//! - `render`: Surface abstraction and a recording draw list
//! - `settings`: Data-driven engine configuration

pub mod coords;
pub mod curve;
pub mod error;
pub mod render;
pub mod settings;
pub mod sim;
pub mod zoom;

pub use coords::{CoordinateFrame, RealPoint, ScreenPoint};
pub use curve::{Bound, Curve, CurveDescriptor, CurveFn, CurveSampler, Variant};
pub use error::{EngineError, Result};
pub use settings::Settings;
pub use sim::{BoundaryPolicy, EdgeRule, Scene, Shape, intersects};
pub use zoom::ZoomController;

use glam::DVec2;

/// Engine configuration constants
pub mod consts {
    use std::f64::consts::TAU;

    /// Values closer to zero than this are rounded to zero before comparisons
    pub const ALMOST_ZERO: f64 = 1e-10;
    /// Screen-space tolerance (pixels) for "almost equal" point comparisons
    pub const SCREEN_EPSILON: f64 = 1e-6;

    /// Default surface size
    pub const DEFAULT_WIDTH: f64 = 800.0;
    pub const DEFAULT_HEIGHT: f64 = 600.0;
    /// Default baseline scale (pixels per real unit)
    pub const DEFAULT_SCALE: f64 = 50.0;

    /// One sample per pixel column/row for cartesian and inverted curves
    pub const DEFAULT_PIXEL_STEP: f64 = 1.0;
    /// One sample per degree for polar curves
    pub const DEFAULT_POLAR_STEP: f64 = TAU / 360.0;
    /// Parametric step in parameter units
    pub const DEFAULT_PARAMETRIC_STEP: f64 = 0.01;
    /// Flagged samples closer than this (pixels) are not split
    pub const DEFAULT_CONTINUITY_TOLERANCE: f64 = 1.0;
    /// Hard cap on samples per curve
    pub const MAX_SAMPLES: usize = 200_000;
}

/// Round values within [`consts::ALMOST_ZERO`] of zero down to exactly zero
#[inline]
pub fn almost_zero(value: f64) -> f64 {
    if value.abs() < consts::ALMOST_ZERO {
        0.0
    } else {
        value
    }
}

/// Compare two scalars with an absolute tolerance
#[inline]
pub fn almost_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
