//! Point primitives for the two coordinate spaces
//!
//! `RealPoint` lives in the problem domain (y grows upward), `ScreenPoint`
//! in surface pixels (y grows downward, origin at the top-left).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::almost_equal;
use crate::consts::SCREEN_EPSILON;

/// A point on the real (mathematical) plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RealPoint {
    pub x: f64,
    pub y: f64,
    /// Extension axis, unused by the 2D engine
    #[serde(default)]
    pub z: f64,
}

impl RealPoint {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Equality tolerant of floating-point noise at the given scale
    /// (pixels per real unit): two points match when they would land within
    /// [`SCREEN_EPSILON`] pixels of each other.
    pub fn almost_equal(&self, other: &RealPoint, scale: f64) -> bool {
        let tolerance = SCREEN_EPSILON / scale.abs().max(f64::MIN_POSITIVE);
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl From<DVec2> for RealPoint {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

/// A point in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Both axes within `tolerance` pixels
    pub fn almost_equal(&self, other: &ScreenPoint, tolerance: f64) -> bool {
        almost_equal(self.x, other.x, tolerance) && almost_equal(self.y, other.y, tolerance)
    }
}

impl From<DVec2> for ScreenPoint {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_almost_equal_scales_with_zoom() {
        let a = RealPoint::new(1.0, 1.0);
        let b = RealPoint::new(1.0 + 1e-9, 1.0);
        // 1e-9 real units is 5e-8 px at scale 50: equal
        assert!(a.almost_equal(&b, 50.0));
        // ...but 1e-3 px at scale 1e6: not equal
        assert!(!a.almost_equal(&b, 1e6));
    }

    #[test]
    fn test_screen_almost_equal() {
        let a = ScreenPoint::new(10.0, 20.0);
        assert!(a.almost_equal(&ScreenPoint::new(10.5, 19.5), 1.0));
        assert!(!a.almost_equal(&ScreenPoint::new(12.0, 20.0), 1.0));
    }

    #[test]
    fn test_z_defaults_when_missing() {
        let p: RealPoint = serde_json::from_str(r#"{"x":1.0,"y":2.0}"#).unwrap();
        assert_eq!(p, RealPoint::new(1.0, 2.0));
    }
}
