//! Paint styles for curves and bodies

use serde::{Deserialize, Serialize};

/// RGBA, components in 0..=1
pub type Color = [f32; 4];

/// Default palette
pub mod colors {
    use super::Color;

    pub const AXIS: Color = [0.3, 0.3, 0.4, 1.0];
    pub const CURVE: Color = [0.2, 0.8, 0.4, 1.0];
    pub const FILL_ABOVE: Color = [0.4, 0.7, 1.0, 0.25];
    pub const FILL_BELOW: Color = [1.0, 0.4, 0.2, 0.25];
    pub const SHAPE: Color = [1.0, 1.0, 1.0, 1.0];
}

/// How a curve is painted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveStyle {
    pub stroke: Color,
    pub width: f32,
    /// Above / left / inside region
    pub fill_first: Option<Color>,
    /// Below / right / outside region
    pub fill_second: Option<Color>,
}

impl Default for CurveStyle {
    fn default() -> Self {
        Self {
            stroke: colors::CURVE,
            width: 2.0,
            fill_first: None,
            fill_second: None,
        }
    }
}

impl CurveStyle {
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            stroke: color,
            width,
            ..Default::default()
        }
    }

    pub fn with_fills(mut self, first: Option<Color>, second: Option<Color>) -> Self {
        self.fill_first = first;
        self.fill_second = second;
        self
    }
}

/// How a body is painted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub color: Color,
    /// Outline only when false
    pub filled: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: colors::SHAPE,
            filled: true,
        }
    }
}
