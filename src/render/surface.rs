//! The drawing surface the scene paints onto

use super::style::{Color, CurveStyle, ShapeStyle};
use crate::coords::ScreenPoint;
use crate::curve::{Curve, FillRegion};
use crate::sim::Shape;

/// A 2D drawing target in screen pixels
pub trait Surface {
    /// Stroke an open polyline
    fn stroke_path(&mut self, points: &[ScreenPoint], color: Color, width: f32);

    /// Fill a region using the even-odd rule
    fn fill_region(&mut self, region: &FillRegion, color: Color);

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle);
}

/// Paint a curve: fills first, then every subpath as its own stroke
pub fn paint_curve(surface: &mut dyn Surface, curve: &Curve, style: &CurveStyle) {
    if let Some(color) = style.fill_first {
        for region in &curve.fills.first {
            surface.fill_region(region, color);
        }
    }
    if let Some(color) = style.fill_second {
        for region in &curve.fills.second {
            surface.fill_region(region, color);
        }
    }
    for path in curve.subpaths.iter().filter(|p| p.len() >= 2) {
        surface.stroke_path(path, style.stroke, style.width);
    }
}
