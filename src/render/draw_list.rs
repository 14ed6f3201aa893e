//! Recording surface
//!
//! Stores draw calls instead of rasterizing them. Used by headless runs and
//! tests to inspect what a tick painted.

use serde::{Deserialize, Serialize};

use super::style::{Color, ShapeStyle};
use super::surface::Surface;
use crate::coords::ScreenPoint;
use crate::curve::FillRegion;
use crate::sim::Shape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Stroke {
        points: Vec<ScreenPoint>,
        color: Color,
        width: f32,
    },
    Fill {
        region: FillRegion,
        color: Color,
    },
    Shape {
        shape: Shape,
        style: ShapeStyle,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop recorded commands, typically once per tick
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn strokes(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke { .. }))
    }

    pub fn fills(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill { .. }))
    }

    pub fn shapes(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Shape { .. }))
    }

    fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Surface for DrawList {
    fn stroke_path(&mut self, points: &[ScreenPoint], color: Color, width: f32) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_region(&mut self, region: &FillRegion, color: Color) {
        self.commands.push(DrawCommand::Fill {
            region: region.clone(),
            color,
        });
    }

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle) {
        self.commands.push(DrawCommand::Shape {
            shape: *shape,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateFrame;
    use crate::curve::{CurveDescriptor, CurveSampler};
    use crate::render::{CurveStyle, colors, paint_curve};

    #[test]
    fn test_paint_curve_strokes_each_subpath() {
        let frame = CoordinateFrame::centered(500.0, 500.0, 50.0).unwrap();
        let desc = CurveDescriptor::cartesian(f64::tan).domain(-3.0, 3.0);
        let curve = CurveSampler::default().sample(&desc, &frame, 0);

        let mut list = DrawList::new();
        let style = CurveStyle::default().with_fills(Some(colors::FILL_ABOVE), None);
        paint_curve(&mut list, &curve, &style);

        assert_eq!(list.strokes(), 3);
        assert_eq!(list.fills(), 3);
        assert_eq!(list.shapes(), 0);
        list.clear();
        assert!(list.is_empty());
    }
}
