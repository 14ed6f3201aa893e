//! Rendering module
//!
//! The engine only describes what to paint; any backend that implements
//! [`Surface`] can draw a scene.

pub mod draw_list;
pub mod style;
pub mod surface;

pub use draw_list::{DrawCommand, DrawList};
pub use style::{Color, CurveStyle, ShapeStyle, colors};
pub use surface::{Surface, paint_curve};
