//! Coordinate spaces and the frame mapping between them

pub mod frame;
pub mod point;
pub mod rect;

pub use frame::{CoordinateFrame, RealBounds};
pub use point::{RealPoint, ScreenPoint};
pub use rect::Rect;
