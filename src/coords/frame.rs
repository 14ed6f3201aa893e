//! The coordinate frame shared by every curve and shape in a view
//!
//! Maps the real plane onto surface pixels:
//! - `screen.x = origin.x + real.x * scale`
//! - `screen.y = origin.y - real.y * scale` (screen y grows downward)
//!
//! Zoom is always applied relative to an unzoomed baseline, so repeated zoom
//! calls never compound.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::{RealPoint, Rect, ScreenPoint};
use crate::error::{Result, ensure_positive};

/// Real-plane window visible on the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Origin, scale and zoom of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateFrame {
    /// Surface size in pixels
    width: f64,
    height: f64,
    /// Unzoomed origin and scale
    baseline_origin: ScreenPoint,
    baseline_scale: f64,
    /// Pixel location of real (0, 0)
    origin: ScreenPoint,
    /// Pixels per real unit, always > 0
    scale: f64,
    /// Factor relative to the baseline (1.0 = unzoomed)
    zoom_level: f64,
    /// Bumped on every mutation so caches can detect stale mappings
    version: u64,
}

impl CoordinateFrame {
    /// Create a frame for a `width` x `height` surface with real (0, 0) at `origin`
    pub fn new(width: f64, height: f64, origin: ScreenPoint, scale: f64) -> Result<Self> {
        ensure_positive("surface width", width)?;
        ensure_positive("surface height", height)?;
        ensure_positive("scale", scale)?;
        if !origin.is_finite() {
            return Err(crate::EngineError::InvalidParameter {
                name: "origin",
                value: if origin.x.is_finite() { origin.y } else { origin.x },
                reason: "must be finite",
            });
        }
        Ok(Self {
            width,
            height,
            baseline_origin: origin,
            baseline_scale: scale,
            origin,
            scale,
            zoom_level: 1.0,
            version: 0,
        })
    }

    /// Frame with the real origin at the surface centre
    pub fn centered(width: f64, height: f64, scale: f64) -> Result<Self> {
        Self::new(width, height, ScreenPoint::new(width / 2.0, height / 2.0), scale)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> ScreenPoint {
        self.origin
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn baseline_origin(&self) -> ScreenPoint {
        self.baseline_origin
    }

    pub fn baseline_scale(&self) -> f64 {
        self.baseline_scale
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // === Conversions ===

    #[inline]
    pub fn real_to_screen_x(&self, x: f64) -> f64 {
        self.origin.x + x * self.scale
    }

    #[inline]
    pub fn real_to_screen_y(&self, y: f64) -> f64 {
        self.origin.y - y * self.scale
    }

    #[inline]
    pub fn screen_to_real_x(&self, x: f64) -> f64 {
        (x - self.origin.x) / self.scale
    }

    #[inline]
    pub fn screen_to_real_y(&self, y: f64) -> f64 {
        (self.origin.y - y) / self.scale
    }

    pub fn real_to_screen(&self, p: RealPoint) -> ScreenPoint {
        ScreenPoint::new(self.real_to_screen_x(p.x), self.real_to_screen_y(p.y))
    }

    /// Exact inverse of [`Self::real_to_screen`]; `z` is always 0
    pub fn screen_to_real(&self, p: ScreenPoint) -> RealPoint {
        RealPoint::new(self.screen_to_real_x(p.x), self.screen_to_real_y(p.y))
    }

    /// Screen rectangle covering the whole surface
    pub fn surface_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Real-plane window currently visible on the surface
    pub fn visible_real_bounds(&self) -> RealBounds {
        RealBounds {
            min_x: self.screen_to_real_x(0.0),
            max_x: self.screen_to_real_x(self.width),
            min_y: self.screen_to_real_y(self.height),
            max_y: self.screen_to_real_y(0.0),
        }
    }

    // === Mutation ===

    /// Zoom by `factor` relative to the baseline, keeping `pivot` fixed.
    ///
    /// `scale = baseline_scale / factor`, so factors above 1 zoom out. The
    /// origin is re-centred as `pivot - (pivot - baseline_origin) / factor`,
    /// which keeps the pivot's baseline real value under the pivot and makes
    /// `zoom(1.0, _)` restore the baseline exactly.
    ///
    /// Calls do not compound: after an earlier zoom, a second zoom about a
    /// different pivot keeps that pivot's baseline value fixed, not its
    /// current one. Cumulative scroll-wheel zoom should `rebase` onto the
    /// current view first.
    ///
    /// Rejects non-finite or non-positive factors without touching the frame.
    pub fn zoom(&mut self, factor: f64, pivot: ScreenPoint) -> Result<()> {
        ensure_positive("zoom factor", factor)?;
        if !pivot.is_finite() {
            return Err(crate::EngineError::InvalidParameter {
                name: "zoom pivot",
                value: if pivot.x.is_finite() { pivot.y } else { pivot.x },
                reason: "must be finite",
            });
        }

        // Always start from the baseline
        let base = self.baseline_origin.to_vec();
        let pivot_v = pivot.to_vec();
        let scale = ensure_positive("zoomed scale", self.baseline_scale / factor)?;
        let origin = if factor == 1.0 {
            base
        } else {
            pivot_v - (pivot_v - base) / factor
        };
        if !origin.is_finite() {
            return Err(crate::EngineError::not_positive("zoom factor", factor));
        }

        self.scale = scale;
        self.origin = origin.into();
        self.zoom_level = factor;
        self.version += 1;
        log::debug!(
            "Frame zoom {} about ({:.1}, {:.1}): scale={}, origin=({:.3}, {:.3})",
            factor,
            pivot.x,
            pivot.y,
            self.scale,
            self.origin.x,
            self.origin.y
        );
        Ok(())
    }

    /// Return to the baseline origin and scale
    pub fn reset_zoom(&mut self) {
        self.scale = self.baseline_scale;
        self.origin = self.baseline_origin;
        self.zoom_level = 1.0;
        self.version += 1;
    }

    /// Shift the view by `delta` pixels. The baseline moves too, so a later
    /// zoom keeps the pan.
    pub fn pan(&mut self, delta: DVec2) -> Result<()> {
        if !delta.is_finite() {
            return Err(crate::EngineError::InvalidParameter {
                name: "pan delta",
                value: if delta.x.is_finite() { delta.y } else { delta.x },
                reason: "must be finite",
            });
        }
        self.origin = (self.origin.to_vec() + delta).into();
        self.baseline_origin = (self.baseline_origin.to_vec() + delta).into();
        self.version += 1;
        Ok(())
    }

    /// Change the surface size; origin and scale are kept
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        ensure_positive("surface width", width)?;
        ensure_positive("surface height", height)?;
        self.width = width;
        self.height = height;
        self.version += 1;
        Ok(())
    }

    /// Replace the baseline and drop any zoom
    pub fn rebase(&mut self, origin: ScreenPoint, scale: f64) -> Result<()> {
        ensure_positive("scale", scale)?;
        if !origin.is_finite() {
            return Err(crate::EngineError::InvalidParameter {
                name: "origin",
                value: if origin.x.is_finite() { origin.y } else { origin.x },
                reason: "must be finite",
            });
        }
        self.baseline_origin = origin;
        self.baseline_scale = scale;
        self.reset_zoom();
        Ok(())
    }
}
