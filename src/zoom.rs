//! Zoom controller
//!
//! Owns the coordinate frame together with every registered curve so a zoom
//! is never half applied. [`ZoomController::apply`] updates the frame first,
//! then forgets each curve's resolved domain and rebuilds it against the new
//! frame. Resolving domains from the declared bounds every time keeps curves
//! that follow the visible window from drifting over repeated zoom cycles.

use glam::DVec2;

use crate::coords::{CoordinateFrame, ScreenPoint};
use crate::curve::{Curve, CurveDescriptor, CurveId, CurveRegistry, CurveSampler};
use crate::error::Result;
use crate::render::{CurveStyle, Surface, paint_curve};
use crate::settings::Settings;

#[derive(Debug)]
pub struct ZoomController {
    frame: CoordinateFrame,
    curves: CurveRegistry,
    sampler: CurveSampler,
    tick: u64,
}

impl ZoomController {
    pub fn new(frame: CoordinateFrame, sampler: CurveSampler) -> Self {
        Self {
            frame,
            curves: CurveRegistry::new(),
            sampler,
            tick: 0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let frame = settings.build_frame()?;
        Ok(Self::new(frame, CurveSampler::new(settings.sampling.clone())))
    }

    pub fn frame(&self) -> &CoordinateFrame {
        &self.frame
    }

    pub fn curves(&self) -> &CurveRegistry {
        &self.curves
    }

    pub fn curves_mut(&mut self) -> &mut CurveRegistry {
        &mut self.curves
    }

    pub fn sampler(&self) -> &CurveSampler {
        &self.sampler
    }

    pub fn zoom_level(&self) -> f64 {
        self.frame.zoom_level()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Animation tick used when resolving animated bounds
    pub fn set_tick(&mut self, tick: u64) {
        self.tick = tick;
    }

    pub fn add_curve(&mut self, descriptor: CurveDescriptor, style: CurveStyle) -> CurveId {
        self.curves.add(descriptor, style)
    }

    pub fn remove_curve(&mut self, id: CurveId) -> bool {
        self.curves.remove(id)
    }

    /// Current samples for `id`, rebuilt first if stale
    pub fn curve(&mut self, id: CurveId) -> Option<&Curve> {
        self.curves.get(id, &self.frame, &self.sampler, self.tick)
    }

    /// Zoom about `pivot` relative to the baseline, then rebuild every curve.
    ///
    /// Invalid input is rejected before anything changes.
    pub fn apply(&mut self, factor: f64, pivot: ScreenPoint) -> Result<()> {
        self.frame
            .zoom(factor, pivot)
            .inspect_err(|e| log::warn!("Rejected zoom: {}", e))?;
        self.curves.reset_domains();
        self.curves.rebuild_all(&self.frame, &self.sampler, self.tick);
        log::info!(
            "Zoom {} about ({:.1}, {:.1}), {} curves rebuilt",
            factor,
            pivot.x,
            pivot.y,
            self.curves.len()
        );
        Ok(())
    }

    /// Back to the baseline
    pub fn reset(&mut self) {
        self.frame.reset_zoom();
        self.curves.reset_domains();
        self.curves.rebuild_all(&self.frame, &self.sampler, self.tick);
    }

    /// Pan by `delta` pixels; curves rebuild lazily on next read
    pub fn pan(&mut self, delta: DVec2) -> Result<()> {
        self.frame.pan(delta)?;
        self.curves.reset_domains();
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.frame.resize(width, height)?;
        self.curves.reset_domains();
        Ok(())
    }

    pub fn rebase(&mut self, origin: ScreenPoint, scale: f64) -> Result<()> {
        self.frame.rebase(origin, scale)?;
        self.curves.reset_domains();
        Ok(())
    }

    /// Paint every curve in id order, rebuilding stale ones first
    pub fn render_curves(&mut self, surface: &mut dyn Surface) {
        self.curves
            .for_each_current(&self.frame, &self.sampler, self.tick, |_, style, curve| {
                paint_curve(surface, curve, style);
            });
    }
}
