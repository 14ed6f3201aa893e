//! Per-tick orchestration of curves and bodies
//!
//! Each tick runs to completion in a fixed order:
//! 1. queued zoom requests (frame and curves together)
//! 2. body updates (integration and boundary policies)
//! 3. removal of destroyed bodies
//! 4. pairwise collision detection
//! 5. rendering, ending with the optional render hook
//!
//! Rendering only ever sees a frame that every body and curve agrees on.
//! Zooms asked for while rendering are deferred to the next tick.

use glam::DVec2;
use serde::Serialize;

use super::body::Body;
use super::boundary::BoundaryOutcome;
use super::geometry::intersects;
use super::shape::Rect;
use crate::coords::{CoordinateFrame, RealPoint, ScreenPoint};
use crate::curve::{Curve, CurveDescriptor, CurveId};
use crate::error::{EngineError, Result, ensure_positive};
use crate::render::{CurveStyle, Surface};
use crate::settings::Settings;
use crate::zoom::ZoomController;

/// A zoom waiting for the start of the next tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRequest {
    pub factor: f64,
    pub pivot: ScreenPoint,
}

impl ZoomRequest {
    fn validated(factor: f64, pivot: ScreenPoint) -> Result<Self> {
        ensure_positive("zoom factor", factor)?;
        if !pivot.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "zoom pivot",
                value: if pivot.x.is_finite() { pivot.y } else { pivot.x },
                reason: "must be finite",
            });
        }
        Ok(Self { factor, pivot })
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SceneEvent {
    /// Ids in ascending order
    Collision { a: u32, b: u32 },
    Destroyed { id: u32 },
    Entered { id: u32 },
    Zoomed { factor: f64 },
}

/// What the render hook may look at, and its only way to ask for a zoom
pub struct RenderContext<'a> {
    pub frame: &'a CoordinateFrame,
    pub tick: u64,
    deferred: &'a mut Vec<ZoomRequest>,
}

impl RenderContext<'_> {
    /// Queue a zoom for the next tick
    pub fn request_zoom(&mut self, factor: f64, pivot: ScreenPoint) -> Result<()> {
        self.deferred.push(ZoomRequest::validated(factor, pivot)?);
        Ok(())
    }
}

pub type RenderHook = Box<dyn FnMut(&mut RenderContext<'_>, &mut dyn Surface)>;

/// Snapshot for logging and the demo summary
#[derive(Debug, Clone, Serialize)]
pub struct SceneStats {
    pub tick: u64,
    pub bodies: usize,
    pub curves: usize,
    pub zoom_level: f64,
    pub scale: f64,
    pub frame_version: u64,
}

pub struct Scene {
    zoom: ZoomController,
    /// Sorted by id
    bodies: Vec<Body>,
    /// Boundary rectangle; the surface when unset
    bounds: Option<Rect>,
    tick: u64,
    pending_zooms: Vec<ZoomRequest>,
    events: Vec<SceneEvent>,
    render_hook: Option<RenderHook>,
    next_id: u32,
}

impl Scene {
    pub fn new(zoom: ZoomController) -> Self {
        let frame = zoom.frame();
        log::info!(
            "Scene created: {}x{} px, scale {}",
            frame.width(),
            frame.height(),
            frame.scale()
        );
        Self {
            zoom,
            bodies: Vec::new(),
            bounds: None,
            tick: 0,
            pending_zooms: Vec::new(),
            events: Vec::new(),
            render_hook: None,
            next_id: 1,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(ZoomController::from_settings(settings)?))
    }

    pub fn frame(&self) -> &CoordinateFrame {
        self.zoom.frame()
    }

    pub fn zoom_controller(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Events produced by the last tick
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Rectangle the boundary policies test against
    pub fn bounds(&self) -> Rect {
        self.bounds.unwrap_or_else(|| self.zoom.frame().surface_rect())
    }

    pub fn set_bounds(&mut self, bounds: Option<Rect>) {
        self.bounds = bounds;
    }

    pub fn set_render_hook(
        &mut self,
        hook: impl FnMut(&mut RenderContext<'_>, &mut dyn Surface) + 'static,
    ) {
        self.render_hook = Some(Box::new(hook));
    }

    // --- Curves ---

    pub fn add_curve(&mut self, descriptor: CurveDescriptor, style: CurveStyle) -> CurveId {
        self.zoom.add_curve(descriptor, style)
    }

    pub fn remove_curve(&mut self, id: CurveId) -> bool {
        self.zoom.remove_curve(id)
    }

    pub fn curve(&mut self, id: CurveId) -> Option<&Curve> {
        self.zoom.curve(id)
    }

    // --- Bodies ---

    /// Add a body and return its id. Ids are assigned in increasing order.
    pub fn add_body(&mut self, mut body: Body) -> u32 {
        body.id = self.next_id;
        self.next_id += 1;
        body.sync_to_frame(self.zoom.frame());
        let id = body.id;
        self.bodies.push(body);
        id
    }

    pub fn remove_body(&mut self, id: u32) -> Option<Body> {
        let index = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(self.bodies.remove(index))
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        let index = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        let index = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        self.bodies.get_mut(index)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    // --- Frame changes ---

    /// Zoom now. Do not call from inside rendering; use [`Scene::request_zoom`].
    pub fn zoom(&mut self, factor: f64, pivot: ScreenPoint) -> Result<()> {
        self.zoom.apply(factor, pivot)?;
        self.sync_bodies();
        Ok(())
    }

    /// Validate now, apply at the start of the next tick
    pub fn request_zoom(&mut self, factor: f64, pivot: ScreenPoint) -> Result<()> {
        self.pending_zooms.push(ZoomRequest::validated(factor, pivot)?);
        Ok(())
    }

    pub fn pending_zooms(&self) -> &[ZoomRequest] {
        &self.pending_zooms
    }

    pub fn pan(&mut self, delta: DVec2) -> Result<()> {
        self.zoom.pan(delta)?;
        self.sync_bodies();
        Ok(())
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.zoom.resize(width, height)
    }

    /// Pointer position to the real plane
    pub fn screen_to_real(&self, p: ScreenPoint) -> RealPoint {
        self.zoom.frame().screen_to_real(p)
    }

    fn sync_bodies(&mut self) {
        let frame = self.zoom.frame();
        for body in &mut self.bodies {
            body.sync_to_frame(frame);
        }
    }

    // --- Tick ---

    /// Advance one tick and paint onto `surface`
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.tick += 1;
        self.events.clear();
        self.zoom.set_tick(self.tick);

        self.apply_pending_zooms();
        self.update_bodies();
        self.remove_destroyed();
        self.detect_collisions();
        self.render(surface);
    }

    fn apply_pending_zooms(&mut self) {
        let pending = std::mem::take(&mut self.pending_zooms);
        for request in pending {
            // Requests were validated when queued
            match self.zoom.apply(request.factor, request.pivot) {
                Ok(()) => self.events.push(SceneEvent::Zoomed {
                    factor: request.factor,
                }),
                Err(e) => log::warn!("Dropped queued zoom: {}", e),
            }
        }
        self.sync_bodies();
    }

    fn update_bodies(&mut self) {
        let bounds = self.bounds();
        let frame = self.zoom.frame();
        for body in &mut self.bodies {
            let was_entered = body.has_entered();
            if body.update(frame, &bounds) == BoundaryOutcome::Destroyed {
                log::debug!("Body {} destroyed at tick {}", body.id, self.tick);
            }
            if !was_entered && body.has_entered() {
                self.events.push(SceneEvent::Entered { id: body.id });
            }
        }
    }

    fn remove_destroyed(&mut self) {
        let mut index = 0;
        while index < self.bodies.len() {
            if self.bodies[index].is_destroyed() {
                let mut body = self.bodies.remove(index);
                self.events.push(SceneEvent::Destroyed { id: body.id });
                body.fire_destroy();
            } else {
                index += 1;
            }
        }
    }

    fn detect_collisions(&mut self) {
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                if intersects(&a.shape, &b.shape) {
                    self.events.push(SceneEvent::Collision { a: a.id, b: b.id });
                }
            }
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.zoom.render_curves(surface);
        for body in &self.bodies {
            surface.draw_shape(&body.shape, &body.style);
        }
        if let Some(hook) = self.render_hook.as_mut() {
            let mut ctx = RenderContext {
                frame: self.zoom.frame(),
                tick: self.tick,
                deferred: &mut self.pending_zooms,
            };
            hook(&mut ctx, surface);
        }
    }

    pub fn stats(&self) -> SceneStats {
        let frame = self.zoom.frame();
        SceneStats {
            tick: self.tick,
            bodies: self.bodies.len(),
            curves: self.zoom.curves().len(),
            zoom_level: frame.zoom_level(),
            scale: frame.scale(),
            frame_version: frame.version(),
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("tick", &self.tick)
            .field("frame", self.zoom.frame())
            .field("bodies", &self.bodies)
            .field("pending_zooms", &self.pending_zooms)
            .finish_non_exhaustive()
    }
}
