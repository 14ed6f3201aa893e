//! Registered curves with lazily rebuilt samples
//!
//! Each entry remembers the frame version its samples were built against.
//! A mismatch, an animated descriptor, or a domain reset triggers a rebuild
//! the next time the curve is read.

use serde::{Deserialize, Serialize};

use super::{Curve, CurveDescriptor, CurveSampler};
use crate::coords::CoordinateFrame;
use crate::render::CurveStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurveId(pub u32);

#[derive(Debug)]
struct CurveEntry {
    id: CurveId,
    descriptor: CurveDescriptor,
    style: CurveStyle,
    /// Domain resolved at the last build; cleared by `reset_domains`
    domain: Option<(f64, f64)>,
    cached: Option<Curve>,
    built_version: u64,
    built_tick: u64,
}

impl CurveEntry {
    fn is_stale(&self, frame: &CoordinateFrame, tick: u64) -> bool {
        match &self.cached {
            None => true,
            Some(_) if self.domain.is_none() => true,
            Some(_) if self.built_version != frame.version() => true,
            Some(_) => self.descriptor.is_animated() && self.built_tick != tick,
        }
    }

    fn rebuild(&mut self, frame: &CoordinateFrame, sampler: &CurveSampler, tick: u64) {
        let curve = sampler.sample(&self.descriptor, frame, tick);
        log::debug!(
            "Rebuilt curve {} ({:?}): {} subpaths, {} points, frame v{}",
            self.id.0,
            curve.variant,
            curve.subpath_count(),
            curve.point_count(),
            frame.version()
        );
        self.domain = Some(curve.domain);
        self.cached = Some(curve);
        self.built_version = frame.version();
        self.built_tick = tick;
    }
}

/// All curves of a view
#[derive(Debug, Default)]
pub struct CurveRegistry {
    /// Sorted by id
    entries: Vec<CurveEntry>,
    next_id: u32,
}

impl CurveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, descriptor: CurveDescriptor, style: CurveStyle) -> CurveId {
        let id = CurveId(self.next_id);
        self.next_id += 1;
        self.entries.push(CurveEntry {
            id,
            descriptor,
            style,
            domain: None,
            cached: None,
            built_version: 0,
            built_tick: 0,
        });
        id
    }

    pub fn remove(&mut self, id: CurveId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CurveId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    fn entry(&self, id: CurveId) -> Option<&CurveEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn entry_mut(&mut self, id: CurveId) -> Option<&mut CurveEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    pub fn style(&self, id: CurveId) -> Option<&CurveStyle> {
        self.entry(id).map(|e| &e.style)
    }

    /// Domain resolved at the last build, if any
    pub fn domain(&self, id: CurveId) -> Option<(f64, f64)> {
        self.entry(id).and_then(|e| e.domain)
    }

    /// Last built samples without rebuilding
    pub fn cached(&self, id: CurveId) -> Option<&Curve> {
        self.entry(id).and_then(|e| e.cached.as_ref())
    }

    pub fn is_stale(&self, id: CurveId, frame: &CoordinateFrame, tick: u64) -> bool {
        self.entry(id).is_some_and(|e| e.is_stale(frame, tick))
    }

    /// Current samples, rebuilt first if stale
    pub fn get(
        &mut self,
        id: CurveId,
        frame: &CoordinateFrame,
        sampler: &CurveSampler,
        tick: u64,
    ) -> Option<&Curve> {
        let entry = self.entry_mut(id)?;
        if entry.is_stale(frame, tick) {
            entry.rebuild(frame, sampler, tick);
        }
        entry.cached.as_ref()
    }

    /// Forget every resolved domain so the next build starts from the
    /// declared (unzoomed) bounds
    pub fn reset_domains(&mut self) {
        for entry in &mut self.entries {
            entry.domain = None;
        }
    }

    /// Rebuild every curve against `frame` now
    pub fn rebuild_all(&mut self, frame: &CoordinateFrame, sampler: &CurveSampler, tick: u64) {
        for entry in &mut self.entries {
            entry.rebuild(frame, sampler, tick);
        }
    }

    /// Rebuild stale curves and visit every curve in id order
    pub fn for_each_current(
        &mut self,
        frame: &CoordinateFrame,
        sampler: &CurveSampler,
        tick: u64,
        mut visit: impl FnMut(CurveId, &CurveStyle, &Curve),
    ) {
        for entry in &mut self.entries {
            if entry.is_stale(frame, tick) {
                entry.rebuild(frame, sampler, tick);
            }
            if let Some(curve) = &entry.cached {
                visit(entry.id, &entry.style, curve);
            }
        }
    }
}
