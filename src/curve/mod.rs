//! Curve sampling
//!
//! A descriptor names a function and a window; the sampler walks the window
//! and produces screen-space subpaths broken at discontinuities, plus fill
//! regions on either side. The registry caches curves per frame version.

pub mod descriptor;
pub mod fill;
pub mod registry;
pub mod sampler;

pub use descriptor::{Bound, CurveDescriptor, CurveFn, Variant};
pub use fill::{FillKind, FillRegion, FillRegions};
pub use registry::{CurveId, CurveRegistry};
pub use sampler::CurveSampler;

use serde::{Deserialize, Serialize};

use crate::coords::ScreenPoint;

/// A maximal continuous run of samples
pub type Subpath = Vec<ScreenPoint>;

/// A sampled curve. Consumers must not assume a single continuous path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub variant: Variant,
    /// Resolved sampling window
    pub domain: (f64, f64),
    pub subpaths: Vec<Subpath>,
    pub fills: FillRegions,
    /// Frame version the samples were computed against
    pub frame_version: u64,
}

impl Curve {
    pub fn empty(variant: Variant, frame_version: u64) -> Self {
        Self {
            variant,
            domain: (0.0, 0.0),
            subpaths: Vec::new(),
            fills: FillRegions::empty(variant),
            frame_version,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn subpath_count(&self) -> usize {
        self.subpaths.len()
    }

    /// Total samples across all subpaths
    pub fn point_count(&self) -> usize {
        self.subpaths.iter().map(Vec::len).sum()
    }

    pub fn points(&self) -> impl Iterator<Item = &ScreenPoint> {
        self.subpaths.iter().flatten()
    }
}
