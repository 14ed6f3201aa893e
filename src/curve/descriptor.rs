//! Curve descriptors: what to sample and over which window

use std::f64::consts::TAU;
use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::coords::{CoordinateFrame, RealPoint};
use crate::polar_to_cartesian;
use crate::settings::SamplingSettings;

pub type ScalarFn = Box<dyn Fn(f64) -> f64>;
pub type PointFn = Box<dyn Fn(f64) -> DVec2>;
pub type BreakFn = Box<dyn Fn(f64, f64) -> bool>;
pub type TickFn = Box<dyn Fn(u64) -> f64>;

/// Which axis is independent and how a sample becomes a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// y = f(x)
    Cartesian,
    /// x = f(y)
    Inverted,
    /// r = f(θ)
    Polar,
    /// (x, y) = f(t)
    Parametric,
}

/// The sampled function, tagged with its variant
pub enum CurveFn {
    Cartesian(ScalarFn),
    Inverted(ScalarFn),
    Polar(ScalarFn),
    Parametric(PointFn),
}

impl CurveFn {
    pub fn variant(&self) -> Variant {
        match self {
            CurveFn::Cartesian(_) => Variant::Cartesian,
            CurveFn::Inverted(_) => Variant::Inverted,
            CurveFn::Polar(_) => Variant::Polar,
            CurveFn::Parametric(_) => Variant::Parametric,
        }
    }

    /// Real-plane point for domain value `u`
    pub fn eval(&self, u: f64) -> RealPoint {
        match self {
            CurveFn::Cartesian(f) => RealPoint::new(u, f(u)),
            CurveFn::Inverted(f) => RealPoint::new(f(u), u),
            CurveFn::Polar(f) => polar_to_cartesian(f(u), u).into(),
            CurveFn::Parametric(f) => f(u).into(),
        }
    }
}

impl fmt::Debug for CurveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurveFn::{:?}", self.variant())
    }
}

/// One end of a sampling window
pub enum Bound {
    Value(f64),
    /// Edge of the visible window (cartesian/inverted), `0`/`2π` for polar,
    /// `0`/`1` for parametric
    Visible,
    /// Re-evaluated every tick, for animated reveals
    Animated(TickFn),
}

impl Bound {
    pub fn animated(f: impl Fn(u64) -> f64 + 'static) -> Self {
        Bound::Animated(Box::new(f))
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Bound::Animated(_))
    }

    fn resolve(&self, visible: f64, tick: u64) -> f64 {
        match self {
            Bound::Value(v) => *v,
            Bound::Visible => visible,
            Bound::Animated(f) => f(tick),
        }
    }
}

impl From<f64> for Bound {
    fn from(v: f64) -> Self {
        Bound::Value(v)
    }
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Value(v) => write!(f, "Value({v})"),
            Bound::Visible => write!(f, "Visible"),
            Bound::Animated(_) => write!(f, "Animated"),
        }
    }
}

/// Everything the sampler needs to build a [`super::Curve`]
pub struct CurveDescriptor {
    pub func: CurveFn,
    pub start: Bound,
    pub end: Bound,
    /// Pixels for cartesian/inverted, domain units otherwise. Falls back to
    /// the sampling settings when unset.
    pub step: Option<f64>,
    /// Flags a possible discontinuity between two adjacent domain values
    pub discontinuous_at: Option<BreakFn>,
    /// Rebuild every tick even when the frame is unchanged
    pub animated: bool,
}

impl CurveDescriptor {
    pub fn new(func: CurveFn) -> Self {
        Self {
            func,
            start: Bound::Visible,
            end: Bound::Visible,
            step: None,
            discontinuous_at: None,
            animated: false,
        }
    }

    pub fn cartesian(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::new(CurveFn::Cartesian(Box::new(f)))
    }

    pub fn inverted(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::new(CurveFn::Inverted(Box::new(f)))
    }

    pub fn polar(f: impl Fn(f64) -> f64 + 'static) -> Self {
        Self::new(CurveFn::Polar(Box::new(f)))
    }

    pub fn parametric(f: impl Fn(f64) -> DVec2 + 'static) -> Self {
        Self::new(CurveFn::Parametric(Box::new(f)))
    }

    pub fn domain(mut self, start: impl Into<Bound>, end: impl Into<Bound>) -> Self {
        self.start = start.into();
        self.end = end.into();
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_breaks(mut self, f: impl Fn(f64, f64) -> bool + 'static) -> Self {
        self.discontinuous_at = Some(Box::new(f));
        self
    }

    /// Mark the function itself as time-varying
    pub fn animated(mut self) -> Self {
        self.animated = true;
        self
    }

    pub fn variant(&self) -> Variant {
        self.func.variant()
    }

    /// Needs a rebuild every tick
    pub fn is_animated(&self) -> bool {
        self.animated || self.start.is_animated() || self.end.is_animated()
    }

    /// Resolve the declared bounds against `frame` at `tick`
    pub fn resolve_domain(&self, frame: &CoordinateFrame, tick: u64) -> (f64, f64) {
        let (lo, hi) = match self.variant() {
            Variant::Cartesian => {
                let b = frame.visible_real_bounds();
                (b.min_x, b.max_x)
            }
            Variant::Inverted => {
                let b = frame.visible_real_bounds();
                (b.min_y, b.max_y)
            }
            Variant::Polar => (0.0, TAU),
            Variant::Parametric => (0.0, 1.0),
        };
        (self.start.resolve(lo, tick), self.end.resolve(hi, tick))
    }

    /// Step in domain units. Cartesian/inverted steps are pixels, so they
    /// shrink in real units as the frame zooms in.
    pub fn resolve_step(&self, frame: &CoordinateFrame, settings: &SamplingSettings) -> f64 {
        match self.variant() {
            Variant::Cartesian | Variant::Inverted => {
                self.step.unwrap_or(settings.pixel_step) / frame.scale()
            }
            Variant::Polar => self.step.unwrap_or(settings.polar_step),
            Variant::Parametric => self.step.unwrap_or(settings.parametric_step),
        }
    }
}

impl fmt::Debug for CurveDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveDescriptor")
            .field("func", &self.func)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("step", &self.step)
            .field("discontinuous_at", &self.discontinuous_at.is_some())
            .field("animated", &self.animated)
            .finish()
    }
}
