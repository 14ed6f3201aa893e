//! Turns a curve descriptor into screen-space subpaths
//!
//! A new subpath starts when:
//! - the function returns a non-finite value (the sample is dropped),
//! - the caller's `discontinuous_at` predicate fires and the two neighbours
//!   are not within the continuity tolerance,
//! - two neighbours sit on opposite sides of the surface, one past the top
//!   edge and the next past the bottom (or left/right), which is how
//!   asymptotes show up once sampled.

use super::descriptor::{CurveDescriptor, Variant};
use super::fill::{FillRegions, build_fills};
use super::{Curve, Subpath};
use crate::coords::{CoordinateFrame, ScreenPoint};
use crate::error::{EngineError, Result, ensure_positive};
use crate::settings::SamplingSettings;

/// Samples curve descriptors against a frame
#[derive(Debug, Clone, Default)]
pub struct CurveSampler {
    settings: SamplingSettings,
}

impl CurveSampler {
    pub fn new(settings: SamplingSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SamplingSettings {
        &self.settings
    }

    /// Sample `desc` at `tick`. Invalid steps or empty windows yield an empty
    /// curve rather than an error.
    pub fn sample(&self, desc: &CurveDescriptor, frame: &CoordinateFrame, tick: u64) -> Curve {
        match self.try_sample(desc, frame, tick) {
            Ok(curve) => curve,
            Err(e) => {
                log::debug!("Empty {:?} curve: {}", desc.variant(), e);
                Curve::empty(desc.variant(), frame.version())
            }
        }
    }

    /// Like [`Self::sample`] but reports why a curve came out empty
    pub fn try_sample(
        &self,
        desc: &CurveDescriptor,
        frame: &CoordinateFrame,
        tick: u64,
    ) -> Result<Curve> {
        let (start, end) = desc.resolve_domain(frame, tick);
        let step = ensure_positive("sampling step", desc.resolve_step(frame, &self.settings))?;
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(EngineError::EmptyDomain { start, end });
        }

        let span = end - start;
        // Shave rounding noise so an exact multiple does not grow a sliver interval
        let ratio = span / step;
        let mut count = (ratio - ratio * 1e-9).ceil().max(1.0) as usize;
        let mut step = step;
        let max_intervals = self.settings.max_samples.saturating_sub(1).max(1);
        if count > max_intervals {
            log::warn!(
                "{:?} curve needs {} samples, capping at {}",
                desc.variant(),
                count + 1,
                self.settings.max_samples
            );
            count = max_intervals;
            step = span / count as f64;
        }

        let mut subpaths: Vec<Subpath> = Vec::new();
        let mut current: Subpath = Vec::new();
        let mut prev: Option<(f64, ScreenPoint)> = None;

        for i in 0..=count {
            let u = if i == count {
                end
            } else {
                start + i as f64 * step
            };

            let real = desc.func.eval(u);
            if !real.is_finite() {
                flush(&mut current, &mut subpaths);
                prev = None;
                continue;
            }
            let screen = frame.real_to_screen(real);

            if let Some((prev_u, prev_screen)) = prev {
                if self.is_break(desc, (prev_u, prev_screen), (u, screen), frame) {
                    flush(&mut current, &mut subpaths);
                }
            }
            current.push(screen);
            prev = Some((u, screen));
        }
        flush(&mut current, &mut subpaths);

        let variant = desc.variant();
        let fills = if subpaths.is_empty() {
            FillRegions::empty(variant)
        } else {
            build_fills(variant, &subpaths, frame)
        };

        Ok(Curve {
            variant,
            domain: (start, end),
            subpaths,
            fills,
            frame_version: frame.version(),
        })
    }

    fn is_break(
        &self,
        desc: &CurveDescriptor,
        (prev_u, prev): (f64, ScreenPoint),
        (u, cur): (f64, ScreenPoint),
        frame: &CoordinateFrame,
    ) -> bool {
        if let Some(discontinuous_at) = &desc.discontinuous_at {
            if discontinuous_at(prev_u, u)
                && !prev.almost_equal(&cur, self.settings.continuity_tolerance)
            {
                return true;
            }
        }
        straddles_surface(desc.variant(), prev, cur, frame)
    }
}

/// One sample beyond one edge and the next beyond the opposite edge
fn straddles_surface(variant: Variant, a: ScreenPoint, b: ScreenPoint, frame: &CoordinateFrame) -> bool {
    let (w, h) = (frame.width(), frame.height());
    let vertical = (a.y < 0.0 && b.y > h) || (a.y > h && b.y < 0.0);
    let horizontal = (a.x < 0.0 && b.x > w) || (a.x > w && b.x < 0.0);
    match variant {
        Variant::Cartesian => vertical,
        Variant::Inverted => horizontal,
        Variant::Polar | Variant::Parametric => vertical || horizontal,
    }
}

fn flush(current: &mut Subpath, subpaths: &mut Vec<Subpath>) {
    if !current.is_empty() {
        subpaths.push(std::mem::take(current));
    }
}
