//! Auxiliary fill regions on either side of a sampled curve
//!
//! Each subpath gets its own pair of regions. Regions are sets of closed
//! rings filled with the even-odd rule.

use serde::{Deserialize, Serialize};

use super::{Subpath, Variant};
use crate::coords::{CoordinateFrame, ScreenPoint};

/// How the two regions of a pair relate to the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillKind {
    /// Cartesian: between the curve and the top / bottom surface edge
    AboveBelow,
    /// Inverted: between the curve and the left / right surface edge
    LeftRight,
    /// Polar and parametric: enclosed by the curve / the rest of the surface
    InsideOutside,
}

impl FillKind {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Cartesian => FillKind::AboveBelow,
            Variant::Inverted => FillKind::LeftRight,
            Variant::Polar | Variant::Parametric => FillKind::InsideOutside,
        }
    }
}

/// Closed rings, filled even-odd
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillRegion {
    pub rings: Vec<Vec<ScreenPoint>>,
}

impl FillRegion {
    /// Even-odd point-in-region test
    pub fn contains(&self, p: ScreenPoint) -> bool {
        self.rings
            .iter()
            .filter(|ring| ring_contains(ring, p))
            .count()
            % 2
            == 1
    }
}

/// Ray-casting test against one implicitly closed ring
fn ring_contains(ring: &[ScreenPoint], p: ScreenPoint) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// The two regions for every subpath, index-aligned with the subpaths that
/// have at least two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRegions {
    pub kind: FillKind,
    /// Above, left or inside
    pub first: Vec<FillRegion>,
    /// Below, right or outside
    pub second: Vec<FillRegion>,
}

impl FillRegions {
    pub fn empty(variant: Variant) -> Self {
        Self {
            kind: FillKind::for_variant(variant),
            first: Vec::new(),
            second: Vec::new(),
        }
    }
}

/// Close every subpath against the surface edges
pub fn build_fills(variant: Variant, subpaths: &[Subpath], frame: &CoordinateFrame) -> FillRegions {
    let mut fills = FillRegions::empty(variant);
    let (w, h) = (frame.width(), frame.height());

    for path in subpaths.iter().filter(|p| p.len() >= 2) {
        let (head, tail) = (path[0], path[path.len() - 1]);
        let (first, second) = match fills.kind {
            FillKind::AboveBelow => (
                extend(path, [ScreenPoint::new(tail.x, 0.0), ScreenPoint::new(head.x, 0.0)]),
                extend(path, [ScreenPoint::new(tail.x, h), ScreenPoint::new(head.x, h)]),
            ),
            FillKind::LeftRight => (
                extend(path, [ScreenPoint::new(0.0, tail.y), ScreenPoint::new(0.0, head.y)]),
                extend(path, [ScreenPoint::new(w, tail.y), ScreenPoint::new(w, head.y)]),
            ),
            FillKind::InsideOutside => (
                FillRegion {
                    rings: vec![path.clone()],
                },
                FillRegion {
                    rings: vec![frame.surface_rect().corners().to_vec(), path.clone()],
                },
            ),
        };
        fills.first.push(first);
        fills.second.push(second);
    }
    fills
}

fn extend(path: &[ScreenPoint], closing: [ScreenPoint; 2]) -> FillRegion {
    let mut ring = Vec::with_capacity(path.len() + 2);
    ring.extend_from_slice(path);
    ring.extend_from_slice(&closing);
    FillRegion { rings: vec![ring] }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> CoordinateFrame {
        CoordinateFrame::centered(100.0, 100.0, 10.0).unwrap()
    }

    #[test]
    fn test_above_below_split_at_curve() {
        // Horizontal line across the middle of the surface
        let path = vec![ScreenPoint::new(0.0, 50.0), ScreenPoint::new(100.0, 50.0)];
        let fills = build_fills(Variant::Cartesian, &[path], &frame());
        assert_eq!(fills.kind, FillKind::AboveBelow);
        assert!(fills.first[0].contains(ScreenPoint::new(50.0, 25.0)));
        assert!(!fills.first[0].contains(ScreenPoint::new(50.0, 75.0)));
        assert!(fills.second[0].contains(ScreenPoint::new(50.0, 75.0)));
    }

    #[test]
    fn test_inside_outside_are_complements() {
        let square = vec![
            ScreenPoint::new(40.0, 40.0),
            ScreenPoint::new(60.0, 40.0),
            ScreenPoint::new(60.0, 60.0),
            ScreenPoint::new(40.0, 60.0),
        ];
        let fills = build_fills(Variant::Polar, &[square], &frame());
        let centre = ScreenPoint::new(50.0, 50.0);
        let corner = ScreenPoint::new(5.0, 5.0);
        assert!(fills.first[0].contains(centre));
        assert!(!fills.second[0].contains(centre));
        assert!(fills.second[0].contains(corner));
        assert!(!fills.first[0].contains(corner));
    }

    #[test]
    fn test_single_point_subpath_has_no_fill() {
        let fills = build_fills(
            Variant::Cartesian,
            &[vec![ScreenPoint::new(1.0, 1.0)]],
            &frame(),
        );
        assert!(fills.first.is_empty());
        assert!(fills.second.is_empty());
    }
}
