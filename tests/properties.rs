//! Property tests for the frame, the sampler and the shape engine

use glam::DVec2;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use graph_stage::render::DrawList;
use graph_stage::sim::{Body, EdgeRule, Scene};
use graph_stage::{
    CoordinateFrame, CurveDescriptor, CurveSampler, RealPoint, ScreenPoint, Shape, ZoomController,
    intersects,
};

fn any_scale() -> impl Strategy<Value = f64> {
    0.1_f64..1000.0
}

fn any_coord() -> impl Strategy<Value = f64> {
    -1000.0_f64..1000.0
}

fn any_factor() -> impl Strategy<Value = f64> {
    prop_oneof![0.01_f64..1.0, 1.0_f64..100.0]
}

fn any_shape() -> impl Strategy<Value = Shape> {
    let coord = -50.0_f64..50.0;
    let size = 0.0_f64..20.0;
    prop_oneof![
        (coord.clone(), coord.clone(), size.clone(), size.clone())
            .prop_map(|(x, y, w, h)| Shape::rect(x, y, w, h)),
        (coord.clone(), coord.clone(), size).prop_map(|(x, y, r)| Shape::circle(x, y, r)),
        (coord.clone(), coord.clone(), coord.clone(), coord)
            .prop_map(|(a, b, c, d)| Shape::segment(DVec2::new(a, b), DVec2::new(c, d))),
    ]
}

fn frame(ox: f64, oy: f64, scale: f64) -> CoordinateFrame {
    CoordinateFrame::new(800.0, 600.0, ScreenPoint::new(ox, oy), scale).unwrap()
}

proptest! {
    #[test]
    fn conversions_round_trip(
        ox in any_coord(),
        oy in any_coord(),
        scale in any_scale(),
        x in any_coord(),
        y in any_coord(),
    ) {
        let f = frame(ox, oy, scale);
        let p = RealPoint::new(x, y);
        let back = f.screen_to_real(f.real_to_screen(p));
        prop_assert!((back.x - x).abs() <= 1e-9, "x {x} -> {}", back.x);
        prop_assert!((back.y - y).abs() <= 1e-9, "y {y} -> {}", back.y);
    }

    #[test]
    fn zoom_one_restores_baseline(
        factors in prop::collection::vec(any_factor(), 0..8),
        px in any_coord(),
        py in any_coord(),
        scale in any_scale(),
    ) {
        let mut f = frame(400.0, 300.0, scale);
        for factor in factors {
            f.zoom(factor, ScreenPoint::new(px, py)).unwrap();
        }
        f.zoom(1.0, ScreenPoint::new(py, px)).unwrap();
        prop_assert_eq!(f.scale(), scale);
        prop_assert_eq!(f.origin(), ScreenPoint::new(400.0, 300.0));
        prop_assert_eq!(f.zoom_level(), 1.0);
    }

    #[test]
    fn zoom_keeps_pivot_fixed(
        factor in any_factor(),
        px in 0.0_f64..800.0,
        py in 0.0_f64..600.0,
        scale in any_scale(),
    ) {
        let mut f = frame(400.0, 300.0, scale);
        let pivot = ScreenPoint::new(px, py);
        let before = f.screen_to_real(pivot);
        f.zoom(factor, pivot).unwrap();
        let after = f.screen_to_real(pivot);
        let tolerance = 1e-9 * (800.0 / scale).max(1.0);
        prop_assert!((after.x - before.x).abs() <= tolerance);
        prop_assert!((after.y - before.y).abs() <= tolerance);
    }

    #[test]
    fn cartesian_samples_are_finite_and_ordered(
        a in -5.0_f64..5.0,
        b in -5.0_f64..5.0,
        c in -5.0_f64..5.0,
        factor in any_factor(),
    ) {
        let mut zc = ZoomController::new(frame(400.0, 300.0, 50.0), CurveSampler::default());
        let id = zc.add_curve(
            CurveDescriptor::cartesian(move |x| a / x + b * x + c),
            Default::default(),
        );
        zc.apply(factor, ScreenPoint::new(400.0, 300.0)).unwrap();
        let curve = zc.curve(id).unwrap();
        for subpath in &curve.subpaths {
            prop_assert!(!subpath.is_empty());
            for pair in subpath.windows(2) {
                prop_assert!(pair[0].is_finite() && pair[1].is_finite());
                prop_assert!(pair[1].x > pair[0].x);
            }
        }
    }

    #[test]
    fn intersection_is_symmetric(a in any_shape(), b in any_shape()) {
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    #[test]
    fn bounce_keeps_circle_inside(
        x in 10.0_f64..90.0,
        y in 10.0_f64..90.0,
        vx in -30.0_f64..30.0,
        vy in -30.0_f64..30.0,
        r in 1.0_f64..10.0,
    ) {
        let f = CoordinateFrame::centered(100.0, 100.0, 10.0).unwrap();
        let bounds = f.surface_rect();
        let mut body = Body::new(Shape::circle(x, y, r))
            .with_velocity(DVec2::new(vx, vy))
            .with_policy(EdgeRule::Bounce);
        for _ in 0..50 {
            body.update(&f, &bounds);
            let b = body.shape.bounds();
            prop_assert!(b.min_x() >= -1e-9 && b.max_x() <= 100.0 + 1e-9);
            prop_assert!(b.min_y() >= -1e-9 && b.max_y() <= 100.0 + 1e-9);
        }
    }
}

fn seeded_scene(seed: u64) -> Scene {
    let zc = ZoomController::new(frame(400.0, 300.0, 50.0), CurveSampler::default());
    let mut scene = Scene::new(zc);
    let mut rng = Pcg32::seed_from_u64(seed);
    for _ in 0..20 {
        let shape = Shape::circle(
            rng.random_range(50.0..750.0),
            rng.random_range(50.0..550.0),
            rng.random_range(2.0..20.0),
        );
        let velocity = DVec2::new(rng.random_range(-6.0..6.0), rng.random_range(-6.0..6.0));
        scene.add_body(
            Body::new(shape)
                .with_velocity(velocity)
                .with_acceleration(DVec2::new(0.0, 0.2))
                .with_policy(EdgeRule::Fence),
        );
    }
    scene
}

#[test]
fn fenced_scene_stays_on_surface() {
    let mut scene = seeded_scene(7);
    let mut list = DrawList::new();
    for _ in 0..500 {
        list.clear();
        scene.tick(&mut list);
    }
    assert_eq!(scene.bodies().len(), 20);
    for body in scene.bodies() {
        let b = body.shape.bounds();
        assert!(b.min_x() >= -1e-9 && b.max_x() <= 800.0 + 1e-9, "{body:?}");
        assert!(b.min_y() >= -1e-9 && b.max_y() <= 600.0 + 1e-9, "{body:?}");
    }
}

#[test]
fn seeded_scenes_are_deterministic() {
    let mut a = seeded_scene(99);
    let mut b = seeded_scene(99);
    let mut list = DrawList::new();
    for _ in 0..200 {
        a.tick(&mut list);
        b.tick(&mut list);
        assert_eq!(a.events(), b.events());
    }
    let positions = |s: &Scene| s.bodies().iter().map(|b| b.shape.position()).collect::<Vec<_>>();
    assert_eq!(positions(&a), positions(&b));
}
