//! Graph Stage demo entry point
//!
//! Builds a small scene of curves and bouncing shapes, runs it headless
//! against a recording surface and prints a JSON summary.
//!
//! Usage: `graph-stage [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Graph Stage (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => graph_stage::Settings::load_or_default(path),
        None => graph_stage::Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    match demo::run(&settings, seed) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        },
        Err(e) => {
            log::error!("Demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;

    use graph_stage::render::{CurveStyle, DrawList, ShapeStyle, colors};
    use graph_stage::sim::{Body, BoundaryPolicy, EdgeRule, SceneEvent, SceneStats};
    use graph_stage::{Bound, CurveDescriptor, Result, Scene, ScreenPoint, Settings, Shape};

    const TICKS: u64 = 240;
    const ZOOM_AT: u64 = 120;
    const BODY_COUNT: usize = 12;

    #[derive(Debug, Default, Serialize)]
    pub struct EventCounts {
        pub collisions: usize,
        pub destroyed: usize,
        pub entered: usize,
        pub zooms: usize,
    }

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub stats: SceneStats,
        pub events: EventCounts,
        pub last_frame_commands: usize,
        pub curve_points: usize,
    }

    pub fn run(settings: &Settings, seed: u64) -> Result<Summary> {
        let mut scene = Scene::from_settings(settings)?;
        add_curves(&mut scene);
        add_bodies(&mut scene, seed);

        let mut events = EventCounts::default();
        let mut list = DrawList::new();
        let center = {
            let f = scene.frame();
            ScreenPoint::new(f.width() / 2.0, f.height() / 2.0)
        };

        for tick in 1..=TICKS {
            if tick == ZOOM_AT {
                scene.request_zoom(0.5, center)?;
            }
            list.clear();
            scene.tick(&mut list);
            for event in scene.events() {
                match event {
                    SceneEvent::Collision { .. } => events.collisions += 1,
                    SceneEvent::Destroyed { .. } => events.destroyed += 1,
                    SceneEvent::Entered { .. } => events.entered += 1,
                    SceneEvent::Zoomed { .. } => events.zooms += 1,
                }
            }
            if tick % 60 == 0 {
                log::info!("Tick {}: {:?}", tick, scene.stats());
            }
        }

        let ids: Vec<_> = scene.zoom_controller().curves().ids().collect();
        let curve_points = ids
            .into_iter()
            .filter_map(|id| scene.curve(id).map(|c| c.point_count()))
            .sum();

        Ok(Summary {
            seed,
            stats: scene.stats(),
            events,
            last_frame_commands: list.len(),
            curve_points,
        })
    }

    fn add_curves(scene: &mut Scene) {
        scene.add_curve(
            CurveDescriptor::cartesian(f64::sin),
            CurveStyle::stroke(colors::CURVE, 2.0)
                .with_fills(Some(colors::FILL_ABOVE), Some(colors::FILL_BELOW)),
        );
        scene.add_curve(
            CurveDescriptor::cartesian(f64::tan),
            CurveStyle::stroke(colors::AXIS, 1.0),
        );
        scene.add_curve(
            CurveDescriptor::polar(|theta| 2.0 * (3.0 * theta).cos()),
            CurveStyle::stroke(colors::CURVE, 1.5),
        );
        // Lissajous figure that draws itself over the first 200 ticks
        scene.add_curve(
            CurveDescriptor::parametric(|t| {
                let a = t * std::f64::consts::TAU;
                DVec2::new(3.0 * (3.0 * a).sin(), 2.0 * (2.0 * a).sin())
            })
            .domain(0.0, Bound::animated(|tick| (tick as f64 / 200.0).min(1.0))),
            CurveStyle::stroke(colors::CURVE, 1.0),
        );
    }

    fn add_bodies(scene: &mut Scene, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let (w, h) = (scene.frame().width(), scene.frame().height());
        let rules = [EdgeRule::Bounce, EdgeRule::Wrap, EdgeRule::Fence, EdgeRule::Destroy];

        for i in 0..BODY_COUNT {
            let x = rng.random_range(0.1 * w..0.9 * w);
            let y = rng.random_range(0.1 * h..0.9 * h);
            let size = rng.random_range(4.0..16.0);
            let shape = match i % 3 {
                0 => Shape::circle(x, y, size),
                1 => Shape::rect(x, y, size * 2.0, size),
                _ => Shape::segment(DVec2::new(x, y), DVec2::new(x + size, y + size)),
            };
            let velocity = DVec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
            let rule = rules[rng.random_range(0..rules.len())].clone();
            let body = Body::new(shape)
                .with_velocity(velocity)
                .with_acceleration(DVec2::new(0.0, 0.05))
                .with_policy(BoundaryPolicy::symmetric(EdgeRule::Bounce, rule))
                .with_style(ShapeStyle {
                    color: colors::SHAPE,
                    filled: i % 2 == 0,
                })
                .on_destroy(|body| log::info!("Body {} left the stage", body.id));
            scene.add_body(body);
        }
    }
}
