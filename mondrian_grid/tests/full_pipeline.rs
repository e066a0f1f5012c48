// End-to-end tests: config → scene → regenerate → motion → JSON export.
//
// These go through the public API only, the same path the `generate`
// binary takes.

use mondrian_grid::black_hole::BlackHole;
use mondrian_grid::chase::ChaseGame;
use mondrian_grid::config::GridConfig;
use mondrian_grid::prng::GridRng;
use mondrian_grid::scene::Scene;
use mondrian_grid::types::LaneKind;

const EPS: f64 = 1e-9;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

#[test]
fn default_scene_fills_the_canvas() {
    for seed in [0, 1, 42, 9001] {
        let scene = Scene::new(GridConfig::default(), seed);
        let layout = scene.layout();
        assert_eq!(layout.col_widths.len(), 10);
        assert_eq!(layout.col_gaps.len(), 9);
        assert_eq!(layout.row_heights.len(), 10);
        assert_eq!(layout.row_gaps.len(), 9);

        let cols: f64 = layout.col_widths.iter().chain(&layout.col_gaps).sum();
        let rows: f64 = layout.row_heights.iter().chain(&layout.row_gaps).sum();
        assert_close(cols, 900.0);
        assert_close(rows, 900.0);
        assert_close(layout.col_end(9), 900.0);
        assert_close(layout.row_end(9), 900.0);

        for gap in layout.col_gaps.iter().chain(&layout.row_gaps) {
            assert!((12.0..=18.0).contains(gap), "gap {gap}");
        }
    }
}

#[test]
fn same_seed_reproduces_every_generation() {
    let mut a = Scene::new(GridConfig::default(), 2024);
    let mut b = Scene::new(GridConfig::default(), 2024);
    for _ in 0..3 {
        assert_eq!(a.to_json(false).unwrap(), b.to_json(false).unwrap());
        a.regenerate();
        b.regenerate();
    }
}

#[test]
fn different_seeds_differ() {
    let a = Scene::new(GridConfig::default(), 1);
    let b = Scene::new(GridConfig::default(), 2);
    assert_ne!(a.layout(), b.layout());
}

#[test]
fn regenerate_keeps_derived_data_consistent() {
    let mut scene = Scene::new(GridConfig::default(), 77);
    for _ in 0..5 {
        scene.regenerate();
        let composition = scene.composition();
        let layout = &composition.layout;
        for block in &composition.blocks.primary {
            assert!(layout.cell(block.row, block.col).contains_rect(&block.rect, EPS));
        }
        for agent in scene.agents() {
            match agent.kind {
                LaneKind::Vertical => assert_eq!(agent.size, layout.col_gaps[agent.lane]),
                LaneKind::Horizontal => assert_eq!(agent.size, layout.row_gaps[agent.lane]),
            }
        }
        assert!(composition.connectors.len() <= 12);
    }
}

#[test]
fn agents_stay_in_wrap_range_while_moving() {
    let mut scene = Scene::new(GridConfig::default(), 5);
    scene.motion.set_speed_percent(300.0);
    for _ in 0..1000 {
        scene.tick(None);
    }
    for agent in scene.agents() {
        let pos = match agent.kind {
            LaneKind::Vertical => agent.y,
            LaneKind::Horizontal => agent.x,
        };
        assert!(pos >= -agent.size && pos <= 900.0, "agent escaped to {pos}");
    }
}

#[test]
fn hole_clears_its_disc() {
    let mut scene = Scene::new(GridConfig::default(), 8);
    let (x, y) = scene.agents()[0].center();
    let mut hole = BlackHole::new(x, y);
    hole.adjust(-1e6);
    let before = scene.agents().len();
    let mut swallowed = 0;
    for _ in 0..200 {
        swallowed += scene.tick(Some(&hole));
        assert!(scene.agents().iter().all(|a| !hole.swallows(a)));
    }
    assert!(swallowed >= 1);
    assert_eq!(scene.agents().len(), before - swallowed);

    // Swallowed agents come back only with a new generation.
    scene.regenerate();
    assert!(!scene.agents().is_empty());
}

#[test]
fn json_config_overrides_defaults() {
    let config = GridConfig::from_json(r#"{
        "canvas": [600.0, 400.0],
        "columns": {
            "count": 4,
            "gap_base": 15.0,
            "gap_delta": 3.0,
            "min_size": 20.0,
            "max_size": 280.0,
            "center_power": 2.2,
            "spread": 2.0
        }
    }"#)
    .unwrap();
    config.validate().unwrap();
    let scene = Scene::new(config, 3);
    let layout = scene.layout();
    assert_eq!(layout.cols(), 4);
    assert_eq!(layout.rows(), 10);
    let cols: f64 = layout.col_widths.iter().chain(&layout.col_gaps).sum();
    assert_close(cols, 600.0);
}

#[test]
fn chase_runs_over_a_scene_layout() {
    let scene = Scene::new(GridConfig::default(), 12);
    let mut rng = GridRng::new(12);
    let mut game = ChaseGame::new(scene.layout(), &mut rng).unwrap();
    for _ in 0..600 {
        game.update(scene.layout(), 1000.0 / 60.0, 1.0, &mut rng);
    }
    assert_eq!(game.chasers.len(), 3);
    let (x, y) = game.runner.center();
    assert!(x.is_finite() && y.is_finite());
}
