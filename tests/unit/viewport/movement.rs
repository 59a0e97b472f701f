use super::*;
use crate::foundation::core::{Point, Vec2};

fn cfg() -> ViewportConfig {
    ViewportConfig::default()
}

#[test]
fn single_point_centers_on_start() {
    let start = Point::new(12.0, -7.0);
    let vp = MovementViewport::fit(start, &[], 0.75, &cfg()).unwrap();
    assert_eq!(vp.width, 20.0);
    assert_eq!(vp.height, 15.0);
    assert_eq!(vp.height / vp.width, 0.75);
    assert_eq!(vp.south, 2.0);
    assert_eq!(vp.north, 22.0);
    assert_eq!(vp.west, -14.5);
    assert_eq!(vp.east, 0.5);
    assert_eq!(vp.center(), start);
}

#[test]
fn zero_displacements_match_empty_path() {
    let start = Point::new(1.0, 1.0);
    let a = MovementViewport::fit(start, &[], 0.5, &cfg()).unwrap();
    let b = MovementViewport::fit(start, &[Vec2::ZERO, Vec2::ZERO], 0.5, &cfg()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn grows_wide_path_and_keeps_aspect() {
    // 40 steps east: wider than the 20-step minimum.
    let path = [Vec2::new(16.0, 0.0), Vec2::new(24.0, 0.0)];
    let vp = MovementViewport::fit(Point::ZERO, &path, 0.5, &cfg()).unwrap();
    assert_eq!(vp.width, 44.0);
    assert_eq!(vp.height, 22.0);
    // Centered on the box (0..40), not on the start point.
    assert_eq!(vp.center(), Point::new(20.0, 0.0));
}

#[test]
fn grows_tall_path_and_rescales_width() {
    let path = [Vec2::new(0.0, -30.0)];
    let vp = MovementViewport::fit(Point::new(5.0, 5.0), &path, 0.5, &cfg()).unwrap();
    assert_eq!(vp.height, 34.0);
    assert_eq!(vp.width, 68.0);
    assert!(vp.width >= cfg().min_steps_visible);
    assert_eq!(vp.center(), Point::new(5.0, -10.0));
}

#[test]
fn both_checks_apply_in_sequence() {
    // Width grows first to 34, height follows to 17, then the 26-step height wins.
    let path = [Vec2::new(30.0, 22.0)];
    let vp = MovementViewport::fit(Point::ZERO, &path, 0.5, &cfg()).unwrap();
    assert_eq!(vp.height, 26.0);
    assert_eq!(vp.width, 52.0);
    assert!(vp.width >= 30.0 + cfg().margin);
}

#[test]
fn frame_contains_every_visited_point() {
    let start = Point::new(-3.0, 8.0);
    let path = [
        Vec2::new(4.0, 0.0),
        Vec2::new(0.0, -12.0),
        Vec2::new(-20.0, 3.0),
        Vec2::new(6.0, 30.0),
    ];
    let vp = MovementViewport::fit(start, &path, 9.0 / 16.0, &cfg()).unwrap();
    let mut p = start;
    assert!(vp.contains(p));
    for d in path {
        p += d;
        assert!(vp.contains(p), "{p:?} outside {vp:?}");
    }
    assert!((vp.height / vp.width - 9.0 / 16.0).abs() < 1e-12);
}

#[test]
fn rejects_bad_inputs() {
    assert!(MovementViewport::fit(Point::ZERO, &[], 0.0, &cfg()).is_err());
    assert!(MovementViewport::fit(Point::ZERO, &[], f64::NAN, &cfg()).is_err());
    let bad = ViewportConfig {
        min_steps_visible: 0.0,
        margin: 1.0,
    };
    assert!(MovementViewport::fit(Point::ZERO, &[], 1.0, &bad).is_err());
    let bad = ViewportConfig {
        min_steps_visible: 10.0,
        margin: -1.0,
    };
    assert!(bad.validate().is_err());
}

#[test]
fn config_defaults_fill_missing_fields() {
    let c: ViewportConfig = serde_json::from_str(r#"{"margin": 2.0}"#).unwrap();
    assert_eq!(c.min_steps_visible, 20.0);
    assert_eq!(c.margin, 2.0);
}
