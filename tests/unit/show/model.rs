use super::*;
use crate::foundation::core::{Point, Vec2};
use crate::show::fixtures::marching_show;

#[test]
fn fixture_is_valid() {
    let show = marching_show(&[4, 8, 2]);
    show.validate().unwrap();
    assert_eq!(show.total_beats(), 14);
    assert_eq!(show.sheet_start_beat(0), 0);
    assert_eq!(show.sheet_start_beat(2), 12);
    assert_eq!(show.sheet_start_beat(99), 14);
}

#[test]
fn dot_by_label_finds_dot() {
    let show = marching_show(&[4]);
    assert!(show.sheets[0].dot_by_label("A1").is_some());
    assert!(show.sheets[0].dot_by_label("B2").is_none());
}

#[test]
fn rejects_empty_show() {
    let show = Show {
        title: String::new(),
        sheets: vec![],
    };
    assert!(matches!(show.validate(), Err(DrillError::Validation(_))));
}

#[test]
fn rejects_zero_duration_sheet() {
    let mut show = marching_show(&[4]);
    show.sheets[0].duration = 0;
    show.sheets[0].dots.clear();
    let err = show.validate().unwrap_err();
    assert!(err.to_string().contains("zero duration"));
}

#[test]
fn rejects_mismatched_dot_duration() {
    let mut show = marching_show(&[4]);
    show.sheets[0].duration = 5;
    let err = show.validate().unwrap_err();
    assert!(err.to_string().contains("moves for 4 beats"));
}

#[test]
fn rejects_duplicate_labels() {
    let mut show = marching_show(&[4]);
    let dup = show.sheets[0].dots[0].clone();
    show.sheets[0].dots.push(dup);
    let err = show.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate dot label"));
}

#[test]
fn rejects_zero_beats_per_step() {
    let mut show = marching_show(&[4]);
    show.sheets[0].dots[0].commands[0] =
        MovementCommand::even_step(Point::ZERO, Point::new(1.0, 0.0), 0.0, 4, 0);
    let err = show.validate().unwrap_err();
    assert!(err.to_string().contains("beats_per_step"));
}

#[test]
fn rejects_non_finite_geometry() {
    let mut show = marching_show(&[4]);
    show.sheets[0].dots[0].commands[0] =
        MovementCommand::linear_step(Point::ZERO, Vec2::new(f64::NAN, 0.0), 0.0, 4, 1);
    let err = show.validate().unwrap_err();
    assert!(err.to_string().contains("finite"));
}

#[test]
fn json_roundtrip_preserves_show() {
    let show = marching_show(&[2, 3]);
    let json = show.to_json_pretty().unwrap();
    assert!(json.contains("\"type\": \"linear_step\""));
    let back = Show::from_json(&json).unwrap();
    assert_eq!(back, show);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Show::from_json("{ \"sheets\": 3 }").unwrap_err();
    assert!(matches!(err, DrillError::Serde(_)));
}

#[test]
fn rejects_discontinuous_commands() {
    let mut show = marching_show(&[8]);
    show.sheets[0].dots[0].commands = vec![
        MovementCommand::linear_step(Point::ZERO, Vec2::new(1.0, 0.0), 0.0, 4, 1),
        MovementCommand::stand(Point::new(50.0, 50.0), 0.0, 4),
    ];
    let err = show.validate().unwrap_err();
    assert!(matches!(err, DrillError::Validation(_)));
    assert!(err.to_string().contains("command 1 starts at (50, 50)"));
}

#[test]
fn accepts_joined_commands_within_tolerance() {
    let mut show = marching_show(&[8]);
    let arc = MovementCommand::arc(Point::new(4.0, 0.0), Point::ZERO, 90.0, 0.0, 4, 1);
    // The arc's computed end is (0, 4) up to rounding.
    let end = arc.end_pos();
    show.sheets[0].dots[0].commands = vec![
        arc,
        MovementCommand::teleport(end, Point::new(9.0, 9.0), 0.0, 2),
        MovementCommand::close(Point::new(9.0, 9.0), 0.0, 2),
    ];
    show.validate().unwrap();

    show.sheets[0].dots[0].commands[2] = MovementCommand::close(Point::new(0.0, 4.0), 0.0, 2);
    assert!(show.validate().is_err());
}
