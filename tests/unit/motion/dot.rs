use super::*;
use crate::foundation::core::{Point, Vec2};

fn marcher() -> Dot {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(4.0, 0.0);
    let c = Point::new(4.0, 0.0);
    let d = Point::new(10.0, 10.0);
    Dot::new(
        "A1",
        vec![
            MovementCommand::mark_time(a, 0.0, 2),
            MovementCommand::linear_step(a, Vec2::new(1.0, 0.0), 0.0, 4, 1),
            MovementCommand::arc(b, Point::new(2.0, 0.0), 180.0, 0.0, 4, 1),
            MovementCommand::teleport(Point::new(0.0, 0.0), d, 90.0, 2),
            MovementCommand::even_step(d, c, 90.0, 4, 2),
        ],
    )
}

#[test]
fn resolves_the_active_command() {
    let dot = marcher();
    assert_eq!(dot.total_beats(), 16);
    assert_eq!(dot.animation_state(0).unwrap().position(), Point::ZERO);
    assert_eq!(dot.animation_state(1).unwrap().position(), Point::ZERO);
    // Beat 2 is beat 0 of the linear step.
    assert_eq!(dot.animation_state(2).unwrap().position(), Point::ZERO);
    assert_eq!(
        dot.animation_state(5).unwrap().position(),
        Point::new(3.0, 0.0)
    );
}

#[test]
fn past_the_end_has_no_state() {
    let dot = marcher();
    assert!(dot.animation_state(15).is_some());
    assert_eq!(dot.animation_state(16), None);
    assert_eq!(dot.animation_state(u32::MAX), None);
    assert_eq!(Dot::new("empty", vec![]).animation_state(0), None);
}

#[test]
fn consecutive_commands_share_endpoints() {
    let dot = marcher();
    for pair in dot.commands.windows(2) {
        let (cur, next) = (&pair[0], &pair[1]);
        if matches!(next.motion, crate::motion::command::Motion::Teleport { .. }) {
            // A teleport is already at its end when it starts.
            assert_eq!(next.animation_state(0).position(), next.end_pos());
            continue;
        }
        let end = cur.end_pos();
        let start = next.animation_state(0).position();
        assert!((end - start).hypot() < 1e-9, "{end:?} vs {start:?}");
    }
}

#[test]
fn movement_path_lists_deltas() {
    let dot = marcher();
    let path = dot.movement_path();
    assert_eq!(path.len(), 5);
    assert_eq!(path[0], Vec2::ZERO);
    assert_eq!(path[1], Vec2::new(4.0, 0.0));
    assert!((path[2] - Vec2::new(-4.0, 0.0)).hypot() < 1e-9);
    assert_eq!(dot.start_pos(), Some(Point::ZERO));
}

#[test]
fn continuity_has_one_line_per_command() {
    let lines = marcher().continuity();
    assert_eq!(lines[0], "MT 2 E");
    assert_eq!(lines[1], "FM 4 E");
    assert_eq!(lines[2], "GT CW 180 deg");
    assert_eq!(lines.len(), 5);
}
