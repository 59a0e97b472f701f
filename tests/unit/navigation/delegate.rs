use super::*;
use crate::foundation::core::Point;
use crate::show::fixtures::marching_show;

fn delegate(durations: &[u32]) -> AnimationStateDelegate {
    AnimationStateDelegate::new(Arc::new(marching_show(durations)))
}

fn at(d: &AnimationStateDelegate) -> (usize, u32) {
    (d.current_sheet_index(), d.current_beat())
}

#[test]
fn starts_at_origin() {
    let d = delegate(&[4, 4]);
    assert_eq!(at(&d), (0, 0));
    assert_eq!(d.selected_dot(), None);
    assert!(!d.has_prev_beat());
    assert!(!d.has_prev_sheet());
    assert!(d.has_next_beat());
    assert!(d.has_next_sheet());
}

#[test]
fn next_beat_rolls_into_next_sheet() {
    let mut d = delegate(&[3, 2]);
    let mut seen = vec![at(&d)];
    while d.has_next_beat() {
        d.next_beat();
        seen.push(at(&d));
    }
    assert_eq!(seen, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1)]);
    assert_eq!(d.absolute_beat(), 4);
}

#[test]
fn prev_beat_rolls_back_onto_last_beat() {
    let mut d = delegate(&[3, 2]);
    d.goto(1, 0);
    d.prev_beat();
    assert_eq!(at(&d), (0, 2));
    d.prev_beat();
    assert_eq!(at(&d), (0, 1));
}

#[test]
fn boundaries_are_idempotent() {
    let mut d = delegate(&[2, 2]);
    for _ in 0..3 {
        d.prev_beat();
        assert_eq!(at(&d), (0, 0));
    }
    d.goto(1, 1);
    assert!(!d.has_next_beat());
    for _ in 0..3 {
        d.next_beat();
        assert_eq!(at(&d), (1, 1));
    }
}

#[test]
fn next_sheet_on_last_sheet_clamps_to_last_beat() {
    let mut d = delegate(&[4, 6]);
    d.next_sheet();
    assert_eq!(at(&d), (1, 0));
    d.next_sheet();
    assert_eq!(at(&d), (1, 5));
}

#[test]
fn prev_sheet_on_first_sheet_resets_beat() {
    let mut d = delegate(&[4, 6]);
    d.goto(1, 3);
    d.prev_sheet();
    assert_eq!(at(&d), (0, 0));
    d.goto(0, 3);
    d.prev_sheet();
    assert_eq!(at(&d), (0, 0));
}

#[test]
fn goto_clamps_into_show() {
    let mut d = delegate(&[4, 6]);
    d.goto(9, 99);
    assert_eq!(at(&d), (1, 5));
}

#[test]
fn set_show_resets_state() {
    let mut d = delegate(&[4, 6]);
    d.goto(1, 2);
    d.select_dot("A1");
    d.set_show(Arc::new(marching_show(&[8])));
    assert_eq!(at(&d), (0, 0));
    assert_eq!(d.selected_dot(), None);
    assert_eq!(d.show().sheets.len(), 1);
}

#[test]
fn selection_and_states() {
    let mut d = delegate(&[4, 4]);
    assert_eq!(d.selected_dot_state(), None);
    d.select_dot("A1");
    assert_eq!(d.selected_dot(), Some("A1"));
    d.goto(1, 2);
    let s = d.selected_dot_state().unwrap();
    assert_eq!(s.position(), Point::new(6.0, 0.0));

    let all = d.current_dot_states();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, "A1");

    assert_eq!(d.dot_state("nobody"), None);
    d.clear_selected_dot();
    assert_eq!(d.selected_dot(), None);
}
