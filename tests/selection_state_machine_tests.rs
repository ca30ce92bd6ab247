use detection_timeline::core::{DrawableArea, TimeMapper, TimeRange};
use detection_timeline::interaction::{
    BoundUpdate, PointerButton, PointerEvent, RangeChange, Selection, SelectionContext,
    SelectionPhase, transition,
};

/// Domain [0, 1000] over a 200 px drawable width starting at x = 20.
fn context() -> SelectionContext {
    let range = TimeRange::new(0.0, 1000.0).expect("valid range");
    let mapper = TimeMapper::new(range, 200.0).expect("valid mapper");
    SelectionContext::new(mapper, DrawableArea::new(20.0, 220.0))
}

fn run(start: Selection, events: &[PointerEvent]) -> (Selection, Vec<RangeChange>) {
    let ctx = context();
    let mut selection = start;
    let mut emitted = Vec::new();
    for event in events {
        let outcome = transition(&selection, *event, &ctx);
        selection = outcome.selection;
        emitted.extend(outcome.emitted);
    }
    (selection, emitted)
}

fn committed_100_150() -> Selection {
    let (selection, _) = run(
        Selection::idle(),
        &[
            PointerEvent::down(100.0),
            PointerEvent::moved(150.0),
            PointerEvent::up(150.0),
        ],
    );
    assert_eq!(selection.phase(), SelectionPhase::Committed);
    selection
}

#[test]
fn basic_draft_emits_start_then_span_and_commits_ordered_bounds() {
    let ctx = context();
    let t100 = ctx.mapper.pixel_to_time(100.0);
    let t150 = ctx.mapper.pixel_to_time(150.0);

    let down = transition(&Selection::idle(), PointerEvent::down(100.0), &ctx);
    assert_eq!(down.selection.phase(), SelectionPhase::Drafting);
    assert_eq!(
        down.emitted,
        Some(RangeChange::new(BoundUpdate::Set(t100), BoundUpdate::Keep))
    );

    let moved = transition(&down.selection, PointerEvent::moved(150.0), &ctx);
    assert_eq!(moved.emitted, Some(RangeChange::span(t100, t150)));

    let up = transition(&moved.selection, PointerEvent::up(150.0), &ctx);
    assert_eq!(up.selection.phase(), SelectionPhase::Committed);
    assert_eq!(up.selection.pixel_bounds(), Some((100.0, 150.0)));
    assert_eq!(up.selection.time_bounds(), Some((500.0, 750.0)));
    assert_eq!(up.emitted, Some(RangeChange::span(500.0, 750.0)));
}

#[test]
fn draft_moving_left_of_origin_keeps_bounds_ordered() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[PointerEvent::down(150.0), PointerEvent::moved(100.0)],
    );
    assert_eq!(selection.pixel_bounds(), Some((100.0, 150.0)));
    assert_eq!(selection.time_bounds(), Some((500.0, 750.0)));
    assert_eq!(emitted.last(), Some(&RangeChange::span(500.0, 750.0)));

    let (selection, _) = run(selection, &[PointerEvent::moved(160.0)]);
    assert_eq!(selection.pixel_bounds(), Some((150.0, 160.0)));
    assert_eq!(selection.time_bounds(), Some((750.0, 800.0)));
}

#[test]
fn press_outside_committed_selection_restarts_draft_without_full_clear() {
    let committed = committed_100_150();
    let (selection, emitted) = run(committed, &[PointerEvent::down(30.0)]);

    assert_eq!(selection.phase(), SelectionPhase::Drafting);
    assert_eq!(selection.start_time(), Some(150.0));
    assert_eq!(selection.end_time(), None);
    assert_eq!(selection.pixel_bounds(), None);
    assert_eq!(
        emitted,
        vec![RangeChange::new(BoundUpdate::Set(150.0), BoundUpdate::Clear)]
    );
    assert!(!emitted.iter().any(|change| change.is_cleared()));
}

#[test]
fn click_without_movement_clears_and_returns_to_idle() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[PointerEvent::down(100.0), PointerEvent::up(100.0)],
    );
    assert_eq!(selection, Selection::idle());
    assert_eq!(emitted.last(), Some(&RangeChange::cleared()));
}

#[test]
fn release_elsewhere_without_in_area_move_commits_to_clamped_release_point() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[
            PointerEvent::down(100.0),
            PointerEvent::moved(400.0),
            PointerEvent::up(400.0),
        ],
    );
    assert_eq!(selection.phase(), SelectionPhase::Committed);
    assert_eq!(selection.pixel_bounds(), Some((100.0, 220.0)));
    assert_eq!(selection.time_bounds(), Some((500.0, 1100.0)));
    assert_eq!(emitted.last(), Some(&RangeChange::span(500.0, 1100.0)));
}

#[test]
fn press_inside_committed_selection_starts_drag_silently() {
    let committed = committed_100_150();
    let outcome = transition(&committed, PointerEvent::down(120.0), &context());

    assert_eq!(outcome.selection.phase(), SelectionPhase::Dragging);
    assert_eq!(outcome.selection.anchor_pointer_x(), 120.0);
    assert_eq!(outcome.selection.pixel_bounds(), Some((100.0, 150.0)));
    assert_eq!(outcome.emitted, None);
}

#[test]
fn drag_translates_window_and_rederives_times() {
    let committed = committed_100_150();
    let (selection, emitted) = run(
        committed,
        &[PointerEvent::down(120.0), PointerEvent::moved(140.0)],
    );

    assert_eq!(selection.phase(), SelectionPhase::Dragging);
    assert_eq!(selection.pixel_bounds(), Some((120.0, 170.0)));
    assert_eq!(selection.time_bounds(), Some((600.0, 850.0)));
    assert_eq!(emitted, vec![RangeChange::span(600.0, 850.0)]);
}

#[test]
fn drag_clamps_at_edges_without_shrinking() {
    let committed = committed_100_150();
    let (selection, _) = run(
        committed,
        &[PointerEvent::down(120.0), PointerEvent::moved(400.0)],
    );
    assert_eq!(selection.pixel_bounds(), Some((170.0, 220.0)));

    let (selection, emitted) = run(selection, &[PointerEvent::moved(-500.0)]);
    assert_eq!(selection.pixel_bounds(), Some((20.0, 70.0)));
    assert_eq!(selection.pixel_width(), Some(50.0));
    assert_eq!(emitted, vec![RangeChange::span(100.0, 350.0)]);
}

#[test]
fn drag_release_commits_with_final_bounds() {
    let committed = committed_100_150();
    let (selection, emitted) = run(
        committed,
        &[
            PointerEvent::down(120.0),
            PointerEvent::moved(130.0),
            PointerEvent::up(130.0),
        ],
    );
    assert_eq!(selection.phase(), SelectionPhase::Committed);
    assert_eq!(selection.pixel_bounds(), Some((110.0, 160.0)));
    assert_eq!(emitted.last(), Some(&RangeChange::span(550.0, 800.0)));
}

#[test]
fn leaving_while_drafting_commits_current_bounds() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[
            PointerEvent::down(150.0),
            PointerEvent::moved(100.0),
            PointerEvent::Leave,
        ],
    );
    assert_eq!(selection.phase(), SelectionPhase::Committed);
    assert_eq!(selection.pixel_bounds(), Some((100.0, 150.0)));
    assert_eq!(emitted.last(), Some(&RangeChange::span(500.0, 750.0)));
}

#[test]
fn leaving_draft_without_end_bound_clears() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[PointerEvent::down(150.0), PointerEvent::Leave],
    );
    assert!(selection.is_idle());
    assert_eq!(emitted.last(), Some(&RangeChange::cleared()));
}

#[test]
fn leaving_while_dragging_commits_dragged_window() {
    let committed = committed_100_150();
    let (selection, emitted) = run(
        committed,
        &[
            PointerEvent::down(120.0),
            PointerEvent::moved(100.0),
            PointerEvent::Leave,
        ],
    );
    assert_eq!(selection.phase(), SelectionPhase::Committed);
    assert_eq!(selection.pixel_bounds(), Some((80.0, 130.0)));
    assert_eq!(emitted.last(), Some(&RangeChange::span(400.0, 650.0)));
}

#[test]
fn leave_and_release_while_committed_are_ignored() {
    let committed = committed_100_150();
    let (selection, emitted) = run(
        committed,
        &[PointerEvent::Leave, PointerEvent::up(300.0)],
    );
    assert_eq!(selection, committed);
    assert!(emitted.is_empty());
}

#[test]
fn non_primary_buttons_never_change_state() {
    let committed = committed_100_150();
    let (selection, emitted) = run(
        committed,
        &[
            PointerEvent::Down {
                button: PointerButton::Secondary,
                x: 30.0,
            },
            PointerEvent::Move {
                button: PointerButton::Middle,
                x: 60.0,
            },
            PointerEvent::Up {
                button: PointerButton::Other(4),
                x: 60.0,
            },
        ],
    );
    assert_eq!(selection, committed);
    assert!(emitted.is_empty());
}

#[test]
fn press_outside_drawable_area_is_ignored() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[PointerEvent::down(10.0), PointerEvent::down(221.0)],
    );
    assert!(selection.is_idle());
    assert!(emitted.is_empty());
}

#[test]
fn draft_moves_outside_area_are_ignored() {
    let (selection, emitted) = run(
        Selection::idle(),
        &[
            PointerEvent::down(100.0),
            PointerEvent::moved(150.0),
            PointerEvent::moved(5.0),
        ],
    );
    assert_eq!(selection.pixel_bounds(), Some((100.0, 150.0)));
    assert_eq!(emitted.len(), 2);
}
