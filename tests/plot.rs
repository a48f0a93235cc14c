use mapmeasure::geometry::Point;
use mapmeasure::plot::PlotState;

#[test]
fn closing_snap_yields_exact_vertex_zero_coordinates() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(10.0, 10.0));
    plot.add_point(Point::new(100.0, 10.0));
    plot.add_point(Point::new(100.0, 100.0));
    // Within 5 world units of vertex 0: must snap to exactly its coords.
    plot.add_point(Point::new(13.0, 14.0));
    assert_eq!(plot.points()[3], Point::new(10.0, 10.0));
}

#[test]
fn snap_applies_from_the_second_vertex_on() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(0.0, 0.0));
    plot.add_point(Point::new(2.0, 2.0));
    assert_eq!(
        plot.points()[1],
        Point::new(0.0, 0.0),
        "any prior vertex count >= 1 snaps a close candidate onto vertex 0"
    );
}

#[test]
fn snap_does_not_auto_finish() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(0.0, 0.0));
    plot.add_point(Point::new(50.0, 0.0));
    plot.add_point(Point::new(50.0, 50.0));
    plot.add_point(Point::new(1.0, 1.0)); // snapped onto vertex 0
    assert!(!plot.is_finished(), "finishing is always explicit");
}

#[test]
fn hover_sets_snap_hint_without_mutating_vertices() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(0.0, 0.0));
    plot.hover(Point::new(3.0, 0.0));
    assert!(plot.snap_hint());
    plot.hover(Point::new(30.0, 0.0));
    assert!(!plot.snap_hint());
    assert_eq!(plot.vertex_count(), 1);
}

#[test]
fn undo_drops_last_vertex_down_to_zero() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(0.0, 0.0));
    plot.add_point(Point::new(10.0, 0.0));
    plot.undo();
    plot.undo();
    assert_eq!(plot.vertex_count(), 0);
    plot.undo(); // allowed on empty
    assert_eq!(plot.vertex_count(), 0);
}

#[test]
fn clear_is_idempotent_on_empty_input() {
    let mut plot = PlotState::default();
    plot.clear();
    plot.clear();
    assert_eq!(plot.vertex_count(), 0);
    assert!(!plot.is_finished());
}

#[test]
fn finish_requires_three_vertices() {
    let mut plot = PlotState::default();
    plot.add_point(Point::new(0.0, 0.0));
    plot.add_point(Point::new(10.0, 0.0));
    assert!(plot.finish().is_err());
    assert!(!plot.is_finished());
    plot.add_point(Point::new(10.0, 10.0));
    assert!(plot.finish().is_ok());
    assert!(plot.is_finished());
}

#[test]
fn no_appends_after_finish() {
    let mut plot = PlotState::default();
    for p in [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ] {
        plot.add_point(p);
    }
    plot.finish().unwrap();
    plot.add_point(Point::new(50.0, 50.0));
    assert_eq!(plot.vertex_count(), 3);
}

#[test]
fn drag_end_resnaps_every_vertex_except_zero() {
    let mut plot = PlotState::default();
    for p in [
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 100.0),
    ] {
        plot.add_point(p);
    }
    plot.finish().unwrap();

    // Dragging vertex 2 near vertex 0 snaps at drag end.
    plot.drag_vertex(2, Point::new(2.0, 3.0));
    assert_eq!(plot.points()[2], Point::new(2.0, 3.0), "no snap mid-drag");
    plot.end_vertex_drag(2);
    assert_eq!(plot.points()[2], Point::new(0.0, 0.0));

    // Vertex 0 itself is exempt from snapping.
    plot.drag_vertex(0, Point::new(1.0, 1.0));
    plot.end_vertex_drag(0);
    assert_eq!(plot.points()[0], Point::new(1.0, 1.0));
}

#[test]
fn load_reopens_for_editing() {
    let mut plot = PlotState::default();
    plot.load(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ]);
    assert_eq!(plot.vertex_count(), 3);
    assert!(
        !plot.is_finished(),
        "loaded data enters Drawing, not Finished"
    );
}
