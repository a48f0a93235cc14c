use mapmeasure::geometry::Point;
use mapmeasure::viewport::{clamp_zoom, ViewportState, WheelZoom, WHEEL_ZOOM_BASE};

#[test]
fn screen_to_world_subtracts_pan_then_divides_by_zoom() {
    let viewport = ViewportState {
        pan: Point::new(10.0, 10.0),
        zoom: 2.0,
    };
    let world = viewport.screen_to_world(Point::new(110.0, 60.0));
    assert_eq!(world, Point::new(50.0, 25.0));
}

#[test]
fn world_to_screen_is_the_inverse_transform() {
    let viewport = ViewportState {
        pan: Point::new(-37.5, 12.25),
        zoom: 3.4,
    };
    let world = Point::new(123.0, -45.0);
    let round = viewport.screen_to_world(viewport.world_to_screen(world));
    assert!((round.x - world.x).abs() < 1e-9);
    assert!((round.y - world.y).abs() < 1e-9);
}

#[test]
fn zoom_about_keeps_anchor_point_fixed() {
    let mut viewport = ViewportState {
        pan: Point::new(20.0, -5.0),
        zoom: 1.5,
    };
    let anchor = Point::new(300.0, 200.0);
    let world_before = viewport.screen_to_world(anchor);
    viewport.zoom_about(anchor, 4.0);
    let world_after = viewport.screen_to_world(anchor);
    assert!((world_before.x - world_after.x).abs() < 1e-9);
    assert!((world_before.y - world_after.y).abs() < 1e-9);
    assert_eq!(viewport.zoom, 4.0);
}

#[test]
fn zoom_about_clamps_to_range() {
    let mut viewport = ViewportState::default();
    viewport.zoom_about(Point::new(0.0, 0.0), 50.0);
    assert_eq!(viewport.zoom, 10.0);
    viewport.zoom_about(Point::new(0.0, 0.0), 0.001);
    assert_eq!(viewport.zoom, 0.1);
}

#[test]
fn clamp_zoom_bounds() {
    assert_eq!(clamp_zoom(0.05), 0.1);
    assert_eq!(clamp_zoom(1.0), 1.0);
    assert_eq!(clamp_zoom(99.0), 10.0);
}

#[test]
fn reset_restores_origin_and_unity_zoom() {
    let mut viewport = ViewportState {
        pan: Point::new(123.0, 456.0),
        zoom: 7.0,
    };
    viewport.reset();
    assert_eq!(viewport, ViewportState::default());
}

#[test]
fn wheel_deltas_accumulate_into_one_factor() {
    let mut wheel = WheelZoom::default();
    wheel.accumulate(40.0);
    wheel.accumulate(60.0);
    let factor = wheel.take_factor().unwrap();
    assert!((factor - WHEEL_ZOOM_BASE.powf(-100.0)).abs() < 1e-12);
    assert!(
        wheel.take_factor().is_none(),
        "flush drains the accumulator"
    );
}

#[test]
fn undrained_wheel_delta_survives_to_a_later_flush() {
    let mut wheel = WheelZoom::default();
    wheel.accumulate(40.0);
    // No flush happened (no anchor under the cursor); next frame's input
    // joins what was already accrued.
    wheel.accumulate(60.0);
    let factor = wheel.take_factor().unwrap();
    assert!((factor - WHEEL_ZOOM_BASE.powf(-100.0)).abs() < 1e-12);
}

#[test]
fn wheel_flush_with_nothing_accumulated_is_none() {
    let mut wheel = WheelZoom::default();
    assert!(wheel.take_factor().is_none());
}

#[test]
fn negative_delta_zooms_in() {
    let mut wheel = WheelZoom::default();
    wheel.accumulate(-100.0);
    assert!(wheel.take_factor().unwrap() > 1.0);
}
