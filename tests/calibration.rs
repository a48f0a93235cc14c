use mapmeasure::calibration::{manual_scale, Calibration, CalibrationLine};
use mapmeasure::geometry::Point;

#[test]
fn two_clicks_commit_a_segment() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    assert!(cal.line().is_tracking());
    cal.place_point(Point::new(330.0, 0.0), 300.0);
    assert!(cal.line().is_drawn());
    assert_eq!(cal.line().pixel_length(), Some(330.0));
}

#[test]
fn scale_derivation_round_trip() {
    // 330 px over 110 real feet gives 3 px/ft.
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    cal.place_point(Point::new(330.0, 0.0), 300.0);
    let scale = cal.confirm_distance(110.0).unwrap();
    assert_eq!(scale, 3.0);
    // Confirming clears the line.
    assert_eq!(*cal.line(), CalibrationLine::Empty);
}

#[test]
fn second_click_within_debounce_window_is_dropped() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    cal.place_point(Point::new(100.0, 0.0), 100.0);
    assert!(
        cal.line().is_tracking(),
        "a click 100 ms after the first must be rejected"
    );
    cal.place_point(Point::new(100.0, 0.0), 260.0);
    assert!(cal.line().is_drawn());
}

#[test]
fn degenerate_segment_is_ignored() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(5.0, 5.0), 0.0);
    cal.place_point(Point::new(5.0, 5.0 + 5e-4), 300.0);
    assert!(
        cal.line().is_tracking(),
        "segment shorter than epsilon must not commit"
    );
}

#[test]
fn live_tracking_follows_pointer() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    cal.pointer_moved(Point::new(40.0, 30.0));
    assert_eq!(
        cal.line().render_segment(),
        Some((Point::new(0.0, 0.0), Point::new(40.0, 30.0)))
    );
}

#[test]
fn pointer_move_after_commit_does_not_change_line() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    cal.place_point(Point::new(50.0, 0.0), 300.0);
    cal.pointer_moved(Point::new(999.0, 999.0));
    assert_eq!(cal.line().pixel_length(), Some(50.0));
}

#[test]
fn redraw_keeps_first_point_and_retracks() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(1.0, 2.0), 0.0);
    cal.place_point(Point::new(50.0, 2.0), 300.0);
    cal.undo_second_point();
    assert!(cal.line().is_tracking());
    assert_eq!(cal.line().coords(), vec![1.0, 2.0]);
}

#[test]
fn cancel_clears_everything() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(1.0, 2.0), 0.0);
    cal.place_point(Point::new(50.0, 2.0), 300.0);
    cal.cancel();
    assert_eq!(*cal.line(), CalibrationLine::Empty);
}

#[test]
fn confirm_rejects_non_positive_distance() {
    let mut cal = Calibration::default();
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    cal.place_point(Point::new(100.0, 0.0), 300.0);
    assert!(cal.confirm_distance(0.0).is_err());
    assert!(cal.confirm_distance(-10.0).is_err());
    assert!(cal.confirm_distance(f64::NAN).is_err());
    // Failed confirmation keeps the line for another attempt.
    assert!(cal.line().is_drawn());
}

#[test]
fn confirm_without_line_is_an_error() {
    let mut cal = Calibration::default();
    assert!(cal.confirm_distance(10.0).is_err());
}

#[test]
fn manual_scale_validation() {
    assert_eq!(manual_scale(2.5), Ok(2.5));
    assert!(manual_scale(0.0).is_err());
    assert!(manual_scale(-1.0).is_err());
    assert!(manual_scale(f64::INFINITY).is_err());
}

#[test]
fn coords_view_is_always_0_2_or_4_floats() {
    let mut cal = Calibration::default();
    assert_eq!(cal.line().coords().len(), 0);
    cal.place_point(Point::new(0.0, 0.0), 0.0);
    assert_eq!(cal.line().coords().len(), 2);
    cal.place_point(Point::new(10.0, 0.0), 300.0);
    assert_eq!(cal.line().coords().len(), 4);
}
