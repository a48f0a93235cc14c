use mapmeasure::geometry::{
    closing_proximity, shoelace_area, side_lengths, GeometryError, Point, SNAP_THRESHOLD_WORLD,
};
use mapmeasure::units::AreaBreakdown;

fn unit_square() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(0.0, 10.0),
    ]
}

#[test]
fn shoelace_square_area() {
    assert_eq!(shoelace_area(&unit_square()), 100.0);
}

#[test]
fn shoelace_is_orientation_agnostic() {
    let mut reversed = unit_square();
    reversed.reverse();
    assert_eq!(
        shoelace_area(&unit_square()),
        shoelace_area(&reversed),
        "clockwise and counter-clockwise must yield the same absolute area"
    );
}

#[test]
fn shoelace_below_three_points_is_zero() {
    assert_eq!(shoelace_area(&[]), 0.0);
    assert_eq!(
        shoelace_area(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
        0.0
    );
}

#[test]
fn side_lengths_wrap_back_to_first_vertex() {
    let lengths = side_lengths(&unit_square(), 1.0).unwrap();
    assert_eq!(lengths, vec![10.0, 10.0, 10.0, 10.0]);
}

#[test]
fn side_lengths_divide_by_scale() {
    let lengths = side_lengths(&unit_square(), 2.0).unwrap();
    assert_eq!(lengths, vec![5.0, 5.0, 5.0, 5.0]);
}

#[test]
fn side_lengths_rejects_non_positive_scale() {
    assert_eq!(
        side_lengths(&unit_square(), 0.0),
        Err(GeometryError::InvalidScale)
    );
    assert_eq!(
        side_lengths(&unit_square(), -3.0),
        Err(GeometryError::InvalidScale)
    );
    assert_eq!(
        side_lengths(&unit_square(), f64::NAN),
        Err(GeometryError::InvalidScale)
    );
}

#[test]
fn side_lengths_below_three_points_is_empty() {
    let two = vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    assert!(side_lengths(&two, 1.0).unwrap().is_empty());
}

#[test]
fn closing_proximity_is_inclusive_at_threshold() {
    let first = Point::new(0.0, 0.0);
    assert!(closing_proximity(
        Point::new(3.0, 4.0),
        first,
        SNAP_THRESHOLD_WORLD
    ));
    assert!(!closing_proximity(
        Point::new(3.1, 4.0),
        first,
        SNAP_THRESHOLD_WORLD
    ));
}

#[test]
fn one_shotok_is_435_point_6_sq_ft() {
    let area = AreaBreakdown::from_sq_ft(435.6);
    assert_eq!(area.shotok, 1.0);
}

#[test]
fn one_katha_is_720_sq_ft() {
    let area = AreaBreakdown::from_sq_ft(720.0);
    assert_eq!(area.katha, 1.0);
}
