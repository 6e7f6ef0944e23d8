#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Point
// =============================================================

#[test]
fn point_new_sets_fields() {
    let p = Point::new(1.5, -2.0);
    assert_eq!(p.x, 1.5);
    assert_eq!(p.y, -2.0);
}

#[test]
fn point_distance_is_euclidean() {
    let d = Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0));
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn point_distance_is_symmetric() {
    let a = Point::new(-1.0, 2.0);
    let b = Point::new(4.0, -6.0);
    assert_eq!(a.distance(b), b.distance(a));
}

#[test]
fn point_is_finite_rejects_nan_and_inf() {
    assert!(Point::new(0.0, 0.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn bounds_default_matches_fixed_axes() {
    let b = Bounds::default();
    assert_eq!(b, Bounds::new(-10.0, 10.0, -7.0, 7.0));
}

#[test]
fn bounds_contains_interior_and_edges() {
    let b = Bounds::default();
    assert!(b.contains(Point::new(0.0, 0.0)));
    assert!(b.contains(Point::new(10.0, -7.0)));
    assert!(!b.contains(Point::new(10.5, 0.0)));
    assert!(!b.contains(Point::new(0.0, f64::NAN)));
}

#[test]
fn bounds_validity() {
    assert!(Bounds::default().is_valid());
    assert!(!Bounds::new(1.0, 1.0, 0.0, 1.0).is_valid());
    assert!(!Bounds::new(0.0, 1.0, 2.0, 1.0).is_valid());
    assert!(!Bounds::new(0.0, f64::INFINITY, 0.0, 1.0).is_valid());
}
