#![allow(clippy::float_cmp)]

use super::*;

fn store_with_points(coords: &[(f64, f64)]) -> (DocStore, Vec<PointId>) {
    let mut doc = DocStore::new();
    let ids = coords.iter().map(|&(x, y)| doc.add_point(x, y)).collect();
    (doc, ids)
}

// =============================================================
// Points
// =============================================================

#[test]
fn new_store_is_empty() {
    let doc = DocStore::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert!(doc.describe().is_empty());
}

#[test]
fn add_point_names_by_creation_order() {
    let (doc, ids) = store_with_points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    let names: Vec<_> = ids
        .iter()
        .map(|id| doc.point(*id).and_then(|p| p.name.clone()))
        .collect();
    assert_eq!(names, vec![Some("P1".into()), Some("P2".into()), Some("P3".into())]);
}

#[test]
fn equal_coordinates_are_distinct_points() {
    let (doc, ids) = store_with_points(&[(1.0, 1.0), (1.0, 1.0)]);
    assert_ne!(ids[0], ids[1]);
    assert_eq!(doc.points().count(), 2);
}

#[test]
fn insert_point_keeps_missing_name() {
    let mut doc = DocStore::new();
    let id = doc.insert_point(GeoPoint { x: 1.0, y: 2.0, name: None });
    let p = doc.point(id).unwrap();
    assert!(p.name.is_none());
    assert_eq!(p.label(id), "#1");
}

#[test]
fn move_point_mutates_in_place() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0)]);
    assert!(doc.move_point(ids[0], 3.0, -4.0));
    let p = doc.point(ids[0]).unwrap();
    assert_eq!((p.x, p.y), (3.0, -4.0));
    assert_eq!(p.name.as_deref(), Some("P1"));
}

#[test]
fn move_unknown_point_returns_false() {
    let mut doc = DocStore::new();
    assert!(!doc.move_point(PointId(7), 1.0, 1.0));
}

#[test]
fn point_id_ordinal_is_one_based() {
    assert_eq!(PointId(0).ordinal(), 1);
    assert_eq!(PointId(4).to_string(), "#5");
}

// =============================================================
// Lines
// =============================================================

#[test]
fn add_line_between_distinct_points() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0), (3.0, 4.0)]);
    assert_eq!(doc.add_line(ids[0], ids[1]), Ok(0));
    assert_eq!(doc.lines(), &[Line { p1: ids[0], p2: ids[1] }]);
}

#[test]
fn add_line_same_point_rejected() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0)]);
    assert_eq!(doc.add_line(ids[0], ids[0]), Err(DocError::SamePoint));
    assert!(doc.lines().is_empty());
}

#[test]
fn add_line_unknown_point_rejected() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0)]);
    assert_eq!(doc.add_line(ids[0], PointId(9)), Err(DocError::UnknownPoint(PointId(9))));
    assert!(doc.lines().is_empty());
}

#[test]
fn line_endpoints_follow_moved_point() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0)]);
    doc.add_line(ids[0], ids[1]).unwrap();
    doc.move_point(ids[1], 0.0, 5.0);
    let line = doc.lines()[0];
    let (a, b) = doc.line_endpoints(&line).unwrap();
    assert_eq!(a, Point::new(0.0, 0.0));
    assert_eq!(b, Point::new(0.0, 5.0));
}

#[test]
fn coincident_line_has_no_endpoints() {
    let (mut doc, ids) = store_with_points(&[(2.0, 2.0), (2.0, 2.0 + 1e-12)]);
    doc.add_line(ids[0], ids[1]).unwrap();
    let line = doc.lines()[0];
    assert!(doc.line_endpoints(&line).is_none());
}

// =============================================================
// Circles
// =============================================================

#[test]
fn add_circle_stores_radius() {
    let (mut doc, ids) = store_with_points(&[(1.0, 1.0)]);
    assert_eq!(doc.add_circle(ids[0], 2.5), Ok(0));
    assert_eq!(doc.circles()[0].radius, 2.5);
}

#[test]
fn add_circle_rejects_tiny_or_bad_radius() {
    let (mut doc, ids) = store_with_points(&[(1.0, 1.0)]);
    assert!(matches!(doc.add_circle(ids[0], 1e-7), Err(DocError::RadiusTooSmall(_))));
    assert!(matches!(doc.add_circle(ids[0], 0.0), Err(DocError::RadiusTooSmall(_))));
    assert!(matches!(doc.add_circle(ids[0], f64::NAN), Err(DocError::RadiusTooSmall(_))));
    assert!(doc.circles().is_empty());
}

#[test]
fn add_circle_accepts_minimum_radius() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0)]);
    assert!(doc.add_circle(ids[0], MIN_RADIUS).is_ok());
}

#[test]
fn add_circle_unknown_center_rejected() {
    let mut doc = DocStore::new();
    assert_eq!(doc.add_circle(PointId(0), 1.0), Err(DocError::UnknownPoint(PointId(0))));
}

// =============================================================
// Describe / clear
// =============================================================

#[test]
fn describe_lists_all_entities_in_order() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0), (3.0, 4.0)]);
    doc.add_line(ids[0], ids[1]).unwrap();
    doc.add_circle(ids[1], 5.0).unwrap();
    doc.add_function("sin(x)");

    assert_eq!(
        doc.describe(),
        vec![
            "P1: (0.000, 0.000)".to_string(),
            "P2: (3.000, 4.000)".to_string(),
            "L1: through P 1 and P 2".to_string(),
            "C1: center (3.000,4.000), r=5.000".to_string(),
            "F1: sin(x)".to_string(),
        ]
    );
}

#[test]
fn clear_empties_and_restarts_naming() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0), (1.0, 1.0)]);
    doc.add_line(ids[0], ids[1]).unwrap();
    doc.add_function("x");
    doc.clear();
    assert!(doc.is_empty());
    doc.clear();
    assert!(doc.is_empty());
    assert_eq!(doc.next_point_name(), "P1");
}

// =============================================================
// Serde
// =============================================================

#[test]
fn calculation_record_omits_missing_image() {
    let json = serde_json::to_string(&CalculationRecord::new("x**2")).unwrap();
    assert_eq!(json, r#"{"expr":"x**2"}"#);
}

#[test]
fn calculation_record_with_image_roundtrip() {
    let rec = CalculationRecord::new("sin(x)").with_image(vec![137, 80, 78, 71]);
    let json = serde_json::to_string(&rec).unwrap();
    let back: CalculationRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn store_serializes_point_ids_as_indices() {
    let (mut doc, ids) = store_with_points(&[(0.0, 0.0), (1.0, 0.0)]);
    doc.add_line(ids[0], ids[1]).unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["lines"][0]["p1"], 0);
    assert_eq!(value["lines"][0]["p2"], 1);
}
