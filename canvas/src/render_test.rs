#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::PointId;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn scene(doc: &DocStore, input: &InputState) -> Vec<DrawCommand> {
    draw(doc, input, &Bounds::default(), &RenderOptions::default())
}

fn layers(cmds: &[DrawCommand]) -> Vec<Layer> {
    cmds.iter().map(|c| c.layer).collect()
}

fn polylines(cmds: &[DrawCommand], layer: Layer) -> Vec<(&[Point], &Stroke)> {
    cmds.iter()
        .filter(|c| c.layer == layer)
        .filter_map(|c| match &c.shape {
            Shape::Polyline { points, stroke } => Some((points.as_slice(), stroke)),
            _ => None,
        })
        .collect()
}

// =============================================================
// Layer order
// =============================================================

#[test]
fn layers_are_painted_in_fixed_order() {
    let mut doc = DocStore::new();
    let a = doc.add_point(0.0, 0.0);
    let b = doc.add_point(1.0, 1.0);
    doc.add_line(a, b).unwrap();
    doc.add_circle(b, 2.0).unwrap();
    doc.add_function("x");
    let input = InputState::DefiningCircle { center: a, radius: 1.0 };

    let order = layers(&scene(&doc, &input));
    assert!(order.windows(2).all(|w| w[0] <= w[1]), "out of order: {order:?}");
    for layer in [Layer::Function, Layer::Line, Layer::Circle, Layer::Preview, Layer::Point, Layer::Axis] {
        assert!(order.contains(&layer), "missing {layer:?}");
    }
}

#[test]
fn axes_span_bounds_at_zero() {
    let cmds = scene(&DocStore::new(), &InputState::Idle);
    let axes = polylines(&cmds, Layer::Axis);
    assert_eq!(axes.len(), 2);
    assert_eq!(axes[0].0, &[pt(-10.0, 0.0), pt(10.0, 0.0)]);
    assert_eq!(axes[1].0, &[pt(0.0, -7.0), pt(0.0, 7.0)]);
    assert_eq!(axes[0].1.color, "#444444");
    assert_eq!(axes[0].1.width, 0.9);
}

// =============================================================
// Functions
// =============================================================

#[test]
fn function_is_sampled_across_x_range() {
    let mut doc = DocStore::new();
    doc.add_function("x**2");
    let cmds = scene(&doc, &InputState::Idle);
    let curves = polylines(&cmds, Layer::Function);

    assert_eq!(curves.len(), 1);
    let (points, stroke) = curves[0];
    assert_eq!(points.len(), CURVE_SAMPLES);
    assert_eq!(points[0], pt(-10.0, 100.0));
    assert_eq!(points[CURVE_SAMPLES - 1], pt(10.0, 100.0));
    assert_eq!(stroke.color, "#000000");
}

#[test]
fn function_resamples_when_bounds_change() {
    let mut doc = DocStore::new();
    doc.add_function("x");
    let options = RenderOptions { curve_samples: 3, ..RenderOptions::default() };
    let cmds = draw(&doc, &InputState::Idle, &Bounds::new(2.0, 4.0, -1.0, 1.0), &options);
    let curves = polylines(&cmds, Layer::Function);
    assert_eq!(curves[0].0, &[pt(2.0, 2.0), pt(3.0, 3.0), pt(4.0, 4.0)]);
}

#[test]
fn function_with_nan_samples_splits_into_runs() {
    let mut doc = DocStore::new();
    doc.add_function("sqrt(x**2 - 1)");
    let options = RenderOptions { curve_samples: 9, ..RenderOptions::default() };
    let cmds = draw(&doc, &InputState::Idle, &Bounds::new(-4.0, 4.0, -5.0, 5.0), &options);
    let curves = polylines(&cmds, Layer::Function);
    assert_eq!(curves.len(), 2, "the gap around zero splits the curve");
    assert!(curves.iter().all(|(pts, _)| pts.iter().all(|p| p.y.is_finite())));
}

#[test]
fn finite_runs_drops_isolated_samples() {
    let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let ys = [1.0, f64::NAN, 2.0, f64::NAN, 3.0, 4.0];
    let runs = finite_runs(&xs, &ys);
    assert_eq!(runs, vec![vec![pt(4.0, 3.0), pt(5.0, 4.0)]]);
}

#[test]
fn finite_runs_treats_infinity_as_gap() {
    let runs = finite_runs(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.0, f64::INFINITY, 3.0]);
    assert_eq!(runs, vec![vec![pt(0.0, 1.0), pt(1.0, 2.0)]]);
}

// =============================================================
// Lines
// =============================================================

#[test]
fn line_is_drawn_past_viewport_edges() {
    let mut doc = DocStore::new();
    let a = doc.add_point(0.0, 0.0);
    let b = doc.add_point(1.0, 1.0);
    doc.add_line(a, b).unwrap();

    let cmds = scene(&doc, &InputState::Idle);
    let lines = polylines(&cmds, Layer::Line);
    assert_eq!(lines.len(), 1);
    let (points, stroke) = lines[0];
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(|p| p.x.abs() > 10.0 || p.y.abs() > 7.0));
    assert_eq!(stroke.color, "#2ca02c");
}

#[test]
fn offscreen_line_is_culled() {
    let mut doc = DocStore::new();
    let a = doc.add_point(0.0, 50.0);
    let b = doc.add_point(1.0, 50.0);
    doc.add_line(a, b).unwrap();
    assert!(polylines(&scene(&doc, &InputState::Idle), Layer::Line).is_empty());
}

#[test]
fn degenerate_line_is_skipped() {
    let mut doc = DocStore::new();
    let a = doc.add_point(1.0, 1.0);
    let b = doc.add_point(1.0, 1.0);
    doc.add_line(a, b).unwrap();
    assert!(polylines(&scene(&doc, &InputState::Idle), Layer::Line).is_empty());
}

// =============================================================
// Circles
// =============================================================

#[test]
fn circle_outline_is_closed() {
    let pts = circle_outline(pt(1.0, 2.0), 3.0, CIRCLE_SAMPLES);
    assert_eq!(pts.len(), CIRCLE_SAMPLES);
    assert!(pts[0].distance(pts[CIRCLE_SAMPLES - 1]) < 1e-9);
    assert!(pts.iter().all(|p| (p.distance(pt(1.0, 2.0)) - 3.0).abs() < 1e-9));
}

#[test]
fn circle_has_outline_and_center_cross() {
    let mut doc = DocStore::new();
    let c = doc.add_point(1.0, 1.0);
    doc.add_circle(c, 2.0).unwrap();

    let cmds = scene(&doc, &InputState::Idle);
    let circles: Vec<_> = cmds.iter().filter(|c| c.layer == Layer::Circle).collect();
    assert_eq!(circles.len(), 2);
    assert!(matches!(&circles[0].shape, Shape::Polyline { stroke, .. } if stroke.dash == Dash::Solid));
    assert!(matches!(
        &circles[1].shape,
        Shape::Marker { at, marker: MarkerShape::Cross, .. } if *at == pt(1.0, 1.0)
    ));
}

#[test]
fn preview_circle_is_dashed_and_faded() {
    let mut doc = DocStore::new();
    let c = doc.add_point(0.0, 0.0);
    let cmds = scene(&doc, &InputState::DefiningCircle { center: c, radius: 4.0 });
    let preview = polylines(&cmds, Layer::Preview);
    assert_eq!(preview.len(), 1);
    assert_eq!(preview[0].1.dash, Dash::Dashed);
    assert_eq!(preview[0].1.alpha, 0.7);
}

#[test]
fn preview_with_missing_center_draws_nothing() {
    let cmds = scene(&DocStore::new(), &InputState::DefiningCircle { center: PointId(3), radius: 1.0 });
    assert!(cmds.iter().all(|c| c.layer != Layer::Preview));
}

// =============================================================
// Points
// =============================================================

#[test]
fn points_get_marker_and_offset_label() {
    let mut doc = DocStore::new();
    doc.add_point(2.0, 3.0);
    let cmds = scene(&doc, &InputState::Idle);
    let points: Vec<_> = cmds.iter().filter(|c| c.layer == Layer::Point).collect();

    assert_eq!(points.len(), 2);
    assert!(matches!(
        &points[0].shape,
        Shape::Marker { marker: MarkerShape::Dot, color: "#1f77b4", size, .. } if *size == 6.0
    ));
    match &points[1].shape {
        Shape::Label { at, text, size } => {
            assert!((at.x - 2.1).abs() < 1e-12 && (at.y - 3.1).abs() < 1e-12);
            assert_eq!(text, "P1");
            assert_eq!(*size, 9.0);
        }
        other => panic!("expected label, got {other:?}"),
    }
}

#[test]
fn draw_commands_serialize_flat() {
    let mut doc = DocStore::new();
    doc.add_point(0.0, 0.0);
    let cmds = scene(&doc, &InputState::Idle);
    let json = serde_json::to_value(&cmds[0]).unwrap();
    assert_eq!(json["layer"], "point");
    assert_eq!(json["kind"], "marker");
    assert_eq!(json["marker"], "dot");
}
