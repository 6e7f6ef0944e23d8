//! Rendering: turns the construction into an ordered list of draw commands.
//!
//! This module never touches pixels. It receives read-only views of the
//! document and the in-progress construction and emits [`DrawCommand`]s in a
//! fixed layer order for the presentation layer to rasterize:
//!
//! 1. function curves
//! 2. lines, clipped to the viewport; a line that misses the viewport
//!    produces no command
//! 3. circles with center markers
//! 4. the circle being defined, if any
//! 5. points and their labels
//! 6. axes
//!
//! Points come after every curve so they stay visible and clickable, and the
//! preview sits above committed circles but below points.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use serde::Serialize;

use crate::clip;
use crate::consts::{
    AXIS_COLOR, AXIS_WIDTH, CIRCLE_COLOR, CIRCLE_SAMPLES, CURVE_SAMPLES, FUNCTION_COLOR, LABEL_FONT_SIZE,
    LABEL_OFFSET, LINE_COLOR, MARKER_SIZE, POINT_COLOR, PREVIEW_ALPHA, STROKE_WIDTH,
};
use crate::doc::DocStore;
use crate::expr::{self, Formula};
use crate::geom::{Bounds, Point};
use crate::input::InputState;

/// Sampling densities used while building curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Samples across the visible x-range per function.
    pub curve_samples: usize,
    /// Samples over a full turn per circle.
    pub circle_samples: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { curve_samples: CURVE_SAMPLES, circle_samples: CIRCLE_SAMPLES }
    }
}

/// Draw layer, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Function,
    Line,
    Circle,
    Preview,
    Point,
    Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dash {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    /// Filled dot (`o`), used for points.
    Dot,
    /// Cross (`x`), used for circle centers.
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
    pub dash: Dash,
    pub alpha: f64,
}

impl Stroke {
    const fn solid(color: &'static str, width: f64) -> Self {
        Self { color, width, dash: Dash::Solid, alpha: 1.0 }
    }
}

/// Geometry of one draw command, in world coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Polyline { points: Vec<Point>, stroke: Stroke },
    Marker { at: Point, marker: MarkerShape, size: f64, color: &'static str, alpha: f64 },
    Label { at: Point, text: String, size: f64 },
}

/// A single thing to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub layer: Layer,
    #[serde(flatten)]
    pub shape: Shape,
}

/// Build the full scene for `bounds`.
#[must_use]
pub fn draw(doc: &DocStore, input: &InputState, bounds: &Bounds, options: &RenderOptions) -> Vec<DrawCommand> {
    let mut out = Vec::new();

    // Layer 1: functions, re-sampled over the current x-range.
    let xs = expr::linspace(bounds.xmin, bounds.xmax, options.curve_samples);
    for f in doc.functions() {
        draw_function(&mut out, &f.expr, &xs);
    }

    // Layer 2: lines.
    for line in doc.lines() {
        let Some((a, b)) = doc.line_endpoints(line) else {
            continue;
        };
        if clip::visible_segment(a, b, bounds).is_none() {
            continue;
        }
        if let Some((from, to)) = clip::clip_line(a, b, bounds) {
            out.push(DrawCommand {
                layer: Layer::Line,
                shape: Shape::Polyline { points: vec![from, to], stroke: Stroke::solid(LINE_COLOR, STROKE_WIDTH) },
            });
        }
    }

    // Layer 3: committed circles.
    for c in doc.circles() {
        if let Some(center) = doc.point(c.center) {
            let stroke = Stroke::solid(CIRCLE_COLOR, STROKE_WIDTH);
            draw_circle(&mut out, Layer::Circle, center.pos(), c.radius, stroke, options.circle_samples);
        }
    }

    // Layer 4: circle preview.
    if let InputState::DefiningCircle { center, radius } = *input {
        if let Some(center) = doc.point(center) {
            let stroke =
                Stroke { color: CIRCLE_COLOR, width: STROKE_WIDTH, dash: Dash::Dashed, alpha: PREVIEW_ALPHA };
            draw_circle(&mut out, Layer::Preview, center.pos(), radius, stroke, options.circle_samples);
        }
    }

    // Layer 5: points on top of everything they define.
    for (_, p) in doc.points() {
        out.push(DrawCommand {
            layer: Layer::Point,
            shape: Shape::Marker {
                at: p.pos(),
                marker: MarkerShape::Dot,
                size: MARKER_SIZE,
                color: POINT_COLOR,
                alpha: 1.0,
            },
        });
        if let Some(name) = &p.name {
            out.push(DrawCommand {
                layer: Layer::Point,
                shape: Shape::Label {
                    at: Point::new(p.x + LABEL_OFFSET, p.y + LABEL_OFFSET),
                    text: name.clone(),
                    size: LABEL_FONT_SIZE,
                },
            });
        }
    }

    // Layer 6: axes.
    let axis = Stroke::solid(AXIS_COLOR, AXIS_WIDTH);
    out.push(DrawCommand {
        layer: Layer::Axis,
        shape: Shape::Polyline {
            points: vec![Point::new(bounds.xmin, 0.0), Point::new(bounds.xmax, 0.0)],
            stroke: axis,
        },
    });
    out.push(DrawCommand {
        layer: Layer::Axis,
        shape: Shape::Polyline {
            points: vec![Point::new(0.0, bounds.ymin), Point::new(0.0, bounds.ymax)],
            stroke: axis,
        },
    });

    out
}

// =============================================================
// Curves
// =============================================================

fn draw_function(out: &mut Vec<DrawCommand>, source: &str, xs: &[f64]) {
    let formula = match Formula::compile(source) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(error = %e, source, "skipping function that no longer compiles");
            return;
        }
    };
    let ys = formula.sample(xs);
    for run in finite_runs(xs, &ys) {
        out.push(DrawCommand {
            layer: Layer::Function,
            shape: Shape::Polyline { points: run, stroke: Stroke::solid(FUNCTION_COLOR, STROKE_WIDTH) },
        });
    }
}

/// Split samples into runs of consecutive finite values. A run needs at least
/// two samples to be drawable; NaN samples become gaps.
#[must_use]
pub fn finite_runs(xs: &[f64], ys: &[f64]) -> Vec<Vec<Point>> {
    let mut runs = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        if y.is_finite() {
            current.push(Point::new(x, y));
        } else if !current.is_empty() {
            let run = std::mem::take(&mut current);
            if run.len() > 1 {
                runs.push(run);
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

/// Closed outline of a circle, `samples` points over a full turn with the
/// first and last point coinciding.
#[must_use]
pub fn circle_outline(center: Point, radius: f64, samples: usize) -> Vec<Point> {
    expr::linspace(0.0, TAU, samples)
        .into_iter()
        .map(|theta| Point::new(radius.mul_add(theta.cos(), center.x), radius.mul_add(theta.sin(), center.y)))
        .collect()
}

fn draw_circle(
    out: &mut Vec<DrawCommand>,
    layer: Layer,
    center: Point,
    radius: f64,
    stroke: Stroke,
    samples: usize,
) {
    out.push(DrawCommand {
        layer,
        shape: Shape::Polyline { points: circle_outline(center, radius, samples), stroke },
    });
    out.push(DrawCommand {
        layer,
        shape: Shape::Marker {
            at: center,
            marker: MarkerShape::Cross,
            size: MARKER_SIZE,
            color: stroke.color,
            alpha: stroke.alpha,
        },
    });
}
