//! Document model: construction entities and the in-memory store that owns them.
//!
//! Points live in an index-addressed arena. Lines and circles hold
//! [`PointId`]s into that arena rather than copies, so moving a point moves
//! every entity built on it without re-creating anything. The store only
//! grows until [`DocStore::clear`], which means an id handed out by the store
//! stays valid until the next clear.
//!
//! Data flows into this layer from the input engine (mutations). The renderer
//! and the proximity index read from it; neither writes.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEGENERATE_EPS, MIN_RADIUS};
use crate::geom::Point;

/// Index of a point in the [`DocStore`] arena, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub usize);

impl PointId {
    /// 1-based position of the point, as shown to users.
    #[must_use]
    pub fn ordinal(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.ordinal())
    }
}

/// A free point. Coordinates are mutable in place under the Move tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub x: f64,
    pub y: f64,
    pub name: Option<String>,
}

impl GeoPoint {
    #[must_use]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Name for status messages; unnamed points fall back to their id.
    #[must_use]
    pub fn label(&self, id: PointId) -> String {
        self.name.clone().unwrap_or_else(|| id.to_string())
    }
}

/// An infinite line through two model points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub p1: PointId,
    pub p2: PointId,
}

/// A circle around a model point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: PointId,
    pub radius: f64,
}

/// A single-variable formula in `x`, kept as text and re-sampled per render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotFunction {
    pub expr: String,
}

/// The "expression + optional rendered image" pair handed to whatever
/// persists calculations. The core never stores or encodes the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub expr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl CalculationRecord {
    #[must_use]
    pub fn new(expr: impl Into<String>) -> Self {
        Self { expr: expr.into(), image: None }
    }

    /// Attach an already-encoded image captured by the presentation layer.
    #[must_use]
    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

/// Rejections raised by [`DocStore`] mutations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocError {
    #[error("point {0} is not in the model")]
    UnknownPoint(PointId),
    #[error("a line needs two different points")]
    SamePoint,
    #[error("circle radius {0} is too small")]
    RadiusTooSmall(f64),
}

/// In-memory store of construction entities, each collection in creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocStore {
    points: Vec<GeoPoint>,
    lines: Vec<Line>,
    circles: Vec<Circle>,
    functions: Vec<PlotFunction>,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Points ---

    /// Name the next auto-created point would receive.
    #[must_use]
    pub fn next_point_name(&self) -> String {
        format!("P{}", self.points.len() + 1)
    }

    /// Append a point named `P{n}` where `n` is the new point count.
    pub fn add_point(&mut self, x: f64, y: f64) -> PointId {
        let name = self.next_point_name();
        self.insert_point(GeoPoint { x, y, name: Some(name) })
    }

    /// Append a point as given.
    pub fn insert_point(&mut self, point: GeoPoint) -> PointId {
        self.points.push(point);
        PointId(self.points.len() - 1)
    }

    #[must_use]
    pub fn point(&self, id: PointId) -> Option<&GeoPoint> {
        self.points.get(id.0)
    }

    /// Move a point in place. Returns false if the id is not in the model.
    pub fn move_point(&mut self, id: PointId, x: f64, y: f64) -> bool {
        let Some(p) = self.points.get_mut(id.0) else {
            return false;
        };
        p.x = x;
        p.y = y;
        true
    }

    /// All points with their ids, in creation order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &GeoPoint)> {
        self.points.iter().enumerate().map(|(i, p)| (PointId(i), p))
    }

    // --- Lines / circles / functions ---

    /// Commit a line through two distinct model points.
    ///
    /// # Errors
    ///
    /// `UnknownPoint` if either id is outside the model, `SamePoint` if both
    /// ids name the same point. Coincident but distinct points are accepted;
    /// such a line is stored and skipped at render time.
    pub fn add_line(&mut self, p1: PointId, p2: PointId) -> Result<usize, DocError> {
        self.require_point(p1)?;
        self.require_point(p2)?;
        if p1 == p2 {
            return Err(DocError::SamePoint);
        }
        self.lines.push(Line { p1, p2 });
        Ok(self.lines.len() - 1)
    }

    /// Commit a circle around a model point.
    ///
    /// # Errors
    ///
    /// `UnknownPoint` if `center` is outside the model, `RadiusTooSmall` if
    /// `radius` is below [`MIN_RADIUS`] or not finite.
    pub fn add_circle(&mut self, center: PointId, radius: f64) -> Result<usize, DocError> {
        self.require_point(center)?;
        if !radius.is_finite() || radius < MIN_RADIUS {
            return Err(DocError::RadiusTooSmall(radius));
        }
        self.circles.push(Circle { center, radius });
        Ok(self.circles.len() - 1)
    }

    /// Append a function. Validation happens in the engine before this call.
    pub fn add_function(&mut self, expr: impl Into<String>) -> usize {
        self.functions.push(PlotFunction { expr: expr.into() });
        self.functions.len() - 1
    }

    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[must_use]
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    #[must_use]
    pub fn functions(&self) -> &[PlotFunction] {
        &self.functions
    }

    /// Endpoints of a line, or `None` if the points coincide within
    /// [`DEGENERATE_EPS`] or a reference is missing.
    #[must_use]
    pub fn line_endpoints(&self, line: &Line) -> Option<(Point, Point)> {
        let a = self.point(line.p1)?.pos();
        let b = self.point(line.p2)?.pos();
        if (a.x - b.x).abs() < DEGENERATE_EPS && (a.y - b.y).abs() < DEGENERATE_EPS {
            return None;
        }
        Some((a, b))
    }

    // --- Bulk ---

    /// Drop every entity. Point naming restarts at `P1`.
    pub fn clear(&mut self) {
        self.points.clear();
        self.lines.clear();
        self.circles.clear();
        self.functions.clear();
    }

    /// One human-readable line per entity: points, then lines, circles, and
    /// functions, each numbered from 1 in creation order.
    #[must_use]
    pub fn describe(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        for (i, p) in self.points.iter().enumerate() {
            out.push(format!("P{}: ({:.3}, {:.3})", i + 1, p.x, p.y));
        }
        for (i, l) in self.lines.iter().enumerate() {
            out.push(format!("L{}: through P {} and P {}", i + 1, l.p1.ordinal(), l.p2.ordinal()));
        }
        for (i, c) in self.circles.iter().enumerate() {
            let (cx, cy) = self.point(c.center).map_or((f64::NAN, f64::NAN), |p| (p.x, p.y));
            out.push(format!("C{}: center ({cx:.3},{cy:.3}), r={:.3}", i + 1, c.radius));
        }
        for (i, f) in self.functions.iter().enumerate() {
            out.push(format!("F{}: {}", i + 1, f.expr));
        }
        out
    }

    /// Total number of entities across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len() + self.lines.len() + self.circles.len() + self.functions.len()
    }

    /// Returns `true` if the store contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn require_point(&self, id: PointId) -> Result<(), DocError> {
        if id.0 < self.points.len() {
            Ok(())
        } else {
            Err(DocError::UnknownPoint(id))
        }
    }
}
