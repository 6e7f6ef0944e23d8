//! Proximity lookup: which existing point, if any, a click lands on.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{DocStore, PointId};
use crate::geom::Point;

/// A point found near a query, with its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub point_id: PointId,
    pub distance: f64,
}

/// Find the point closest to `query` whose distance is strictly below `tolerance`.
///
/// Scans in creation order and only replaces the best candidate on a strictly
/// smaller distance, so ties go to the earliest point.
#[must_use]
pub fn find_nearest(doc: &DocStore, query: Point, tolerance: f64) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut best_distance = tolerance;
    for (id, p) in doc.points() {
        let d = p.pos().distance(query);
        if d < best_distance {
            best_distance = d;
            best = Some(Hit { point_id: id, distance: d });
        }
    }
    best
}
