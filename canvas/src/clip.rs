//! Viewport clipping for infinite lines.
//!
//! A line is drawn as a finite segment that overshoots the visible box on both
//! sides. The segment is found by intersecting the line with all four boundary
//! lines and padding the extreme parameters by [`CLIP_PAD`].

#[cfg(test)]
#[path = "clip_test.rs"]
mod clip_test;

use crate::consts::{CLIP_PAD, DEGENERATE_EPS};
use crate::geom::{Bounds, Point};

/// Parameters `t` at which `p1 + t * (p2 - p1)` meets each boundary line.
///
/// An axis whose direction component is within [`DEGENERATE_EPS`] of zero is
/// skipped. Returns an empty list for a degenerate direction.
#[must_use]
pub fn boundary_params(p1: Point, p2: Point, bounds: &Bounds) -> Vec<f64> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let mut ts = Vec::with_capacity(4);
    if dx.abs() > DEGENERATE_EPS {
        ts.push((bounds.xmin - p1.x) / dx);
        ts.push((bounds.xmax - p1.x) / dx);
    }
    if dy.abs() > DEGENERATE_EPS {
        ts.push((bounds.ymin - p1.y) / dy);
        ts.push((bounds.ymax - p1.y) / dy);
    }
    ts
}

/// Endpoints of the renderable segment of the infinite line through `p1` and
/// `p2`, or `None` when the two points coincide.
#[must_use]
pub fn clip_line(p1: Point, p2: Point, bounds: &Bounds) -> Option<(Point, Point)> {
    let ts = boundary_params(p1, p2, bounds);
    if ts.is_empty() {
        return None;
    }
    let t_min = ts.iter().copied().fold(f64::INFINITY, f64::min) - CLIP_PAD;
    let t_max = ts.iter().copied().fold(f64::NEG_INFINITY, f64::max) + CLIP_PAD;
    Some((lerp(p1, p2, t_min), lerp(p1, p2, t_max)))
}

/// The exact part of the line inside `bounds`, from where it enters the box
/// to where it leaves. Both endpoints lie on box edges. `None` when the line
/// misses the box or the points coincide.
#[must_use]
pub fn visible_segment(p1: Point, p2: Point, bounds: &Bounds) -> Option<(Point, Point)> {
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    let axes = [
        (p2.x - p1.x, p1.x, bounds.xmin, bounds.xmax),
        (p2.y - p1.y, p1.y, bounds.ymin, bounds.ymax),
    ];
    for (d, origin, lo, hi) in axes {
        if d.abs() > DEGENERATE_EPS {
            let a = (lo - origin) / d;
            let b = (hi - origin) / d;
            t_enter = t_enter.max(a.min(b));
            t_exit = t_exit.min(a.max(b));
        } else if origin < lo || origin > hi {
            return None;
        }
    }
    if !t_enter.is_finite() || !t_exit.is_finite() || t_enter > t_exit {
        return None;
    }
    Some((lerp(p1, p2, t_enter), lerp(p1, p2, t_exit)))
}

fn lerp(p1: Point, p2: Point, t: f64) -> Point {
    Point::new((p2.x - p1.x).mul_add(t, p1.x), (p2.y - p1.y).mul_add(t, p1.y))
}
