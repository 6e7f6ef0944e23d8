//! Shared numeric constants for the canvas crate.

// ── Tolerances ──────────────────────────────────────────────────

/// World-space radius within which a click reuses an existing point.
pub const SNAP_TOLERANCE: f64 = 0.4;

/// Smallest circle radius accepted at commit time.
pub const MIN_RADIUS: f64 = 1e-6;

/// Coordinate difference below which two points count as coincident.
pub const DEGENERATE_EPS: f64 = 1e-9;

/// Parameter padding added on both ends of a clipped line.
pub const CLIP_PAD: f64 = 1.0;

// ── Sampling ────────────────────────────────────────────────────

/// Samples taken across the visible x-range for each plotted function.
pub const CURVE_SAMPLES: usize = 800;

/// Samples taken over a full revolution for each circle outline.
pub const CIRCLE_SAMPLES: usize = 240;

// ── Viewport ────────────────────────────────────────────────────

pub const DEFAULT_XMIN: f64 = -10.0;
pub const DEFAULT_XMAX: f64 = 10.0;
pub const DEFAULT_YMIN: f64 = -7.0;
pub const DEFAULT_YMAX: f64 = 7.0;

// ── Styling ─────────────────────────────────────────────────────

pub const FUNCTION_COLOR: &str = "#000000";
pub const LINE_COLOR: &str = "#2ca02c";
pub const CIRCLE_COLOR: &str = "#d62728";
pub const POINT_COLOR: &str = "#1f77b4";
pub const AXIS_COLOR: &str = "#444444";

/// Stroke width shared by functions, lines, and circles.
pub const STROKE_WIDTH: f64 = 1.6;
pub const AXIS_WIDTH: f64 = 0.9;

/// Opacity of the in-progress circle outline.
pub const PREVIEW_ALPHA: f64 = 0.7;

/// Marker size in points, for both point dots and circle centers.
pub const MARKER_SIZE: f64 = 6.0;

/// World-space offset of a point's name label from the point itself.
pub const LABEL_OFFSET: f64 = 0.1;
pub const LABEL_FONT_SIZE: f64 = 9.0;
