//! Input model: tools and the gesture state machine.
//!
//! `Tool` captures how the user wants pointer events interpreted. `InputState`
//! is the construction in progress between events, carrying the transient
//! preview data (pending line point, dragged point, circle center and radius)
//! that the renderer shows before anything is committed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::doc::PointId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Click to add a point (default).
    #[default]
    Point,
    /// Drag an existing point.
    Move,
    /// Click two points to join them with a line.
    Line,
    /// Click a center, drag out the radius.
    Circle,
    /// Canvas clicks are inert; formulas arrive through the plot command.
    Plot,
}

impl Tool {
    pub const ALL: [Tool; 5] = [Self::Point, Self::Move, Self::Line, Self::Circle, Self::Plot];

    /// Display name, as shown in the status line.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Move => "Move",
            Self::Line => "Line",
            Self::Circle => "Circle",
            Self::Plot => "Plot",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized tool name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool '{0}' (expected point, move, line, circle, or plot)")]
pub struct UnknownTool(pub String);

impl FromStr for Tool {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTool(s.to_owned()))
    }
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Feedback for the last interaction.
    pub status: String,
}

/// Construction in progress.
///
/// Every variant except `Idle` belongs to exactly one tool, and switching
/// tools always returns to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// Nothing pending.
    #[default]
    Idle,
    /// Move tool: a point follows the pointer until release.
    DraggingPoint {
        /// Point being dragged.
        id: PointId,
    },
    /// Line tool: the first of two points has been picked.
    PickingLine {
        /// First picked point.
        first: PointId,
    },
    /// Circle tool: the center is fixed and the radius follows the pointer.
    DefiningCircle {
        /// Center point, already in the model.
        center: PointId,
        /// Distance from the center to the latest pointer position.
        radius: f64,
    },
}

impl InputState {
    /// Points picked toward a line, in pick order.
    #[must_use]
    pub fn line_selection(&self) -> Vec<PointId> {
        match *self {
            Self::PickingLine { first } => vec![first],
            _ => Vec::new(),
        }
    }

    #[must_use]
    pub fn dragged_point(&self) -> Option<PointId> {
        match *self {
            Self::DraggingPoint { id } => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn circle_center(&self) -> Option<PointId> {
        match *self {
            Self::DefiningCircle { center, .. } => Some(center),
            _ => None,
        }
    }

    #[must_use]
    pub fn circle_preview_radius(&self) -> Option<f64> {
        match *self {
            Self::DefiningCircle { radius, .. } => Some(radius),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
