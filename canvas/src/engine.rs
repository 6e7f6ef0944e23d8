//! Engine: the tool state machine that turns pointer gestures into model
//! mutations.
//!
//! The engine owns the document, the UI state, and the construction in
//! progress. Every input handler returns a list of [`Action`]s telling the
//! host what changed and whether a redraw is due. Rendering is a pure read of
//! the same state through [`Engine::render`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, warn};

use crate::consts::{MIN_RADIUS, SNAP_TOLERANCE};
use crate::doc::{CalculationRecord, DocError, DocStore, PointId};
use crate::expr::{ExpressionError, Formula};
use crate::geom::{Bounds, Point};
use crate::hit;
use crate::input::{InputState, Tool, UiState};
use crate::render::{self, DrawCommand, RenderOptions};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    PointCreated { id: PointId, name: String, x: f64, y: f64 },
    PointMoved { id: PointId, x: f64, y: f64 },
    LineCreated { index: usize, p1: PointId, p2: PointId },
    CircleCreated { index: usize, center: PointId, radius: f64 },
    FunctionPlotted { index: usize, record: CalculationRecord },
    Cleared,
    Warning { message: String },
    /// The model changed; redraw everything.
    RenderNeeded,
    /// Only transient preview state changed.
    PreviewRenderNeeded,
}

/// Tunables for an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Radius within which a click reuses an existing point.
    pub snap_tolerance: f64,
    /// Smallest radius a released circle gesture may commit.
    pub min_radius: f64,
    /// Initial plot bounds, also used to gate pointer-down events.
    pub viewport: Bounds,
    pub render: RenderOptions,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            min_radius: MIN_RADIUS,
            viewport: Bounds::default(),
            render: RenderOptions::default(),
        }
    }
}

/// Core engine state. Holds no presentation handles, so it runs headless.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    pub doc: DocStore,
    pub ui: UiState,
    pub input: InputState,
    viewport: Bounds,
    config: EngineConfig,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            doc: DocStore::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            viewport: config.viewport,
            config,
        }
    }

    // --- Tool / viewport ---

    /// Switch tools. Any construction in progress is abandoned.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let had_preview = !self.input.is_idle();
        self.ui.tool = tool;
        self.input = InputState::Idle;
        self.set_status(format!("Tool: {tool}"));
        debug!(%tool, "tool changed");
        if had_preview { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Replace the visible bounds. Invalid bounds are refused with a status
    /// message and leave the viewport unchanged.
    pub fn set_viewport(&mut self, bounds: Bounds) -> Vec<Action> {
        if !bounds.is_valid() {
            warn!(?bounds, "ignoring invalid viewport");
            self.set_status("Viewport must have min < max on both axes");
            return Vec::new();
        }
        self.viewport = bounds;
        debug!(?bounds, "viewport changed");
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, world: Point) -> Vec<Action> {
        if !world.is_finite() || !self.viewport.contains(world) {
            debug!(x = world.x, y = world.y, "pointer down outside plot area");
            self.set_status("Click inside the plot area");
            return Vec::new();
        }

        match self.ui.tool {
            Tool::Point => {
                let mut actions = Vec::new();
                let id = self.create_point(world, &mut actions);
                let name = self.point_label(id);
                self.set_status(format!("Added point {name} at ({:.2}, {:.2})", world.x, world.y));
                actions.push(Action::RenderNeeded);
                actions
            }
            Tool::Move => {
                match hit::find_nearest(&self.doc, world, self.config.snap_tolerance) {
                    Some(h) => {
                        self.input = InputState::DraggingPoint { id: h.point_id };
                        let name = self.point_label(h.point_id);
                        self.set_status(format!("Dragging {name}"));
                    }
                    None => {
                        self.input = InputState::Idle;
                        self.set_status("Move: click a point to drag");
                    }
                }
                Vec::new()
            }
            Tool::Line => self.pick_line_point(world),
            Tool::Circle => {
                let mut actions = Vec::new();
                let center = self.snap_or_create(world, &mut actions);
                self.input = InputState::DefiningCircle { center, radius: 0.0 };
                let name = self.point_label(center);
                self.set_status(format!("Circle center set to {name}. Drag to set radius."));
                actions.push(Action::RenderNeeded);
                actions
            }
            Tool::Plot => {
                self.set_status("Plot: use the plot command to enter an expression.");
                Vec::new()
            }
        }
    }

    pub fn on_pointer_move(&mut self, world: Point) -> Vec<Action> {
        if !world.is_finite() {
            return Vec::new();
        }

        match self.input {
            InputState::DraggingPoint { id } => {
                if self.doc.move_point(id, world.x, world.y) {
                    vec![Action::PointMoved { id, x: world.x, y: world.y }, Action::RenderNeeded]
                } else {
                    self.input = InputState::Idle;
                    Vec::new()
                }
            }
            InputState::DefiningCircle { center, .. } => match self.doc.point(center) {
                Some(c) => {
                    let radius = c.pos().distance(world);
                    self.input = InputState::DefiningCircle { center, radius };
                    vec![Action::PreviewRenderNeeded]
                }
                None => {
                    self.input = InputState::Idle;
                    Vec::new()
                }
            },
            InputState::Idle | InputState::PickingLine { .. } => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, world: Point) -> Vec<Action> {
        if !world.is_finite() {
            return Vec::new();
        }

        match self.input {
            InputState::DraggingPoint { id } => {
                self.input = InputState::Idle;
                if !self.doc.move_point(id, world.x, world.y) {
                    return Vec::new();
                }
                let name = self.point_label(id);
                self.set_status(format!("Moved {name} to ({:.2}, {:.2})", world.x, world.y));
                debug!(%id, x = world.x, y = world.y, "point moved");
                vec![Action::PointMoved { id, x: world.x, y: world.y }, Action::RenderNeeded]
            }
            InputState::DefiningCircle { center, .. } => {
                self.input = InputState::Idle;
                let Some(c) = self.doc.point(center) else {
                    return vec![Action::RenderNeeded];
                };
                let radius = c.pos().distance(world);
                self.commit_circle(center, radius)
            }
            InputState::Idle | InputState::PickingLine { .. } => Vec::new(),
        }
    }

    // --- Commands ---

    /// Validate and commit a formula in `x`.
    ///
    /// # Errors
    ///
    /// Returns the parse or pre-flight evaluation error; the model is left
    /// unchanged and the status line shows the message.
    pub fn submit_plot_expression(&mut self, expr: &str) -> Result<Vec<Action>, ExpressionError> {
        let formula = match Formula::preflight(expr) {
            Ok(f) => f,
            Err(e) => {
                warn!(error = %e, expr, "expression rejected");
                self.set_status(format!("Expression error: {e}"));
                return Err(e);
            }
        };

        let source = formula.source().to_owned();
        let index = self.doc.add_function(source.clone());
        self.set_status(format!("Function plotted: {source}"));
        debug!(index, expr = %source, "function plotted");
        Ok(vec![
            Action::FunctionPlotted { index, record: CalculationRecord::new(source) },
            Action::RenderNeeded,
        ])
    }

    /// Drop every entity and any construction in progress.
    pub fn clear_all(&mut self) -> Vec<Action> {
        self.doc.clear();
        self.input = InputState::Idle;
        self.set_status("Cleared all objects");
        debug!("model cleared");
        vec![Action::Cleared, Action::RenderNeeded]
    }

    /// One line per entity; empty when the model is empty.
    #[must_use]
    pub fn list_objects(&self) -> Vec<String> {
        self.doc.describe()
    }

    /// Pair a plotted function with an image the presentation layer captured.
    #[must_use]
    pub fn calculation_record(&self, index: usize, image: Option<Vec<u8>>) -> Option<CalculationRecord> {
        let f = self.doc.functions().get(index)?;
        let record = CalculationRecord::new(f.expr.clone());
        Some(match image {
            Some(bytes) => record.with_image(bytes),
            None => record,
        })
    }

    // --- Render ---

    /// Build the scene for `bounds`.
    #[must_use]
    pub fn render(&self, bounds: &Bounds) -> Vec<DrawCommand> {
        render::draw(&self.doc, &self.input, bounds, &self.config.render)
    }

    // --- Queries ---

    #[must_use]
    pub fn status(&self) -> &str {
        &self.ui.status
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.ui.tool
    }

    #[must_use]
    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Internals ---

    fn set_status(&mut self, status: impl Into<String>) {
        self.ui.status = status.into();
    }

    fn point_label(&self, id: PointId) -> String {
        self.doc.point(id).map_or_else(|| id.to_string(), |p| p.label(id))
    }

    fn create_point(&mut self, world: Point, actions: &mut Vec<Action>) -> PointId {
        let id = self.doc.add_point(world.x, world.y);
        let name = self.point_label(id);
        debug!(%id, %name, x = world.x, y = world.y, "point created");
        actions.push(Action::PointCreated { id, name, x: world.x, y: world.y });
        id
    }

    /// Reuse the nearest point within the snap tolerance, or create one.
    fn snap_or_create(&mut self, world: Point, actions: &mut Vec<Action>) -> PointId {
        match hit::find_nearest(&self.doc, world, self.config.snap_tolerance) {
            Some(h) => h.point_id,
            None => self.create_point(world, actions),
        }
    }

    fn pick_line_point(&mut self, world: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let id = self.snap_or_create(world, &mut actions);

        match self.input {
            InputState::PickingLine { first } => {
                self.input = InputState::Idle;
                match self.doc.add_line(first, id) {
                    Ok(index) => {
                        let (a, b) = (self.point_label(first), self.point_label(id));
                        self.set_status(format!("Line created through {a} and {b}"));
                        debug!(index, %first, second = %id, "line created");
                        actions.push(Action::LineCreated { index, p1: first, p2: id });
                    }
                    Err(DocError::SamePoint) => {
                        let message = "Select two different points.".to_owned();
                        warn!(%id, "line needs two different points");
                        self.set_status(message.clone());
                        actions.push(Action::Warning { message });
                    }
                    Err(e) => {
                        warn!(error = %e, "line rejected");
                        self.set_status(e.to_string());
                        actions.push(Action::Warning { message: e.to_string() });
                    }
                }
            }
            _ => {
                self.input = InputState::PickingLine { first: id };
                let name = self.point_label(id);
                self.set_status(format!("Selected {name} for line (1/2)"));
            }
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    fn commit_circle(&mut self, center: PointId, radius: f64) -> Vec<Action> {
        if radius.is_nan() || radius < self.config.min_radius {
            debug!(%center, radius, "circle radius below minimum");
            self.set_status("Circle radius too small, cancelled.");
            return vec![Action::RenderNeeded];
        }
        match self.doc.add_circle(center, radius) {
            Ok(index) => {
                let name = self.point_label(center);
                self.set_status(format!("Circle created center {name}, r={radius:.3}"));
                debug!(index, %center, radius, "circle created");
                vec![Action::CircleCreated { index, center, radius }, Action::RenderNeeded]
            }
            Err(DocError::RadiusTooSmall(_)) => {
                self.set_status("Circle radius too small, cancelled.");
                vec![Action::RenderNeeded]
            }
            Err(e) => {
                warn!(error = %e, "circle rejected");
                self.set_status(e.to_string());
                vec![Action::RenderNeeded]
            }
        }
    }
}
