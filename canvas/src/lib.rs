//! Interactive 2D geometry construction and function plotting engine.
//!
//! This crate owns everything behind the plot area: translating pointer
//! gestures into construction mutations, keeping the points, lines, circles,
//! and plotted functions of the current session, validating and evaluating
//! formulas in `x`, and building the scene as a list of draw commands. The
//! host is responsible only for delivering world-coordinate pointer events,
//! rasterizing the draw commands, and acting on the returned
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Tool state machine and the host-facing [`engine::Engine`] |
//! | [`doc`] | Point arena, entity types, and the document store |
//! | [`input`] | Tools and the construction-in-progress state |
//! | [`hit`] | Nearest-point lookup for snapping and dragging |
//! | [`clip`] | Extending lines through two points to the viewport |
//! | [`expr`] | Restricted formula language: parse, validate, sample |
//! | [`render`] | Scene building in fixed layer order |
//! | [`geom`] | World-space points and viewport bounds |
//! | [`consts`] | Tolerances, sample densities, and render styles |

pub mod clip;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod expr;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
