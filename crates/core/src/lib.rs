//! Rubberband Core Library
//!
//! This library implements rubber-band (drag-rectangle) selection over a layer
//! of figures. While a rectangle is dragged across a canvas, the library keeps
//! track of which figures the rectangle covers and synchronizes that coverage
//! into the selection models of any number of interactors.
//!
//! # Overview
//!
//! - **Drag control**: the press/drag/release state machine in [`controller`]
//! - **Geometry**: band normalization and overlap tests in [`geometry`]
//! - **Coverage**: per-frame figure sets with holdovers in [`differ`]
//! - **Selection**: registry and idempotent model updates in [`registry`] and
//!   [`synchronizer`]
//! - **Collaborators**: the traits the application implements in [`figure`]
//!   and [`render`]
//!
//! Two selection semantics are supported. A *selecting* drag clears the
//! selections at press and then makes them follow the band exactly. A
//! *toggling* drag flips a figure's selection each time it crosses the band
//! edge.
//!
//! # Quick Start
//!
//! ```ignore
//! use rubberband_core::{
//!     DragContext, DragSessionController, PointerEvent, RecordingSurface, Scene,
//! };
//!
//! let scene = Scene::demo()?;
//! let mut surface = RecordingSurface::new();
//! let mut controller = DragSessionController::default();
//! for interactor in scene.interactors() {
//!     controller.add_selection_interactor(interactor);
//! }
//!
//! let mut ctx = DragContext::new(&scene, &mut surface);
//! controller.press(&mut PointerEvent::at(0.0, 0.0), &mut ctx);
//! controller.drag(&mut PointerEvent::at(300.0, 200.0), &mut ctx);
//! controller.release(&mut PointerEvent::at(300.0, 200.0), &mut ctx);
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`input`]: Pointer events and gesture filters
//! - [`model`]: A ready-made selection model
//! - [`scene`]: In-memory figure layer loaded from JSON
//! - [`ui`]: Interactive canvas

pub mod config;
pub mod controller;
pub mod differ;
pub mod error;
pub mod figure;
pub mod geometry;
pub mod input;
pub mod model;
pub mod registry;
pub mod render;
pub mod scene;
pub mod synchronizer;
pub mod ui;

// Re-export primary types for convenience
pub use config::Config;
pub use controller::{DragContext, DragMode, DragSessionController};
pub use error::{AppError, Result};
pub use figure::{FigureId, FigureLayer, Interactor, InteractorId, SelectionModel};
pub use input::{Modifiers, MouseFilter, PointerButton, PointerEvent};
pub use model::{BasicSelectionModel, SelectionMode};
pub use render::{RecordingSurface, RenderSurface};
pub use scene::Scene;

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup. This loads `.env` files if present.
pub fn init() {
    let _ = dotenvy::dotenv();
}
