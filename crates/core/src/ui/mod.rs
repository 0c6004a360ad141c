//! Interactive canvas for rubber-band selection.
//!
//! The canvas is a thin shell around [`DragSessionController`]: it turns egui
//! drag responses into press/drag/release events, provides an egui-backed
//! [`RenderSurface`], and draws the scene with selected figures highlighted.
//!
//! - [`state`]: Shared result and the egui render surface
//! - [`settings`]: User preferences and persistence
//! - [`rendering`]: Drawing helpers for figures and the band
//! - [`selection`]: egui drag response translation
//! - [`canvas`]: The `eframe::App` itself
//!
//! [`DragSessionController`]: crate::controller::DragSessionController
//! [`RenderSurface`]: crate::render::RenderSurface
//!
//! # Usage
//!
//! ```ignore
//! use rubberband_core::{ui, Config, Scene};
//!
//! let area = ui::run_selection_canvas(Scene::demo()?, Config::load()?)?;
//! ```

mod canvas;
mod rendering;
mod selection;
mod settings;
mod state;

pub use canvas::SelectionCanvas;
pub use selection::CanvasEvent;
pub use settings::Settings;
pub use state::{CanvasResult, CanvasSurface};

use crate::config::Config;
use crate::error::Result;
use crate::scene::Scene;

/// Opens the selection canvas over `scene`.
///
/// # Returns
/// - `Ok(Some(rect))` - The final rubber band of the last completed drag
/// - `Ok(None)` - The window was closed without dragging
/// - `Err(e)` - The window could not be created or the event loop failed
pub fn run_selection_canvas(scene: Scene, config: Config) -> Result<Option<eframe::egui::Rect>> {
    canvas::run(scene, config)
}
