//! The surface the rubber band is drawn on.

use eframe::egui::Rect;

/// Receives repaint requests and the rubber-band overlay.
pub trait RenderSurface {
    /// Marks `region` as needing a repaint.
    fn request_repaint(&mut self, region: Rect);

    /// Shows `shape` as the rubber-band overlay, replacing any earlier shape.
    fn show_overlay(&mut self, shape: Rect);

    /// Removes the overlay last shown as `shape`.
    fn hide_overlay(&mut self, shape: Rect);
}

/// A surface that only records what it was asked to do.
///
/// Used by the replay mode of the CLI, which has nothing to draw on.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub dirty: Vec<Rect>,
    pub overlay: Option<Rect>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of every region requested since the last call.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.drain(..).reduce(|a, b| a.union(b))
    }
}

impl RenderSurface for RecordingSurface {
    fn request_repaint(&mut self, region: Rect) {
        self.dirty.push(region);
    }

    fn show_overlay(&mut self, shape: Rect) {
        self.overlay = Some(shape);
    }

    fn hide_overlay(&mut self, _shape: Rect) {
        self.overlay = None;
    }
}
