//! UI state types shared between the canvas and its caller.

use crate::render::RenderSurface;
use eframe::egui;

/// What the canvas hands back once the window is closed.
#[derive(Clone, Debug, Default)]
pub struct CanvasResult {
    /// The final rubber band of the last completed drag.
    pub selected_area: Option<egui::Rect>,
}

/// Render surface backed by the egui context.
///
/// egui redraws whole frames, so repaint requests only accumulate the dirty
/// region for the debug overlay and ask the context for another frame.
#[derive(Default)]
pub struct CanvasSurface {
    ctx: Option<egui::Context>,
    /// Rubber band in scene coordinates.
    pub overlay: Option<egui::Rect>,
    /// Union of regions invalidated during the current frame.
    pub dirty: Option<egui::Rect>,
}

impl CanvasSurface {
    pub fn attach(&mut self, ctx: &egui::Context) {
        self.ctx = Some(ctx.clone());
    }

    /// Starts a new frame, returning the regions invalidated by the last one.
    pub fn take_dirty(&mut self) -> Option<egui::Rect> {
        self.dirty.take()
    }
}

impl RenderSurface for CanvasSurface {
    fn request_repaint(&mut self, region: egui::Rect) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(region),
            None => region,
        });
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }

    fn show_overlay(&mut self, shape: egui::Rect) {
        self.overlay = Some(shape);
    }

    fn hide_overlay(&mut self, _shape: egui::Rect) {
        self.overlay = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_dirty_regions_until_taken() {
        let mut surface = CanvasSurface::default();
        let a = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0));
        let b = egui::Rect::from_min_max(egui::pos2(20.0, 5.0), egui::pos2(30.0, 40.0));
        surface.request_repaint(a);
        surface.request_repaint(b);

        assert_eq!(surface.take_dirty(), Some(a.union(b)));
        assert_eq!(surface.take_dirty(), None);
    }
}
