//! Rubber-band geometry.
//!
//! [`GeometryTracker`] owns the band while a drag is in progress. The helpers
//! below implement overlap tests where empty rectangles intersect nothing, so
//! a band that has not been dragged yet covers no figures.

use crate::render::RenderSurface;
use eframe::egui::{self, Pos2, Rect};

/// Normalizes two corners into a rectangle with non-negative size.
///
/// The left edge is the smaller x of the two points and the width their
/// distance; the same holds vertically.
pub fn normalize(origin: Pos2, current: Pos2) -> Rect {
    let (x, width) = if current.x < origin.x {
        (current.x, origin.x - current.x)
    } else {
        (origin.x, current.x - origin.x)
    };
    let (y, height) = if current.y < origin.y {
        (current.y, origin.y - current.y)
    } else {
        (origin.y, current.y - origin.y)
    };
    Rect::from_min_size(egui::pos2(x, y), egui::vec2(width, height))
}

/// Returns true if the rectangle has no area.
pub fn is_empty(rect: Rect) -> bool {
    !(rect.width() > 0.0 && rect.height() > 0.0)
}

/// Returns true if the interiors of `a` and `b` overlap.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    if is_empty(a) || is_empty(b) {
        return false;
    }
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Returns true if the ellipse inscribed in `bounds` overlaps `region`.
pub fn ellipse_overlaps(bounds: Rect, region: Rect) -> bool {
    if !overlaps(bounds, region) {
        return false;
    }
    let center = bounds.center();
    let rx = bounds.width() / 2.0;
    let ry = bounds.height() / 2.0;

    // Closest point of the region to the ellipse center, in unit-circle space.
    let nx = (center.x.clamp(region.min.x, region.max.x) - center.x) / rx;
    let ny = (center.y.clamp(region.min.y, region.max.y) - center.y) / ry;
    nx * nx + ny * ny < 1.0
}

/// Owns the rubber band for the duration of a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryTracker {
    band: Rect,
}

impl GeometryTracker {
    /// Creates a zero-size band at `origin` and shows it on the surface.
    pub fn start(origin: Pos2, surface: &mut dyn RenderSurface) -> Self {
        let band = Rect::from_min_size(origin, egui::Vec2::ZERO);
        surface.show_overlay(band);
        surface.request_repaint(band);
        Self { band }
    }

    pub fn band(&self) -> Rect {
        self.band
    }

    /// Reshapes the band to span `origin` and `current`.
    ///
    /// Both the old and the new region are repainted so that only the area the
    /// band touched is invalidated.
    pub fn update(&mut self, origin: Pos2, current: Pos2, surface: &mut dyn RenderSurface) -> Rect {
        surface.request_repaint(self.band);
        self.band = normalize(origin, current);
        surface.show_overlay(self.band);
        surface.request_repaint(self.band);
        self.band
    }

    /// Erases the band and hands back its final shape.
    pub fn finish(self, surface: &mut dyn RenderSurface) -> Rect {
        surface.request_repaint(self.band);
        surface.hide_overlay(self.band);
        self.band
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn normalizes_any_drag_direction() {
        let origin = egui::pos2(100.0, 100.0);

        let rect = normalize(origin, egui::pos2(50.0, 150.0));
        assert_eq!(rect.min, egui::pos2(50.0, 100.0));
        assert_eq!(rect.size(), egui::vec2(50.0, 50.0));

        let rect = normalize(origin, egui::pos2(130.0, 20.0));
        assert_eq!(rect.min, egui::pos2(100.0, 20.0));
        assert_eq!(rect.size(), egui::vec2(30.0, 80.0));
    }

    #[test]
    fn empty_rectangles_never_overlap() {
        let point = Rect::from_min_size(egui::pos2(5.0, 5.0), egui::Vec2::ZERO);
        let figure = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0));
        assert!(!overlaps(point, figure));
        assert!(overlaps(figure, figure));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0));
        let b = Rect::from_min_max(egui::pos2(10.0, 0.0), egui::pos2(20.0, 10.0));
        assert!(!overlaps(a, b));
    }

    #[test]
    fn ellipse_misses_bounding_box_corner() {
        let bounds = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0));
        let corner = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(10.0, 10.0));
        let middle = Rect::from_min_max(egui::pos2(40.0, 0.0), egui::pos2(60.0, 5.0));

        assert!(overlaps(bounds, corner));
        assert!(!ellipse_overlaps(bounds, corner));
        assert!(ellipse_overlaps(bounds, middle));
    }

    #[test]
    fn tracker_repaints_old_and_new_regions() {
        let mut surface = RecordingSurface::new();
        let origin = egui::pos2(10.0, 10.0);
        let mut tracker = GeometryTracker::start(origin, &mut surface);
        surface.dirty.clear();

        let first = tracker.update(origin, egui::pos2(20.0, 20.0), &mut surface);
        let second = tracker.update(origin, egui::pos2(5.0, 30.0), &mut surface);

        assert_eq!(
            surface.dirty,
            vec![Rect::from_min_size(origin, egui::Vec2::ZERO), first, first, second]
        );
        assert_eq!(surface.overlay, Some(second));

        let last = tracker.finish(&mut surface);
        assert_eq!(last, second);
        assert_eq!(surface.overlay, None);
    }
}
