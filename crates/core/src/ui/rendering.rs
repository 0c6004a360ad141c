//! Drawing helpers for the selection canvas.
//!
//! Everything here works in screen coordinates; callers translate scene
//! rectangles with the canvas origin first.

use crate::scene::Shape;
use eframe::egui;

const FIGURE_FILL: egui::Color32 = egui::Color32::from_rgb(70, 90, 120);
const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(230, 160, 40);
const DECORATOR_STROKE: egui::Color32 = egui::Color32::from_rgb(140, 140, 160);

/// Draws one figure, highlighted when selected.
///
/// Decorators are drawn as a thin outline around the figure they wrap.
pub fn draw_figure(
    painter: &egui::Painter,
    shape: &Shape,
    offset: egui::Vec2,
    selected: bool,
    decorator: bool,
) {
    let rect = shape.bounds().translate(offset);

    if decorator {
        let color = if selected { SELECTED_FILL } else { DECORATOR_STROKE };
        painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.5, color), egui::StrokeKind::Middle);
        return;
    }

    let fill = if selected { SELECTED_FILL } else { FIGURE_FILL };
    let stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    match shape {
        Shape::Rect(_) => {
            painter.rect_filled(rect, 2.0, fill);
            painter.rect_stroke(rect, 2.0, stroke, egui::StrokeKind::Inside);
        }
        Shape::Ellipse(_) => {
            let radius = rect.size() / 2.0;
            painter.add(egui::Shape::ellipse_filled(rect.center(), radius, fill));
            painter.add(egui::Shape::ellipse_stroke(rect.center(), radius, stroke));
        }
    }
}

/// Outlines the bounding box the broad phase sees for a figure.
pub fn draw_bounds(painter: &egui::Painter, bounds: egui::Rect) {
    painter.rect_stroke(
        bounds,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_white_alpha(40)),
        egui::StrokeKind::Outside,
    );
}

/// Draws a label centered on `rect`.
pub fn draw_label(painter: &egui::Painter, rect: egui::Rect, text: &str) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );
}

/// Dims the canvas outside the rubber band.
///
/// # Arguments
/// * `painter` - The egui painter to draw with
/// * `canvas_rect` - The full canvas rectangle
/// * `band` - The rubber band to keep clear
/// * `alpha` - Darkness level (0-255, higher = darker)
pub fn draw_band_overlay(
    painter: &egui::Painter,
    canvas_rect: egui::Rect,
    band: egui::Rect,
    alpha: u8,
) {
    let color = egui::Color32::from_black_alpha(alpha);
    let regions = [
        // Above
        egui::Rect::from_min_max(canvas_rect.min, egui::pos2(canvas_rect.max.x, band.min.y)),
        // Below
        egui::Rect::from_min_max(egui::pos2(canvas_rect.min.x, band.max.y), canvas_rect.max),
        // Left
        egui::Rect::from_min_max(
            egui::pos2(canvas_rect.min.x, band.min.y),
            egui::pos2(band.min.x, band.max.y),
        ),
        // Right
        egui::Rect::from_min_max(
            egui::pos2(band.max.x, band.min.y),
            egui::pos2(canvas_rect.max.x, band.max.y),
        ),
    ];
    for region in regions {
        painter.rect_filled(region, 0.0, color);
    }

    painter.rect_filled(band, 0.0, egui::Color32::from_rgba_unmultiplied(120, 170, 255, 30));
    painter.rect_stroke(
        band,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(120, 170, 255)),
        egui::StrokeKind::Middle,
    );
}

/// Tints the region the last frame invalidated.
pub fn draw_dirty_region(painter: &egui::Painter, region: egui::Rect) {
    painter.rect_stroke(
        region,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_rgb(220, 60, 60)),
        egui::StrokeKind::Outside,
    );
}
