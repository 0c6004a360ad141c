//! Translation of egui drag responses into controller events.
//!
//! egui reports drags on a response; the controller wants discrete press,
//! drag and release events in scene coordinates.

use crate::input::{Modifiers, PointerButton, PointerEvent};
use eframe::egui;

/// A pointer event for the drag controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasEvent {
    Press(PointerEvent),
    Drag(PointerEvent),
    Release(PointerEvent),
}

const BUTTONS: [egui::PointerButton; 3] = [
    egui::PointerButton::Primary,
    egui::PointerButton::Secondary,
    egui::PointerButton::Middle,
];

/// Maps a canvas position to scene coordinates.
pub fn to_scene(canvas_origin: egui::Pos2, pos: egui::Pos2) -> egui::Pos2 {
    pos - canvas_origin.to_vec2()
}

/// Reads the drag state of `response` and returns the matching event.
///
/// # Arguments
/// * `response` - The response of the canvas interaction area
/// * `ctx` - The egui context, used for modifiers and the last pointer position
/// * `canvas_origin` - Screen position of the scene origin
pub fn process_drag_event(
    response: &egui::Response,
    ctx: &egui::Context,
    canvas_origin: egui::Pos2,
) -> Option<CanvasEvent> {
    let modifiers: Modifiers = ctx.input(|i| i.modifiers).into();
    let position = response
        .interact_pointer_pos()
        .or_else(|| ctx.input(|i| i.pointer.latest_pos()))?;
    let position = to_scene(canvas_origin, position);

    if response.drag_started() {
        let button = BUTTONS
            .into_iter()
            .find(|b| response.drag_started_by(*b))
            .map(PointerButton::from)
            .unwrap_or_default();
        return Some(CanvasEvent::Press(PointerEvent::new(position, button, modifiers)));
    }

    let event = PointerEvent::new(position, PointerButton::Primary, modifiers);
    if response.drag_stopped() {
        return Some(CanvasEvent::Release(event));
    }
    if response.dragged() {
        return Some(CanvasEvent::Drag(event));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_scene_coordinates() {
        let origin = egui::pos2(200.0, 40.0);
        assert_eq!(to_scene(origin, egui::pos2(250.0, 60.0)), egui::pos2(50.0, 20.0));
    }
}
