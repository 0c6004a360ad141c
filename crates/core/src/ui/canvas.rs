//! Interactive selection canvas.
//!
//! This module contains the `SelectionCanvas` struct which implements the
//! `eframe::App` trait: the scene is drawn in the central panel, dragging on
//! it runs the rubber-band controller, and a side panel lists the selection
//! of every interactor.

use super::rendering::{
    draw_band_overlay, draw_bounds, draw_dirty_region, draw_figure, draw_label,
};
use super::selection::{process_drag_event, CanvasEvent};
use super::settings::Settings;
use super::state::{CanvasResult, CanvasSurface};
use crate::config::Config;
use crate::controller::{DragContext, DragMode, DragSessionController};
use crate::error::{AppError, Result};
use crate::figure::Interactor;
use crate::scene::Scene;
use eframe::egui;
use std::sync::{Arc, Mutex};

/// The interactive canvas application.
pub struct SelectionCanvas {
    scene: Scene,
    controller: DragSessionController,
    surface: CanvasSurface,
    /// Region invalidated during the previous frame.
    last_dirty: Option<egui::Rect>,
    settings: Settings,
    pub result: Arc<Mutex<CanvasResult>>,
}

impl SelectionCanvas {
    /// Creates a canvas over `scene` with every interactor registered.
    ///
    /// # Arguments
    /// * `scene` - The figures to select from
    /// * `config` - Filters and event consumption for the controller
    /// * `result` - Shared result container for returning the final area
    pub fn new(scene: Scene, config: &Config, result: Arc<Mutex<CanvasResult>>) -> Self {
        let mut controller = DragSessionController::new(config);
        for interactor in scene.interactors() {
            controller.add_selection_interactor(interactor);
        }

        Self {
            scene,
            controller,
            surface: CanvasSurface::default(),
            last_dirty: None,
            settings: Settings::load(),
            result,
        }
    }

    fn handle_event(&mut self, event: CanvasEvent) {
        let mut ctx = DragContext::new(&self.scene, &mut self.surface);
        match event {
            CanvasEvent::Press(mut e) => self.controller.press(&mut e, &mut ctx),
            CanvasEvent::Drag(mut e) => self.controller.drag(&mut e, &mut ctx),
            CanvasEvent::Release(mut e) => {
                self.controller.release(&mut e, &mut ctx);
                self.publish_result();
            }
        }
    }

    fn publish_result(&self) {
        match self.result.lock() {
            Ok(mut result) => result.selected_area = self.controller.selected_area(),
            Err(_) => log::warn!("canvas result lock poisoned"),
        }
    }

    /// Renders the side panel with selections and preferences.
    fn render_side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Selection");
        let mode = match self.controller.mode() {
            DragMode::Idle => "idle",
            DragMode::Selecting => "selecting",
            DragMode::Toggling => "toggling",
        };
        ui.label(format!("Mode: {}", mode));
        if let Some(area) = self.controller.selected_area() {
            ui.label(format!(
                "Area: {:.0}x{:.0} at ({:.0}, {:.0})",
                area.width(),
                area.height(),
                area.min.x,
                area.min.y
            ));
        }
        ui.separator();

        for interactor in self.scene.interactors() {
            let id = interactor.id();
            let name = self
                .scene
                .scene_interactor(id)
                .map(|i| i.name().to_string())
                .unwrap_or_default();
            match self.scene.model_of(id) {
                Some(_) => {
                    let figures: Vec<String> = self
                        .scene
                        .selection_of(id)
                        .iter()
                        .map(|f| f.to_string())
                        .collect();
                    ui.label(format!("{} {}: [{}]", name, id, figures.join(", ")));
                }
                None => {
                    ui.weak(format!("{} {}: not selectable", name, id));
                }
            }
        }

        ui.separator();
        let mut enabled = self.controller.is_enabled();
        if ui.checkbox(&mut enabled, "Drag selection enabled").changed() {
            self.controller.set_enabled(enabled, &mut self.surface);
        }
        if ui.button("Clear selection").clicked() {
            self.controller.clear_selection();
        }

        ui.separator();
        ui.label("Display");
        let mut changed = false;
        changed |= ui.checkbox(&mut self.settings.show_labels, "Labels").changed();
        changed |= ui.checkbox(&mut self.settings.show_bounds, "Bounding boxes").changed();
        changed |= ui
            .checkbox(&mut self.settings.show_dirty_region, "Dirty region")
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut self.settings.dim_alpha, 0..=200).text("Dim"))
            .changed();
        if changed {
            if let Err(e) = self.settings.save() {
                log::warn!("Failed to save settings: {}", e);
            }
        }

        ui.separator();
        ui.small("Drag to select, shift-drag to toggle, Esc to quit.");
    }

    /// Paints the scene and the rubber band.
    fn render_canvas(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let offset = canvas_rect.min.to_vec2();

        for figure in self.scene.figures() {
            let selected = self.scene.is_selected(figure.id);
            let decorator = figure.decorates.is_some();
            draw_figure(painter, &figure.shape, offset, selected, decorator);

            if self.settings.show_bounds {
                draw_bounds(painter, figure.shape.bounds().translate(offset));
            }
            if self.settings.show_labels && !decorator {
                if let Some(label) = &figure.label {
                    draw_label(painter, figure.shape.bounds().translate(offset), label);
                }
            }
        }

        if let Some(band) = self.surface.overlay {
            draw_band_overlay(painter, canvas_rect, band.translate(offset), self.settings.dim_alpha);
        }

        if self.settings.show_dirty_region {
            if let Some(dirty) = self.last_dirty {
                draw_dirty_region(painter, dirty.translate(offset));
            }
        }
    }
}

impl eframe::App for SelectionCanvas {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Enforce dark mode
        ctx.set_visuals(egui::Visuals::dark());
        self.surface.attach(ctx);

        egui::SidePanel::right("selection_panel")
            .min_width(220.0)
            .show(ctx, |ui| self.render_side_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let canvas_rect = ui.max_rect();
            let response = ui.interact(canvas_rect, ui.id().with("canvas"), egui::Sense::drag());

            if let Some(event) = process_drag_event(&response, ctx, canvas_rect.min) {
                self.handle_event(event);
            }
            if let Some(dirty) = self.surface.take_dirty() {
                self.last_dirty = Some(dirty);
            }

            let painter = ui.painter_at(canvas_rect);
            self.render_canvas(&painter, canvas_rect);
        });

        // Handle escape to close
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Opens the canvas and returns when the user closes the window.
///
/// # Returns
/// The final rubber band of the last completed drag, or `None` if the user
/// never dragged.
pub fn run(scene: Scene, config: Config) -> Result<Option<egui::Rect>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 680.0])
            .with_title("Rubber-band selection"),
        ..Default::default()
    };

    let result = Arc::new(Mutex::new(CanvasResult::default()));
    let app_result = result.clone();

    eframe::run_native(
        "rubberband",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SelectionCanvas::new(scene, &config, app_result)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))?;

    // Extract result from shared state
    let lock = result
        .lock()
        .map_err(|_| AppError::ui("Failed to acquire result lock"))?;

    Ok(lock.selected_area)
}
