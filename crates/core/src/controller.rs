//! Drag-selection state machine.
//!
//! A press accepted by the select or toggle filter starts a [`Session`]. Every
//! drag reshapes the rubber band, recomputes the covered figures and pushes the
//! difference into the selection models of registered interactors. A release
//! drops the session.
//!
//! ```text
//! Idle --press(select)--> Selecting --release--> Idle
//! Idle --press(toggle)--> Toggling  --release--> Idle
//! ```

use crate::config::Config;
use crate::differ::{FigureSetDiffer, FrameDelta, FrameSets};
use crate::figure::{FigureId, FigureLayer, InteractorRef};
use crate::geometry::GeometryTracker;
use crate::input::{MouseFilter, PointerEvent};
use crate::registry::SelectionRegistry;
use crate::render::RenderSurface;
use crate::synchronizer::SelectionSynchronizer;
use eframe::egui::{Pos2, Rect};
use std::collections::HashSet;
use std::rc::Rc;

/// What a drag does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Idle,
    /// Selections are cleared at press and follow the band exactly.
    Selecting,
    /// Figures flip selection state each time they cross the band edge.
    Toggling,
}

/// The collaborators a controller needs while handling one event.
pub struct DragContext<'a> {
    pub layer: &'a dyn FigureLayer,
    pub surface: &'a mut dyn RenderSurface,
}

impl<'a> DragContext<'a> {
    pub fn new(layer: &'a dyn FigureLayer, surface: &'a mut dyn RenderSurface) -> Self {
        Self { layer, surface }
    }
}

/// State that lives from press to release.
#[derive(Debug)]
struct Session {
    mode: DragMode,
    origin: Pos2,
    tracker: GeometryTracker,
    current: Rc<HashSet<FigureId>>,
    holdovers: Rc<HashSet<FigureId>>,
}

impl Session {
    /// Swaps in the sets computed for the latest frame.
    fn advance(&mut self, sets: FrameSets) -> FrameDelta {
        let delta = FrameDelta::between(&self.current, &sets.fresh);
        self.current = Rc::new(sets.fresh);
        self.holdovers = Rc::new(sets.holdovers);
        delta
    }
}

/// Rubber-band selection over a figure layer.
pub struct DragSessionController {
    synchronizer: SelectionSynchronizer,
    differ: FigureSetDiffer,
    select_filter: MouseFilter,
    toggle_filter: MouseFilter,
    consuming: bool,
    enabled: bool,
    session: Option<Session>,
    last_area: Option<Rect>,
}

impl Default for DragSessionController {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DragSessionController {
    pub fn new(config: &Config) -> Self {
        Self {
            synchronizer: SelectionSynchronizer::default(),
            differ: FigureSetDiffer,
            select_filter: config.select_filter,
            toggle_filter: config.toggle_filter,
            consuming: config.consume_events,
            enabled: true,
            session: None,
            last_area: None,
        }
    }

    /// Adds an interactor whose figures may be drag-selected.
    pub fn add_selection_interactor(&mut self, interactor: InteractorRef) {
        self.synchronizer.register(interactor);
    }

    pub fn registry(&self) -> &SelectionRegistry {
        self.synchronizer.registry()
    }

    pub fn set_select_filter(&mut self, filter: MouseFilter) {
        self.select_filter = filter;
    }

    pub fn set_toggle_filter(&mut self, filter: MouseFilter) {
        self.toggle_filter = filter;
    }

    pub fn set_consuming(&mut self, consuming: bool) {
        self.consuming = consuming;
    }

    pub fn is_consuming(&self) -> bool {
        self.consuming
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables drag selection.
    ///
    /// Disabling during a drag terminates the session: the band is erased and
    /// selection changes made so far are kept.
    pub fn set_enabled(&mut self, enabled: bool, surface: &mut dyn RenderSurface) {
        if !enabled {
            self.terminate_drag_selection(surface);
        }
        self.enabled = enabled;
    }

    pub fn mode(&self) -> DragMode {
        self.session.as_ref().map_or(DragMode::Idle, |s| s.mode)
    }

    /// Figures covered by the band as of the last processed event.
    pub fn current_figures(&self) -> HashSet<FigureId> {
        self.session
            .as_ref()
            .map(|s| s.current.as_ref().clone())
            .unwrap_or_default()
    }

    /// The band of the active drag, or the final band of the last one.
    pub fn selected_area(&self) -> Option<Rect> {
        self.session
            .as_ref()
            .map(|s| s.tracker.band())
            .or(self.last_area)
    }

    /// Clears the selection of every registered interactor.
    pub fn clear_selection(&self) {
        self.synchronizer.clear_all();
    }

    /// Starts a selecting or toggling drag if a filter accepts `event`.
    ///
    /// The broad-phase query over the initial band only seeds diagnostics; no
    /// session state is derived from it, and the zero-size band covers nothing.
    pub fn press(&mut self, event: &mut PointerEvent, ctx: &mut DragContext<'_>) {
        if !self.enabled {
            return;
        }

        let mode = if self.select_filter.accept(event) {
            DragMode::Selecting
        } else if self.toggle_filter.accept(event) {
            DragMode::Toggling
        } else {
            return;
        };

        if self.session.is_some() {
            // A press without a release in between; start over.
            self.terminate_drag_selection(ctx.surface);
        }

        let origin = event.position;
        let tracker = GeometryTracker::start(origin, ctx.surface);
        let seeded = ctx.layer.intersected_figures(tracker.band()).len();
        log::debug!("{:?} drag started at {:?}, {} candidates", mode, origin, seeded);

        self.session = Some(Session {
            mode,
            origin,
            tracker,
            current: Rc::default(),
            holdovers: Rc::default(),
        });

        if mode == DragMode::Selecting {
            self.synchronizer.clear_all();
        }

        self.consume(event);
    }

    pub fn drag(&mut self, event: &mut PointerEvent, ctx: &mut DragContext<'_>) {
        if !self.enabled {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let band = session
            .tracker
            .update(session.origin, event.position, ctx.surface);
        let sets = self.differ.recompute(ctx.layer, band, &session.holdovers);
        let delta = session.advance(sets);

        if !delta.is_empty() {
            log::trace!(
                "band {:?}: {} entered, {} exited",
                band,
                delta.entered.len(),
                delta.exited.len()
            );
        }

        match session.mode {
            DragMode::Selecting => {
                for &figure in &delta.entered {
                    if let Some(owner) = ctx.layer.interactor(figure) {
                        self.synchronizer.expand(&owner, figure);
                    }
                }
                for &figure in &delta.exited {
                    if let Some(owner) = ctx.layer.interactor(figure) {
                        self.synchronizer.contract(&owner, figure);
                    }
                }
            }
            DragMode::Toggling => {
                for &figure in delta.entered.iter().chain(&delta.exited) {
                    if let Some(owner) = ctx.layer.interactor(figure) {
                        self.synchronizer.toggle(&owner, figure);
                    }
                }
            }
            DragMode::Idle => {}
        }

        self.consume(event);
    }

    pub fn release(&mut self, event: &mut PointerEvent, ctx: &mut DragContext<'_>) {
        if !self.enabled || self.session.is_none() {
            return;
        }
        self.terminate_drag_selection(ctx.surface);
        self.consume(event);
    }

    /// Ends the current drag, if any, erasing the band.
    pub fn terminate_drag_selection(&mut self, surface: &mut dyn RenderSurface) {
        if let Some(session) = self.session.take() {
            let area = session.tracker.finish(surface);
            log::debug!(
                "{:?} drag ended over {:?} with {} figures",
                session.mode,
                area,
                session.current.len()
            );
            self.last_area = Some(area);
        }
    }

    fn consume(&self, event: &mut PointerEvent) {
        if self.consuming {
            event.consume();
        }
    }
}
