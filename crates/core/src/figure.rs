//! Interfaces to the figures, interactors and selection models the drag
//! controller works against.
//!
//! None of these are owned by the controller. The application provides a
//! [`FigureLayer`] for broad-phase queries and hit tests, and interactors that
//! expose their [`SelectionModel`] through an explicit capability query.

use eframe::egui::Rect;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identity of a figure in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FigureId(pub u64);

impl fmt::Display for FigureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of an interactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractorId(pub u64);

impl fmt::Display for InteractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The set of selected figures for one interactor.
pub trait SelectionModel {
    fn contains(&self, figure: FigureId) -> bool;
    fn add(&mut self, figure: FigureId);
    fn remove(&mut self, figure: FigureId);
    fn clear(&mut self);
}

/// A selection model shared between the controller and its other consumers.
pub type SharedSelectionModel = Rc<RefCell<dyn SelectionModel>>;

/// Something figures can be associated with.
///
/// Interactors that can hold a selection return their model from
/// [`Interactor::selection_model`]; all others return `None` and are skipped.
pub trait Interactor {
    fn id(&self) -> InteractorId;

    fn selection_model(&self) -> Option<SharedSelectionModel> {
        None
    }
}

pub type InteractorRef = Rc<dyn Interactor>;

/// The layer of figures a rubber band selects from.
pub trait FigureLayer {
    /// Broad phase: figures whose bounds overlap `region`.
    fn intersected_figures(&self, region: Rect) -> Vec<FigureId>;

    /// Exact hit test of a single figure against `region`.
    fn hit(&self, figure: FigureId, region: Rect) -> bool;

    /// The figure wrapped by `figure` if it is a decorator.
    fn decorated_figure(&self, _figure: FigureId) -> Option<FigureId> {
        None
    }

    /// The interactor currently associated with `figure`, if any.
    fn interactor(&self, figure: FigureId) -> Option<InteractorRef>;

    /// Strips every level of decoration from `figure`.
    fn undecorated(&self, figure: FigureId) -> FigureId {
        let mut base = figure;
        while let Some(inner) = self.decorated_figure(base) {
            if inner == base {
                break;
            }
            base = inner;
        }
        base
    }
}
