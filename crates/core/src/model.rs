//! A ready-made selection model.

use crate::figure::{FigureId, SelectionModel};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// How many figures a [`BasicSelectionModel`] may hold at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one figure; adding replaces the current one.
    Single,
    #[default]
    Multiple,
}

/// Ordered set of selected figures with a selection-mode policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicSelectionModel {
    mode: SelectionMode,
    selected: BTreeSet<FigureId>,
}

impl BasicSelectionModel {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// Wraps a new model for sharing with interactors.
    pub fn shared(mode: SelectionMode) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(mode)))
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected figures in ascending id order.
    pub fn selection(&self) -> impl Iterator<Item = FigureId> + '_ {
        self.selected.iter().copied()
    }
}

impl SelectionModel for BasicSelectionModel {
    fn contains(&self, figure: FigureId) -> bool {
        self.selected.contains(&figure)
    }

    fn add(&mut self, figure: FigureId) {
        if self.mode == SelectionMode::Single {
            self.selected.clear();
        }
        self.selected.insert(figure);
    }

    fn remove(&mut self, figure: FigureId) {
        self.selected.remove(&figure);
    }

    fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_mode_keeps_latest() {
        let mut model = BasicSelectionModel::new(SelectionMode::Single);
        model.add(FigureId(1));
        model.add(FigureId(2));
        assert_eq!(model.selection().collect::<Vec<_>>(), vec![FigureId(2)]);
    }

    #[test]
    fn multiple_mode_accumulates() {
        let mut model = BasicSelectionModel::default();
        model.add(FigureId(2));
        model.add(FigureId(1));
        model.remove(FigureId(3));
        assert_eq!(model.selection().collect::<Vec<_>>(), vec![FigureId(1), FigureId(2)]);
        model.clear();
        assert!(model.is_empty());
    }
}
