//! Applies selection changes to registered interactors.
//!
//! Every operation resolves the interactor's model through the registry
//! first; interactors that are not registered or expose no model are left
//! alone.

use crate::figure::{FigureId, InteractorRef, SharedSelectionModel};
use crate::registry::SelectionRegistry;

#[derive(Default, Clone)]
pub struct SelectionSynchronizer {
    registry: SelectionRegistry,
}

impl SelectionSynchronizer {
    pub fn new(registry: SelectionRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SelectionRegistry {
        &self.registry
    }

    pub fn register(&mut self, interactor: InteractorRef) {
        self.registry.register(interactor);
    }

    fn model_of(&self, interactor: &InteractorRef) -> Option<SharedSelectionModel> {
        if !self.registry.is_registered(interactor.id()) {
            return None;
        }
        interactor.selection_model()
    }

    /// Adds `figure` to the interactor's selection if it is not there yet.
    pub fn expand(&self, interactor: &InteractorRef, figure: FigureId) {
        if let Some(model) = self.model_of(interactor) {
            let mut model = model.borrow_mut();
            if !model.contains(figure) {
                model.add(figure);
            }
        }
    }

    /// Removes `figure` from the interactor's selection if it is there.
    pub fn contract(&self, interactor: &InteractorRef, figure: FigureId) {
        if let Some(model) = self.model_of(interactor) {
            let mut model = model.borrow_mut();
            if model.contains(figure) {
                model.remove(figure);
            }
        }
    }

    /// Flips membership of `figure` in the interactor's selection.
    pub fn toggle(&self, interactor: &InteractorRef, figure: FigureId) {
        let Some(model) = self.model_of(interactor) else {
            return;
        };
        let selected = model.borrow().contains(figure);
        if selected {
            self.contract(interactor, figure);
        } else {
            self.expand(interactor, figure);
        }
    }

    pub fn clear(&self, interactor: &InteractorRef) {
        if let Some(model) = self.model_of(interactor) {
            model.borrow_mut().clear();
        }
    }

    /// Clears the selection of every registered interactor.
    pub fn clear_all(&self) {
        for interactor in self.registry.iter() {
            if let Some(model) = interactor.selection_model() {
                model.borrow_mut().clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Interactor, InteractorId, SelectionModel};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Model that counts add/remove calls so idempotence is observable.
    #[derive(Default)]
    struct CountingModel {
        items: Vec<FigureId>,
        adds: usize,
        removes: usize,
    }

    impl SelectionModel for CountingModel {
        fn contains(&self, figure: FigureId) -> bool {
            self.items.contains(&figure)
        }
        fn add(&mut self, figure: FigureId) {
            self.adds += 1;
            self.items.push(figure);
        }
        fn remove(&mut self, figure: FigureId) {
            self.removes += 1;
            self.items.retain(|f| *f != figure);
        }
        fn clear(&mut self) {
            self.items.clear();
        }
    }

    struct Owner {
        id: u64,
        model: Option<Rc<RefCell<CountingModel>>>,
    }

    impl Interactor for Owner {
        fn id(&self) -> InteractorId {
            InteractorId(self.id)
        }
        fn selection_model(&self) -> Option<SharedSelectionModel> {
            self.model.clone().map(|m| m as SharedSelectionModel)
        }
    }

    fn owner(id: u64) -> (InteractorRef, Rc<RefCell<CountingModel>>) {
        let model = Rc::new(RefCell::new(CountingModel::default()));
        let interactor: InteractorRef = Rc::new(Owner {
            id,
            model: Some(model.clone()),
        });
        (interactor, model)
    }

    #[test]
    fn expand_and_contract_are_idempotent() {
        let (interactor, model) = owner(1);
        let mut sync = SelectionSynchronizer::default();
        sync.register(interactor.clone());

        sync.expand(&interactor, FigureId(5));
        sync.expand(&interactor, FigureId(5));
        assert_eq!(model.borrow().items, vec![FigureId(5)]);
        assert_eq!(model.borrow().adds, 1);

        sync.contract(&interactor, FigureId(9));
        assert_eq!(model.borrow().removes, 0);
        sync.contract(&interactor, FigureId(5));
        sync.contract(&interactor, FigureId(5));
        assert!(model.borrow().items.is_empty());
        assert_eq!(model.borrow().removes, 1);
    }

    #[test]
    fn toggle_flips_membership() {
        let (interactor, model) = owner(1);
        let mut sync = SelectionSynchronizer::default();
        sync.register(interactor.clone());

        sync.toggle(&interactor, FigureId(3));
        assert!(model.borrow().contains(FigureId(3)));
        sync.toggle(&interactor, FigureId(3));
        assert!(!model.borrow().contains(FigureId(3)));
    }

    #[test]
    fn unregistered_interactor_is_untouched() {
        let (interactor, model) = owner(1);
        model.borrow_mut().add(FigureId(1));
        let sync = SelectionSynchronizer::default();

        sync.expand(&interactor, FigureId(2));
        sync.contract(&interactor, FigureId(1));
        sync.clear(&interactor);
        assert_eq!(model.borrow().items, vec![FigureId(1)]);
    }

    #[test]
    fn interactor_without_model_is_ignored() {
        let interactor: InteractorRef = Rc::new(Owner { id: 4, model: None });
        let mut sync = SelectionSynchronizer::default();
        sync.register(interactor.clone());

        sync.expand(&interactor, FigureId(1));
        sync.toggle(&interactor, FigureId(1));
        sync.clear_all();
    }

    #[test]
    fn clear_all_empties_every_registered_model() {
        let (a, model_a) = owner(1);
        let (b, model_b) = owner(2);
        let (_unregistered, model_c) = owner(3);
        let mut sync = SelectionSynchronizer::default();
        sync.register(a.clone());
        sync.register(b.clone());

        for (i, m) in [&model_a, &model_b, &model_c].iter().enumerate() {
            m.borrow_mut().add(FigureId(i as u64));
        }
        sync.clear_all();

        assert!(model_a.borrow().items.is_empty());
        assert!(model_b.borrow().items.is_empty());
        assert_eq!(model_c.borrow().items, vec![FigureId(2)]);
    }
}
