//! Interactors eligible to receive selection changes.

use crate::figure::{InteractorId, InteractorRef};

/// Registered interactors, in registration order.
#[derive(Default, Clone)]
pub struct SelectionRegistry {
    interactors: Vec<InteractorRef>,
}

impl SelectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `interactor`. Registering the same id again does nothing.
    pub fn register(&mut self, interactor: InteractorRef) {
        if !self.is_registered(interactor.id()) {
            log::debug!("registered interactor {}", interactor.id());
            self.interactors.push(interactor);
        }
    }

    pub fn is_registered(&self, id: InteractorId) -> bool {
        self.interactors.iter().any(|i| i.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractorRef> {
        self.interactors.iter()
    }

    pub fn len(&self) -> usize {
        self.interactors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Interactor;
    use std::rc::Rc;

    struct Plain(u64);

    impl Interactor for Plain {
        fn id(&self) -> InteractorId {
            InteractorId(self.0)
        }
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = SelectionRegistry::new();
        registry.register(Rc::new(Plain(1)));
        registry.register(Rc::new(Plain(1)));
        registry.register(Rc::new(Plain(2)));

        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered(InteractorId(1)));
        assert!(!registry.is_registered(InteractorId(3)));
        let ids: Vec<_> = registry.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![InteractorId(1), InteractorId(2)]);
    }
}
