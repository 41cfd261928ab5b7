use std::{cell::RefCell, rc::Rc};

use super::Listener;
use crate::registry::{GroupRegistry, RegistryEvent};

/// A listener that keeps every event it sees.
///
/// The events live behind an `Rc<RefCell<_>>` so they can still be read
/// after the listener itself has been moved into the registry.
#[derive(Debug, Default, Clone)]
pub struct RecordingListener {
    storage: Rc<RefCell<Vec<RegistryEvent>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_storage(&self) -> Rc<RefCell<Vec<RegistryEvent>>> {
        self.storage.clone()
    }
}

impl Listener for RecordingListener {
    fn on_event(&mut self, _registry: &GroupRegistry, event: &RegistryEvent) {
        self.storage.borrow_mut().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RegistryError;

    #[test]
    fn test_records_events_in_order() {
        let listener = RecordingListener::new();
        let storage = listener.get_storage();

        let mut registry = GroupRegistry::new();
        registry.attach(listener);
        registry.set_deck_size(40).unwrap();
        let _ = registry.set_sample_size(100);

        let events = storage.borrow();
        assert_eq!(
            vec![
                RegistryEvent::DeckSizeChanged {
                    deck_size: 40,
                    unassigned_cards: 40
                },
                RegistryEvent::Rejected(RegistryError::InvalidSampleSize),
            ],
            *events
        );
    }
}
