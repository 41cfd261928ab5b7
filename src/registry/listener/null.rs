use super::Listener;
use crate::registry::{GroupRegistry, RegistryEvent};

/// A no-op listener that ignores every event.
///
/// Useful when you need a listener but don't care what happens.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullListener;

impl Listener for NullListener {
    fn on_event(&mut self, _registry: &GroupRegistry, _event: &RegistryEvent) {}
}
