//! Listeners observe a `GroupRegistry`.
//!
//! Every accepted or refused mutation, and every calculation, is sent to
//! each attached listener in the order they were attached. Listeners only
//! get shared access to the registry, so they can look but not touch.
use super::{GroupRegistry, RegistryEvent};

/// Something that wants to hear about changes to a `GroupRegistry`.
///
/// Closures with the signature `FnMut(&GroupRegistry, &RegistryEvent)`
/// are listeners too.
pub trait Listener {
    /// Called once for every event, after the registry has been updated.
    fn on_event(&mut self, registry: &GroupRegistry, event: &RegistryEvent);
}

impl<F> Listener for F
where
    F: FnMut(&GroupRegistry, &RegistryEvent),
{
    fn on_event(&mut self, registry: &GroupRegistry, event: &RegistryEvent) {
        self(registry, event)
    }
}

mod null;
mod recording;
mod tracing_listener;

pub use null::NullListener;
pub use recording::RecordingListener;
pub use tracing_listener::TracingListener;
