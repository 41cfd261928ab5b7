use tracing::{debug, warn};

use super::Listener;
use crate::registry::{GroupRegistry, RegistryEvent};

/// A listener that writes every event to `tracing`.
///
/// Refused mutations are logged as warnings, everything else at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl Listener for TracingListener {
    fn on_event(&mut self, registry: &GroupRegistry, event: &RegistryEvent) {
        match event {
            RegistryEvent::Rejected(err) => warn!(
                error = %err,
                group_key = ?err.group_key(),
                deck_size = registry.deck_size(),
                sample_size = registry.sample_size(),
                "Registry rejected a change"
            ),
            RegistryEvent::CalculationFinished { probability } => debug!(
                probability,
                num_groups = registry.len(),
                "Calculation finished"
            ),
            RegistryEvent::CalculationFailed(err) => {
                warn!(error = %err, "Calculation failed")
            }
            _ => debug!(
                ?event,
                unassigned_cards = registry.unassigned_cards(),
                "Registry event"
            ),
        }
    }
}
