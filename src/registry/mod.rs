//! The group registry holds the deck configuration that the probability
//! engine reads.
//!
//! It owns the deck size, the sample size and every success group. Every
//! mutation is checked against the current state of the other fields. A
//! mutation that would break an invariant is refused, leaves the registry
//! untouched, and is reported to the caller and to every attached
//! listener. That makes the order of edits matter; a caller such as a UI is
//! expected to repair a refused edit itself (for example by clamping it).
//!
//! Addressing a group that doesn't exist (anymore) is not an error. It's a
//! no-op so that a display that lags behind the model can't break it.
use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, instrument, trace, warn};

use crate::core::to_count;
use crate::engine::{Calculation, Calculator, EngineError};

mod errors;
mod event;
mod group;
pub mod listener;

pub use errors::RegistryError;
pub use event::RegistryEvent;
pub use group::{Group, GroupKey};
pub use listener::Listener;

/// The deck, the sample and the success groups.
///
/// Groups are kept in insertion order, which is also key order since keys
/// only ever increase.
///
/// # Example
/// ```
/// use draw_odds::registry::GroupRegistry;
///
/// let mut registry = GroupRegistry::new();
/// registry.set_deck_size(40).unwrap();
/// registry.set_sample_size(5).unwrap();
/// // Three copies in the deck, want at least one in the opening hand.
/// registry.add_group(3, 1, 3).unwrap();
///
/// let p = registry.calculate().unwrap();
/// assert!((p - 0.337_551).abs() < 1e-6);
/// ```
#[derive(Default)]
pub struct GroupRegistry {
    deck_size: u64,
    sample_size: u64,
    groups: BTreeMap<GroupKey, Group>,
    next_key: GroupKey,
    unassigned_cards: u64,
    last_result: Option<f64>,
    listeners: Vec<Box<dyn Listener>>,
}

impl fmt::Debug for GroupRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroupRegistry")
            .field("deck_size", &self.deck_size)
            .field("sample_size", &self.sample_size)
            .field("groups", &self.groups)
            .field("unassigned_cards", &self.unassigned_cards)
            .field("last_result", &self.last_result)
            .field("num_listeners", &self.listeners.len())
            .finish()
    }
}

impl GroupRegistry {
    /// An empty deck with nothing drawn and no groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener. It will hear about every event from now on.
    /// Listeners can't be detached.
    pub fn attach<L: Listener + 'static>(&mut self, listener: L) {
        self.listeners.push(Box::new(listener));
    }

    /// Builder style version of `attach`.
    pub fn with_listener<L: Listener + 'static>(mut self, listener: L) -> Self {
        self.attach(listener);
        self
    }

    pub fn deck_size(&self) -> u64 {
        self.deck_size
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    /// Cards in the deck that belong to no group.
    pub fn unassigned_cards(&self) -> u64 {
        self.unassigned_cards
    }

    /// Cards in the deck that belong to some group.
    pub fn assigned_cards(&self) -> u64 {
        self.groups.values().map(|g| g.card_count).sum()
    }

    pub fn group(&self, key: GroupKey) -> Option<&Group> {
        self.groups.get(&key)
    }

    /// All groups in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupKey, &Group)> {
        self.groups.iter().map(|(key, group)| (*key, group))
    }

    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.groups.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The probability from the last successful `calculate`, if it hasn't
    /// failed since.
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Set the number of cards in the deck.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidDeckSize` if `deck_size` is negative, or
    /// smaller than either the cards already in groups or the sample size.
    pub fn set_deck_size<N: TryInto<u64>>(&mut self, deck_size: N) -> Result<(), RegistryError> {
        let Ok(deck_size) = to_count(deck_size) else {
            return self.reject(RegistryError::InvalidDeckSize);
        };
        if deck_size < self.assigned_cards() || deck_size < self.sample_size {
            return self.reject(RegistryError::InvalidDeckSize);
        }

        self.deck_size = deck_size;
        self.update_unassigned_cards();
        debug!(
            deck_size,
            unassigned_cards = self.unassigned_cards,
            "Deck size set"
        );
        self.notify(RegistryEvent::DeckSizeChanged {
            deck_size,
            unassigned_cards: self.unassigned_cards,
        });
        Ok(())
    }

    /// Set the number of cards drawn.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidSampleSize` if `sample_size` is negative or
    /// larger than the deck.
    pub fn set_sample_size<N: TryInto<u64>>(
        &mut self,
        sample_size: N,
    ) -> Result<(), RegistryError> {
        match to_count(sample_size) {
            Ok(sample_size) if sample_size <= self.deck_size => {
                self.sample_size = sample_size;
                debug!(sample_size, "Sample size set");
                self.notify(RegistryEvent::SampleSizeChanged { sample_size });
                Ok(())
            }
            _ => self.reject(RegistryError::InvalidSampleSize),
        }
    }

    /// Add an unnamed group and return its key.
    ///
    /// Needs `unassigned_cards >= card_count >= max_in_sample >=
    /// min_in_sample`.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidGroup` if any value is negative or the chain
    /// above doesn't hold.
    pub fn add_group<C, L, H>(
        &mut self,
        card_count: C,
        min_in_sample: L,
        max_in_sample: H,
    ) -> Result<GroupKey, RegistryError>
    where
        C: TryInto<u64>,
        L: TryInto<u64>,
        H: TryInto<u64>,
    {
        self.insert_group(None, card_count, min_in_sample, max_in_sample)
    }

    /// Same as `add_group` but with a label attached.
    pub fn add_named_group<C, L, H>(
        &mut self,
        name: impl Into<String>,
        card_count: C,
        min_in_sample: L,
        max_in_sample: H,
    ) -> Result<GroupKey, RegistryError>
    where
        C: TryInto<u64>,
        L: TryInto<u64>,
        H: TryInto<u64>,
    {
        self.insert_group(Some(name.into()), card_count, min_in_sample, max_in_sample)
    }

    fn insert_group<C, L, H>(
        &mut self,
        name: Option<String>,
        card_count: C,
        min_in_sample: L,
        max_in_sample: H,
    ) -> Result<GroupKey, RegistryError>
    where
        C: TryInto<u64>,
        L: TryInto<u64>,
        H: TryInto<u64>,
    {
        let (Ok(card_count), Ok(min_in_sample), Ok(max_in_sample)) = (
            to_count(card_count),
            to_count(min_in_sample),
            to_count(max_in_sample),
        ) else {
            return self.reject(RegistryError::InvalidGroup);
        };
        if !(self.unassigned_cards >= card_count
            && card_count >= max_in_sample
            && max_in_sample >= min_in_sample)
        {
            return self.reject(RegistryError::InvalidGroup);
        }

        let key = self.next_key;
        self.next_key = key.next();
        self.groups.insert(
            key,
            Group {
                name,
                card_count,
                min_in_sample,
                max_in_sample,
            },
        );
        self.update_unassigned_cards();
        debug!(
            %key,
            card_count,
            min_in_sample,
            max_in_sample,
            unassigned_cards = self.unassigned_cards,
            "Group added"
        );
        self.notify(RegistryEvent::GroupAdded(key));
        Ok(key)
    }

    /// Remove a group, handing it back. Returns `None` without touching
    /// anything if there is no such group.
    pub fn remove_group(&mut self, key: GroupKey) -> Option<Group> {
        let Some(group) = self.groups.remove(&key) else {
            trace!(%key, "No group to remove");
            return None;
        };
        self.update_unassigned_cards();
        debug!(%key, unassigned_cards = self.unassigned_cards, "Group removed");
        self.notify(RegistryEvent::GroupRemoved(key));
        Some(group)
    }

    /// Change how many cards of a group are in the deck.
    ///
    /// The new count can use the group's own cards plus every unassigned
    /// card, and it can't drop below the group's maximum in sample.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidGroupSize` carrying `key`.
    pub fn set_group_size<N: TryInto<u64>>(
        &mut self,
        key: GroupKey,
        card_count: N,
    ) -> Result<(), RegistryError> {
        let Some(group) = self.groups.get(&key) else {
            trace!(%key, "No group to resize");
            return Ok(());
        };
        let available = self.unassigned_cards + group.card_count;
        let max_in_sample = group.max_in_sample;

        match to_count(card_count) {
            Ok(card_count) if card_count <= available && card_count >= max_in_sample => {
                self.update_group(key, |g| g.card_count = card_count);
                Ok(())
            }
            _ => self.reject(RegistryError::InvalidGroupSize(key)),
        }
    }

    /// Change the fewest cards of a group the sample may hold.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidGroupMin` carrying `key` if the new minimum
    /// is above the group's maximum.
    pub fn set_group_min<N: TryInto<u64>>(
        &mut self,
        key: GroupKey,
        min_in_sample: N,
    ) -> Result<(), RegistryError> {
        let Some(group) = self.groups.get(&key) else {
            trace!(%key, "No group to change min");
            return Ok(());
        };
        let max_in_sample = group.max_in_sample;

        match to_count(min_in_sample) {
            Ok(min_in_sample) if min_in_sample <= max_in_sample => {
                self.update_group(key, |g| g.min_in_sample = min_in_sample);
                Ok(())
            }
            _ => self.reject(RegistryError::InvalidGroupMin(key)),
        }
    }

    /// Change the most cards of a group the sample may hold.
    ///
    /// # Errors
    ///
    /// `RegistryError::InvalidGroupMax` carrying `key` if the new maximum
    /// is below the group's minimum or above its card count.
    pub fn set_group_max<N: TryInto<u64>>(
        &mut self,
        key: GroupKey,
        max_in_sample: N,
    ) -> Result<(), RegistryError> {
        let Some(group) = self.groups.get(&key) else {
            trace!(%key, "No group to change max");
            return Ok(());
        };
        let (min_in_sample, card_count) = (group.min_in_sample, group.card_count);

        match to_count(max_in_sample) {
            Ok(max_in_sample) if min_in_sample <= max_in_sample && max_in_sample <= card_count => {
                self.update_group(key, |g| g.max_in_sample = max_in_sample);
                Ok(())
            }
            _ => self.reject(RegistryError::InvalidGroupMax(key)),
        }
    }

    /// Set or clear the label of a group.
    pub fn set_group_name(&mut self, key: GroupKey, name: Option<String>) {
        if self.groups.contains_key(&key) {
            self.update_group(key, |g| g.name = name);
        } else {
            trace!(%key, "No group to rename");
        }
    }

    /// Compute the probability of the current configuration, remember it
    /// for `last_result` and tell the listeners.
    ///
    /// Listeners hear `CalculationStarted` first, then either
    /// `CalculationFinished` or `CalculationFailed`.
    #[instrument(level = "debug", skip(self), fields(deck_size = self.deck_size, sample_size = self.sample_size, num_groups = self.groups.len()))]
    pub fn calculate(&mut self) -> Result<f64, EngineError> {
        self.notify(RegistryEvent::CalculationStarted);
        let result = Calculator::new(self).probability();
        self.finish_calculation(result)
    }

    /// Same as `calculate`, but keeps every combination that contributed.
    pub fn calculate_detailed(&mut self) -> Result<Calculation, EngineError> {
        self.notify(RegistryEvent::CalculationStarted);
        let result = Calculator::new(self).calculate();
        let probability = result.as_ref().map(Calculation::probability).map_err(|e| *e);
        self.finish_calculation(probability)?;
        result
    }

    fn finish_calculation(&mut self, result: Result<f64, EngineError>) -> Result<f64, EngineError> {
        match result {
            Ok(probability) => {
                self.last_result = Some(probability);
                debug!(probability, "Calculation finished");
                self.notify(RegistryEvent::CalculationFinished { probability });
            }
            Err(err) => {
                self.last_result = None;
                warn!(error = %err, "Calculation failed");
                self.notify(RegistryEvent::CalculationFailed(err));
            }
        }
        result
    }

    fn update_group(&mut self, key: GroupKey, change: impl FnOnce(&mut Group)) {
        if let Some(group) = self.groups.get_mut(&key) {
            change(group);
            debug!(%key, ?group, "Group changed");
        }
        self.update_unassigned_cards();
        self.notify(RegistryEvent::GroupChanged(key));
    }

    fn update_unassigned_cards(&mut self) {
        // Every setter keeps the assigned cards within the deck.
        self.unassigned_cards = self.deck_size - self.assigned_cards();
    }

    fn reject<T>(&mut self, err: RegistryError) -> Result<T, RegistryError> {
        warn!(error = %err, "Rejected registry change");
        self.notify(RegistryEvent::Rejected(err));
        Err(err)
    }

    fn notify(&mut self, event: RegistryEvent) {
        // Listeners get shared access to the whole registry, so move them
        // out for the duration of the call.
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener.on_event(self, &event);
        }
        self.listeners = listeners;
    }
}
