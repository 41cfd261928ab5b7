use crate::engine::EngineError;

use super::{GroupKey, RegistryError};

/// Everything a `GroupRegistry` tells its listeners about.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    /// The deck size was accepted.
    DeckSizeChanged {
        deck_size: u64,
        unassigned_cards: u64,
    },
    /// The sample size was accepted.
    SampleSizeChanged { sample_size: u64 },
    /// A new group was stored under this key.
    GroupAdded(GroupKey),
    /// The group under this key is gone.
    GroupRemoved(GroupKey),
    /// Card count, bounds or name of the group changed.
    GroupChanged(GroupKey),
    /// A mutation was refused and the registry is unchanged.
    Rejected(RegistryError),
    /// About to compute the probability.
    CalculationStarted,
    CalculationFinished { probability: f64 },
    CalculationFailed(EngineError),
}

impl RegistryEvent {
    /// The error for a refused mutation.
    pub fn rejection(&self) -> Option<RegistryError> {
        match self {
            RegistryEvent::Rejected(err) => Some(*err),
            _ => None,
        }
    }

    /// The group this event is about, if any.
    pub fn group_key(&self) -> Option<GroupKey> {
        match self {
            RegistryEvent::GroupAdded(key)
            | RegistryEvent::GroupRemoved(key)
            | RegistryEvent::GroupChanged(key) => Some(*key),
            RegistryEvent::Rejected(err) => err.group_key(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_of_events() {
        let key = GroupKey::new(3);
        assert_eq!(Some(key), RegistryEvent::GroupAdded(key).group_key());
        assert_eq!(
            Some(key),
            RegistryEvent::Rejected(RegistryError::InvalidGroupMax(key)).group_key()
        );
        assert_eq!(
            None,
            RegistryEvent::Rejected(RegistryError::InvalidDeckSize).group_key()
        );
        assert_eq!(None, RegistryEvent::CalculationStarted.group_key());
    }

    #[test]
    fn test_rejection() {
        assert_eq!(
            Some(RegistryError::InvalidSampleSize),
            RegistryEvent::Rejected(RegistryError::InvalidSampleSize).rejection()
        );
        assert_eq!(None, RegistryEvent::GroupRemoved(GroupKey::new(0)).rejection());
    }
}
