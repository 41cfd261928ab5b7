use thiserror::Error;

use super::GroupKey;

/// Why the registry refused a mutation.
///
/// A refused mutation never changes the registry. The same value is both
/// returned to the caller and sent to every listener as
/// `RegistryEvent::Rejected`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum RegistryError {
    #[error("Invalid deck size")]
    InvalidDeckSize,

    #[error("Invalid sample size")]
    InvalidSampleSize,

    #[error("Invalid group, needs unassigned >= card count >= max >= min")]
    InvalidGroup,

    #[error("Invalid card count for group {0}")]
    InvalidGroupSize(GroupKey),

    #[error("Invalid minimum in sample for group {0}")]
    InvalidGroupMin(GroupKey),

    #[error("Invalid maximum in sample for group {0}")]
    InvalidGroupMax(GroupKey),
}

impl RegistryError {
    /// The group the error is about, if there is one.
    pub fn group_key(&self) -> Option<GroupKey> {
        match self {
            RegistryError::InvalidGroupSize(key)
            | RegistryError::InvalidGroupMin(key)
            | RegistryError::InvalidGroupMax(key) => Some(*key),
            _ => None,
        }
    }
}
