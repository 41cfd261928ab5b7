use std::fmt;
use std::ops::RangeInclusive;

/// Stable handle for a group in a `GroupRegistry`.
///
/// Keys are handed out in increasing order and are never reused, even after
/// the group they named has been removed.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct GroupKey(u64);

impl GroupKey {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of cards in the deck that count as a success, along with how many
/// of them are acceptable in the drawn sample.
///
/// The registry keeps `min_in_sample <= max_in_sample <= card_count` true
/// for every group it holds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Group {
    pub(crate) name: Option<String>,
    pub(crate) card_count: u64,
    pub(crate) min_in_sample: u64,
    pub(crate) max_in_sample: u64,
}

impl Group {
    /// Optional label. It's never used for computation.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// How many cards of this group are in the deck.
    pub fn card_count(&self) -> u64 {
        self.card_count
    }

    /// Fewest cards of this group the sample may hold.
    pub fn min_in_sample(&self) -> u64 {
        self.min_in_sample
    }

    /// Most cards of this group the sample may hold.
    pub fn max_in_sample(&self) -> u64 {
        self.max_in_sample
    }

    /// The draw counts for this group that could take part in a successful
    /// sample of `sample_size` cards.
    ///
    /// This can be empty, for example when the minimum is larger than the
    /// sample.
    pub fn admissible_counts(&self, sample_size: u64) -> RangeInclusive<u64> {
        let upper = self
            .card_count
            .min(self.max_in_sample)
            .min(sample_size);
        self.min_in_sample..=upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(card_count: u64, min_in_sample: u64, max_in_sample: u64) -> Group {
        Group {
            name: None,
            card_count,
            min_in_sample,
            max_in_sample,
        }
    }

    #[test]
    fn test_admissible_counts() {
        assert_eq!(1..=3, group(3, 1, 3).admissible_counts(5));
        assert_eq!(2..=3, group(5, 2, 3).admissible_counts(5));
        // The sample size caps the range.
        assert_eq!(0..=2, group(10, 0, 8).admissible_counts(2));
    }

    #[test]
    fn test_admissible_counts_can_be_empty() {
        assert!(group(3, 2, 3).admissible_counts(1).is_empty());
    }

    #[test]
    fn test_key_order_and_display() {
        let first = GroupKey::new(0);
        let second = first.next();
        assert!(first < second);
        assert_eq!(1, second.get());
        assert_eq!("1", second.to_string());
    }
}
