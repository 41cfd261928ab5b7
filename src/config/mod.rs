//! A declarative description of a deck.
//!
//! `DeckConfig` is the batch form of everything a `GroupRegistry` holds. It
//! can be checked up front, replayed into a registry through the ordinary
//! mutators, captured back out of a registry, and (with the `serde`
//! feature) stored as JSON.
mod error;

pub use error::{ConfigError, Result};

use crate::registry::GroupRegistry;

/// One success group of a `DeckConfig`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupConfig {
    /// Optional label for the group
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    /// Cards of this group in the deck
    pub card_count: u64,
    /// Fewest cards of this group wanted in the sample
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_in_sample: u64,
    /// Most cards of this group wanted in the sample
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_in_sample: u64,
}

impl GroupConfig {
    pub fn new(card_count: u64, min_in_sample: u64, max_in_sample: u64) -> Self {
        Self {
            name: None,
            card_count,
            min_in_sample,
            max_in_sample,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Deck size, sample size and the ordered list of groups.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckConfig {
    /// Total cards in the deck
    pub deck_size: u64,
    /// Cards drawn from the deck
    pub sample_size: u64,
    /// Success groups, in the order they should be added
    #[cfg_attr(feature = "serde", serde(default))]
    pub groups: Vec<GroupConfig>,
}

impl DeckConfig {
    pub fn new(deck_size: u64, sample_size: u64) -> Self {
        Self {
            deck_size,
            sample_size,
            groups: Vec::new(),
        }
    }

    /// Builder style way to add a group.
    pub fn group(mut self, group: GroupConfig) -> Self {
        self.groups.push(group);
        self
    }

    /// Validate the deck configuration
    pub fn validate(&self) -> Result<()> {
        if self.sample_size > self.deck_size {
            return Err(ConfigError::Validation(format!(
                "sample_size ({}) cannot exceed deck_size ({})",
                self.sample_size, self.deck_size
            )));
        }

        let mut assigned: u64 = 0;
        for (idx, group) in self.groups.iter().enumerate() {
            if group.min_in_sample > group.max_in_sample {
                return Err(ConfigError::Validation(format!(
                    "group {idx}: min_in_sample ({}) cannot exceed max_in_sample ({})",
                    group.min_in_sample, group.max_in_sample
                )));
            }
            if group.max_in_sample > group.card_count {
                return Err(ConfigError::Validation(format!(
                    "group {idx}: max_in_sample ({}) cannot exceed card_count ({})",
                    group.max_in_sample, group.card_count
                )));
            }
            assigned = assigned.saturating_add(group.card_count);
        }

        if assigned > self.deck_size {
            return Err(ConfigError::Validation(format!(
                "groups hold {assigned} cards but the deck only has {}",
                self.deck_size
            )));
        }

        Ok(())
    }

    /// Validate, then build a fresh registry from this config.
    pub fn build_registry(&self) -> Result<GroupRegistry> {
        let mut registry = GroupRegistry::new();
        self.apply_to(&mut registry)?;
        Ok(registry)
    }

    /// Validate, then replay this config into `registry` through its
    /// mutators, so any attached listeners hear every step.
    ///
    /// Groups already in the registry stay and count against the new deck.
    /// If they don't leave room for this config's groups nothing is
    /// applied and a `ConfigError::Validation` is returned.
    pub fn apply_to(&self, registry: &mut GroupRegistry) -> Result<()> {
        self.validate()?;

        let assigned = self
            .groups
            .iter()
            .fold(registry.assigned_cards(), |acc, group| {
                acc.saturating_add(group.card_count)
            });
        if assigned > self.deck_size {
            return Err(ConfigError::Validation(format!(
                "registry already assigns {} cards; with this config's groups that is \
                 {assigned} cards but the deck only has {}",
                registry.assigned_cards(),
                self.deck_size
            )));
        }

        // Grow the deck before the sample and shrink the sample before the
        // deck, so neither step trips over the old value of the other.
        if self.deck_size >= registry.deck_size() {
            registry.set_deck_size(self.deck_size)?;
            registry.set_sample_size(self.sample_size)?;
        } else {
            registry.set_sample_size(self.sample_size)?;
            registry.set_deck_size(self.deck_size)?;
        }

        for group in &self.groups {
            match &group.name {
                Some(name) => registry.add_named_group(
                    name.clone(),
                    group.card_count,
                    group.min_in_sample,
                    group.max_in_sample,
                )?,
                None => registry.add_group(
                    group.card_count,
                    group.min_in_sample,
                    group.max_in_sample,
                )?,
            };
        }
        Ok(())
    }
}

impl From<&GroupRegistry> for DeckConfig {
    fn from(registry: &GroupRegistry) -> Self {
        Self {
            deck_size: registry.deck_size(),
            sample_size: registry.sample_size(),
            groups: registry
                .groups()
                .map(|(_, group)| GroupConfig {
                    name: group.name().map(str::to_string),
                    card_count: group.card_count(),
                    min_in_sample: group.min_in_sample(),
                    max_in_sample: group.max_in_sample(),
                })
                .collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl DeckConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
