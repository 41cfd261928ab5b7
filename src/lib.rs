//! Draw Odds
//!
//! This is a library to work out the odds of drawing a combination of cards
//! from a deck. Cards are sorted into success groups, each with a range of
//! how many of them are wanted in the sample. The library then computes the
//! exact probability that a sample drawn without replacement lands inside
//! every range at once, using the multivariate hypergeometric distribution.
//!
//! ```
//! use draw_odds::registry::GroupRegistry;
//!
//! let mut registry = GroupRegistry::new();
//! registry.set_deck_size(60).unwrap();
//! registry.set_sample_size(7).unwrap();
//! // Four copies of the key card, want at least one.
//! registry.add_named_group("Key card", 4, 1, 4).unwrap();
//! // Twenty four lands, want two to four.
//! registry.add_named_group("Lands", 24, 2, 4).unwrap();
//!
//! let p = registry.calculate().unwrap();
//! assert!(p > 0.0 && p < 1.0);
//! ```
//!
//! # Modules
//!
//! - `core` has the exact arithmetic: binomial coefficients over big
//!   integers, and an iterator over every combination of group counts.
//! - `registry` holds the deck configuration, validates every edit and tells
//!   listeners about what happened.
//! - `engine` enumerates the combinations and sums up the probability.
//! - `config` is a batch description of a deck that can be validated and
//!   loaded from JSON.

/// Exact arithmetic shared by the rest of the crate.
pub mod core;

/// The deck configuration and its listeners.
pub mod registry;

/// Computing the probability of a registry's configuration.
pub mod engine;

/// Declarative deck configs.
pub mod config;
