use std::ops::RangeInclusive;

use num::{BigInt, BigRational, BigUint, Zero};
use tracing::{debug, trace};

use super::EngineError;
use crate::core::{binomial, ratio_to_f64, CountIter};
use crate::registry::{GroupKey, GroupRegistry};

/// One way of splitting the sample between the groups that satisfies
/// every group's bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinationOutcome {
    /// Cards drawn from each group, in the order of `Calculation::keys`.
    pub counts: Vec<u64>,
    /// Cards of the sample that come from no group.
    pub unassigned: u64,
    /// Number of deals that produce exactly this split.
    pub deals: BigUint,
    /// `deals` over all possible deals.
    pub probability: f64,
}

/// Everything the engine worked out for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    /// The groups, in the order used for every `CombinationOutcome`.
    pub keys: Vec<GroupKey>,
    /// Every split that counted towards the result.
    pub combinations: Vec<CombinationOutcome>,
    /// Deals that satisfy every group.
    pub successful_deals: BigUint,
    /// All possible deals, `C(deck_size, sample_size)`.
    pub total_deals: BigUint,
    probability: f64,
}

impl Calculation {
    /// The cumulative probability, in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The cumulative probability as an exact fraction.
    pub fn exact(&self) -> BigRational {
        BigRational::new(
            BigInt::from(self.successful_deals.clone()),
            BigInt::from(self.total_deals.clone()),
        )
    }
}

/// Computes the multivariate hypergeometric cumulative probability of a
/// registry's configuration.
///
/// The calculator takes a snapshot of the registry when it's created, so
/// later edits to the registry don't change what it computes.
///
/// # Example
/// ```
/// use draw_odds::engine::Calculator;
/// use draw_odds::registry::GroupRegistry;
///
/// let mut registry = GroupRegistry::new();
/// registry.set_deck_size(60).unwrap();
/// registry.set_sample_size(7).unwrap();
/// // 24 lands, want between 2 and 4 of them.
/// registry.add_group(24, 2, 4).unwrap();
///
/// let calc = Calculator::new(&registry);
/// let detailed = calc.calculate().unwrap();
/// assert_eq!(3, detailed.combinations.len());
/// assert!(detailed.probability() > 0.7);
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    deck_size: u64,
    sample_size: u64,
    unassigned_cards: u64,
    keys: Vec<GroupKey>,
    card_counts: Vec<u64>,
    ranges: Vec<RangeInclusive<u64>>,
}

impl Calculator {
    /// Snapshot a registry.
    pub fn new(registry: &GroupRegistry) -> Self {
        let sample_size = registry.sample_size();
        let mut keys = Vec::with_capacity(registry.len());
        let mut card_counts = Vec::with_capacity(registry.len());
        let mut ranges = Vec::with_capacity(registry.len());
        for (key, group) in registry.groups() {
            keys.push(key);
            card_counts.push(group.card_count());
            ranges.push(group.admissible_counts(sample_size));
        }

        Self {
            deck_size: registry.deck_size(),
            sample_size,
            unassigned_cards: registry.unassigned_cards(),
            keys,
            card_counts,
            ranges,
        }
    }

    /// The admissible draw counts of each group, in key order.
    pub fn count_ranges(&self) -> &[RangeInclusive<u64>] {
        &self.ranges
    }

    /// Every candidate split of the sample, before checking that the rest
    /// of the sample fits in the unassigned cards.
    pub fn combinations(&self) -> CountIter {
        CountIter::new(self.ranges.clone())
    }

    /// `C(deck_size, sample_size)`, the number of possible deals.
    ///
    /// # Errors
    ///
    /// `EngineError::UndefinedProbability` if there are no possible deals.
    pub fn total_deals(&self) -> Result<BigUint, EngineError> {
        let undefined = EngineError::UndefinedProbability {
            deck_size: self.deck_size,
            sample_size: self.sample_size,
        };
        if self.sample_size > self.deck_size {
            return Err(undefined);
        }
        let total = binomial(self.deck_size, self.sample_size)?;
        if total.is_zero() {
            return Err(undefined);
        }
        Ok(total)
    }

    /// Just the probability, without keeping any combination around.
    pub fn probability(&self) -> Result<f64, EngineError> {
        let total = self.total_deals()?;
        let mut successful = BigUint::zero();
        let mut num_combinations = 0usize;
        for counts in self.combinations() {
            if let Some((_, deals)) = self.deals_for(&counts)? {
                successful += deals;
                num_combinations += 1;
            }
        }

        let probability = ratio_to_f64(&successful, &total)?;
        debug!(num_combinations, probability, "Computed probability");
        Ok(probability)
    }

    /// The probability along with every combination that counted towards
    /// it.
    pub fn calculate(&self) -> Result<Calculation, EngineError> {
        let total_deals = self.total_deals()?;
        let mut successful_deals = BigUint::zero();
        let mut combinations = Vec::new();
        for counts in self.combinations() {
            let Some((unassigned, deals)) = self.deals_for(&counts)? else {
                continue;
            };
            successful_deals += &deals;
            combinations.push(CombinationOutcome {
                probability: ratio_to_f64(&deals, &total_deals)?,
                counts,
                unassigned,
                deals,
            });
        }

        let probability = ratio_to_f64(&successful_deals, &total_deals)?;
        debug!(
            num_combinations = combinations.len(),
            probability, "Computed probability with breakdown"
        );
        Ok(Calculation {
            keys: self.keys.clone(),
            combinations,
            successful_deals,
            total_deals,
            probability,
        })
    }

    /// How many deals produce exactly `counts` from the groups with the
    /// rest of the sample filled from unassigned cards. `None` when the
    /// split doesn't fit the sample or the unassigned cards.
    fn deals_for(&self, counts: &[u64]) -> Result<Option<(u64, BigUint)>, EngineError> {
        let size_sum: u64 = counts.iter().sum();
        let Some(size_rest) = self.sample_size.checked_sub(size_sum) else {
            trace!(?counts, size_sum, "Split draws more than the sample");
            return Ok(None);
        };
        if size_rest > self.unassigned_cards {
            trace!(?counts, size_rest, "Not enough unassigned cards for the rest");
            return Ok(None);
        }

        let mut deals = binomial(self.unassigned_cards, size_rest)?;
        for (&card_count, &count) in self.card_counts.iter().zip(counts) {
            deals *= binomial(card_count, count)?;
        }
        trace!(?counts, size_rest, %deals, "Counted deals");
        Ok(Some((size_rest, deals)))
    }
}

/// Probability that a sample drawn from the registry's deck satisfies every
/// group at once.
pub fn calculate(registry: &GroupRegistry) -> Result<f64, EngineError> {
    Calculator::new(registry).probability()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use num::{One, ToPrimitive};
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    use super::*;

    fn c(n: u64, k: u64) -> f64 {
        ratio_to_f64(&binomial(n, k).unwrap(), &BigUint::one()).unwrap()
    }

    fn build(deck_size: u64, sample_size: u64, groups: &[(u64, u64, u64)]) -> GroupRegistry {
        let mut registry = GroupRegistry::new();
        registry.set_deck_size(deck_size).unwrap();
        registry.set_sample_size(sample_size).unwrap();
        for &(card_count, min_in_sample, max_in_sample) in groups {
            registry
                .add_group(card_count, min_in_sample, max_in_sample)
                .unwrap();
        }
        registry
    }

    fn exact(registry: &GroupRegistry) -> BigRational {
        Calculator::new(registry).calculate().unwrap().exact()
    }

    #[test]
    fn test_single_group_closed_form() {
        let registry = build(40, 5, &[(3, 1, 3)]);
        let expected =
            (c(3, 1) * c(37, 4) + c(3, 2) * c(37, 3) + c(3, 3) * c(37, 2)) / c(40, 5);

        assert_abs_diff_eq!(expected, calculate(&registry).unwrap(), epsilon = 1e-9);
        assert_eq!(
            BigRational::new(BigInt::from(222_111u32), BigInt::from(658_008u32)),
            exact(&registry)
        );
    }

    #[test]
    fn test_after_removing_first_group() {
        let mut registry = build(40, 5, &[(5, 2, 3), (5, 2, 3)]);
        registry.remove_group(GroupKey::new(0));
        assert_eq!(1, registry.len());
        assert_eq!(35, registry.unassigned_cards());

        let expected = (c(5, 2) * c(35, 3) + c(5, 3) * c(35, 2)) / c(40, 5);
        assert_abs_diff_eq!(expected, calculate(&registry).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_no_groups() {
        let registry = build(40, 5, &[]);
        let calc = Calculator::new(&registry).calculate().unwrap();
        assert_eq!(1.0, calc.probability());
        assert_eq!(BigRational::one(), calc.exact());
        assert_eq!(1, calc.combinations.len());
        assert!(calc.combinations[0].counts.is_empty());
        assert_eq!(5, calc.combinations[0].unassigned);
    }

    #[test]
    fn test_empty_deck() {
        let registry = GroupRegistry::new();
        assert_eq!(1.0, calculate(&registry).unwrap());
    }

    #[test]
    fn test_empty_range_gives_zero() {
        // Need two from the group but only draw one card.
        let registry = build(40, 1, &[(3, 2, 3)]);
        let calc = Calculator::new(&registry).calculate().unwrap();
        assert_eq!(0.0, calc.probability());
        assert!(calc.combinations.is_empty());
        assert!(calc.successful_deals.is_zero());
    }

    #[test]
    fn test_rest_must_fit_unassigned() {
        // Every card is in a group that allows at most one in the sample,
        // so a five card sample can never work.
        let registry = build(10, 5, &[(5, 0, 1), (5, 0, 1)]);
        assert_eq!(0.0, calculate(&registry).unwrap());
    }

    #[test]
    fn test_split_larger_than_sample_is_skipped() {
        let registry = build(10, 2, &[(4, 2, 2), (4, 2, 2)]);
        assert_eq!(0.0, calculate(&registry).unwrap());
    }

    #[test]
    fn test_two_groups_closed_form() {
        // At least one of A and exactly one of B in a seven card hand.
        let registry = build(60, 7, &[(4, 1, 4), (8, 1, 1)]);
        let mut expected = 0.0;
        for a in 1..=4 {
            let rest = 7 - a - 1;
            expected += c(4, a) * c(8, 1) * c(48, rest);
        }
        expected /= c(60, 7);
        assert_abs_diff_eq!(expected, calculate(&registry).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_full_ranges_sum_to_one() {
        let registry = build(60, 7, &[(20, 0, 20), (15, 0, 15), (1, 0, 1)]);
        assert_eq!(BigRational::one(), exact(&registry));
    }

    #[test]
    fn test_complement() {
        let hit = exact(&build(40, 5, &[(3, 1, 3)]));
        let miss = exact(&build(40, 5, &[(3, 0, 0)]));
        assert_eq!(BigRational::one(), hit + miss);
    }

    #[test]
    fn test_breakdown_adds_up() {
        let registry = build(40, 6, &[(10, 1, 3), (6, 0, 2)]);
        let calc = Calculator::new(&registry).calculate().unwrap();

        assert_eq!(vec![GroupKey::new(0), GroupKey::new(1)], calc.keys);
        let sum: BigUint = calc.combinations.iter().map(|o| o.deals.clone()).sum();
        assert_eq!(calc.successful_deals, sum);
        let p: f64 = calc.combinations.iter().map(|o| o.probability).sum();
        assert_abs_diff_eq!(calc.probability(), p, epsilon = 1e-12);

        for outcome in &calc.combinations {
            let drawn: u64 = outcome.counts.iter().sum();
            assert_eq!(6, drawn + outcome.unassigned);
        }
        assert_eq!(calc.probability(), calculate(&registry).unwrap());
    }

    #[test]
    fn test_large_deck_stays_exact() {
        let registry = build(1000, 500, &[(333, 150, 200)]);
        let p = calculate(&registry).unwrap();
        assert_eq!(exact(&registry).to_f64().unwrap(), p);
        approx::assert_relative_eq!(
            0.988_769_560_957_655_9,
            p,
            epsilon = 0.0,
            max_relative = 1e-12
        );

        let widened = build(1000, 500, &[(333, 0, 333)]);
        assert_eq!(1.0, calculate(&widened).unwrap());
    }

    #[test]
    fn test_tiny_probability_keeps_precision() {
        // Exactly k of the 1000 marked cards in half of a 2000 card deck.
        for (k, expected) in [
            (107, 2.515_959_515_574_382e-308),
            (111, 4.858_921_265_053_199e-301),
        ] {
            let registry = build(2000, 1000, &[(1000, k, k)]);
            let calc = Calculator::new(&registry).calculate().unwrap();
            assert!(calc.probability() > 0.0, "k = {k}");
            assert_eq!(calc.exact().to_f64().unwrap(), calc.probability());
            approx::assert_relative_eq!(
                expected,
                calc.probability(),
                epsilon = 0.0,
                max_relative = 1e-12
            );
            assert_eq!(calc.probability(), calc.combinations[0].probability);
        }
    }

    #[test]
    fn test_snapshot_ignores_later_edits() {
        let mut registry = build(40, 5, &[(3, 1, 3)]);
        let calc = Calculator::new(&registry);
        registry.set_group_min(GroupKey::new(0), 0).unwrap();
        registry.set_sample_size(6).unwrap();

        assert_eq!(
            BigRational::new(BigInt::from(222_111u32), BigInt::from(658_008u32)),
            calc.calculate().unwrap().exact()
        );
    }

    #[test]
    fn test_insertion_order_doesnt_matter() {
        let mut rng = StdRng::seed_from_u64(420);
        let mut groups = vec![(3, 1, 3), (8, 0, 2), (12, 2, 5), (4, 0, 1)];
        let expected = exact(&build(60, 7, &groups));

        for _ in 0..20 {
            groups.shuffle(&mut rng);
            assert_eq!(expected, exact(&build(60, 7, &groups)), "{groups:?}");
        }
    }

    #[test]
    fn test_widening_never_lowers_probability() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let deck_size = rng.gen_range(10..=60);
            let sample_size = rng.gen_range(0..=deck_size.min(10));
            let num_groups = rng.gen_range(1..=3);

            let mut unassigned = deck_size;
            let mut groups = Vec::new();
            for _ in 0..num_groups {
                let card_count = rng.gen_range(0..=unassigned.min(15));
                let max_in_sample = rng.gen_range(0..=card_count);
                let min_in_sample = rng.gen_range(0..=max_in_sample);
                unassigned -= card_count;
                groups.push((card_count, min_in_sample, max_in_sample));
            }
            let base = exact(&build(deck_size, sample_size, &groups));

            let idx = rng.gen_range(0..groups.len());
            let (card_count, min_in_sample, max_in_sample) = groups[idx];
            groups[idx] = (
                card_count,
                rng.gen_range(0..=min_in_sample),
                rng.gen_range(max_in_sample..=card_count),
            );
            let widened = exact(&build(deck_size, sample_size, &groups));

            assert!(
                widened >= base,
                "Widening group {idx} lowered the probability for {groups:?}"
            );
        }
    }
}
