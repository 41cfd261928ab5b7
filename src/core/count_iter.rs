use std::ops::RangeInclusive;

/// Given an inclusive range of admissible counts for every group, walk
/// every tuple in the Cartesian product of those ranges.
///
/// The last range varies fastest, like an odometer. With no ranges at all
/// there is exactly one (empty) tuple. If any range is empty there are
/// none.
#[derive(Debug, Clone)]
pub struct CountIter {
    /// The admissible count range of each position.
    ranges: Vec<RangeInclusive<u64>>,

    /// The tuple that will be handed out next.
    current: Vec<u64>,

    /// Set once every tuple has been handed out.
    exhausted: bool,
}

impl CountIter {
    /// Create a new `CountIter` from the admissible range of each group.
    pub fn new(ranges: Vec<RangeInclusive<u64>>) -> Self {
        let current = ranges.iter().map(|r| *r.start()).collect();
        let exhausted = ranges.iter().any(|r| r.is_empty());
        Self {
            ranges,
            current,
            exhausted,
        }
    }

    /// Start over from the first tuple.
    pub fn reset(&mut self) {
        for (value, range) in self.current.iter_mut().zip(&self.ranges) {
            *value = *range.start();
        }
        self.exhausted = self.ranges.iter().any(|r| r.is_empty());
    }

    /// How many tuples the full product holds. `None` if that doesn't fit
    /// in a `u64`.
    pub fn combination_count(&self) -> Option<u64> {
        if self.ranges.iter().any(|r| r.is_empty()) {
            return Some(0);
        }
        self.ranges
            .iter()
            .try_fold(1u64, |acc, r| acc.checked_mul(r.end() - r.start() + 1))
    }

    /// The ranges being walked.
    pub fn ranges(&self) -> &[RangeInclusive<u64>] {
        &self.ranges
    }
}

impl Iterator for CountIter {
    type Item = Vec<u64>;

    fn next(&mut self) -> Option<Vec<u64>> {
        if self.exhausted {
            return None;
        }
        let result = self.current.clone();

        // Move the odometer forward one. Levels that roll over go back to
        // their start and carry into the level before them.
        let mut carried_out = true;
        for level in (0..self.ranges.len()).rev() {
            let range = &self.ranges[level];
            if self.current[level] < *range.end() {
                self.current[level] += 1;
                carried_out = false;
                break;
            }
            self.current[level] = *range.start();
        }
        // Carrying out of the first level means we've wrapped all the way
        // around. That's also the case right away for zero levels.
        self.exhausted = carried_out;

        Some(result)
    }
}
