//! Weighted random selection from a discrete distribution.

use crate::errors::DistributionError;
use crate::rng::TurnRng;

/// Slack allowed when checking that weights sum to one.
const TOTAL_TOLERANCE: f64 = 1e-6;

/// An ordered list of `(weight, value)` pairs whose weights sum to 1.0.
///
/// Used for wild species selection (weights are encounter rates) and for
/// gender assignment (weights are the male/female ratio).
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedChoice<T> {
    entries: Vec<(f64, T)>,
}

impl<T> WeightedChoice<T> {
    /// Build a distribution, rejecting it unless it is a valid one.
    pub fn new(entries: Vec<(f64, T)>) -> Result<Self, DistributionError> {
        validate_weights(entries.iter().map(|(weight, _)| *weight))?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw `r` in `[0, 1)` and return the first value whose cumulative weight exceeds it.
    pub fn choose(&self, rng: &mut TurnRng) -> &T {
        let roll = rng.next_unit("weighted choice");
        self.pick(roll)
    }

    fn pick(&self, roll: f64) -> &T {
        let mut cumulative = 0.0;
        for (weight, value) in &self.entries {
            cumulative += weight;
            if cumulative > roll {
                return value;
            }
        }
        // Rounding can leave the total a hair under the roll; the last
        // positively weighted entry owns that sliver.
        self.entries
            .iter()
            .rev()
            .find(|(weight, _)| *weight > 0.0)
            .map(|(_, value)| value)
            .unwrap_or(&self.entries[self.entries.len() - 1].1)
    }
}

impl<T: Clone> WeightedChoice<T> {
    /// One-shot draw over borrowed pairs.
    pub fn choose_from(entries: &[(f64, T)], rng: &mut TurnRng) -> Result<T, DistributionError> {
        let choice = Self::new(entries.to_vec())?;
        Ok(choice.choose(rng).clone())
    }
}

/// Check that a sequence of weights forms a probability distribution.
pub fn validate_weights(weights: impl IntoIterator<Item = f64>) -> Result<(), DistributionError> {
    let mut total = 0.0;
    let mut count = 0;
    for (index, weight) in weights.into_iter().enumerate() {
        if !(weight >= 0.0) || !weight.is_finite() {
            return Err(DistributionError::InvalidWeight { index, weight });
        }
        total += weight;
        count += 1;
    }

    if count == 0 {
        return Err(DistributionError::Empty);
    }
    if (total - 1.0).abs() > TOTAL_TOLERANCE {
        return Err(DistributionError::BadTotal { total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_even_split_is_close_to_half() {
        let choice = WeightedChoice::new(vec![(0.5, 'A'), (0.5, 'B')]).unwrap();
        let mut rng = TurnRng::from_seed(2024);

        let draws = 100_000;
        let a_count = (0..draws).filter(|_| *choice.choose(&mut rng) == 'A').count();
        let frequency = a_count as f64 / draws as f64;

        assert!(
            (frequency - 0.5).abs() < 0.01,
            "frequency of A was {}",
            frequency
        );
    }

    #[test]
    fn test_short_distribution_is_rejected() {
        let result = WeightedChoice::new(vec![(0.1, 'A'), (0.2, 'B')]);
        match result {
            Err(DistributionError::BadTotal { total }) => assert!((total - 0.3).abs() < 1e-9),
            other => panic!("expected BadTotal, got {:?}", other),
        }
    }

    #[test]
    fn test_short_distribution_never_returns_a_value() {
        // Even a roll that would land inside the first entry must fail.
        let mut rng = TurnRng::new_for_test(vec![1]);
        let result = WeightedChoice::choose_from(&[(0.3, "only")], &mut rng);
        assert!(matches!(result, Err(DistributionError::BadTotal { .. })));
    }

    #[test]
    fn test_overfull_distribution_is_rejected() {
        let result = WeightedChoice::new(vec![(0.7, 1), (0.7, 2)]);
        assert!(matches!(result, Err(DistributionError::BadTotal { .. })));
    }

    #[test]
    fn test_empty_and_negative_weights_are_rejected() {
        let empty: Result<WeightedChoice<u8>, _> = WeightedChoice::new(vec![]);
        assert_eq!(empty, Err(DistributionError::Empty));

        let negative = WeightedChoice::new(vec![(1.5, 'A'), (-0.5, 'B')]);
        assert_eq!(
            negative,
            Err(DistributionError::InvalidWeight {
                index: 1,
                weight: -0.5
            })
        );
    }

    #[test]
    fn test_walk_returns_first_entry_exceeding_roll() {
        let choice = WeightedChoice::new(vec![(0.25, "a"), (0.5, "b"), (0.25, "c")]).unwrap();
        assert_eq!(*choice.pick(0.0), "a");
        assert_eq!(*choice.pick(0.24), "a");
        assert_eq!(*choice.pick(0.25), "b");
        assert_eq!(*choice.pick(0.74), "b");
        assert_eq!(*choice.pick(0.99), "c");
    }

    #[test]
    fn test_zero_weight_entries_are_never_chosen() {
        let choice = WeightedChoice::new(vec![(1.0, "always"), (0.0, "never")]).unwrap();
        let mut rng = TurnRng::from_seed(5);
        for _ in 0..1000 {
            assert_eq!(*choice.choose(&mut rng), "always");
        }
        assert_eq!(*choice.pick(0.9999999999), "always");
    }
}
