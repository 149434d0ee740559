use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Randomness source for every draw the engine makes.
///
/// Play uses a seeded `StdRng`, so a battle replays exactly for a fixed seed.
/// Tests use a scripted list of percentile outcomes (1..=100) consumed in order.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u8>, index: usize },
}

impl TurnRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::new_random(),
        }
    }

    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    /// A percentile roll in `1..=100`.
    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random_range(1..=100);
        }
        self.next_scripted(reason).clamp(1, 100)
    }

    /// A uniform draw in `[0, 1)`. Scripted outcome `n` maps to `(n - 1) / 100`.
    pub fn next_unit(&mut self, reason: &str) -> f64 {
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random::<f64>();
        }
        let outcome = self.next_scripted(reason).clamp(1, 100);
        (outcome - 1) as f64 / 100.0
    }

    /// A uniform draw in `0..bound`. `bound` must be non-zero.
    pub fn next_below(&mut self, bound: u32, reason: &str) -> u32 {
        if let RngSource::Seeded(rng) = &mut self.source {
            return rng.random_range(0..bound);
        }
        self.next_scripted(reason) as u32 % bound
    }

    fn next_scripted(&mut self, reason: &str) -> u8 {
        let RngSource::Scripted { outcomes, index } = &mut self.source else {
            unreachable!("next_scripted called on a seeded source");
        };
        // Running dry means the test scripted too few outcomes.
        let Some(&outcome) = outcomes.get(*index) else {
            panic!(
                "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        };
        tracing::trace!(outcome, reason, "scripted rng consumed");
        *index += 1;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = TurnRng::from_seed(99);
        let mut b = TurnRng::from_seed(99);
        for _ in 0..50 {
            assert_eq!(a.next_outcome("a"), b.next_outcome("b"));
        }
    }

    #[test]
    fn test_scripted_outcomes_in_order() {
        let mut rng = TurnRng::new_for_test(vec![1, 51, 100, 7]);
        assert_eq!(rng.next_outcome("first"), 1);
        assert_eq!(rng.next_unit("second"), 0.5);
        assert_eq!(rng.next_unit("third"), 0.99);
        assert_eq!(rng.next_below(4, "fourth"), 3);
    }

    #[test]
    fn test_seeded_outcomes_stay_in_range() {
        let mut rng = TurnRng::from_seed(1);
        for _ in 0..1000 {
            let roll = rng.next_outcome("range");
            assert!((1..=100).contains(&roll));
            let unit = rng.next_unit("unit");
            assert!((0.0..1.0).contains(&unit));
        }
    }

    #[test]
    #[should_panic(expected = "TurnRng exhausted")]
    fn test_scripted_exhaustion_panics() {
        let mut rng = TurnRng::new_for_test(vec![]);
        rng.next_outcome("nothing left");
    }
}
