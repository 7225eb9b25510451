use rand::{Rng, SeedableRng, XorShiftRng};

/// The number of levels a skip list can use. Level 0 links every node, so a
/// list can hold far more elements than nodes at the top level; 32 levels
/// keep the chance of ever wanting a taller tower negligible for any
/// realistic size.
pub const MAX_LEVEL: usize = 32;

/// The probability that a node present at level `n` is also present at level
/// `n + 1`.
const P: f64 = 0.25;

/// Draws random tower heights for newly inserted nodes.
///
/// Heights are geometrically distributed: level `L` occurs with probability
/// `P * (1 - P)^L`, truncated at `MAX_LEVEL - 1`. Most nodes stay at level 0
/// while a rare few become tall "express lanes", which is what gives the
/// list its expected logarithmic search depth.
///
/// The generator owns its random state, so a list seeded through
/// [`from_seed`] builds an identical level sequence on every run.
///
/// [`from_seed`]: #method.from_seed
pub struct LevelGenerator {
    rng: XorShiftRng,
}

impl LevelGenerator {
    /// Constructs a new `LevelGenerator` with randomized state.
    pub fn new() -> Self {
        LevelGenerator {
            rng: rand::weak_rng(),
        }
    }

    /// Constructs a new `LevelGenerator` with deterministic state. Two
    /// generators built from the same seed produce the same sequence of
    /// levels.
    pub fn from_seed(seed: [u32; 4]) -> Self {
        LevelGenerator {
            rng: XorShiftRng::from_seed(seed),
        }
    }

    /// Generates a random level in `[0, MAX_LEVEL - 1]`, using one uniform
    /// draw in `[0, 1)` per increment.
    pub fn random_level(&mut self) -> usize {
        let mut level = 0;
        while self.rng.gen::<f64>() < P && level + 1 < MAX_LEVEL {
            level += 1;
        }
        level
    }
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{LevelGenerator, MAX_LEVEL};

    #[test]
    fn test_level_within_cap() {
        let mut gen = LevelGenerator::from_seed([1, 2, 3, 4]);
        for _ in 0..10_000 {
            assert!(gen.random_level() < MAX_LEVEL);
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let mut lhs = LevelGenerator::from_seed([9, 8, 7, 6]);
        let mut rhs = LevelGenerator::from_seed([9, 8, 7, 6]);
        for _ in 0..1000 {
            assert_eq!(lhs.random_level(), rhs.random_level());
        }
    }

    #[test]
    fn test_geometric_distribution() {
        let mut gen = LevelGenerator::from_seed([1, 1, 1, 1]);
        let draws = 100_000;
        let mut ground_level = 0;
        for _ in 0..draws {
            if gen.random_level() == 0 {
                ground_level += 1;
            }
        }

        // P(level 0) = 1 - P = 0.75
        let observed = f64::from(ground_level) / f64::from(draws);
        assert!((observed - 0.75).abs() < 0.01);
    }
}
