//! Randomized height assignment for skiplist nodes.
//!
//! The lowest level of a skiplist contains every node, and each level above it contains a random
//! subset of the level below. The heights that produce this layering are drawn at insertion time
//! from a geometric-style distribution: a node reaches at least height `k` with probability
//! `p^(k - 1)`, truncated at a hard cap.

use rand::distributions::{Range, Sample};
use rand::{SeedableRng, XorShiftRng};
use std::cmp;

/// A source of node heights for a skiplist.
///
/// `random` must return heights in `[1, total]`: every node occupies at least level 0 and never
/// more than `total` levels.
pub trait LevelGenerator {
    /// Returns the number of levels the owning skiplist maintains.
    fn total(&self) -> usize;

    /// Draws the height for a newly inserted node.
    fn random(&mut self) -> usize;
}

/// A level generator producing geometrically distributed heights.
///
/// The chance that a node reaches height `k` decays by a factor of `p` per level, so with the
/// conventional `p = 1/2` roughly half the nodes of each level also appear in the level above.
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    unit_range: Range<f64>,
    rng: XorShiftRng,
}

impl GeometricalLevelGenerator {
    /// Constructs a new `GeometricalLevelGenerator` with `total` levels and promotion probability
    /// `p`. The generator starts from a fixed internal seed, so two generators constructed this
    /// way produce the same sequence of heights.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero or if `p` is outside of `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_index::skiplist::GeometricalLevelGenerator;
    ///
    /// let gen = GeometricalLevelGenerator::new(16, 0.5);
    /// ```
    pub fn new(total: usize, p: f64) -> Self {
        Self::check_config(total, p);
        GeometricalLevelGenerator {
            total,
            p,
            unit_range: Range::new(0.0f64, 1.0),
            rng: XorShiftRng::new_unseeded(),
        }
    }

    /// Constructs a new `GeometricalLevelGenerator` drawing from an explicitly seeded generator,
    /// for reproducible sequences of heights.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero, if `p` is outside of `(0, 1]`, or if `seed` is all zeroes.
    ///
    /// # Examples
    ///
    /// ```
    /// use skip_index::skiplist::GeometricalLevelGenerator;
    ///
    /// let gen = GeometricalLevelGenerator::from_seed(16, 0.5, [1, 2, 3, 4]);
    /// ```
    pub fn from_seed(total: usize, p: f64, seed: [u32; 4]) -> Self {
        Self::check_config(total, p);
        GeometricalLevelGenerator {
            total,
            p,
            unit_range: Range::new(0.0f64, 1.0),
            rng: XorShiftRng::from_seed(seed),
        }
    }

    fn check_config(total: usize, p: f64) {
        if total == 0 {
            panic!("Error: total must be at least 1.");
        }
        if p <= 0.0 || p > 1.0 {
            panic!("Error: p must be in (0, 1].");
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn total(&self) -> usize {
        self.total
    }

    fn random(&mut self) -> usize {
        if self.p == 1.0 {
            // ln(p) is zero; promotion always succeeds.
            return self.total;
        }
        let u = self.unit_range.sample(&mut self.rng);
        if u == 0.0 {
            // ln(0) is undefined; fall back to the minimum height.
            return 1;
        }
        cmp::min(1 + (u.ln() / self.p.ln()) as usize, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::GeometricalLevelGenerator;
    use super::LevelGenerator;

    #[test]
    #[should_panic]
    fn test_invalid_total() {
        GeometricalLevelGenerator::new(0, 0.5);
    }

    #[test]
    #[should_panic]
    fn test_invalid_p_zero() {
        GeometricalLevelGenerator::new(16, 0.0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_p_above_one() {
        GeometricalLevelGenerator::new(16, 1.1);
    }

    #[test]
    #[should_panic]
    fn test_invalid_seed() {
        GeometricalLevelGenerator::from_seed(16, 0.5, [0, 0, 0, 0]);
    }

    #[test]
    fn test_heights_in_range() {
        let mut gen = GeometricalLevelGenerator::new(16, 0.5);
        for _ in 0..10_000 {
            let height = gen.random();
            assert!(height >= 1 && height <= gen.total());
        }
    }

    #[test]
    fn test_single_level() {
        let mut gen = GeometricalLevelGenerator::new(1, 0.5);
        for _ in 0..100 {
            assert_eq!(gen.random(), 1);
        }
    }

    #[test]
    fn test_p_one_pins_to_total() {
        let mut gen = GeometricalLevelGenerator::new(8, 1.0);
        for _ in 0..100 {
            assert_eq!(gen.random(), 8);
        }
    }

    #[test]
    fn test_same_seed_same_heights() {
        let mut first = GeometricalLevelGenerator::from_seed(16, 0.5, [1, 2, 3, 4]);
        let mut second = GeometricalLevelGenerator::from_seed(16, 0.5, [1, 2, 3, 4]);
        for _ in 0..1000 {
            assert_eq!(first.random(), second.random());
        }
    }
}
