//! Uniform random sources for message selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform index into a non-empty list of `len` items
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Thread-local RNG, for real pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

/// Reproducible RNG for simulations.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..10 {
            let draw = a.next_f64();
            assert_eq!(draw, b.next_f64());
            assert!((0.0..1.0).contains(&draw));
        }
    }

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let mut random = ScriptedRandom::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(random.pick_index(5), 0);
        assert_eq!(random.pick_index(5), 2);
        assert_eq!(random.pick_index(5), 4);
        // cycles back to the first draw
        assert_eq!(random.pick_index(5), 0);
    }
}
