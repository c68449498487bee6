use serde::{Deserialize, Serialize};

/// Source of randomness for food placement. Seeded implementations make games replayable.
pub trait RandomGenerator {
    fn next_u32(&mut self) -> u32;

    /// Value in `0..bound`, or 0 when `bound` is 0.
    fn next_below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next_u32() % bound
    }
}

// Simple pseudorandom number generator using xorshift algorithm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoRandom {
    state: u64,
}

impl PseudoRandom {
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves the zero state
        let state = if seed == 0 { 0x1234567890abcdef } else { seed };
        PseudoRandom { state }
    }

    fn step(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

impl RandomGenerator for PseudoRandom {
    fn next_u32(&mut self) -> u32 {
        (self.step() >> 32) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PseudoRandom::new(42);
        let mut b = PseudoRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut rng = PseudoRandom::new(0);
        let values: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        assert!(values.iter().any(|v| *v != 0));
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = PseudoRandom::new(7);
        for bound in [1, 2, 30, 40, 1200] {
            for _ in 0..200 {
                assert!(rng.next_below(bound) < bound);
            }
        }
        assert_eq!(rng.next_below(0), 0);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PseudoRandom::new(99);
        let mut b = PseudoRandom::new(100);
        let a_values: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let b_values: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        assert_ne!(a_values, b_values);
    }
}
