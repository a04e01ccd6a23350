//! Uniform random sources for spawn jitter

use std::time::{SystemTime, UNIX_EPOCH};

/// A uniform random source. Emission only needs floats in [0, 1), so tests
/// can substitute a scripted or constant generator.
pub trait RandomSource {
    /// Returns a float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max). Returns `min` when the range is empty.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        min + self.next_f32() * (max - min)
    }

    /// Returns an integer in [min, max] (inclusive)
    fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as f32;
        let offset = (self.next_f32() * span) as i64;
        (min as i64 + offset).min(max as i64) as i32
    }
}

/// Lightweight xorshift32 PRNG
pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Seed from the wall clock
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(0xDEAD_BEEF);
        Self::new(nanos)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for ParticleRng {
    fn next_f32(&mut self) -> f32 {
        // 24 bits fit an f32 mantissa exactly, keeping the result below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::RandomSource;

    /// Always returns the same sample; 0.5 yields the midpoint of every range.
    pub struct ConstantRng(pub f32);

    impl RandomSource for ConstantRng {
        fn next_f32(&mut self) -> f32 {
            self.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_range_i32_is_inclusive() {
        let mut rng = ParticleRng::new(7);
        let mut seen = [false; 3];
        for _ in 0..1000 {
            let v = rng.range_i32(40, 42);
            assert!((40..=42).contains(&v));
            seen[(v - 40) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = ParticleRng::new(3);
        assert_eq!(rng.range(5.0, 5.0), 5.0);
        assert_eq!(rng.range(5.0, 1.0), 5.0);
        assert_eq!(rng.range_i32(40, 40), 40);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(99);
        let mut b = ParticleRng::new(99);
        for _ in 0..16 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }
}
