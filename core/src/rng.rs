//! Seeded random number generation.
//!
//! RULE: Nothing in the generator may call a platform RNG directly.
//! All randomness flows through a FixtureRng built from an explicit
//! seed. The runner draws that seed from entropy when none is given
//! and logs it, so every batch can be regenerated exactly.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// The single random stream for one generation run.
pub struct FixtureRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl FixtureRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Seed from OS entropy. Only the runner calls this.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Uniform integer in [min, max], both ends inclusive.
    pub fn next_in_range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "empty range {min}..={max}");
        self.inner.gen_range(min..=max)
    }

    /// Discrete sampler over an explicit weight table.
    /// Returns None when the table is empty or every weight is zero.
    pub fn pick_weighted<'a, T>(&mut self, table: &'a [(T, u32)]) -> Option<&'a T> {
        self.pick_weighted_by(table, |(_, w)| *w).map(|(item, _)| item)
    }

    /// Same as `pick_weighted`, reading each item's weight through `weight`.
    pub fn pick_weighted_by<'a, T>(
        &mut self,
        items: &'a [T],
        weight: impl Fn(&T) -> u32,
    ) -> Option<&'a T> {
        let total: u64 = items.iter().map(|i| u64::from(weight(i))).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.next_u64_below(total);
        for item in items {
            let w = u64::from(weight(item));
            if roll < w {
                return Some(item);
            }
            roll -= w;
        }
        None
    }
}
