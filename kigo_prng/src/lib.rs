// Seedable, portable pseudo-random number generator for haiku generation.
//
// xoshiro256++ (Blackman & Vigna) seeded through a SplitMix64 stream. Every
// random decision the engine makes (opening with a seed word, picking an
// association, sampling the vocabulary, drawing a DP sequence, falling back
// to a random theme) pulls from a `KigoRng`, so a caller holding a fixed seed
// gets the same poem back for the same knowledge base and request.
//
// The generator is passed explicitly as `&mut KigoRng`; nothing in the
// workspace keeps a global one. `kigo_engine::Engine` owns an instance
// behind a mutex for callers that do not care about reproducibility.
//
// **Constraint: determinism.** Output depends only on prior state, never on
// platform or pointer width. Bounded draws use Lemire's multiply-shift with
// rejection on 64-bit integers, and `next_f64` is a fixed bit conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// SplitMix64 stream, used only to expand a `u64` seed into xoshiro state.
struct SplitMix64(u64);

impl SplitMix64 {
    const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(Self::GOLDEN_GAMMA);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

/// The haiku engine's only source of randomness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KigoRng {
    state: [u64; 4],
}

impl KigoRng {
    /// Seed from a `u64`. Equal seeds give equal sequences.
    pub fn new(seed: u64) -> Self {
        let mut seeder = SplitMix64(seed);
        let state = std::array::from_fn(|_| seeder.next());
        KigoRng { state }
    }

    /// Seed from the wall clock and process id, for interactive runs where
    /// every poem should differ. Reproducible callers use `new`.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        let pid = u64::from(std::process::id());
        Self::new(nanos ^ pid.rotate_left(32))
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = self.state;
        let out = s0.wrapping_add(s3).rotate_left(23).wrapping_add(s0);

        let t = s1 << 17;
        let s2 = s2 ^ s0;
        let s3 = s3 ^ s1;
        let s1 = s1 ^ s2;
        let s0 = s0 ^ s3;
        self.state = [s0, s1, s2 ^ t, s3.rotate_left(45)];

        out
    }

    /// Uniform in [0, 1), 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }

    /// Uniform integer in `[0, bound)`. Panics if `bound == 0`.
    pub fn below(&mut self, bound: u64) -> u64 {
        assert!(bound > 0, "KigoRng::below: bound must be positive");
        // Lemire: the high word of a 64x64 product is uniform once the low
        // word clears the bias threshold.
        let threshold = bound.wrapping_neg() % bound;
        loop {
            let product = u128::from(self.next_u64()) * u128::from(bound);
            if (product as u64) >= threshold {
                return (product >> 64) as u64;
            }
        }
    }

    /// Uniform integer in `[low, high)`. Panics if `low >= high`.
    pub fn range_u64(&mut self, low: u64, high: u64) -> u64 {
        assert!(low < high, "KigoRng::range_u64: empty range {low}..{high}");
        low + self.below(high - low)
    }

    /// Uniform index in `[low, high)`. Panics if `low >= high`.
    pub fn range_usize(&mut self, low: usize, high: usize) -> usize {
        self.range_u64(low as u64, high as u64) as usize
    }

    /// True with probability `p`; `p <= 0` never, `p >= 1` always.
    pub fn random_bool(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// One element chosen uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        match items.len() {
            0 => None,
            len => items.get(self.range_usize(0, len)),
        }
    }

    /// `min(k, len)` distinct indices in `[0, len)`, ascending.
    ///
    /// Floyd's algorithm: exactly `k` draws however large `len` is, so
    /// sampling a hundred words from the whole vocabulary stays cheap.
    pub fn sample_indices(&mut self, len: usize, k: usize) -> Vec<usize> {
        let k = k.min(len);
        let mut picked = BTreeSet::new();
        for upper in (len - k)..len {
            let candidate = self.range_usize(0, upper + 1);
            if !picked.insert(candidate) {
                picked.insert(upper);
            }
        }
        picked.into_iter().collect()
    }

    /// `min(k, len)` distinct elements, in slice order.
    pub fn sample<'a, T>(&mut self, items: &'a [T], k: usize) -> Vec<&'a T> {
        self.sample_indices(items.len(), k)
            .into_iter()
            .map(|i| &items[i])
            .collect()
    }
}
