// Candidate pool and the exact-length sequence sampler.
//
// When the greedy walk misses its target, the composer gathers a working set
// of words (the seeds, the first few associations of each seed, and a random
// slice of the vocabulary), buckets them by syllable count, and asks for a
// word sequence whose counts sum to the target exactly.
//
// The set of valid sequences for budget B is defined recursively: the empty
// sequence for B = 0, and otherwise every valid sequence for B - L extended
// by any pool word of size L <= B. Materializing that set explodes quickly
// (a 7-syllable line over a 100-word pool has millions of members), so the
// sampler only counts:
//
//   ways[0] = 1
//   ways[B] = sum over pool sizes L <= B of  |bucket L| * ways[B - L]
//
// and then draws backward from the target, picking the last word's size L
// with weight |bucket L| * ways[B - L] and the word uniformly within the
// bucket. Every valid sequence is equally likely, exactly as if the full set
// had been enumerated and one member chosen at random. Counts saturate at
// `u64::MAX`; past that point the draw is only approximately uniform.

use crate::config::ComposerParams;
use kigo_lexicon::KnowledgeBase;
use kigo_prng::KigoRng;
use std::collections::{BTreeMap, BTreeSet};

/// Per-call word pool, keyed by syllable count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidatePool {
    buckets: BTreeMap<u32, Vec<String>>,
}

impl CandidatePool {
    /// Build the pool for a line of `target` syllables. Words outside
    /// `1..=target` are left out.
    pub fn gather(
        kb: &KnowledgeBase,
        seeds: &[String],
        target: u32,
        params: &ComposerParams,
        rng: &mut KigoRng,
    ) -> Self {
        let mut working: BTreeSet<&str> = BTreeSet::new();
        for seed in seeds {
            working.insert(seed);
            working.extend(
                kb.associations(seed)
                    .iter()
                    .take(params.association_sample)
                    .map(String::as_str),
            );
        }
        working.extend(
            rng.sample(kb.vocabulary(), params.vocabulary_sample)
                .into_iter()
                .map(String::as_str),
        );

        Self::from_words(kb, working, target)
    }

    /// Bucket `words` by syllable count, keeping counts in `1..=target`.
    pub fn from_words<'a>(
        kb: &KnowledgeBase,
        words: impl IntoIterator<Item = &'a str>,
        target: u32,
    ) -> Self {
        let mut buckets: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for word in words {
            let n = kb.count_syllables(word);
            if (1..=target).contains(&n) {
                buckets.entry(n).or_default().push(word.to_string());
            }
        }
        CandidatePool { buckets }
    }

    pub fn bucket(&self, syllables: u32) -> &[String] {
        self.buckets.get(&syllables).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of valid sequences for every budget `0..=target`.
    pub fn sequence_counts(&self, target: u32) -> Vec<u64> {
        let mut ways = vec![0u64; target as usize + 1];
        ways[0] = 1;
        for budget in 1..=target {
            let mut total = 0u64;
            for (&size, words) in self.buckets.range(1..=budget) {
                let rest = ways[(budget - size) as usize];
                total = total.saturating_add((words.len() as u64).saturating_mul(rest));
            }
            ways[budget as usize] = total;
        }
        ways
    }

    /// A uniformly random sequence of pool words whose counts sum to
    /// `target`, or `None` when no such sequence exists.
    pub fn sample_exact(&self, target: u32, rng: &mut KigoRng) -> Option<Vec<String>> {
        let ways = self.sequence_counts(target);
        if ways[target as usize] == 0 {
            return None;
        }

        let mut reversed = Vec::new();
        let mut budget = target;
        while budget > 0 {
            let choices: Vec<(u32, u64)> = self
                .buckets
                .range(1..=budget)
                .map(|(&size, words)| {
                    let weight = (words.len() as u64).saturating_mul(ways[(budget - size) as usize]);
                    (size, weight)
                })
                .filter(|&(_, weight)| weight > 0)
                .collect();

            let size = weighted_pick(&choices, rng)?;
            let word = rng.choose(self.bucket(size))?;
            reversed.push(word.clone());
            budget -= size;
        }

        reversed.reverse();
        Some(reversed)
    }
}

/// Pick a size from `(size, weight)` pairs with probability proportional to
/// weight.
fn weighted_pick(choices: &[(u32, u64)], rng: &mut KigoRng) -> Option<u32> {
    let total = choices
        .iter()
        .fold(0u64, |acc, &(_, w)| acc.saturating_add(w));
    if total == 0 {
        return None;
    }
    let mut roll = rng.range_u64(0, total);
    for &(size, weight) in choices {
        if roll < weight {
            return Some(size);
        }
        roll -= weight;
    }
    choices.last().map(|&(size, _)| size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kigo_lexicon::{PronouncingDictionary, Snapshot};
    use std::collections::BTreeMap as Map;

    fn kb(words: &[(&str, u32)]) -> KnowledgeBase {
        let mut snap = Snapshot::default();
        for &(w, n) in words {
            snap.syllable_table.insert(w.into(), n);
        }
        KnowledgeBase::from_snapshot(snap, PronouncingDictionary::default())
    }

    #[test]
    fn test_from_words_filters_by_target() {
        let kb = kb(&[("moon", 1), ("river", 2), ("butterfly", 3)]);
        let pool = CandidatePool::from_words(&kb, ["moon", "river", "butterfly", "..."], 2);
        assert_eq!(pool.bucket(1), ["moon"]);
        assert_eq!(pool.bucket(2), ["river"]);
        assert!(pool.bucket(3).is_empty());
        assert!(pool.bucket(0).is_empty());
    }

    #[test]
    fn test_sequence_counts() {
        // Sizes {1: a, b} and {2: cc}: ways = 1, 2, 2*2 + 1, 2*5 + 1*2.
        let kb = kb(&[("a", 1), ("b", 1), ("cc", 2)]);
        let pool = CandidatePool::from_words(&kb, ["a", "b", "cc"], 3);
        assert_eq!(pool.sequence_counts(3), vec![1, 2, 5, 12]);
    }

    #[test]
    fn test_sample_exact_sums_to_target() {
        let kb = kb(&[("moon", 1), ("river", 2), ("butterfly", 3), ("evening", 2)]);
        let pool = CandidatePool::from_words(&kb, ["moon", "river", "butterfly", "evening"], 7);
        let mut rng = KigoRng::new(9);
        for _ in 0..200 {
            let words = pool.sample_exact(7, &mut rng).unwrap();
            let total: u32 = words.iter().map(|w| kb.count_syllables(w)).sum();
            assert_eq!(total, 7, "{words:?}");
        }
    }

    #[test]
    fn test_sample_exact_none_when_unreachable() {
        let kb = kb(&[("river", 2), ("evening", 2)]);
        let pool = CandidatePool::from_words(&kb, ["river", "evening"], 5);
        let mut rng = KigoRng::new(1);
        assert!(pool.sample_exact(5, &mut rng).is_none());
        assert!(pool.sample_exact(4, &mut rng).is_some());
    }

    #[test]
    fn test_sample_exact_zero_target_is_empty() {
        let pool = CandidatePool::default();
        let mut rng = KigoRng::new(1);
        assert_eq!(pool.sample_exact(0, &mut rng), Some(Vec::new()));
    }

    #[test]
    fn test_sample_exact_is_uniform_over_sequences() {
        // Budget 2 over {1: a, b} and {2: cc}: aa ab ba bb cc, ~20% each.
        let kb = kb(&[("a", 1), ("b", 1), ("cc", 2)]);
        let pool = CandidatePool::from_words(&kb, ["a", "b", "cc"], 2);
        let mut rng = KigoRng::new(77);
        let mut seen: Map<String, u32> = Map::new();
        let n = 10_000;
        for _ in 0..n {
            let seq = pool.sample_exact(2, &mut rng).unwrap().join(" ");
            *seen.entry(seq).or_default() += 1;
        }
        assert_eq!(seen.len(), 5);
        for (seq, hits) in seen {
            let pct = hits as f64 / n as f64;
            assert!((0.17..0.23).contains(&pct), "{seq} drawn {:.1}%", pct * 100.0);
        }
    }

    #[test]
    fn test_gather_includes_seeds_and_associations() {
        let mut snap = Snapshot::default();
        for (w, n) in [("moon", 1), ("star", 1), ("sky", 1), ("lantern", 2)] {
            snap.syllable_table.insert(w.into(), n);
        }
        snap.word_associations
            .insert("moon".into(), vec!["star".into(), "firmament".into()]);
        let kb = KnowledgeBase::from_snapshot(snap, PronouncingDictionary::default());
        let params = ComposerParams {
            vocabulary_sample: 0,
            ..ComposerParams::default()
        };
        let mut rng = KigoRng::new(3);
        let pool = CandidatePool::gather(&kb, &["moon".to_string()], 5, &params, &mut rng);
        assert_eq!(pool.bucket(1), ["moon", "star"]);
        // "firmament" is not in the table; its count comes from estimation.
        assert_eq!(pool.bucket(3), ["firmament"]);
    }
}
