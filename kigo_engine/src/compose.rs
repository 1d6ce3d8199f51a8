// Line composition: build one line of exactly `target` syllables.
//
// Three tiers, each tried only when the previous one cannot hit the target:
//
// 1. Greedy walk. Optionally open with a seed word, then repeatedly fill the
//    remaining budget with the largest word size that has a candidate. A
//    candidate comes from the associative walk around the anchor (the most
//    recent word of the poem so far, or a random seed), else from the
//    vocabulary bucket of that size. Bounded by `max_attempts` placements.
//    A walk that ends off target is discarded whole.
// 2. Candidate pool. Gather seeds, their associations and a vocabulary
//    sample, and draw a uniformly random exact-length sequence
//    (`CandidatePool::sample_exact`).
// 3. Emergency fill. Repeatedly place the largest pool word that fits (capped
//    at `emergency_max_syllables`), else one from the head of the vocabulary
//    bucket of that size, else pad with one-syllable words.
//
// Tier 3 always reaches the target when the knowledge base has a
// one-syllable word; `Engine` refuses to start without one.

use crate::config::ComposerParams;
use crate::pool::CandidatePool;
use crate::walk::related_words;
use kigo_lexicon::KnowledgeBase;
use kigo_prng::KigoRng;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One generated line: its words and their total syllable count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    words: Vec<String>,
    syllables: u32,
}

impl Line {
    pub fn new(words: Vec<String>, syllables: u32) -> Self {
        Line { words, syllables }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn syllables(&self) -> u32 {
        self.syllables
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Compose a line of exactly `target` syllables.
///
/// `context` is every word already placed in earlier lines of the poem; its
/// last word anchors the associative walk until this line places its own.
pub fn generate_line(
    kb: &KnowledgeBase,
    target: u32,
    seeds: &[String],
    context: &[String],
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Line {
    if target == 0 {
        return Line::default();
    }
    if let Some(words) = greedy_line(kb, target, seeds, context, params, rng) {
        return Line::new(words, target);
    }
    debug!("Greedy walk missed {target} syllables; sampling from candidate pool");
    fallback_line(kb, target, seeds, params, rng)
}

/// Tier 1. `None` when the walk ends off target.
pub fn greedy_line(
    kb: &KnowledgeBase,
    target: u32,
    seeds: &[String],
    context: &[String],
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Option<Vec<String>> {
    let mut words: Vec<String> = Vec::new();
    let mut total = 0;

    if rng.random_bool(params.seed_word_probability) {
        let fitting: Vec<(&String, u32)> = seeds
            .iter()
            .map(|s| (s, kb.count_syllables(s)))
            .filter(|&(_, n)| (1..=target).contains(&n))
            .collect();
        if let Some(&(seed, n)) = rng.choose(&fitting) {
            words.push(seed.clone());
            total += n;
        }
    }

    let mut attempts = 0;
    while total < target && attempts < params.max_attempts {
        attempts += 1;
        let needed = target - total;
        let anchor = words
            .last()
            .or(context.last())
            .or_else(|| rng.choose(seeds))
            .cloned();

        for size in (1..=needed).rev() {
            if let Some(word) = pick_candidate(kb, anchor.as_deref(), size, params, rng) {
                words.push(word.to_string());
                total += size;
                break;
            }
        }
    }

    (total == target).then_some(words)
}

/// A word of exactly `size` syllables near `anchor`, else any vocabulary
/// word of that size.
fn pick_candidate<'a>(
    kb: &'a KnowledgeBase,
    anchor: Option<&str>,
    size: u32,
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Option<&'a str> {
    let related = anchor
        .map(|a| related_words(kb, a, size, params.max_association_distance))
        .unwrap_or_default();
    if let Some(&word) = rng.choose(&related) {
        return Some(word);
    }
    rng.choose(kb.words_with_syllables(size)).map(String::as_str)
}

/// Tiers 2 and 3.
pub fn fallback_line(
    kb: &KnowledgeBase,
    target: u32,
    seeds: &[String],
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Line {
    let pool = CandidatePool::gather(kb, seeds, target, params, rng);
    if let Some(words) = pool.sample_exact(target, rng) {
        return Line::new(words, target);
    }
    debug!("No exact {target}-syllable sequence in pool; emergency fill");
    emergency_line(kb, &pool, target, params, rng)
}

/// Tier 3.
pub fn emergency_line(
    kb: &KnowledgeBase,
    pool: &CandidatePool,
    target: u32,
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Line {
    let mut words: Vec<String> = Vec::new();
    let mut total = 0;

    while total < target {
        let needed = target - total;
        let cap = needed.min(params.emergency_max_syllables);

        let from_pool = (1..=cap).rev().find_map(|n| rng.choose(pool.bucket(n)).map(|w| (w, n)));
        let picked = from_pool.or_else(|| {
            (1..=cap).rev().find_map(|n| {
                let bucket = kb.words_with_syllables(n);
                let head = &bucket[..bucket.len().min(params.emergency_bucket_limit)];
                rng.choose(head).map(|w| (w, n))
            })
        });
        let picked = picked.or_else(|| rng.choose(kb.words_with_syllables(1)).map(|w| (w, 1)));

        match picked {
            Some((word, n)) => {
                words.push(word.clone());
                total += n;
            }
            None => {
                error!("No one-syllable words to pad line; stopping at {total}/{target}");
                break;
            }
        }
    }

    Line::new(words, total)
}
