// Theme extraction: free-text prompt → seed words and a theme label.
//
// The prompt is split into lowercase word tokens (letters, digits, inner
// hyphens and apostrophes). Clitics are split off the end of a token and
// dropped ("river's" is `river`, "don't" is `do`), then a small stopword list
// is removed. Tokens that are themselves in
// the syllable table become seeds directly. Every theme category whose word
// list shares a token with the prompt contributes a random sample of its
// words; the first such category (in name order) becomes the label.
//
// When nothing matches, a random category stands in, so every prompt,
// including the empty one, yields seeds. The label is absent only when seeds
// came purely from direct vocabulary hits, or when the knowledge base has no
// categories at all and a single random vocabulary word is used instead.

use crate::config::ComposerParams;
use kigo_lexicon::KnowledgeBase;
use kigo_prng::KigoRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Function words dropped from prompts before matching.
pub const STOPWORDS: [&str; 13] = [
    "a", "an", "the", "and", "but", "or", "in", "on", "at", "to", "for", "with", "about",
];

/// Seed words extracted from a prompt, with the theme they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSeeds {
    /// Deduplicated, sorted.
    pub words: Vec<String>,
    pub theme: Option<String>,
}

/// Clitic endings split off a token, `n't` first so "don't" keeps `do`.
const CLITICS: [&str; 7] = ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"];

fn is_joiner(c: char) -> bool {
    c == '\'' || c == '-'
}

/// Lowercase word tokens of `prompt`, without clitics or stopwords.
/// Hyphenated words ("short-lived") stay whole.
pub fn tokenize(prompt: &str) -> Vec<String> {
    let lowered = prompt.to_lowercase();
    let mut tokens = Vec::new();
    for raw in lowered.split(|c: char| !(c.is_alphanumeric() || is_joiner(c))) {
        let word = raw.trim_matches(is_joiner);
        let stem = CLITICS
            .iter()
            .find_map(|clitic| word.strip_suffix(clitic))
            .unwrap_or(word)
            .trim_end_matches(is_joiner);
        if !stem.is_empty() && !STOPWORDS.contains(&stem) {
            tokens.push(stem.to_string());
        }
    }
    tokens
}

pub fn extract_theme_words(
    kb: &KnowledgeBase,
    prompt: &str,
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> ThemeSeeds {
    let tokens: BTreeSet<String> = tokenize(prompt).into_iter().collect();
    let mut seeds: BTreeSet<String> = tokens.iter().filter(|t| kb.contains(t)).cloned().collect();
    let mut theme: Option<String> = None;

    for (name, words) in kb.themes() {
        if words.iter().any(|w| tokens.contains(w)) {
            seeds.extend(rng.sample(words, params.theme_sample).into_iter().cloned());
            theme.get_or_insert_with(|| name.clone());
        }
    }

    if seeds.is_empty() {
        let names: Vec<&String> = kb.themes().keys().collect();
        if let Some(&name) = rng.choose(&names) {
            let words = kb.theme_words(name).unwrap_or_default();
            seeds.extend(rng.sample(words, params.theme_sample).into_iter().cloned());
            theme = Some(name.clone());
        }
    }

    if seeds.is_empty() {
        if let Some(word) = rng.choose(kb.vocabulary()) {
            seeds.insert(word.clone());
        }
    }

    ThemeSeeds {
        words: seeds.into_iter().collect(),
        theme,
    }
}
