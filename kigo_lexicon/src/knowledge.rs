// Lexical knowledge base: syllable table, association graph, theme index.
//
// Built once per engine, either from a corpus pass (`build`) or from a
// persisted snapshot (`from_snapshot`). Alongside the three persisted tables
// it keeps two derived structures the line composer samples from:
//
// - `buckets`: syllable count → words with that count, in insertion order.
//   A word lives in exactly the bucket of its current table count.
// - `vocabulary`: every table key, sorted, for uniform vocabulary sampling.
//
// Syllable counting is three-tiered: the table, then the pronunciation
// lexicon, then the spelling heuristic. Counts coming from the lower tiers
// are not written back to the table.
//
// Corpus build: every single-token lemma gets a table count and joins the
// theme categories of its synset; it also gains associations to its
// single-token co-lemmas and to the single-token lemmas of each hypernym.
// Counting the unique lemma set is the only expensive step and runs on rayon;
// results land in ordered maps, so the built tables do not depend on thread
// scheduling.

use crate::corpus::Corpus;
use crate::pronunciation::PronouncingDictionary;
use crate::snapshot::Snapshot;
use crate::syllables::{estimate_normalized, is_single_token, normalize_word};
use crate::themes::{SEASONAL_THEMES, categories_for};
use log::info;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    syllables: BTreeMap<String, u32>,
    associations: BTreeMap<String, Vec<String>>,
    themes: BTreeMap<String, Vec<String>>,
    buckets: BTreeMap<u32, Vec<String>>,
    vocabulary: Vec<String>,
    pronunciations: PronouncingDictionary,
}

impl KnowledgeBase {
    /// Build all tables from a corpus.
    pub fn build(corpus: &Corpus, pronunciations: PronouncingDictionary) -> Self {
        let mut lemmas: BTreeSet<String> = BTreeSet::new();
        let mut associations: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut themes: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for synset in corpus.synsets() {
            let words = single_tokens(&synset.lemmas);
            let hypernym_words: Vec<String> = corpus
                .hypernyms_of(synset)
                .flat_map(|h| single_tokens(&h.lemmas))
                .collect();
            let categories = categories_for(synset.pos, &synset.domain);

            for word in &words {
                for cat in &categories {
                    themes.entry((*cat).to_string()).or_default().push(word.clone());
                }

                let related: Vec<String> = words
                    .iter()
                    .filter(|other| *other != word)
                    .chain(hypernym_words.iter())
                    .cloned()
                    .collect();
                if !related.is_empty() {
                    associations.entry(word.clone()).or_default().extend(related);
                }

                lemmas.insert(word.clone());
            }
        }

        for words in themes.values_mut() {
            dedup_preserving_order(words);
        }
        for (name, words) in SEASONAL_THEMES {
            themes.insert(
                name.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            );
        }

        let lemmas: Vec<String> = lemmas.into_iter().collect();
        let counted: Vec<(String, u32)> = lemmas
            .into_par_iter()
            .map(|w| {
                let n = lexicon_count(&pronunciations, &w);
                (w, n)
            })
            .collect();
        let syllables: BTreeMap<String, u32> = counted.into_iter().collect();

        let kb = Self::from_tables(syllables, associations, themes, pronunciations);
        info!(
            "Built knowledge base from {} synsets: {} words, {} associated, {} themes",
            corpus.len(),
            kb.len(),
            kb.associations.len(),
            kb.themes.len()
        );
        kb
    }

    /// Restore from a snapshot, rebuilding the derived structures.
    pub fn from_snapshot(snapshot: Snapshot, pronunciations: PronouncingDictionary) -> Self {
        Self::from_tables(
            snapshot.syllable_table,
            snapshot.word_associations,
            snapshot.theme_words,
            pronunciations,
        )
    }

    /// Assemble a knowledge base from its three tables.
    ///
    /// Table keys are normalized (hand-edited snapshots may carry "Moon,")
    /// and keys that normalize to nothing are dropped; zero counts are raised
    /// to one. Lookups and buckets then always agree on a word's count.
    pub fn from_tables(
        table: BTreeMap<String, u32>,
        associations: BTreeMap<String, Vec<String>>,
        themes: BTreeMap<String, Vec<String>>,
        pronunciations: PronouncingDictionary,
    ) -> Self {
        let syllables: BTreeMap<String, u32> = table
            .into_iter()
            .map(|(word, count)| (normalize_word(&word), count.max(1)))
            .filter(|(word, _)| !word.is_empty())
            .collect();

        let mut buckets: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for (word, &count) in &syllables {
            buckets.entry(count).or_default().push(word.clone());
        }
        let vocabulary = syllables.keys().cloned().collect();

        KnowledgeBase {
            syllables,
            associations,
            themes,
            buckets,
            vocabulary,
            pronunciations,
        }
    }

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            syllable_table: self.syllables.clone(),
            word_associations: self.associations.clone(),
            theme_words: self.themes.clone(),
        }
    }

    /// Syllable count of `word`: table, then pronunciation lexicon, then the
    /// spelling heuristic. Zero only when the word is empty after
    /// normalization.
    pub fn count_syllables(&self, word: &str) -> u32 {
        let key = normalize_word(word);
        if let Some(&n) = self.syllables.get(&key) {
            return n;
        }
        lexicon_count(&self.pronunciations, &key)
    }

    /// Table count only, without the fallback tiers.
    pub fn stored_syllables(&self, word: &str) -> Option<u32> {
        self.syllables.get(&normalize_word(word)).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.syllables.contains_key(word)
    }

    /// Insert or overwrite a word's count.
    ///
    /// Returns false, and changes nothing, when `syllables` is not positive
    /// or the word is empty or multi-token after normalization.
    pub fn add_word(&mut self, word: &str, syllables: i64) -> bool {
        let Ok(count) = u32::try_from(syllables) else {
            return false;
        };
        if count == 0 {
            return false;
        }
        let key = normalize_word(word);
        if !is_single_token(&key) {
            return false;
        }

        match self.syllables.insert(key.clone(), count) {
            Some(old) if old == count => return true,
            Some(old) => self.remove_from_bucket(old, &key),
            None => {
                if let Err(pos) = self.vocabulary.binary_search(&key) {
                    self.vocabulary.insert(pos, key.clone());
                }
            }
        }
        self.buckets.entry(count).or_default().push(key);
        true
    }

    fn remove_from_bucket(&mut self, count: u32, word: &str) {
        if let Some(bucket) = self.buckets.get_mut(&count) {
            bucket.retain(|w| w != word);
            if bucket.is_empty() {
                self.buckets.remove(&count);
            }
        }
    }

    /// Outgoing associations of `word` (empty when it has none).
    pub fn associations(&self, word: &str) -> &[String] {
        self.associations.get(word).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn theme_words(&self, theme: &str) -> Option<&[String]> {
        self.themes.get(theme).map(Vec::as_slice)
    }

    /// The theme index, in name order.
    pub fn themes(&self) -> &BTreeMap<String, Vec<String>> {
        &self.themes
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.themes.keys().cloned().collect()
    }

    /// Words whose table count is exactly `n`.
    pub fn words_with_syllables(&self, n: u32) -> &[String] {
        self.buckets.get(&n).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every table word, sorted.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.syllables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.syllables.is_empty()
    }
}

/// Pronunciation lexicon, then heuristic, for a normalized key.
fn lexicon_count(pronunciations: &PronouncingDictionary, key: &str) -> u32 {
    if key.is_empty() {
        return 0;
    }
    pronunciations
        .syllables(key)
        .unwrap_or_else(|| estimate_normalized(key))
}

fn single_tokens(lemmas: &[String]) -> Vec<String> {
    lemmas
        .iter()
        .map(|l| normalize_word(l))
        .filter(|l| is_single_token(l))
        .collect()
}

fn dedup_preserving_order(words: &mut Vec<String>) {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    words.retain(|w| seen.insert(w.clone()));
}
