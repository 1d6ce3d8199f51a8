// WordNet-shaped lexical corpus.
//
// The knowledge base is built from a flat list of synsets, each with a part
// of speech, a WordNet lexicographer-file domain (`noun.animal`,
// `verb.motion`), its lemmas, and the ids of its hypernym synsets. The JSON
// shape is:
//
//   {"synsets": [{"id": "crow.n.01", "pos": "noun", "domain": "noun.animal",
//                 "lemmas": ["crow"], "hypernyms": ["bird.n.01"]}]}
//
// Lemmas keep WordNet's underscore joiners (`cherry_tree`); the knowledge
// base skips them, but the corpus preserves them as given. Synset order is
// file order, and the build iterates in that order.

use crate::error::LexiconError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    AdjectiveSatellite,
    Adverb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub id: String,
    pub pos: PartOfSpeech,
    /// Lexicographer file name, e.g. `noun.plant`. Empty when unknown.
    #[serde(default)]
    pub domain: String,
    pub lemmas: Vec<String>,
    #[serde(default)]
    pub hypernyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CorpusFile {
    synsets: Vec<Synset>,
}

/// A loaded corpus with id lookup for hypernym resolution.
#[derive(Debug, Clone)]
pub struct Corpus {
    synsets: Vec<Synset>,
    by_id: BTreeMap<String, usize>,
}

impl Corpus {
    pub fn new(synsets: Vec<Synset>) -> Self {
        let by_id = synsets
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Corpus { synsets, by_id }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: CorpusFile = serde_json::from_str(json)?;
        Ok(Self::new(file.synsets))
    }

    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let json = fs::read_to_string(path).map_err(|e| LexiconError::read(path, e))?;
        Ok(Self::from_json(&json)?)
    }

    /// All synsets, in file order.
    pub fn synsets(&self) -> &[Synset] {
        &self.synsets
    }

    pub fn synset(&self, id: &str) -> Option<&Synset> {
        self.by_id.get(id).map(|&i| &self.synsets[i])
    }

    /// Hypernym synsets of `synset` that exist in this corpus. Dangling ids
    /// are skipped.
    pub fn hypernyms_of<'a>(&'a self, synset: &'a Synset) -> impl Iterator<Item = &'a Synset> + 'a {
        synset.hypernyms.iter().filter_map(|id| self.synset(id))
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }
}
