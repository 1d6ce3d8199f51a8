// Lexical resources for the kigo haiku engine.
//
// Owns everything the engine knows about words: how many syllables they
// have, which words relate to which, and which words belong to which theme.
// No generation logic lives here; `kigo_engine` samples from the tables this
// crate builds.
//
// Architecture:
// - `syllables.rs`: word normalization and the vowel-group heuristic
// - `pronunciation.rs`: CMU-format pronunciation lexicon (stress-digit counts)
// - `corpus.rs`: WordNet-shaped synset corpus (`Corpus::from_json()`)
// - `themes.rs`: theme category names, POS/domain classification, seasons
// - `knowledge.rs`: `KnowledgeBase`: syllable table, associations, themes,
//   plus the derived syllable buckets and sorted vocabulary
// - `snapshot.rs`: the three-table JSON snapshot and its atomic save
// - `error.rs`: `LexiconError`
//
// The default corpus and pronunciation lexicon are embedded from `data/` with
// `include_str!`, following the same JSON-string-in, typed-struct-out pattern
// used for every data file in the workspace.
//
// Determinism constraint: every table is an ordered map and the build does
// not depend on thread scheduling, so two builds from the same inputs are
// identical and a seeded generator downstream reproduces its output.

pub mod corpus;
pub mod error;
pub mod knowledge;
pub mod pronunciation;
pub mod snapshot;
pub mod syllables;
pub mod themes;

pub use corpus::{Corpus, PartOfSpeech, Synset};
pub use error::LexiconError;
pub use knowledge::KnowledgeBase;
pub use pronunciation::PronouncingDictionary;
pub use snapshot::Snapshot;
pub use syllables::{estimate_syllables, normalize_word};

/// Load the default corpus embedded at compile time.
///
/// Panics if the embedded JSON is malformed (should never happen in a
/// released build).
pub fn default_corpus() -> Corpus {
    let json = include_str!("../../data/lexicon_corpus.json");
    Corpus::from_json(json).expect("embedded lexicon_corpus.json is malformed")
}

/// Load the default pronunciation lexicon embedded at compile time.
pub fn default_pronunciations() -> PronouncingDictionary {
    let text = include_str!("../../data/pronunciations.txt");
    PronouncingDictionary::parse(text).expect("embedded pronunciations.txt is malformed")
}

/// Build a knowledge base from the embedded corpus and pronunciations.
pub fn default_knowledge_base() -> KnowledgeBase {
    KnowledgeBase::build(&default_corpus(), default_pronunciations())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_knowledge_base_has_every_bucket_for_haiku() {
        let kb = default_knowledge_base();
        for n in 1..=4 {
            assert!(
                !kb.words_with_syllables(n).is_empty(),
                "no {n}-syllable words in the default knowledge base"
            );
        }
    }

    #[test]
    fn test_default_knowledge_base_themes() {
        let kb = default_knowledge_base();
        let names = kb.theme_names();
        for theme in [
            "actions",
            "animals",
            "autumn",
            "descriptions",
            "nature",
            "objects",
            "spring",
            "summer",
            "winter",
        ] {
            assert!(names.contains(&theme.to_string()), "missing theme {theme}");
        }
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_default_counts_match_pronunciations() {
        let kb = default_knowledge_base();
        assert_eq!(kb.count_syllables("cicada"), 3);
        assert_eq!(kb.count_syllables("evening"), 2);
        assert_eq!(kb.count_syllables("ephemeral"), 4);
        assert_eq!(kb.count_syllables("moon"), 1);
    }
}
