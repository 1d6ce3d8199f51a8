// Pronunciation lexicon in CMU Pronouncing Dictionary text format.
//
// Each entry line is `WORD  PH1 PH2 ...`. Vowel phonemes carry a stress
// digit (`AH0`, `IY1`, `AO2`), so the syllable count of one pronunciation
// is the number of phonemes ending in a digit. Alternate pronunciations are
// written `WORD(1)`, `WORD(2)`; the lexicon keeps the maximum count across
// variants ("fire" is `F AY1 R` or `F AY1 ER0`, so it counts as two).
//
// Lines starting with `;;;` are comments; blank lines are skipped. Keys are
// lowercased at parse time. Only the per-word maximum is stored, since that
// is the only thing syllable counting needs.
//
// The full CMU dictionary ships as Latin-1; convert it to UTF-8 before
// pointing the engine at it.

use crate::error::LexiconError;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Word → syllable count, parsed from CMU-format text.
#[derive(Debug, Clone, Default)]
pub struct PronouncingDictionary {
    counts: BTreeMap<String, u32>,
}

impl PronouncingDictionary {
    /// Parse CMU-format text.
    ///
    /// A line with a word but no phonemes is an error carrying its 1-based
    /// line number. A pronunciation with no stressed phoneme (interjections
    /// like "hmm") counts as one syllable.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        let mut counts: BTreeMap<String, u32> = BTreeMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else {
                continue;
            };
            let phonemes: Vec<&str> = fields.collect();
            if phonemes.is_empty() {
                return Err(LexiconError::Pronunciation {
                    line: idx + 1,
                    message: format!("entry {head:?} has no phonemes"),
                });
            }

            let word = strip_variant(head).to_lowercase();
            let stressed = phonemes
                .iter()
                .filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
                .count() as u32;
            let entry = counts.entry(word).or_insert(0);
            *entry = (*entry).max(stressed.max(1));
        }

        Ok(PronouncingDictionary { counts })
    }

    /// Read and parse a CMU-format file.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let text = fs::read_to_string(path).map_err(|e| LexiconError::read(path, e))?;
        let dict = Self::parse(&text)?;
        info!(
            "Loaded {} pronunciations from {}",
            dict.len(),
            path.display()
        );
        Ok(dict)
    }

    /// Syllable count for a normalized (lowercase) word, if known.
    pub fn syllables(&self, word: &str) -> Option<u32> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// `FIRE(1)` → `FIRE`. Heads without a well-formed `(n)` suffix are kept
/// whole, so entries like `(PAREN` or `)CLOSE-PAREN` survive unchanged.
fn strip_variant(head: &str) -> &str {
    match head.find('(') {
        Some(pos) if pos > 0 && head.ends_with(')') => &head[..pos],
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ";;; sample entries
BLOSSOM  B L AA1 S AH0 M
FIRE  F AY1 R
FIRE(1)  F AY1 ER0

EVENING  IY1 V N IH0 NG
HMM  HH M
";

    #[test]
    fn test_parse_counts_stressed_phonemes() {
        let dict = PronouncingDictionary::parse(SAMPLE).unwrap();
        assert_eq!(dict.syllables("blossom"), Some(2));
        assert_eq!(dict.syllables("evening"), Some(2));
        assert_eq!(dict.len(), 4);
    }

    #[test]
    fn test_variants_take_maximum() {
        let dict = PronouncingDictionary::parse(SAMPLE).unwrap();
        assert_eq!(dict.syllables("fire"), Some(2));
    }

    #[test]
    fn test_no_stress_counts_one() {
        let dict = PronouncingDictionary::parse(SAMPLE).unwrap();
        assert_eq!(dict.syllables("hmm"), Some(1));
    }

    #[test]
    fn test_lookup_is_lowercase_only() {
        let dict = PronouncingDictionary::parse(SAMPLE).unwrap();
        assert_eq!(dict.syllables("BLOSSOM"), None);
        assert_eq!(dict.syllables("umbrella"), None);
    }

    #[test]
    fn test_missing_phonemes_reports_line() {
        let err = PronouncingDictionary::parse(";;; header\nMOON  M UW1 N\nSTAR\n").unwrap_err();
        match err {
            LexiconError::Pronunciation { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strip_variant() {
        assert_eq!(strip_variant("FIRE(1)"), "FIRE");
        assert_eq!(strip_variant("FIRE"), "FIRE");
        assert_eq!(strip_variant("(PAREN"), "(PAREN");
    }

    #[test]
    fn test_default_dictionary_parses() {
        let dict = crate::default_pronunciations();
        assert!(dict.len() > 100, "only {} entries", dict.len());
        assert_eq!(dict.syllables("butterfly"), Some(3));
        assert_eq!(dict.syllables("moon"), Some(1));
    }
}
