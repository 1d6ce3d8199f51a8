// Word normalization and the vowel-group syllable heuristic.
//
// `normalize_word` produces the key form used by every table in the crate:
// trimmed, lowercased, with leading and trailing ASCII punctuation removed
// ("Moon," and "moon" are the same entry). `estimate_syllables` is the last
// tier of `KnowledgeBase::count_syllables`, used when neither the syllable
// table nor the pronunciation lexicon knows the word.
//
// The heuristic is deliberately crude: drop one trailing `e`, count maximal
// runs of `a e i o u y`, clamp to at least one. It undercounts words like
// "poem" and overcounts some silent-vowel spellings; the pronunciation
// lexicon exists to cover the common cases it gets wrong.

/// Characters the heuristic treats as vowels.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Canonical key form of a word: trimmed, lowercased, surrounding ASCII
/// punctuation removed. May be empty.
pub fn normalize_word(word: &str) -> String {
    word.trim()
        .to_lowercase()
        .trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace())
        .to_string()
}

/// True when a normalized lemma is a single usable token (no underscore
/// joiners, no whitespace).
pub fn is_single_token(word: &str) -> bool {
    !word.is_empty() && !word.contains(|c: char| c == '_' || c.is_whitespace())
}

/// Estimate syllables from spelling alone.
///
/// Returns 0 exactly when the word is empty after normalization, and at
/// least 1 otherwise.
pub fn estimate_syllables(word: &str) -> u32 {
    let key = normalize_word(word);
    estimate_normalized(&key)
}

/// `estimate_syllables` for an already-normalized key.
pub(crate) fn estimate_normalized(key: &str) -> u32 {
    if key.is_empty() {
        return 0;
    }
    let stem = key.strip_suffix('e').unwrap_or(key);

    let mut groups = 0;
    let mut in_group = false;
    for c in stem.chars() {
        let vowel = VOWELS.contains(&c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_strips_case_and_punctuation() {
        assert_eq!(normalize_word("  Moon, "), "moon");
        assert_eq!(normalize_word("silence..."), "silence");
        assert_eq!(normalize_word("\"Dawn!\""), "dawn");
        assert_eq!(normalize_word("o'clock"), "o'clock");
        assert_eq!(normalize_word("?!"), "");
    }

    #[test]
    fn test_single_token() {
        assert!(is_single_token("blossom"));
        assert!(is_single_token("short-lived"));
        assert!(!is_single_token("cherry_tree"));
        assert!(!is_single_token("cherry tree"));
        assert!(!is_single_token(""));
    }

    #[test]
    fn test_estimate_common_words() {
        assert_eq!(estimate_syllables("cat"), 1);
        assert_eq!(estimate_syllables("stone"), 1);
        assert_eq!(estimate_syllables("river"), 2);
        assert_eq!(estimate_syllables("blossom"), 2);
        assert_eq!(estimate_syllables("butterfly"), 3);
        assert_eq!(estimate_syllables("sky"), 1);
    }

    #[test]
    fn test_estimate_trailing_e_alone_still_counts_one() {
        assert_eq!(estimate_syllables("e"), 1);
        assert_eq!(estimate_syllables("the"), 1);
    }

    #[test]
    fn test_estimate_empty_and_punctuation() {
        assert_eq!(estimate_syllables(""), 0);
        assert_eq!(estimate_syllables("   "), 0);
        assert_eq!(estimate_syllables(".:;?!"), 0);
    }

    #[test]
    fn test_estimate_consonant_only_clamps_to_one() {
        assert_eq!(estimate_syllables("hmm"), 1);
        assert_eq!(estimate_syllables("zzz"), 1);
    }

    proptest! {
        #[test]
        fn estimate_is_zero_iff_normalized_empty(word in "\\PC{0,16}") {
            let empty = normalize_word(&word).is_empty();
            let count = estimate_syllables(&word);
            prop_assert_eq!(count == 0, empty);
        }

        #[test]
        fn estimate_ignores_surrounding_punctuation(word in "[a-z]{1,10}", pad in "[.,;:!?]{0,3}") {
            let padded = format!("{pad}{word}{pad}");
            prop_assert_eq!(estimate_syllables(&padded), estimate_syllables(&word));
        }

        #[test]
        fn estimate_bounded_by_length(word in "[a-z]{1,20}") {
            let count = estimate_syllables(&word) as usize;
            prop_assert!(count >= 1 && count <= word.len());
        }
    }
}
