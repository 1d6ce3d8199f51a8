// Theme categories and the fixed seasonal word lists.
//
// Corpus-derived categories come from part of speech and lexicographer
// domain (`categories_for`). The four seasonal categories are not derived;
// they are written over the index after the corpus pass, so a corpus that
// happens to produce a "spring" bucket still ends with exactly these words.

use crate::corpus::PartOfSpeech;

pub const OBJECTS: &str = "objects";
pub const ANIMALS: &str = "animals";
pub const NATURE: &str = "nature";
pub const ACTIONS: &str = "actions";
pub const DESCRIPTIONS: &str = "descriptions";

/// Seasonal theme name → its fixed word list.
pub const SEASONAL_THEMES: [(&str, &[&str]); 4] = [
    (
        "spring",
        &["blossom", "bloom", "green", "birth", "grow", "rain", "fresh"],
    ),
    (
        "summer",
        &["sun", "heat", "bright", "warm", "blue", "beach", "swim"],
    ),
    (
        "autumn",
        &["fall", "leaf", "red", "orange", "crisp", "harvest", "cool"],
    ),
    (
        "winter",
        &["snow", "cold", "ice", "frost", "bare", "sleep", "dark"],
    ),
];

/// Categories a lemma joins, given its synset's part of speech and domain.
///
/// Adjective satellites and adverbs join nothing.
pub fn categories_for(pos: PartOfSpeech, domain: &str) -> Vec<&'static str> {
    match pos {
        PartOfSpeech::Noun => {
            let mut cats = vec![OBJECTS];
            match domain {
                "noun.animal" => cats.push(ANIMALS),
                "noun.plant" => cats.push(NATURE),
                _ => {}
            }
            cats
        }
        PartOfSpeech::Verb => vec![ACTIONS],
        PartOfSpeech::Adjective => vec![DESCRIPTIONS],
        PartOfSpeech::AdjectiveSatellite | PartOfSpeech::Adverb => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_domains() {
        assert_eq!(categories_for(PartOfSpeech::Noun, "noun.animal"), vec![OBJECTS, ANIMALS]);
        assert_eq!(categories_for(PartOfSpeech::Noun, "noun.plant"), vec![OBJECTS, NATURE]);
        assert_eq!(categories_for(PartOfSpeech::Noun, "noun.time"), vec![OBJECTS]);
    }

    #[test]
    fn test_other_parts_of_speech() {
        assert_eq!(categories_for(PartOfSpeech::Verb, "verb.motion"), vec![ACTIONS]);
        assert_eq!(categories_for(PartOfSpeech::Adjective, "adj.all"), vec![DESCRIPTIONS]);
        assert!(categories_for(PartOfSpeech::AdjectiveSatellite, "adj.all").is_empty());
        assert!(categories_for(PartOfSpeech::Adverb, "adv.all").is_empty());
    }

    #[test]
    fn test_seasons_have_seven_words() {
        for (name, words) in SEASONAL_THEMES {
            assert_eq!(words.len(), 7, "season {name} should list seven words");
        }
    }
}
