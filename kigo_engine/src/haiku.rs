// Haiku orchestration: request → seeds → three lines.
//
// A request is either a free-text prompt (run through the theme extractor)
// or a theme selector (a named category's full word list, or a random
// category when no name is given). The three lines are composed in order
// against the 5-7-5 pattern, and every placed word is appended to a running
// context so the next line's associative walk starts from where the poem
// left off.

use crate::compose::{Line, generate_line};
use crate::config::ComposerParams;
use crate::error::EngineError;
use crate::extract::extract_theme_words;
use kigo_lexicon::KnowledgeBase;
use kigo_prng::KigoRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Syllable targets of the three lines.
pub const HAIKU_PATTERN: [u32; 3] = [5, 7, 5];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaikuRequest {
    /// Free text; seeds come from theme extraction.
    Prompt(String),
    /// A named theme category, or any category when `None`.
    Theme(Option<String>),
}

impl HaikuRequest {
    /// Build a request from optional web/CLI inputs. A non-blank prompt wins
    /// over a theme; blank strings count as absent.
    pub fn from_parts(prompt: Option<&str>, theme: Option<&str>) -> Self {
        fn present(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        match (present(prompt), present(theme)) {
            (Some(p), _) => HaikuRequest::Prompt(p.to_string()),
            (None, t) => HaikuRequest::Theme(t.map(str::to_string)),
        }
    }
}

/// Three lines plus the theme label they were generated under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Haiku {
    pub lines: [Line; 3],
    pub theme: Option<String>,
}

/// The flat shape handed to the web layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaikuRecord {
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub theme: Option<String>,
}

impl Haiku {
    pub fn to_record(&self) -> HaikuRecord {
        let [l1, l2, l3] = &self.lines;
        HaikuRecord {
            line1: l1.text(),
            line2: l2.text(),
            line3: l3.text(),
            theme: self.theme.clone(),
        }
    }
}

impl fmt::Display for Haiku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [l1, l2, l3] = &self.lines;
        write!(f, "{l1}\n{l2}\n{l3}")
    }
}

pub fn generate_haiku(
    kb: &KnowledgeBase,
    request: &HaikuRequest,
    params: &ComposerParams,
    rng: &mut KigoRng,
) -> Result<Haiku, EngineError> {
    let (seeds, theme) = match request {
        HaikuRequest::Prompt(text) => {
            let extracted = extract_theme_words(kb, text, params, rng);
            (extracted.words, extracted.theme)
        }
        HaikuRequest::Theme(Some(name)) => {
            let key = name.trim().to_lowercase();
            let words = kb
                .theme_words(&key)
                .ok_or_else(|| EngineError::UnknownTheme(name.clone()))?;
            (words.to_vec(), Some(key))
        }
        HaikuRequest::Theme(None) => {
            let names = kb.theme_names();
            match rng.choose(&names) {
                Some(name) => (
                    kb.theme_words(name).unwrap_or_default().to_vec(),
                    Some(name.clone()),
                ),
                None => (Vec::new(), None),
            }
        }
    };

    let mut context: Vec<String> = Vec::new();
    let lines = HAIKU_PATTERN.map(|target| {
        let line = generate_line(kb, target, &seeds, &context, params, rng);
        context.extend(line.words().iter().cloned());
        line
    });

    Ok(Haiku { lines, theme })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kigo_lexicon::{PronouncingDictionary, Snapshot};

    fn kb() -> KnowledgeBase {
        kigo_lexicon::default_knowledge_base()
    }

    fn assert_pattern(kb: &KnowledgeBase, haiku: &Haiku) {
        for (line, target) in haiku.lines.iter().zip(HAIKU_PATTERN) {
            let total: u32 = line.words().iter().map(|w| kb.count_syllables(w)).sum();
            assert_eq!(total, target, "line {line:?} in\n{haiku}");
        }
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(
            HaikuRequest::from_parts(Some("autumn moon"), Some("winter")),
            HaikuRequest::Prompt("autumn moon".into())
        );
        assert_eq!(
            HaikuRequest::from_parts(Some("  "), Some("winter")),
            HaikuRequest::Theme(Some("winter".into()))
        );
        assert_eq!(HaikuRequest::from_parts(None, None), HaikuRequest::Theme(None));
        let typed = String::from("  autumn moon \n");
        assert_eq!(
            HaikuRequest::from_parts(Some(typed.as_str()), None),
            HaikuRequest::Prompt("autumn moon".into())
        );
    }

    #[test]
    fn test_prompt_haiku_is_five_seven_five() {
        let kb = kb();
        let params = ComposerParams::default();
        for seed in 0..30 {
            let mut rng = KigoRng::new(seed);
            let request = HaikuRequest::Prompt("an old pond, a frog jumps in".into());
            let haiku = generate_haiku(&kb, &request, &params, &mut rng).unwrap();
            assert_pattern(&kb, &haiku);
        }
    }

    #[test]
    fn test_named_theme_labels_haiku() {
        let kb = kb();
        let mut rng = KigoRng::new(5);
        let request = HaikuRequest::Theme(Some("Winter".into()));
        let haiku = generate_haiku(&kb, &request, &ComposerParams::default(), &mut rng).unwrap();
        assert_eq!(haiku.theme.as_deref(), Some("winter"));
        assert_pattern(&kb, &haiku);
    }

    #[test]
    fn test_random_theme_is_a_known_category() {
        let kb = kb();
        let names = kb.theme_names();
        for seed in 0..10 {
            let mut rng = KigoRng::new(seed);
            let haiku =
                generate_haiku(&kb, &HaikuRequest::Theme(None), &ComposerParams::default(), &mut rng)
                    .unwrap();
            let theme = haiku.theme.clone().unwrap();
            assert!(names.contains(&theme), "unexpected theme {theme}");
            assert_pattern(&kb, &haiku);
        }
    }

    #[test]
    fn test_unknown_theme_is_an_error() {
        let kb = kb();
        let mut rng = KigoRng::new(1);
        let request = HaikuRequest::Theme(Some("cyberpunk".into()));
        let err = generate_haiku(&kb, &request, &ComposerParams::default(), &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTheme(name) if name == "cyberpunk"));
    }

    #[test]
    fn test_next_line_starts_from_previous_line_end() {
        // Line 1 fills its four-syllable slot first, so its only monosyllable
        // "moon" always comes last. Line 2 then walks from "moon", whose one
        // association beats the other four-syllable word.
        let mut snap = Snapshot::default();
        for (w, n) in [("moon", 1), ("melancholy", 4), ("caterpillar", 4)] {
            snap.syllable_table.insert(w.into(), n);
        }
        snap.word_associations
            .insert("moon".into(), vec!["caterpillar".into()]);
        let kb = KnowledgeBase::from_snapshot(snap, PronouncingDictionary::default());
        let params = ComposerParams {
            seed_word_probability: 0.0,
            ..ComposerParams::default()
        };

        for seed in 0..20 {
            let mut rng = KigoRng::new(seed);
            let haiku = generate_haiku(&kb, &HaikuRequest::Theme(None), &params, &mut rng).unwrap();
            assert_eq!(haiku.lines[0].words().last().map(String::as_str), Some("moon"));
            assert_eq!(haiku.lines[1].words()[0], "caterpillar", "seed {seed}:\n{haiku}");
            assert_pattern(&kb, &haiku);
        }
    }

    #[test]
    fn test_same_seed_same_haiku() {
        let kb = kb();
        let request = HaikuRequest::Prompt("cherry blossoms fall".into());
        let params = ComposerParams::default();
        let a = generate_haiku(&kb, &request, &params, &mut KigoRng::new(42)).unwrap();
        let b = generate_haiku(&kb, &request, &params, &mut KigoRng::new(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_shape() {
        let haiku = Haiku {
            lines: [
                Line::new(vec!["old".into(), "silent".into(), "pond".into()], 4),
                Line::new(vec!["frog".into()], 1),
                Line::new(vec!["splash".into()], 1),
            ],
            theme: None,
        };
        let json = serde_json::to_value(haiku.to_record()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "line1": "old silent pond",
                "line2": "frog",
                "line3": "splash",
                "theme": null
            })
        );
        assert_eq!(haiku.to_string(), "old silent pond\nfrog\nsplash");
    }
}
