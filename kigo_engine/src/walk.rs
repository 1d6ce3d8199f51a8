// Associative walk over the knowledge base's association graph.
//
// Breadth-first from an anchor word, one frontier per hop, up to
// `max_distance` hops. Every word reached for the first time is checked
// against the requested syllable count; matches are collected in visit
// order. The graph is directed and may be cyclic, so a visited set (seeded
// with the anchor) keeps each word to a single visit and bounds the work by
// the size of the reachable neighbourhood.

use kigo_lexicon::KnowledgeBase;
use rustc_hash::FxHashSet;

/// Words within `max_distance` association hops of `anchor` whose syllable
/// count is exactly `syllables`. The anchor itself is never returned.
pub fn related_words<'a>(
    kb: &'a KnowledgeBase,
    anchor: &str,
    syllables: u32,
    max_distance: u32,
) -> Vec<&'a str> {
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    visited.insert(anchor);

    let mut found: Vec<&'a str> = Vec::new();
    let mut frontier: Vec<&'a str> = Vec::new();

    for hop in 0..max_distance {
        let neighbours: Vec<&'a String> = if hop == 0 {
            kb.associations(anchor).iter().collect()
        } else {
            frontier
                .iter()
                .flat_map(|w| kb.associations(w).iter())
                .collect()
        };

        frontier.clear();
        for word in neighbours {
            if visited.insert(word.as_str()) {
                if kb.count_syllables(word) == syllables {
                    found.push(word.as_str());
                }
                frontier.push(word.as_str());
            }
        }
        if frontier.is_empty() {
            break;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use kigo_lexicon::{PronouncingDictionary, Snapshot};

    /// moon → star → sky → moon (cycle), moon → night, star → sun,
    /// sky → heaven (third hop from moon).
    fn kb() -> KnowledgeBase {
        let mut snap = Snapshot::default();
        for (w, n) in [
            ("moon", 1),
            ("star", 1),
            ("sky", 1),
            ("night", 1),
            ("sun", 1),
            ("heaven", 2),
            ("lantern", 2),
        ] {
            snap.syllable_table.insert(w.into(), n);
        }
        let edges = [
            ("moon", vec!["star", "night", "lantern"]),
            ("star", vec!["sky", "sun", "moon"]),
            ("sky", vec!["moon", "heaven"]),
        ];
        for (from, to) in edges {
            snap.word_associations
                .insert(from.into(), to.into_iter().map(String::from).collect());
        }
        KnowledgeBase::from_snapshot(snap, PronouncingDictionary::default())
    }

    #[test]
    fn test_two_hops_in_visit_order() {
        let kb = kb();
        assert_eq!(related_words(&kb, "moon", 1, 2), vec!["star", "night", "sky", "sun"]);
    }

    #[test]
    fn test_distance_bound() {
        let kb = kb();
        assert_eq!(related_words(&kb, "moon", 1, 1), vec!["star", "night"]);
        assert!(related_words(&kb, "moon", 1, 0).is_empty());
        // "heaven" is three hops out.
        assert_eq!(related_words(&kb, "moon", 2, 2), vec!["lantern"]);
        assert_eq!(related_words(&kb, "moon", 2, 3), vec!["lantern", "heaven"]);
    }

    #[test]
    fn test_cycle_does_not_revisit_anchor() {
        let kb = kb();
        let found = related_words(&kb, "moon", 1, 10);
        assert!(!found.contains(&"moon"));
        let unique: FxHashSet<&str> = found.iter().copied().collect();
        assert_eq!(unique.len(), found.len());
    }

    #[test]
    fn test_unknown_anchor_finds_nothing() {
        let kb = kb();
        assert!(related_words(&kb, "umbrella", 1, 2).is_empty());
    }
}
