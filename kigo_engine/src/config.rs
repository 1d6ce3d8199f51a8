// Engine configuration.
//
// Every tunable the generator reads lives here: where the corpus,
// pronunciation lexicon and snapshot come from, whether to write the
// snapshot back, an optional fixed PRNG seed, and the composer's sampling
// parameters. The composer never uses magic numbers; it reads
// `ComposerParams`.
//
// Loaded from JSON with `#[serde(default)]`, so a config file only needs the
// fields it changes. CLI flags in `main.rs` override individual fields after
// loading.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Sampling and search limits for line composition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerParams {
    /// Chance that a line opens with one of the theme seed words.
    pub seed_word_probability: f64,
    /// Placement attempts per line before the greedy walk gives up.
    pub max_attempts: u32,
    /// Hops the association walk may take from its anchor word.
    pub max_association_distance: u32,
    /// Associations taken from each seed when building a fallback pool.
    pub association_sample: usize,
    /// Random vocabulary words added to a fallback pool.
    pub vocabulary_sample: usize,
    /// Words sampled from each matching theme category.
    pub theme_sample: usize,
    /// Largest word the emergency filler will place.
    pub emergency_max_syllables: u32,
    /// Vocabulary words per size the emergency filler draws from.
    pub emergency_bucket_limit: usize,
}

impl Default for ComposerParams {
    fn default() -> Self {
        Self {
            seed_word_probability: 0.8,
            max_attempts: 50,
            max_association_distance: 2,
            association_sample: 10,
            vocabulary_sample: 100,
            theme_sample: 3,
            emergency_max_syllables: 4,
            emergency_bucket_limit: 100,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Corpus JSON; `None` uses the embedded corpus.
    pub corpus_path: Option<PathBuf>,
    /// CMU-format pronunciation file; `None` uses the embedded subset.
    pub pronunciation_path: Option<PathBuf>,
    /// Snapshot to load from, and to write after a rebuild.
    pub snapshot_path: Option<PathBuf>,
    /// Write the snapshot after building from the corpus.
    pub save_snapshot: bool,
    /// Fixed seed for the engine's own PRNG; `None` seeds from the clock.
    pub seed: Option<u64>,
    pub composer: ComposerParams,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let json = fs::read_to_string(path).map_err(|source| EngineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| EngineError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
