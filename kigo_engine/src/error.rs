// Errors surfaced by the engine facade.
//
// Line generation itself never fails; these cover startup (config, corpus,
// pronunciation and snapshot I/O, an unusable knowledge base) and request
// validation (unknown theme, batch size).

use kigo_lexicon::LexiconError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Lexicon(#[from] LexiconError),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    #[error("count must be between 1 and {max}, got {count}")]
    InvalidCount { count: usize, max: usize },

    #[error("knowledge base has no words")]
    EmptyVocabulary,

    #[error("knowledge base has no one-syllable words; lines cannot be padded to length")]
    NoMonosyllables,
}
