// Error type for lexicon loading, snapshot persistence, and pronunciation
// parsing. Counting and `add_word` never fail outward; only I/O and data
// format problems surface here.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pronunciation lexicon line {line}: {message}")]
    Pronunciation { line: usize, message: String },
}

impl LexiconError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LexiconError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LexiconError::Write {
            path: path.into(),
            source,
        }
    }
}
