// Persisted knowledge-base snapshot.
//
// A snapshot is the three core tables serialized as one JSON object with
// exactly the fields `syllable_table`, `word_associations` and `theme_words`.
// Derived structures (syllable buckets, the vocabulary list) are not stored;
// `KnowledgeBase::from_snapshot` rebuilds them.
//
// Saving is atomic: the JSON is written to a temp file in the target's
// directory and renamed over the destination, so a crash mid-save leaves the
// previous snapshot intact.

use crate::error::LexiconError;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub syllable_table: BTreeMap<String, u32>,
    pub word_associations: BTreeMap<String, Vec<String>>,
    pub theme_words: BTreeMap<String, Vec<String>>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Read a snapshot file. Missing files, I/O errors, malformed JSON and
    /// missing fields are all errors.
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let json = fs::read_to_string(path).map_err(|e| LexiconError::read(path, e))?;
        let snapshot = Self::from_json(&json)?;
        info!(
            "Loaded snapshot {} ({} words, {} themes)",
            path.display(),
            snapshot.syllable_table.len(),
            snapshot.theme_words.len()
        );
        Ok(snapshot)
    }

    /// Write the snapshot atomically.
    pub fn save(&self, path: &Path) -> Result<(), LexiconError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|e| LexiconError::write(path, e))?;
        {
            let mut writer = BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, self)?;
            writer.flush().map_err(|e| LexiconError::write(path, e))?;
        }
        temp.persist(path)
            .map_err(|e| LexiconError::write(path, e.error))?;

        info!(
            "Saved snapshot {} ({} words)",
            path.display(),
            self.syllable_table.len()
        );
        Ok(())
    }
}
