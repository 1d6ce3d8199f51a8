// Engine facade: one knowledge base, one PRNG, shared across callers.
//
// `Engine` is the explicit instance the web layer or CLI holds. It owns the
// knowledge base behind a `RwLock` (generation, counting and theme listing
// read; `add_word` writes) and its own `KigoRng` behind a `Mutex` for callers
// that do not supply one. That mutex is held only long enough to draw a seed
// for a per-request generator, so concurrent requests compose in parallel
// under the read lock. `generate_with` takes a caller's generator instead,
// which is how tests and `--seed` get reproducible poems.
//
// Construction (`build_or_load`) tries the configured snapshot first. A load
// failure, or a loaded snapshot that fails the usability check below, is
// logged and the knowledge base is rebuilt from the corpus;
// the rebuilt tables are written back (best effort) when `save_snapshot` is
// set. A knowledge base with no words, or none of one syllable, is rejected:
// the composer's last tier pads lines with one-syllable words and cannot
// guarantee exact length without them.
//
// `EngineCell` is a build-once holder for owners that create the engine
// lazily (the web layer's app state). Every mutation under these locks is a
// single map update, so poisoned locks are recovered rather than propagated.

use crate::config::{ComposerParams, EngineConfig};
use crate::error::EngineError;
use crate::extract::{ThemeSeeds, extract_theme_words};
use crate::haiku::{Haiku, HaikuRequest, generate_haiku};
use kigo_lexicon::{
    Corpus, KnowledgeBase, PronouncingDictionary, Snapshot, default_corpus,
    default_pronunciations,
};
use kigo_prng::KigoRng;
use log::{debug, info, warn};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Most haikus one `generate_many` call may produce.
pub const MAX_BATCH: usize = 10;

#[derive(Debug)]
pub struct Engine {
    kb: RwLock<KnowledgeBase>,
    rng: Mutex<KigoRng>,
    params: ComposerParams,
}

impl Engine {
    /// Load the configured snapshot, or build from the corpus.
    pub fn build_or_load(config: &EngineConfig) -> Result<Self, EngineError> {
        let pronunciations = match &config.pronunciation_path {
            Some(path) => PronouncingDictionary::load(path)?,
            None => default_pronunciations(),
        };

        let loaded = config.snapshot_path.as_deref().and_then(|path| {
            if !path.exists() {
                info!("No snapshot at {}; building from corpus", path.display());
                return None;
            }
            let snapshot = match Snapshot::load(path) {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    warn!("Failed to load snapshot {}: {e}; rebuilding from corpus", path.display());
                    return None;
                }
            };
            let kb = KnowledgeBase::from_snapshot(snapshot, pronunciations.clone());
            match check_usable(&kb) {
                Ok(()) => Some(kb),
                Err(e) => {
                    warn!("Snapshot {} is unusable ({e}); rebuilding from corpus", path.display());
                    None
                }
            }
        });

        let kb = match loaded {
            Some(kb) => kb,
            None => {
                let corpus = match &config.corpus_path {
                    Some(path) => Corpus::load(path)?,
                    None => default_corpus(),
                };
                let kb = KnowledgeBase::build(&corpus, pronunciations);
                if config.save_snapshot {
                    if let Some(path) = &config.snapshot_path {
                        if let Err(e) = kb.to_snapshot().save(path) {
                            warn!("Failed to save snapshot {}: {e}", path.display());
                        }
                    }
                }
                kb
            }
        };

        let rng = config.seed.map_or_else(KigoRng::from_clock, KigoRng::new);
        Self::from_knowledge(kb, config.composer.clone(), rng)
    }

    /// Wrap an already-built knowledge base.
    pub fn from_knowledge(
        kb: KnowledgeBase,
        params: ComposerParams,
        rng: KigoRng,
    ) -> Result<Self, EngineError> {
        check_usable(&kb)?;
        info!(
            "Engine ready: {} words, {} themes",
            kb.len(),
            kb.themes().len()
        );
        Ok(Engine {
            kb: RwLock::new(kb),
            rng: Mutex::new(rng),
            params,
        })
    }

    fn read_kb(&self) -> RwLockReadGuard<'_, KnowledgeBase> {
        self.kb.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_kb(&self) -> RwLockWriteGuard<'_, KnowledgeBase> {
        self.kb.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_rng(&self) -> MutexGuard<'_, KigoRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn params(&self) -> &ComposerParams {
        &self.params
    }

    /// A generator for one request, seeded from the engine's PRNG. The
    /// engine lock is released before any generation work starts.
    fn request_rng(&self) -> KigoRng {
        KigoRng::new(self.lock_rng().next_u64())
    }

    /// Generate one haiku with a generator seeded from the engine's PRNG.
    pub fn generate(&self, request: &HaikuRequest) -> Result<Haiku, EngineError> {
        self.generate_with(request, &mut self.request_rng())
    }

    /// Generate one haiku with a caller-supplied PRNG.
    pub fn generate_with(
        &self,
        request: &HaikuRequest,
        rng: &mut KigoRng,
    ) -> Result<Haiku, EngineError> {
        let kb = self.read_kb();
        generate_haiku(&kb, request, &self.params, rng)
    }

    /// Generate `count` haikus (`1..=MAX_BATCH`) for the same request.
    pub fn generate_many(
        &self,
        request: &HaikuRequest,
        count: usize,
    ) -> Result<Vec<Haiku>, EngineError> {
        if !(1..=MAX_BATCH).contains(&count) {
            return Err(EngineError::InvalidCount {
                count,
                max: MAX_BATCH,
            });
        }
        let mut rng = self.request_rng();
        (0..count)
            .map(|_| self.generate_with(request, &mut rng))
            .collect()
    }

    /// Theme category names, sorted.
    pub fn list_themes(&self) -> Vec<String> {
        self.read_kb().theme_names()
    }

    /// Add or overwrite a word's syllable count. False on invalid input.
    pub fn add_word(&self, word: &str, syllables: i64) -> bool {
        let added = self.write_kb().add_word(word, syllables);
        if added {
            debug!("Added word {word:?} with {syllables} syllables");
        } else {
            debug!("Rejected word {word:?} with {syllables} syllables");
        }
        added
    }

    pub fn count_syllables(&self, word: &str) -> u32 {
        self.read_kb().count_syllables(word)
    }

    pub fn extract_theme_words(&self, prompt: &str) -> ThemeSeeds {
        let mut rng = self.request_rng();
        let kb = self.read_kb();
        extract_theme_words(&kb, prompt, &self.params, &mut rng)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.read_kb().len()
    }

    /// Persist the current tables.
    pub fn save_snapshot(&self, path: &Path) -> Result<(), EngineError> {
        let snapshot = self.read_kb().to_snapshot();
        snapshot.save(path)?;
        Ok(())
    }
}

/// Reject knowledge bases the composer cannot always fill a line from.
fn check_usable(kb: &KnowledgeBase) -> Result<(), EngineError> {
    if kb.is_empty() {
        return Err(EngineError::EmptyVocabulary);
    }
    if kb.words_with_syllables(1).is_empty() {
        return Err(EngineError::NoMonosyllables);
    }
    Ok(())
}

/// Build-once holder for a shared `Engine`.
#[derive(Debug, Default)]
pub struct EngineCell {
    engine: Mutex<Option<Arc<Engine>>>,
}

impl EngineCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// The engine, building it on first use. Concurrent first callers wait
    /// for a single build.
    pub fn get_or_build(&self, config: &EngineConfig) -> Result<Arc<Engine>, EngineError> {
        let mut slot = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(engine) = slot.as_ref() {
            return Ok(Arc::clone(engine));
        }
        let engine = Arc::new(Engine::build_or_load(config)?);
        *slot = Some(Arc::clone(&engine));
        Ok(engine)
    }

    /// The engine if it has been built.
    pub fn get(&self) -> Option<Arc<Engine>> {
        self.engine
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
