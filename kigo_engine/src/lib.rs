// Kigo haiku line-generation engine.
//
// Turns a prompt or a theme selector into a 5-7-5 haiku, drawing words from
// the knowledge base in `kigo_lexicon`. Every line is exact: the composer
// falls through three tiers (greedy associative walk, uniform sampling over
// exact-length pool sequences, emergency fill) until the syllable target is
// met.
//
// Architecture:
// - `extract.rs`: prompt tokenization and theme/seed extraction
// - `walk.rs`: breadth-limited walk over the association graph
// - `pool.rs`: per-line candidate pool and the counting DP sampler
// - `compose.rs`: `Line` and the three-tier `generate_line`
// - `haiku.rs`: `HaikuRequest`, `Haiku`, `HaikuRecord`, `generate_haiku`
// - `engine.rs`: `Engine` facade (shared knowledge base + PRNG), `EngineCell`
// - `config.rs`: `EngineConfig` and `ComposerParams`
// - `error.rs`: `EngineError`
// - `cli.rs`: clap definitions for the `kigo` binary (`main.rs`)
//
// All randomness flows through an explicit `&mut KigoRng`. Given the same
// knowledge base, request and seed, generation is fully reproducible.

pub mod cli;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod haiku;
pub mod pool;
pub mod walk;

pub use compose::Line;
pub use config::{ComposerParams, EngineConfig};
pub use engine::{Engine, EngineCell, MAX_BATCH};
pub use error::EngineError;
pub use extract::ThemeSeeds;
pub use haiku::{HAIKU_PATTERN, Haiku, HaikuRecord, HaikuRequest};
