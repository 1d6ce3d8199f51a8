// CLI argument parsing for the `kigo` binary.
//
// Flags override fields of a loaded `EngineConfig` through `Cli::apply_to`;
// `--add-word` entries are parsed as `WORD=N` pairs by `parse_word_count`.

use crate::config::EngineConfig;
use clap::Parser;
use std::path::PathBuf;

/// Snapshot file used when neither the CLI nor the config names one.
pub const DEFAULT_DATASET: &str = "haiku_data.json";

#[derive(Parser, Debug)]
#[command(name = "kigo")]
#[command(version, about = "Generate 5-7-5 haiku from a prompt or a theme", long_about = None)]
pub struct Cli {
    /// Prompt to draw themes and seed words from
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Theme category to write in (see --list-themes)
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Snapshot file to load, and to write after a rebuild
    #[arg(short, long)]
    pub dataset: Option<PathBuf>,

    /// Path to engine config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read prompts from stdin until quit/exit/q
    #[arg(short, long)]
    pub interactive: bool,

    /// Number of haikus to generate (1-10)
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,

    /// Fixed PRNG seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the available theme categories and exit
    #[arg(long)]
    pub list_themes: bool,

    /// Add a word with a known syllable count, e.g. --add-word umbrella=3
    #[arg(long = "add-word", value_name = "WORD=N", value_parser = parse_word_count)]
    pub add_words: Vec<(String, i64)>,

    /// Print haikus as JSON records
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Fold CLI overrides into a loaded config. The CLI always persists its
    /// snapshot, so a rebuilt knowledge base is reused on the next run.
    pub fn apply_to(&self, config: &mut EngineConfig) {
        if let Some(dataset) = &self.dataset {
            config.snapshot_path = Some(dataset.clone());
        } else if config.snapshot_path.is_none() {
            config.snapshot_path = Some(PathBuf::from(DEFAULT_DATASET));
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.save_snapshot = true;
    }
}

/// Parse `WORD=N`.
pub fn parse_word_count(s: &str) -> Result<(String, i64), String> {
    let (word, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected WORD=N, got {s:?}"))?;
    let count = count
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid syllable count {count:?}: {e}"))?;
    Ok((word.trim().to_string(), count))
}
