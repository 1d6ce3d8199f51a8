// Kigo haiku generator: CLI entry point.
//
// Loads (or builds and saves) the knowledge base snapshot, applies any
// `--add-word` entries, then either lists themes, generates from a prompt or
// theme, or runs an interactive prompt loop.
//
// Usage:
//   kigo [-p PROMPT | -t THEME] [-n COUNT] [-d haiku_data.json] [-c kigo.json]
//        [--seed N] [--json] [--add-word WORD=N ...] [--list-themes] [-i]
//
// Logging goes through env_logger; set RUST_LOG=debug to see which
// composition tier produced each line.

use clap::Parser;
use eyre::{Result, WrapErr};
use kigo_engine::cli::Cli;
use kigo_engine::{Engine, EngineConfig, Haiku, HaikuRequest};
use log::{info, warn};
use std::io::{self, BufRead, Write};

const SEPARATOR_WIDTH: usize = 20;

fn setup_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    cli.apply_to(&mut config);

    let engine = Engine::build_or_load(&config).wrap_err("Failed to initialize haiku engine")?;

    if !cli.add_words.is_empty() {
        for (word, syllables) in &cli.add_words {
            if engine.add_word(word, *syllables) {
                info!("Added {word:?} ({syllables} syllables)");
            } else {
                warn!("Ignored {word:?}: syllable count must be positive and the word a single token");
            }
        }
        if let Some(path) = &config.snapshot_path {
            engine
                .save_snapshot(path)
                .wrap_err_with(|| format!("Failed to save snapshot {}", path.display()))?;
        }
    }

    if cli.list_themes {
        for theme in engine.list_themes() {
            println!("{theme}");
        }
        return Ok(());
    }

    if cli.interactive {
        return interactive(&engine, cli.json);
    }

    if cli.prompt.is_some() || cli.theme.is_some() || cli.add_words.is_empty() {
        let request = HaikuRequest::from_parts(cli.prompt.as_deref(), cli.theme.as_deref());
        let haikus = engine
            .generate_many(&request, cli.count)
            .wrap_err("Failed to generate haiku")?;
        print_haikus(&haikus, cli.json)?;
    }

    Ok(())
}

fn interactive(engine: &Engine, json: bool) -> Result<()> {
    println!("Enter a prompt (or 'quit' to exit).");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let prompt = line.wrap_err("Failed to read prompt")?;
        let prompt = prompt.trim();
        if matches!(prompt.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        let haiku = engine.generate(&HaikuRequest::Prompt(prompt.to_string()))?;
        print_haikus(std::slice::from_ref(&haiku), json)?;
    }
    Ok(())
}

fn print_haikus(haikus: &[Haiku], json: bool) -> Result<()> {
    if json {
        let records: Vec<_> = haikus.iter().map(Haiku::to_record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }
    for haiku in haikus {
        println!();
        println!("{haiku}");
        if let Some(theme) = &haiku.theme {
            println!("({theme})");
        }
        println!("{}", "-".repeat(SEPARATOR_WIDTH));
    }
    Ok(())
}
