//! ithkuil CLI: parse and generate words, check their consonant clusters.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ithkuil_core::language::validate_word;
use ithkuil_core::{CodecConfig, Word};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "ithkuil",
    about = "Morphological parser and generator for formatives and referentials",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse words into glosses or JSON records
    Parse(ParseArgs),
    /// Generate a word from a JSON record
    Generate(GenerateArgs),
    /// Run the phonotactic validator over words
    Check(CheckArgs),
}

// ─── Shared arguments (embedded in parse and generate) ───────────

#[derive(Parser, Debug)]
struct SharedArgs {
    /// JSON codec config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct ParseArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Words to parse
    words: Vec<String>,

    /// Read words from a file, one per line
    #[arg(long)]
    file: Option<PathBuf>,

    /// Print each parse as a JSON record
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Reject an explicit accent on a monosyllable
    #[arg(long, default_value_t = false)]
    strict_stress: bool,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// JSON file holding one record or an array of records
    record: Option<PathBuf>,

    /// Record JSON given on the command line
    #[arg(long, conflicts_with = "record")]
    inline: Option<String>,

    /// Never use Ca-shortcut spellings
    #[arg(long, default_value_t = false)]
    no_shortcuts: bool,

    /// Fail on illegal consonant clusters
    #[arg(long, default_value_t = false)]
    validate: bool,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Words to check
    #[arg(required = true)]
    words: Vec<String>,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = match &cli.command {
        Command::Parse(a) if a.shared.verbose => "debug",
        Command::Generate(a) if a.shared.verbose => "debug",
        Command::Check(a) if a.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
    ithkuil_core::grammar::preload();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Generate(args) => run_generate(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

fn load_config(shared: &SharedArgs) -> Result<CodecConfig> {
    match &shared.config {
        Some(path) => CodecConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CodecConfig::default()),
    }
}

/// Words from the command line followed by those in `file`.
fn collect_words(words: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut all = words.to_vec();
    if let Some(path) = file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        all.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }
    if all.is_empty() {
        bail!("No words given");
    }
    Ok(all)
}

/// Accept a single record or an array of records.
fn read_records(json: &str) -> Result<Vec<Word>> {
    let value: serde_json::Value = serde_json::from_str(json).context("Invalid record JSON")?;
    let records = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|w| vec![w])
    };
    records.context("JSON is not a word record")
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_parse(args: ParseArgs) -> Result<()> {
    let mut config = load_config(&args.shared)?;
    config.strict_stress |= args.strict_stress;
    let words = collect_words(&args.words, args.file.as_deref())?;

    let mut failures = 0;
    for text in &words {
        match ithkuil_core::parse_with(text, &config) {
            Ok(word) if args.json => println!("{}", serde_json::to_string(&word)?),
            Ok(word) => println!("{}\t{}", text, word.gloss()),
            Err(e) => {
                log::warn!("{}: {}", text, e);
                failures += 1;
            }
        }
    }
    log::info!("Parsed {} of {} word(s)", words.len() - failures, words.len());
    if failures > 0 {
        bail!("{} word(s) failed to parse", failures);
    }
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = load_config(&args.shared)?;
    if args.no_shortcuts {
        config.prefer_shortcuts = false;
    }
    config.validate_phonotactics |= args.validate;

    let json = match (&args.inline, &args.record) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, None) => bail!("Give a record file or --inline JSON"),
    };

    for record in read_records(&json)? {
        let word = ithkuil_core::generate_with(&record, &config)
            .with_context(|| format!("Cannot generate {}", record.gloss()))?;
        println!("{}", word);
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let mut failures = 0;
    for text in &args.words {
        let normalized = ithkuil_core::language::normalize(text);
        match validate_word(&normalized) {
            Ok(()) => println!("{}\tok", text),
            Err(e) => {
                println!("{}\t{}", text, e);
                failures += 1;
            }
        }
    }
    if failures > 0 {
        bail!("{} of {} word(s) have illegal clusters", failures, args.words.len());
    }
    Ok(())
}
