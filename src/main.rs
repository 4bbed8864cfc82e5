// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, LevelFilter, Log, Metadata, Record, SetLoggerError};

use bicorpus::app_config::{Config, LogLevel};
use bicorpus::corpus::classify;
use bicorpus::{ExtractionPipeline, ExtractionResult, MergeEngine};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a validated bilingual corpus from a UTF-8 text file
    Extract {
        /// Input text file to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Where to write the result JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Merge new extraction results into an accumulated corpus
    Merge {
        /// The accumulated result JSON file
        #[arg(value_name = "ACCUMULATED")]
        accumulated: PathBuf,

        /// Newly extracted result JSON files, in batch order
        #[arg(value_name = "NEW", required = true)]
        new_results: Vec<PathBuf>,

        /// Where to write the merged JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Partition an extraction result into sentence and word pairs
    Classify {
        /// The result JSON file to classify
        #[arg(value_name = "RESULT")]
        result_path: PathBuf,
    },

    /// Generate shell completions for bicorpus
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// bicorpus - bilingual corpus extraction pipeline
///
/// Extracts line-aligned English/Chinese study content from transcribed text
/// using an OpenAI-compatible model service, validates it, and incrementally
/// merges batches into one corpus.
#[derive(Parser, Debug)]
#[command(name = "bicorpus")]
#[command(version)]
#[command(about = "Bilingual corpus extraction and merge tool")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Minimal stderr logger for the CLI
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

fn read_result_file(path: &PathBuf) -> Result<ExtractionResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read result file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse result file {}", path.display()))
}

fn write_output(output: Option<PathBuf>, result: &ExtractionResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Result written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "bicorpus", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::from_file_or_default(&cli.config_path)?;
    let level = cli
        .log_level
        .map(LogLevel::from)
        .unwrap_or(config.log_level);
    init_logging(level.to_level_filter())?;

    match cli.command {
        Commands::Extract { input_path, output } => {
            let source_text = fs::read_to_string(&input_path)
                .with_context(|| format!("Failed to read {}", input_path.display()))?;

            info!(
                "Extracting from {} via {} ({})",
                input_path.display(),
                config.provider.display_name(),
                config.model
            );

            let client = config.client();
            let pipeline = ExtractionPipeline::new(&client);
            let result = pipeline.extract(&source_text).await?;

            info!("Accepted {} aligned lines", result.line_count());
            write_output(output, &result)?;
        }

        Commands::Merge {
            accumulated,
            new_results,
            output,
        } => {
            let existing = read_result_file(&accumulated)?;
            let batches = new_results
                .iter()
                .map(read_result_file)
                .collect::<Result<Vec<_>>>()?;

            info!(
                "Merging {} new batch(es) into {}",
                batches.len(),
                accumulated.display()
            );

            let client = config.client();
            let engine = MergeEngine::new(&client, config.classify);
            let merged = engine.merge(&existing, &batches).await?;

            info!("Merged corpus has {} aligned lines", merged.line_count());
            write_output(output, &merged)?;
        }

        Commands::Classify { result_path } => {
            let result = read_result_file(&result_path)?;
            let pairs = result.pairs();
            let (sentences, words) = classify::partition(&pairs, &config.classify);

            let out = serde_json::json!({
                "sentencePairs": sentences,
                "wordPairs": words,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Completions { .. } => unreachable!("handled before config load"),
    }

    Ok(())
}
