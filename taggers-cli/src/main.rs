//! Tag pre-analyzed sentences from stdin with a rule-file pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use taggers_cli::input::parse_sentence;
use taggers_cli::output::{render, OutputFormat};
use taggers_core::{TaggerCollection, TaggerRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "taggers",
    version,
    about = "Annotate pre-tagged sentences with rule-based taggers"
)]
struct Cli {
    /// Rule file or directory of rule files
    #[arg(value_name = "RULES")]
    rules: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn execute(&self) -> Result<()> {
        self.init_logging();

        let registry = TaggerRegistry::builtin();
        let collection = TaggerCollection::from_path(&self.rules, &registry)
            .with_context(|| format!("failed to load rules from {}", self.rules.display()))?;
        log::info!("loaded {} taggers", collection.len());

        let stdin = io::stdin().lock();
        let mut stdout = io::stdout().lock();
        for line in stdin.lines() {
            let line = line.context("failed to read input line")?;
            if line.trim().is_empty() {
                continue;
            }

            let sentence = parse_sentence(&line)?;
            let tags = collection.tag(&sentence);
            log::debug!("found {} tags", tags.len());
            writeln!(stdout, "{}", render(self.format, &sentence, &tags)?)?;
        }

        Ok(())
    }

    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }
}

fn main() -> Result<()> {
    Cli::parse().execute()
}
