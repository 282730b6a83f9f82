//! Rendering tagged sentences
//!
//! Text output echoes the sentence followed by one annotation per line.
//! JSON output emits one object per sentence with the annotations as
//! structured records.

use anyhow::Result;
use serde::Serialize;
use taggers_core::{token, Token, Type};

/// Output formats supported by the CLI.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Sentence text followed by one annotation per line
    Text,
    /// One JSON object per sentence
    Json,
}

#[derive(Serialize)]
struct TagRecord<'a> {
    descriptor: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
    start: usize,
    end: usize,
    text: &'a str,
}

#[derive(Serialize)]
struct SentenceRecord<'a> {
    text: String,
    tags: Vec<TagRecord<'a>>,
}

/// Render one tagged sentence.
pub fn render(format: OutputFormat, sentence: &[Token], tags: &[Type]) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = token::text(sentence);
            for tag in tags {
                out.push_str(&format!("\n  {tag}"));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let record = SentenceRecord {
                text: token::text(sentence),
                tags: tags
                    .iter()
                    .map(|tag| TagRecord {
                        descriptor: tag.descriptor(),
                        source: tag.source(),
                        start: tag.interval().start(),
                        end: tag.interval().end(),
                        text: tag.text(),
                    })
                    .collect(),
            };
            Ok(serde_json::to_string(&record)?)
        }
    }
}
