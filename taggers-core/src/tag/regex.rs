//! Per-token regular expression matching
//!
//! An expression is a whitespace-separated sequence of regular
//! expressions, one per token, each of which must match a token's whole
//! surface string.

use crate::constraint::Constraint;
use crate::error::{ConfigError, ConfigResult};
use crate::interval::Interval;
use crate::token::Token;
use crate::types::Type;
use regex::Regex;

use super::Tagger;

/// Tags token runs where each token matches its positional regex.
#[derive(Debug)]
pub struct RegexTagger {
    descriptor: String,
    source: Option<String>,
    constraints: Vec<Box<dyn Constraint>>,
    // outer: configured expressions in order; inner: one regex per token
    expressions: Vec<Vec<Regex>>,
}

impl RegexTagger {
    /// Compile the expressions eagerly; a malformed regex fails the whole
    /// tagger.
    pub fn new(
        descriptor: impl Into<String>,
        expressions: impl IntoIterator<Item = String>,
    ) -> ConfigResult<Self> {
        let descriptor = descriptor.into();
        let mut compiled = Vec::new();
        for expression in expressions {
            let mut sequence = Vec::new();
            for part in expression.split_whitespace() {
                // anchor so the part must cover the whole token
                let regex = Regex::new(&format!("^(?:{part})$")).map_err(|source| {
                    ConfigError::InvalidRegex {
                        descriptor: descriptor.clone(),
                        pattern: part.to_string(),
                        source,
                    }
                })?;
                sequence.push(regex);
            }
            if !sequence.is_empty() {
                compiled.push(sequence);
            }
        }

        Ok(Self {
            descriptor,
            source: None,
            constraints: Vec::new(),
            expressions: compiled,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Tagger for RegexTagger {
    fn descriptor(&self) -> &str {
        &self.descriptor
    }

    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    fn constrain(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    fn find_tags(&self, sentence: &[Token]) -> Vec<Type> {
        let mut tags = Vec::new();
        for sequence in &self.expressions {
            let k = sequence.len();
            if k > sentence.len() {
                continue;
            }
            for i in 0..=sentence.len() - k {
                let matched = sequence
                    .iter()
                    .zip(&sentence[i..i + k])
                    .all(|(regex, token)| regex.is_match(&token.string));
                if matched {
                    tags.push(Type::from_sentence(
                        sentence,
                        &self.descriptor,
                        self.source.clone(),
                        None,
                        Interval::open(i, i + k),
                    ));
                }
            }
        }
        tags
    }
}
