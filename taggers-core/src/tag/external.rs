//! Adapters for external entity recognizers
//!
//! A recognizer produced outside this crate (a statistical NER model, a
//! gazetteer service) can participate in a pipeline by implementing
//! [`NamedEntityRecognizer`]. The adapter wraps it as a [`Tagger`], so its
//! output flows through the same containment and constraint filtering as
//! rule-based annotations.

use crate::constraint::Constraint;
use crate::token::Token;
use crate::types::Type;
use std::fmt;

use super::Tagger;

/// An external component that finds entity annotations in a sentence.
///
/// The recognizer names its own annotations: the descriptor and source on
/// the returned [`Type`]s come from the recognizer, not from the adapter.
pub trait NamedEntityRecognizer: fmt::Debug + Send + Sync {
    fn recognize(&self, sentence: &[Token]) -> Vec<Type>;
}

/// Wraps a [`NamedEntityRecognizer`] as a pipeline stage.
#[derive(Debug)]
pub struct ExternalTagger {
    descriptor: String,
    source: Option<String>,
    constraints: Vec<Box<dyn Constraint>>,
    recognizer: Box<dyn NamedEntityRecognizer>,
}

impl ExternalTagger {
    pub fn new(descriptor: impl Into<String>, recognizer: Box<dyn NamedEntityRecognizer>) -> Self {
        Self {
            descriptor: descriptor.into(),
            source: None,
            constraints: Vec::new(),
            recognizer,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Tagger for ExternalTagger {
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
        self.recognizer.recognize(sentence)
    }
}
