//! Exact keyword matching
//!
//! A keyword is a whitespace-separated word sequence matched against a
//! projection of the sentence (surface, lowercased surface, or lemma).
//! Matches can optionally be snapped to the base-NP chunk that contains
//! them, or kept only when they end on a chunk's headword.

use crate::after;
use crate::constraint::Constraint;
use crate::interval::Interval;
use crate::token::{self, Token};
use crate::types::Type;
use serde::Deserialize;

use super::Tagger;

/// Which view of the sentence the keywords are compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    /// Surface strings, case-sensitive
    #[default]
    Exact,
    /// Lowercased surface strings; keywords are lowercased too
    Lowercase,
    /// Lowercased lemmas; keywords are lowercased too
    Lemma,
}

/// How a raw keyword match is adjusted after it is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Snap {
    /// Keep the matched span as is
    #[default]
    None,
    /// Widen the match to every containing base-NP chunk
    Chunk,
    /// Keep the match only if it ends on a chunk headword, widened to the
    /// chunk
    Headword,
}

/// Tags every occurrence of any of a set of keywords.
#[derive(Debug)]
pub struct KeywordTagger {
    descriptor: String,
    source: Option<String>,
    constraints: Vec<Box<dyn Constraint>>,
    projection: Projection,
    snap: Snap,
    // each keyword split into words; kept sorted and deduplicated
    keywords: Vec<Vec<String>>,
}

impl KeywordTagger {
    pub fn new(descriptor: impl Into<String>, keywords: impl IntoIterator<Item = String>) -> Self {
        let mut split: Vec<Vec<String>> = keywords
            .into_iter()
            .map(|k| k.split_whitespace().map(str::to_string).collect())
            .filter(|words: &Vec<String>| !words.is_empty())
            .collect();
        split.sort();
        split.dedup();

        Self {
            descriptor: descriptor.into(),
            source: None,
            constraints: Vec::new(),
            projection: Projection::default(),
            snap: Snap::default(),
            keywords: split,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_snap(mut self, snap: Snap) -> Self {
        self.snap = snap;
        self
    }

    /// The keywords, space-joined, in canonical order.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.join(" ")).collect()
    }

    fn project_sentence(&self, sentence: &[Token]) -> Vec<String> {
        match self.projection {
            Projection::Exact => token::strings(sentence),
            Projection::Lowercase => token::lowercased(sentence),
            Projection::Lemma => token::lemmas(sentence),
        }
    }

    fn project_word<'w>(&self, word: &'w str) -> std::borrow::Cow<'w, str> {
        match self.projection {
            Projection::Exact => std::borrow::Cow::Borrowed(word),
            Projection::Lowercase | Projection::Lemma => {
                std::borrow::Cow::Owned(word.to_lowercase())
            }
        }
    }
}

impl Tagger for KeywordTagger {
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
        let projected = self.project_sentence(sentence);
        let mut tags = Vec::new();

        for keyword in &self.keywords {
            let k = keyword.len();
            if k > projected.len() {
                continue;
            }
            for i in 0..=projected.len() - k {
                let matched = keyword
                    .iter()
                    .zip(&projected[i..i + k])
                    .all(|(word, token)| self.project_word(word) == token.as_str());
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

        match self.snap {
            Snap::None => tags,
            Snap::Chunk => after::tag_chunks(tags, sentence),
            Snap::Headword => after::tag_headwords(tags, sentence),
        }
    }
}
