//! The `Type` annotation record
//!
//! A `Type` marks a span of tokens with a named, sourced annotation. Types
//! are immutable once created; equality and hashing consider only the
//! descriptor, source and interval, so two Types over the same span with
//! the same name are interchangeable regardless of their cached text.

use crate::interval::Interval;
use crate::token::{self, Token};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An annotation over a token interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Type {
    interval: Interval,
    descriptor: String,
    source: Option<String>,
    match_text: Option<String>,
    text: String,
}

impl Type {
    /// Create a Type with an explicit display text.
    pub fn new(
        text: impl Into<String>,
        descriptor: impl Into<String>,
        source: Option<String>,
        match_text: Option<String>,
        interval: Interval,
    ) -> Self {
        Self {
            interval,
            descriptor: descriptor.into(),
            source,
            match_text,
            text: text.into(),
        }
    }

    /// Create a Type whose display text is the sentence substring covered
    /// by `interval`, derived once and cached.
    pub fn from_sentence(
        sentence: &[Token],
        descriptor: impl Into<String>,
        source: Option<String>,
        match_text: Option<String>,
        interval: Interval,
    ) -> Self {
        let text = token::text(&sentence[interval.start()..interval.end()]);
        Self::new(text, descriptor, source, match_text, interval)
    }

    /// The tokens this annotation spans. A Type always starts and ends on
    /// token boundaries, which is what makes it usable inside later
    /// token-pattern rules.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// The name of this annotation (e.g. `CITY`).
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Where this annotation came from, if recorded.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The text of the tokens this annotation spans.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text this annotation matched, which may differ from [`text`].
    /// A rule might tag "5-year-old" as an age but keep "5" as the match.
    /// Falls back to the display text when no match text was recorded.
    ///
    /// [`text`]: Type::text
    pub fn match_text(&self) -> &str {
        self.match_text.as_deref().unwrap_or(&self.text)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
            && self.source == other.source
            && self.interval == other.interval
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
        self.source.hash(state);
        self.interval.hash(state);
    }
}

impl PartialOrd for Type {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Type {
    /// Left-to-right by interval position; annotations that overlap are
    /// ordered by descriptor, then interval, then source, so `Equal`
    /// coincides with equality.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.interval != other.interval {
            if self.interval.left_of(&other.interval) {
                return Ordering::Less;
            }
            if self.interval.right_of(&other.interval) {
                return Ordering::Greater;
            }
        }
        self.descriptor
            .cmp(&other.descriptor)
            .then_with(|| self.interval.cmp(&other.interval))
            .then_with(|| self.source.cmp(&other.source))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{{}:{}}}", self.descriptor, self.interval, self.text)
    }
}
