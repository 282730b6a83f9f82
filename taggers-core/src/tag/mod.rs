//! Taggers find annotations in a sentence
//!
//! Every tagger shares the same outer contract: [`Tagger::tags`] produces
//! candidates, suppresses candidates strictly contained in a larger
//! candidate with the same descriptor, and then applies the tagger's
//! constraints. Implementations only supply candidate generation.

pub mod external;
pub mod keyword;
pub mod pattern;
pub mod regex;

use crate::constraint::Constraint;
use crate::token::Token;
use crate::types::Type;
use std::fmt;

pub use self::external::{ExternalTagger, NamedEntityRecognizer};
pub use self::keyword::{KeywordTagger, Projection, Snap};
pub use self::pattern::PatternTagger;
pub use self::regex::RegexTagger;

/// A rule that annotates token spans of a sentence.
pub trait Tagger: fmt::Debug + Send + Sync {
    /// The name this tagger assigns to its annotations.
    fn descriptor(&self) -> &str;

    /// The source recorded on this tagger's annotations, if any.
    fn source(&self) -> Option<&str> {
        None
    }

    /// The constraints applied to this tagger's candidates.
    fn constraints(&self) -> &[Box<dyn Constraint>];

    /// Add a constraint.
    fn constrain(&mut self, constraint: Box<dyn Constraint>);

    /// Produce raw candidates from the sentence alone.
    fn find_tags(&self, sentence: &[Token]) -> Vec<Type>;

    /// Produce raw candidates, additionally seeing the annotations
    /// accumulated by earlier pipeline stages. The default ignores them.
    fn find_tags_with_types(&self, sentence: &[Token], types: &[Type]) -> Vec<Type> {
        let _ = types;
        self.find_tags(sentence)
    }

    /// Bring any internal rule collections into canonical order.
    fn sort(&mut self) {}

    /// Find annotations: candidates, minus covered duplicates, minus
    /// candidates rejected by a constraint.
    fn tags(&self, sentence: &[Token], types: &[Type]) -> Vec<Type> {
        let candidates = self.find_tags_with_types(sentence, types);
        let kept = filter_covered(candidates);
        filter_with_constraints(sentence, self.constraints(), kept)
    }
}

/// Drop every candidate strictly contained in another candidate with the
/// same descriptor.
///
/// Only proper containment suppresses, so distinct candidates with equal
/// intervals survive together; exact duplicates (equal descriptor, source
/// and interval) collapse to one. The result does not depend on input
/// order, and applying the filter twice changes nothing.
pub fn filter_covered(tags: Vec<Type>) -> Vec<Type> {
    let covered: Vec<bool> = tags
        .iter()
        .map(|tag| {
            tags.iter().any(|other| {
                other.descriptor() == tag.descriptor()
                    && other.interval().superset(&tag.interval())
                    && other.interval() != tag.interval()
            })
        })
        .collect();

    let mut kept: Vec<Type> = Vec::new();
    for (tag, covered) in tags.into_iter().zip(covered) {
        if !covered && !kept.contains(&tag) {
            kept.push(tag);
        }
    }
    kept
}

/// Keep only the tags accepted by every constraint, each evaluated against
/// the token subsequence the tag spans.
pub fn filter_with_constraints(
    sentence: &[Token],
    constraints: &[Box<dyn Constraint>],
    tags: Vec<Type>,
) -> Vec<Type> {
    if constraints.is_empty() {
        return tags;
    }

    tags.into_iter()
        .filter(|tag| {
            let span = &sentence[tag.interval().start()..tag.interval().end()];
            constraints.iter().all(|c| c.check(span, tag))
        })
        .collect()
}
