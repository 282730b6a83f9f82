//! Constraints veto candidate annotations
//!
//! A constraint is a named, stateless predicate over the tokens a candidate
//! spans. A tagger evaluates its configured constraints against every
//! candidate that survived overlap resolution; the candidate is kept only
//! if all of them accept it.

use crate::error::{ConfigError, ConfigResult};
use crate::token::Token;
use crate::types::Type;
use std::fmt;

/// A predicate deciding whether a candidate annotation is admitted.
///
/// Implementations must be total over any token slice: no panics, no
/// partial failure. They hold no per-sentence state and may be shared
/// across threads.
pub trait Constraint: fmt::Debug + Send + Sync {
    /// The registry name of this constraint.
    fn name(&self) -> &'static str;

    /// Evaluate against the token subsequence spanned by the candidate.
    fn check(&self, tokens: &[Token], tag: &Type) -> bool;
}

/// Resolve a constraint by registry name.
///
/// Unknown names are a configuration error, never a runtime lookup
/// failure. `descriptor` identifies the offending rule in the error.
pub fn create(name: &str, descriptor: &str) -> ConfigResult<Box<dyn Constraint>> {
    match name {
        "CommonNoun" => Ok(Box::new(CommonNoun)),
        "NounPhrase" => Ok(Box::new(NounPhrase)),
        "VerbPhrase" => Ok(Box::new(VerbPhrase)),
        _ => Err(ConfigError::UnknownConstraint {
            descriptor: descriptor.to_string(),
            name: name.to_string(),
        }),
    }
}

/// Every token in the span must carry a common-noun POS tag (`NN` or
/// `NNS`, case-insensitive).
#[derive(Debug, Clone, Copy)]
pub struct CommonNoun;

impl Constraint for CommonNoun {
    fn name(&self) -> &'static str {
        "CommonNoun"
    }

    fn check(&self, tokens: &[Token], _tag: &Type) -> bool {
        tokens.iter().all(|t| is_common_noun(&t.postag))
    }
}

fn is_common_noun(postag: &str) -> bool {
    // full match against NNS?, ignoring case
    matches!(postag.to_ascii_uppercase().as_str(), "NN" | "NNS")
}

/// Every token's chunk tag must end with `NP`.
#[derive(Debug, Clone, Copy)]
pub struct NounPhrase;

impl Constraint for NounPhrase {
    fn name(&self) -> &'static str {
        "NounPhrase"
    }

    fn check(&self, tokens: &[Token], _tag: &Type) -> bool {
        tokens.iter().all(|t| t.chunk.ends_with("NP"))
    }
}

/// At least one token's chunk tag must end with `VP` and none may end
/// with `NP`.
#[derive(Debug, Clone, Copy)]
pub struct VerbPhrase;

impl Constraint for VerbPhrase {
    fn name(&self) -> &'static str {
        "VerbPhrase"
    }

    fn check(&self, tokens: &[Token], _tag: &Type) -> bool {
        let mut saw_vp = false;
        for token in tokens {
            if token.chunk.ends_with("NP") {
                return false;
            }
            if token.chunk.ends_with("VP") {
                saw_vp = true;
            }
        }
        saw_vp
    }
}
