//! Token-pattern matching machinery
//!
//! A pattern rule is a regular expression over tokens rather than over
//! characters: each `<…>` element is a logic expression evaluated against
//! one token, and the sequence layer supplies quantifiers, alternation and
//! groups. Both layers are generic over the token type; the tagger layer
//! decides what vocabulary the atoms expose.

pub mod expr;
pub mod logic;

use crate::error::ConfigError;

/// A compiled single-token predicate.
pub type Pred<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Builds a predicate from the text of one `key="value"` atom.
///
/// The factory owns the attribute vocabulary: it decides which keys exist
/// and how their values are interpreted.
pub type AtomFactory<'f, T> = dyn Fn(&str) -> Result<Pred<T>, PatternError> + 'f;

/// Failures while compiling a pattern or logic expression.
#[derive(Debug)]
pub enum PatternError {
    /// The expression text itself was malformed
    Syntax(String),
    /// An atom was rejected by the atom factory
    Atom(ConfigError),
}

impl PatternError {
    /// Attach rule context, turning this into a configuration error.
    pub fn into_config(self, descriptor: &str, pattern: &str) -> ConfigError {
        match self {
            PatternError::Syntax(reason) => ConfigError::InvalidPattern {
                descriptor: descriptor.to_string(),
                pattern: pattern.to_string(),
                reason,
            },
            PatternError::Atom(err) => err,
        }
    }
}
