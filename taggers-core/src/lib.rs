//! Rule-based sequence annotation over pre-analyzed sentences.
//!
//! The input is a sentence that an upstream NLP pipeline has already
//! tokenized, POS tagged, chunk tagged and lemmatized. A pipeline of
//! taggers runs over it in order; each tagger marks token spans with named
//! [`Type`] annotations and sees the annotations produced by the taggers
//! before it. Rules load from TOML files through a [`TaggerRegistry`].
//!
//! ```
//! use taggers_core::tag::{KeywordTagger, Tagger};
//! use taggers_core::Token;
//!
//! let tagger = KeywordTagger::new("CITY", vec!["New York".to_string()]);
//! let sentence = vec![
//!     Token::new("New", "new", "NNP", "B-NP", 0),
//!     Token::new("York", "york", "NNP", "I-NP", 4),
//! ];
//! let tags = tagger.tags(&sentence, &[]);
//! assert_eq!(tags[0].to_string(), "CITY{[0, 2):New York}");
//! ```

pub mod after;
pub mod collection;
pub mod constraint;
pub mod error;
pub mod interval;
pub mod pattern;
pub mod registry;
pub mod tag;
pub mod token;
pub mod types;

pub use collection::TaggerCollection;
pub use error::{ConfigError, LoadError};
pub use interval::Interval;
pub use registry::{RuleSpec, TaggerRegistry};
pub use tag::{filter_covered, Tagger};
pub use token::Token;
pub use types::Type;
