//! Layered error types
//!
//! Configuration problems are detected eagerly while a tagger or rule set
//! is being built and are fatal to that load; the matching path itself is
//! total and never returns an error.

use std::path::PathBuf;
use thiserror::Error;

/// Rule-construction failures, reported at tagger build time.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required rule field was absent
    #[error("rule '{descriptor}': missing required field '{field}'")]
    MissingField {
        /// The rule's descriptor, or `?` when the descriptor itself is missing
        descriptor: String,
        /// The missing field name
        field: String,
    },

    /// The rule named a tagger kind the registry does not know
    #[error("rule '{descriptor}': unknown tagger kind '{kind}'")]
    UnknownTaggerKind { descriptor: String, kind: String },

    /// The rule named a constraint the registry does not know
    #[error("rule '{descriptor}': unknown constraint '{name}'")]
    UnknownConstraint { descriptor: String, name: String },

    /// A token-pattern expression failed to parse
    #[error("rule '{descriptor}': invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        descriptor: String,
        pattern: String,
        reason: String,
    },

    /// A pattern defined more than one capturing group
    #[error("rule '{descriptor}': pattern '{pattern}' must have at most one capturing group, found {count}")]
    TooManyGroups {
        descriptor: String,
        pattern: String,
        count: usize,
    },

    /// A per-token regular expression failed to compile
    #[error("rule '{descriptor}': invalid regex '{pattern}': {source}")]
    InvalidRegex {
        descriptor: String,
        pattern: String,
        source: regex::Error,
    },

    /// A logic-expression atom used an unrecognized attribute key
    #[error("rule '{descriptor}': unknown attribute key '{key}'")]
    UnknownAttribute { descriptor: String, key: String },

    /// A field held a value outside its closed vocabulary
    #[error("rule '{descriptor}': invalid value '{value}' for field '{field}'")]
    InvalidField {
        descriptor: String,
        field: String,
        value: String,
    },
}

/// Rule-set loading failures: I/O plus file-level parse errors. A rule set
/// either loads completely or the whole load fails.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The rule file or directory could not be read
    #[error("cannot read rule path {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The rule file was not valid TOML
    #[error("cannot parse rule file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A rule inside the file failed to build
    #[error("in rule file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        source: ConfigError,
    },
}

/// Result type for tagger construction.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type for rule-set loading.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
