//! Token-pattern rules
//!
//! The most expressive tagger: a pattern is a regular expression over
//! tokens, where each `<…>` element is a logic expression over one token's
//! attributes. Patterns can also see the annotations accumulated by
//! earlier pipeline stages through the `type`, `typeStart` and `typeEnd`
//! attributes, which is what lets rule sets build on each other.

use crate::constraint::Constraint;
use crate::error::{ConfigError, ConfigResult};
use crate::interval::Interval;
use crate::pattern::expr::TokenRegex;
use crate::pattern::{PatternError, Pred};
use crate::token::Token;
use crate::types::Type;
use regex::Regex;
use std::collections::BTreeMap;

use super::Tagger;

/// A token paired with the annotations that touch its position.
#[derive(Debug, Clone)]
pub struct TypedToken {
    token: Token,
    types: Vec<Type>,
    types_beginning: Vec<Type>,
    types_ending: Vec<Type>,
}

impl TypedToken {
    /// The underlying token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Annotations whose interval covers this token's position.
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Annotations that begin at this token.
    pub fn types_beginning(&self) -> &[Type] {
        &self.types_beginning
    }

    /// Annotations that end at this token.
    pub fn types_ending(&self) -> &[Type] {
        &self.types_ending
    }
}

/// Pair every token with the annotations touching its position.
pub fn typed_tokens(sentence: &[Token], types: &[Type]) -> Vec<TypedToken> {
    sentence
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let position = Interval::open(i, i + 1);
            let mut touching = Vec::new();
            let mut beginning = Vec::new();
            let mut ending = Vec::new();
            for t in types {
                if t.interval().intersects(&position) {
                    touching.push(t.clone());
                    if t.interval().start() == i {
                        beginning.push(t.clone());
                    }
                    if t.interval().end() == i + 1 {
                        ending.push(t.clone());
                    }
                }
            }
            TypedToken {
                token: token.clone(),
                types: touching,
                types_beginning: beginning,
                types_ending: ending,
            }
        })
        .collect()
}

/// Tags matches of token-sequence patterns.
///
/// A pattern with no capturing group tags the whole match; a pattern with
/// exactly one capturing group tags that group. More than one capturing
/// group is rejected when the tagger is built.
#[derive(Debug)]
pub struct PatternTagger {
    descriptor: String,
    source: Option<String>,
    constraints: Vec<Box<dyn Constraint>>,
    patterns: Vec<TokenRegex<TypedToken>>,
}

impl PatternTagger {
    /// Compile the patterns eagerly, after substituting `${name}`
    /// variables into the pattern text.
    pub fn new(
        descriptor: impl Into<String>,
        patterns: impl IntoIterator<Item = String>,
        variables: &BTreeMap<String, String>,
    ) -> ConfigResult<Self> {
        let descriptor = descriptor.into();
        let factory = atom_factory(descriptor.clone());

        let mut compiled = Vec::new();
        for pattern in patterns {
            let mut expression = pattern;
            for (name, value) in variables {
                expression = expression.replace(&format!("${{{name}}}"), value);
            }

            let regex = TokenRegex::compile(&expression, &factory)
                .map_err(|e| e.into_config(&descriptor, &expression))?;
            if regex.capture_count() > 1 {
                return Err(ConfigError::TooManyGroups {
                    descriptor,
                    pattern: expression,
                    count: regex.capture_count(),
                });
            }
            compiled.push(regex);
        }

        Ok(Self {
            descriptor,
            source: None,
            constraints: Vec::new(),
            patterns: compiled,
        })
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Tagger for PatternTagger {
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
        self.find_tags_with_types(sentence, &[])
    }

    fn find_tags_with_types(&self, sentence: &[Token], types: &[Type]) -> Vec<Type> {
        let typed = typed_tokens(sentence, types);
        let mut tags = Vec::new();

        for pattern in &self.patterns {
            for m in pattern.find_all(&typed) {
                let interval = if pattern.capture_count() == 1 {
                    match m.group(1) {
                        Some((start, end)) if end > start => Interval::open(start, end),
                        // the group sat inside an unmatched optional part
                        _ => continue,
                    }
                } else {
                    let (start, end) = m.span();
                    Interval::open(start, end)
                };
                tags.push(Type::from_sentence(
                    sentence,
                    &self.descriptor,
                    self.source.clone(),
                    None,
                    interval,
                ));
            }
        }

        tags
    }
}

/// Build the attribute vocabulary for pattern atoms.
///
/// An atom is `key="value"` (or single-quoted). The value is a regular
/// expression that must match the attribute's whole text; every key except
/// `stringCS` matches case-insensitively. Keys themselves are
/// case-insensitive.
fn atom_factory(
    descriptor: String,
) -> impl Fn(&str) -> Result<Pred<TypedToken>, PatternError> {
    move |atom: &str| {
        let (key, raw) = atom.split_once('=').ok_or_else(|| {
            PatternError::Syntax(format!("expected key=\"value\", found '{atom}'"))
        })?;
        let key = key.trim();
        let value = unquote(raw.trim()).ok_or_else(|| {
            PatternError::Syntax(format!("value not enclosed in quotes: '{atom}'"))
        })?;

        let case_sensitive = key.eq_ignore_ascii_case("stringCS");
        let anchored = if case_sensitive {
            format!("^(?:{value})$")
        } else {
            format!("(?i)^(?:{value})$")
        };
        let regex = Regex::new(&anchored).map_err(|source| {
            PatternError::Atom(ConfigError::InvalidRegex {
                descriptor: descriptor.clone(),
                pattern: value.to_string(),
                source,
            })
        })?;

        let pred: Pred<TypedToken> = match key.to_ascii_lowercase().as_str() {
            "string" | "stringcs" => Box::new(move |t| regex.is_match(&t.token.string)),
            "lemma" => Box::new(move |t| regex.is_match(&t.token.lemma)),
            "pos" => Box::new(move |t| regex.is_match(&t.token.postag)),
            "chunk" => Box::new(move |t| regex.is_match(&t.token.chunk)),
            "type" => Box::new(move |t| any_descriptor(&t.types, &regex)),
            "typestart" => Box::new(move |t| any_descriptor(&t.types_beginning, &regex)),
            "typeend" => Box::new(move |t| any_descriptor(&t.types_ending, &regex)),
            _ => {
                return Err(PatternError::Atom(ConfigError::UnknownAttribute {
                    descriptor: descriptor.clone(),
                    key: key.to_string(),
                }))
            }
        };
        Ok(pred)
    }
}

fn any_descriptor(types: &[Type], regex: &Regex) -> bool {
    types.iter().any(|t| regex.is_match(t.descriptor()))
}

fn unquote(raw: &str) -> Option<&str> {
    let mut chars = raw.chars();
    let first = chars.next()?;
    if (first == '"' || first == '\'') && raw.len() >= 2 && raw.ends_with(first) {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}
