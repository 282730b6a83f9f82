//! Rule specifications and the tagger factory registry
//!
//! A rule file deserializes into [`RuleSpec`]s; a [`TaggerRegistry`] turns
//! each spec into a boxed [`Tagger`] by looking up the spec's `kind`.
//! The built-in kinds are pre-registered; callers can register factories
//! for their own tagger implementations.

use crate::constraint;
use crate::error::{ConfigError, ConfigResult};
use crate::tag::{KeywordTagger, PatternTagger, Projection, RegexTagger, Snap, Tagger};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// One rule as written in a rule file.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    /// Registered tagger kind (`keyword`, `regex`, `pattern`, ...)
    pub kind: Option<String>,
    /// Name assigned to the annotations this rule produces
    pub descriptor: Option<String>,
    /// Optional provenance recorded on the annotations
    #[serde(default)]
    pub source: Option<String>,
    /// Registered constraint names applied to this rule's candidates
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Keyword rules: sentence view to match against
    #[serde(default)]
    pub projection: Option<Projection>,
    /// Keyword rules: chunk adjustment applied to raw matches
    #[serde(default)]
    pub snap: Option<Snap>,
    /// Keyword rules: the keywords. Regex rules: whitespace-separated
    /// per-token regex sequences.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Pattern rules: token-sequence patterns
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Pattern rules: `${name}` substitutions applied to the patterns
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

impl RuleSpec {
    fn descriptor(&self) -> ConfigResult<&str> {
        self.descriptor.as_deref().ok_or_else(|| ConfigError::MissingField {
            descriptor: "?".to_string(),
            field: "descriptor".to_string(),
        })
    }
}

/// Builds a tagger from a rule spec.
pub type TaggerFactory = Box<dyn Fn(&RuleSpec) -> ConfigResult<Box<dyn Tagger>> + Send + Sync>;

/// Maps `kind` strings to tagger factories.
pub struct TaggerRegistry {
    factories: BTreeMap<String, TaggerFactory>,
}

impl TaggerRegistry {
    /// A registry with the built-in kinds `keyword`, `regex` and
    /// `pattern`.
    pub fn builtin() -> Self {
        let mut registry = Self {
            factories: BTreeMap::new(),
        };
        registry.register("keyword", Box::new(build_keyword));
        registry.register("regex", Box::new(build_regex));
        registry.register("pattern", Box::new(build_pattern));
        registry
    }

    /// Register a factory for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: impl Into<String>, factory: TaggerFactory) {
        self.factories.insert(kind.into(), factory);
    }

    /// The registered kinds, in order.
    pub fn kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Build a tagger from `spec` and attach its constraints.
    pub fn create(&self, spec: &RuleSpec) -> ConfigResult<Box<dyn Tagger>> {
        let descriptor = spec.descriptor()?.to_string();
        let kind = spec.kind.as_deref().ok_or_else(|| ConfigError::MissingField {
            descriptor: descriptor.clone(),
            field: "kind".to_string(),
        })?;

        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ConfigError::UnknownTaggerKind {
                descriptor: descriptor.clone(),
                kind: kind.to_string(),
            })?;

        let mut tagger = factory(spec)?;
        for name in &spec.constraints {
            tagger.constrain(constraint::create(name, &descriptor)?);
        }
        Ok(tagger)
    }
}

impl Default for TaggerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for TaggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaggerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

fn build_keyword(spec: &RuleSpec) -> ConfigResult<Box<dyn Tagger>> {
    let descriptor = spec.descriptor()?;
    if spec.keywords.is_empty() {
        return Err(ConfigError::MissingField {
            descriptor: descriptor.to_string(),
            field: "keywords".to_string(),
        });
    }

    let mut tagger = KeywordTagger::new(descriptor, spec.keywords.iter().cloned())
        .with_projection(spec.projection.unwrap_or_default())
        .with_snap(spec.snap.unwrap_or_default());
    if let Some(source) = &spec.source {
        tagger = tagger.with_source(source);
    }
    Ok(Box::new(tagger))
}

fn build_regex(spec: &RuleSpec) -> ConfigResult<Box<dyn Tagger>> {
    let descriptor = spec.descriptor()?;
    if spec.keywords.is_empty() {
        return Err(ConfigError::MissingField {
            descriptor: descriptor.to_string(),
            field: "keywords".to_string(),
        });
    }

    let mut tagger = RegexTagger::new(descriptor, spec.keywords.iter().cloned())?;
    if let Some(source) = &spec.source {
        tagger = tagger.with_source(source);
    }
    Ok(Box::new(tagger))
}

fn build_pattern(spec: &RuleSpec) -> ConfigResult<Box<dyn Tagger>> {
    let descriptor = spec.descriptor()?;
    if spec.patterns.is_empty() {
        return Err(ConfigError::MissingField {
            descriptor: descriptor.to_string(),
            field: "patterns".to_string(),
        });
    }

    let mut tagger = PatternTagger::new(descriptor, spec.patterns.iter().cloned(), &spec.variables)?;
    if let Some(source) = &spec.source {
        tagger = tagger.with_source(source);
    }
    Ok(Box::new(tagger))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::fixtures;

    fn spec(toml: &str) -> RuleSpec {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn creates_keyword_tagger() {
        let registry = TaggerRegistry::builtin();
        let tagger = registry
            .create(&spec(
                r#"
                kind = "keyword"
                descriptor = "CITY"
                keywords = ["New York"]
                "#,
            ))
            .unwrap();
        assert_eq!(tagger.descriptor(), "CITY");

        let s = fixtures::plain(&["New", "York"]);
        assert_eq!(tagger.tags(&s, &[]).len(), 1);
    }

    #[test]
    fn creates_regex_tagger_from_keywords() {
        let registry = TaggerRegistry::builtin();
        let tagger = registry
            .create(&spec(
                r#"
                kind = "regex"
                descriptor = "NUM"
                keywords = ["[0-9]+"]
                "#,
            ))
            .unwrap();
        let s = fixtures::plain(&["42"]);
        assert_eq!(tagger.tags(&s, &[]).len(), 1);
    }

    #[test]
    fn creates_pattern_tagger_with_variables() {
        let registry = TaggerRegistry::builtin();
        let tagger = registry
            .create(&spec(
                r#"
                kind = "pattern"
                descriptor = "NOUN"
                patterns = ['<pos="${noun}">']
                variables = { noun = "NNS?" }
                "#,
            ))
            .unwrap();
        let s = fixtures::sentence(&["dogs"], &["NNS"], &["B-NP"]);
        assert_eq!(tagger.tags(&s, &[]).len(), 1);
    }

    #[test]
    fn attaches_constraints() {
        let registry = TaggerRegistry::builtin();
        let tagger = registry
            .create(&spec(
                r#"
                kind = "keyword"
                descriptor = "X"
                keywords = ["runs"]
                constraints = ["CommonNoun"]
                "#,
            ))
            .unwrap();
        let s = fixtures::sentence(&["runs"], &["VBZ"], &["B-VP"]);
        assert!(tagger.tags(&s, &[]).is_empty());
    }

    #[test]
    fn missing_descriptor_is_reported() {
        let registry = TaggerRegistry::builtin();
        let err = registry
            .create(&spec(r#"kind = "keyword""#))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField { ref field, .. } if field == "descriptor"
        ));
    }

    #[test]
    fn unknown_kind_is_reported() {
        let registry = TaggerRegistry::builtin();
        let err = registry
            .create(&spec(
                r#"
                kind = "bogus"
                descriptor = "X"
                "#,
            ))
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownTaggerKind { .. }));
    }

    #[test]
    fn missing_payload_is_reported() {
        let registry = TaggerRegistry::builtin();
        let err = registry
            .create(&spec(
                r#"
                kind = "keyword"
                descriptor = "X"
                "#,
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingField { ref field, .. } if field == "keywords"
        ));
    }

    #[test]
    fn custom_kinds_can_be_registered() {
        let mut registry = TaggerRegistry::builtin();
        registry.register(
            "shout",
            Box::new(|spec: &RuleSpec| {
                let descriptor = spec.descriptor.clone().unwrap();
                Ok(Box::new(KeywordTagger::new(descriptor, spec.keywords.iter().cloned()))
                    as Box<dyn Tagger>)
            }),
        );
        let tagger = registry
            .create(&spec(
                r#"
                kind = "shout"
                descriptor = "X"
                keywords = ["hey"]
                "#,
            ))
            .unwrap();
        assert_eq!(tagger.descriptor(), "X");
    }
}
