//! The tagger pipeline
//!
//! A [`TaggerCollection`] runs its taggers in order over a sentence. Each
//! tagger sees the annotations accumulated by the taggers before it, which
//! is what allows later rules to reference the output of earlier ones.
//! Collections load from TOML rule files or directories; a load either
//! succeeds completely or fails with the first error.

use crate::error::{LoadError, LoadResult};
use crate::registry::{RuleSpec, TaggerRegistry};
use crate::tag::Tagger;
use crate::token::Token;
use crate::types::Type;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An ordered pipeline of taggers.
#[derive(Debug, Default)]
pub struct TaggerCollection {
    taggers: Vec<Box<dyn Tagger>>,
}

/// A rule file holds one `[tagger]` table or a `[[tagger]]` array.
#[derive(Deserialize)]
struct RuleFile {
    #[serde(default)]
    tagger: Rules,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Rules {
    One(Box<RuleSpec>),
    Many(Vec<RuleSpec>),
}

impl Default for Rules {
    fn default() -> Self {
        Rules::Many(Vec::new())
    }
}

impl Rules {
    fn into_vec(self) -> Vec<RuleSpec> {
        match self {
            Rules::One(spec) => vec![*spec],
            Rules::Many(specs) => specs,
        }
    }
}

impl TaggerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tagger as the last pipeline stage.
    pub fn add_tagger(&mut self, tagger: Box<dyn Tagger>) {
        self.taggers.push(tagger);
    }

    pub fn taggers(&self) -> &[Box<dyn Tagger>] {
        &self.taggers
    }

    pub fn len(&self) -> usize {
        self.taggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taggers.is_empty()
    }

    /// Run the pipeline over a sentence.
    ///
    /// Each tagger is given the annotations accumulated so far; its output
    /// is appended. The result is every annotation produced by any stage.
    pub fn tag(&self, sentence: &[Token]) -> Vec<Type> {
        let mut accumulated: Vec<Type> = Vec::new();
        for tagger in &self.taggers {
            let tags = tagger.tags(sentence, &accumulated);
            debug!(
                descriptor = tagger.descriptor(),
                found = tags.len(),
                "tagger stage complete"
            );
            accumulated.extend(tags);
        }
        accumulated
    }

    /// Order taggers by descriptor and canonicalize each tagger's internal
    /// rule order.
    pub fn sort(&mut self) {
        self.taggers
            .sort_by(|a, b| a.descriptor().cmp(b.descriptor()));
        for tagger in &mut self.taggers {
            tagger.sort();
        }
    }

    /// Load from a rule file or a directory of rule files.
    pub fn from_path(path: impl AsRef<Path>, registry: &TaggerRegistry) -> LoadResult<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            Self::from_dir(path, registry)
        } else {
            Self::from_file(path, registry)
        }
    }

    /// Load from a single TOML rule file.
    pub fn from_file(path: impl AsRef<Path>, registry: &TaggerRegistry) -> LoadResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: RuleFile = toml::from_str(&text).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut collection = Self::new();
        for spec in file.tagger.into_vec() {
            let tagger = registry.create(&spec).map_err(|source| LoadError::Config {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(
                path = %path.display(),
                descriptor = tagger.descriptor(),
                "loaded tagger"
            );
            collection.add_tagger(tagger);
        }

        info!(
            path = %path.display(),
            taggers = collection.len(),
            "loaded rule file"
        );
        Ok(collection)
    }

    /// Load every `.toml` file under a directory, recursively, in sorted
    /// path order. The concatenation order is the pipeline order.
    pub fn from_dir(path: impl AsRef<Path>, registry: &TaggerRegistry) -> LoadResult<Self> {
        let path = path.as_ref();
        let mut files = Vec::new();
        collect_rule_files(path, &mut files)?;
        files.sort();

        let mut collection = Self::new();
        for file in files {
            let loaded = Self::from_file(&file, registry)?;
            collection.taggers.extend(loaded.taggers);
        }

        info!(
            path = %path.display(),
            taggers = collection.len(),
            "loaded rule directory"
        );
        Ok(collection)
    }
}

fn collect_rule_files(dir: &Path, files: &mut Vec<PathBuf>) -> LoadResult<()> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_rule_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    Ok(())
}
