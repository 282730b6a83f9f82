//! Token input model
//!
//! The engine consumes sentences that an upstream NLP pipeline has already
//! tokenized, part-of-speech tagged, chunk tagged and lemmatized. A
//! sentence is simply a slice of [`Token`]s; nothing here performs any
//! linguistic analysis.

use serde::{Deserialize, Serialize};

/// One pre-analyzed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form as it appeared in the text
    pub string: String,
    /// Lemmatized form
    pub lemma: String,
    /// Part-of-speech tag (e.g. `NN`, `VBZ`, `IN`)
    pub postag: String,
    /// Chunk tag (e.g. `B-NP`, `I-NP`, `O`)
    pub chunk: String,
    /// Character offset of the token in the original text
    pub offset: usize,
}

impl Token {
    pub fn new(
        string: impl Into<String>,
        lemma: impl Into<String>,
        postag: impl Into<String>,
        chunk: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self {
            string: string.into(),
            lemma: lemma.into(),
            postag: postag.into(),
            chunk: chunk.into(),
            offset,
        }
    }
}

/// Surface strings of a sentence, in order.
pub fn strings(sentence: &[Token]) -> Vec<String> {
    sentence.iter().map(|t| t.string.clone()).collect()
}

/// Lowercased surface strings of a sentence.
pub fn lowercased(sentence: &[Token]) -> Vec<String> {
    sentence.iter().map(|t| t.string.to_lowercase()).collect()
}

/// Lemmas of a sentence, lowercased.
pub fn lemmas(sentence: &[Token]) -> Vec<String> {
    sentence.iter().map(|t| t.lemma.to_lowercase()).collect()
}

/// The sentence text reconstructed by joining surface strings with spaces.
pub fn text(sentence: &[Token]) -> String {
    sentence
        .iter()
        .map(|t| t.string.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections() {
        let s = fixtures::sentence(&["The", "Dogs"], &["DT", "NNS"], &["B-NP", "I-NP"]);
        assert_eq!(strings(&s), vec!["The", "Dogs"]);
        assert_eq!(lowercased(&s), vec!["the", "dogs"]);
        assert_eq!(lemmas(&s), vec!["the", "dogs"]);
        assert_eq!(text(&s), "The Dogs");
    }

    #[test]
    fn empty_sentence_projections() {
        let s: Vec<Token> = Vec::new();
        assert!(strings(&s).is_empty());
        assert_eq!(text(&s), "");
    }
}
