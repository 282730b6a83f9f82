//! Parsing pre-analyzed sentences from input lines
//!
//! One line is one sentence. Tokens are whitespace-separated; each token
//! is either `surface|lemma|pos|chunk` or a bare surface form, in which
//! case the lemma defaults to the lowercased surface and the POS and chunk
//! tags are empty.

use anyhow::{bail, Result};
use taggers_core::Token;

/// Parse one input line into a sentence.
pub fn parse_sentence(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    for field in line.split_whitespace() {
        let parts: Vec<&str> = field.split('|').collect();
        let token = match parts.as_slice() {
            [surface] => Token::new(*surface, surface.to_lowercase(), "", "", offset),
            [surface, lemma, pos, chunk] => Token::new(*surface, *lemma, *pos, *chunk, offset),
            _ => bail!(
                "token '{field}' has {} fields, expected 1 or 4 (surface|lemma|pos|chunk)",
                parts.len()
            ),
        };
        offset += token.string.len() + 1;
        tokens.push(token);
    }

    Ok(tokens)
}
