//! Post-processors that re-anchor candidate annotations to chunk boundaries
//!
//! A keyword rule often matches somewhere inside a noun phrase; these
//! helpers widen or reject such candidates against the base-NP chunks of
//! the sentence, preserving the candidate's descriptor, source and match
//! text.

use crate::interval::Interval;
use crate::token::Token;
use crate::types::Type;

/// The base-NP chunk intervals of a sentence.
///
/// A chunk opens on `B-NP` and closes at the first following tag that is
/// not `I-NP` (both case-insensitive). A chunk still open at the end of
/// the sentence is not reported.
pub fn np_chunk_intervals(sentence: &[Token]) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut start: Option<usize> = None;

    for (i, token) in sentence.iter().enumerate() {
        if let Some(s) = start {
            if !token.chunk.eq_ignore_ascii_case("I-NP") {
                intervals.push(Interval::open(s, i));
                start = None;
            }
        }
        if token.chunk.eq_ignore_ascii_case("B-NP") {
            start = Some(i);
        }
    }

    intervals
}

/// Re-anchor each candidate to every base-NP chunk that contains it.
///
/// A candidate inside no chunk is dropped; a candidate inside a chunk is
/// widened to the full chunk interval.
pub fn tag_chunks(candidates: Vec<Type>, sentence: &[Token]) -> Vec<Type> {
    let chunks = np_chunk_intervals(sentence);
    let mut tags = Vec::with_capacity(candidates.len());
    for tag in &candidates {
        for chunk in &chunks {
            if chunk.superset(&tag.interval()) {
                tags.push(Type::from_sentence(
                    sentence,
                    tag.descriptor(),
                    tag.source().map(str::to_string),
                    Some(tag.match_text().to_string()),
                    *chunk,
                ));
            }
        }
    }
    tags
}

/// Re-anchor a candidate to the chunk that contains it, but only when the
/// candidate ends on the chunk's headword.
///
/// The headword position defaults to the last token of the chunk and is
/// pulled back before the last preposition when the scan finds one.
pub fn tag_headword(tag: &Type, sentence: &[Token]) -> Option<Type> {
    for chunk in np_chunk_intervals(sentence) {
        if !chunk.superset(&tag.interval()) {
            continue;
        }

        let mut headword_end = chunk.end() - 1;
        for i in (1..sentence.len()).rev() {
            if sentence[i].postag == "IN" {
                headword_end = chunk.start() + i - 1;
            }
        }

        if tag.interval().end() == headword_end + 1 {
            return Some(Type::from_sentence(
                sentence,
                tag.descriptor(),
                tag.source().map(str::to_string),
                Some(tag.match_text().to_string()),
                chunk,
            ));
        }
    }

    None
}

/// Apply [`tag_headword`] to every candidate, keeping the survivors.
pub fn tag_headwords(candidates: Vec<Type>, sentence: &[Token]) -> Vec<Type> {
    candidates
        .iter()
        .filter_map(|tag| tag_headword(tag, sentence))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::fixtures;

    fn candidate(sentence: &[Token], interval: Interval) -> Type {
        Type::from_sentence(sentence, "X", None, None, interval)
    }

    #[test]
    fn chunk_intervals_close_on_non_inp() {
        let s = fixtures::sentence(
            &["the", "big", "dog", "ran", "home"],
            &["DT", "JJ", "NN", "VBD", "NN"],
            &["B-NP", "I-NP", "I-NP", "B-VP", "B-NP"],
        );
        // the trailing chunk is still open at sentence end and is dropped
        assert_eq!(np_chunk_intervals(&s), vec![Interval::open(0, 3)]);
    }

    #[test]
    fn adjacent_chunks_split_on_bnp() {
        let s = fixtures::sentence(
            &["dogs", "cats", "ran"],
            &["NNS", "NNS", "VBD"],
            &["B-NP", "B-NP", "B-VP"],
        );
        assert_eq!(
            np_chunk_intervals(&s),
            vec![Interval::open(0, 1), Interval::open(1, 2)]
        );
    }

    #[test]
    fn chunk_intervals_empty_without_bnp() {
        let s = fixtures::sentence(&["ran", "far"], &["VBD", "RB"], &["B-VP", "B-ADVP"]);
        assert!(np_chunk_intervals(&s).is_empty());
    }

    #[test]
    fn tag_chunks_widens_to_chunk() {
        let s = fixtures::sentence(
            &["the", "big", "dog", "ran"],
            &["DT", "JJ", "NN", "VBD"],
            &["B-NP", "I-NP", "I-NP", "O"],
        );
        let tags = tag_chunks(vec![candidate(&s, Interval::open(2, 3))], &s);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].interval(), Interval::open(0, 3));
        assert_eq!(tags[0].text(), "the big dog");
        // the original matched text survives the widening
        assert_eq!(tags[0].match_text(), "dog");
    }

    #[test]
    fn tag_chunks_drops_unchunked_candidates() {
        let s = fixtures::sentence(
            &["dog", "ran"],
            &["NN", "VBD"],
            &["B-NP", "B-VP"],
        );
        let tags = tag_chunks(vec![candidate(&s, Interval::open(1, 2))], &s);
        assert!(tags.is_empty());
    }

    #[test]
    fn headword_keeps_chunk_final_candidates() {
        let s = fixtures::sentence(
            &["the", "big", "dog", "ran"],
            &["DT", "JJ", "NN", "VBD"],
            &["B-NP", "I-NP", "I-NP", "O"],
        );
        // ends on the chunk's last token
        let kept = tag_headword(&candidate(&s, Interval::open(2, 3)), &s);
        assert_eq!(kept.unwrap().interval(), Interval::open(0, 3));

        // ends mid-chunk
        let dropped = tag_headword(&candidate(&s, Interval::open(1, 2)), &s);
        assert!(dropped.is_none());
    }

    #[test]
    fn headwords_filter_a_batch() {
        let s = fixtures::sentence(
            &["the", "dog", "ran"],
            &["DT", "NN", "VBD"],
            &["B-NP", "I-NP", "O"],
        );
        let tags = tag_headwords(
            vec![
                candidate(&s, Interval::open(1, 2)),
                candidate(&s, Interval::open(0, 1)),
            ],
            &s,
        );
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].interval(), Interval::open(0, 2));
    }
}
