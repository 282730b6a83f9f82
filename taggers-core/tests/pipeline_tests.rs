//! End-to-end tests: rule files, pipelines and overlap resolution

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use taggers_core::tag::{KeywordTagger, PatternTagger, Projection, Snap, Tagger};
use taggers_core::{filter_covered, Interval, TaggerCollection, TaggerRegistry, Token, Type};

fn sentence(words: &[&str], postags: &[&str], chunks: &[&str]) -> Vec<Token> {
    let mut offset = 0;
    words
        .iter()
        .zip(postags)
        .zip(chunks)
        .map(|((w, p), c)| {
            let t = Token::new(*w, w.to_lowercase(), *p, *c, offset);
            offset += w.len() + 1;
            t
        })
        .collect()
}

fn new_york_sentence() -> Vec<Token> {
    sentence(
        &["I", "live", "in", "New", "York", "."],
        &["PRP", "VBP", "IN", "NNP", "NNP", "."],
        &["B-NP", "B-VP", "B-PP", "B-NP", "I-NP", "O"],
    )
}

#[test]
fn keyword_rule_tags_a_city() {
    let tagger = KeywordTagger::new("CITY", vec!["New York".to_string()]);
    let s = new_york_sentence();
    let tags = tagger.tags(&s, &[]);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].descriptor(), "CITY");
    assert_eq!(tags[0].interval(), Interval::open(3, 5));
    assert_eq!(tags[0].text(), "New York");
    assert_eq!(tags[0].to_string(), "CITY{[3, 5):New York}");
}

#[test]
fn lowercase_keyword_rule_ignores_case() {
    let exact = KeywordTagger::new("CITY", vec!["new york".to_string()]);
    let folded = KeywordTagger::new("CITY", vec!["new york".to_string()])
        .with_projection(Projection::Lowercase);
    let s = new_york_sentence();
    assert!(exact.tags(&s, &[]).is_empty());
    assert_eq!(folded.tags(&s, &[]).len(), 1);
}

#[test]
fn chunk_snap_widens_a_keyword_match() {
    let tagger = KeywordTagger::new("ANIMAL", vec!["dog".to_string()]).with_snap(Snap::Chunk);
    let s = sentence(
        &["the", "big", "dog", "barked"],
        &["DT", "JJ", "NN", "VBD"],
        &["B-NP", "I-NP", "I-NP", "B-VP"],
    );
    let tags = tagger.tags(&s, &[]);
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].interval(), Interval::open(0, 3));
    assert_eq!(tags[0].text(), "the big dog");
    assert_eq!(tags[0].match_text(), "dog");
}

#[test]
fn pattern_stage_needs_the_earlier_stage() {
    let s = sentence(&["my", "dog"], &["PRP$", "NN"], &["B-NP", "I-NP"]);
    let pattern = PatternTagger::new(
        "PET",
        vec![r#"<string="my"> <type="ANIMAL">"#.to_string()],
        &BTreeMap::new(),
    )
    .unwrap();

    // without the ANIMAL stage the reference never fires
    let mut without = TaggerCollection::new();
    without.add_tagger(Box::new(pattern));
    assert!(without.tag(&s).is_empty());

    let pattern = PatternTagger::new(
        "PET",
        vec![r#"<string="my"> <type="ANIMAL">"#.to_string()],
        &BTreeMap::new(),
    )
    .unwrap();
    let mut with = TaggerCollection::new();
    with.add_tagger(Box::new(KeywordTagger::new(
        "ANIMAL",
        vec!["dog".to_string()],
    )));
    with.add_tagger(Box::new(pattern));

    let tags = with.tag(&s);
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].descriptor(), "ANIMAL");
    assert_eq!(tags[1].descriptor(), "PET");
    assert_eq!(tags[1].interval(), Interval::open(0, 2));
}

#[test]
fn constraint_rejects_a_non_noun_match() {
    let registry = TaggerRegistry::builtin();
    let spec = toml::from_str(
        r#"
        kind = "keyword"
        descriptor = "THING"
        keywords = ["runs"]
        constraints = ["CommonNoun"]
        "#,
    )
    .unwrap();
    let tagger = registry.create(&spec).unwrap();

    let verb = sentence(&["runs"], &["VBZ"], &["B-VP"]);
    assert!(tagger.tags(&verb, &[]).is_empty());

    let noun = sentence(&["runs"], &["NNS"], &["B-NP"]);
    assert_eq!(tagger.tags(&noun, &[]).len(), 1);
}

#[test]
fn rule_directory_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("10-base.toml"),
        r#"
        [[tagger]]
        kind = "keyword"
        descriptor = "CITY"
        keywords = ["New York"]
        "#,
    )
    .unwrap();
    fs::write(
        dir.path().join("20-derived.toml"),
        r#"
        [[tagger]]
        kind = "pattern"
        descriptor = "LOCATION"
        patterns = ['<string="in"> (<type="CITY">+)']
        "#,
    )
    .unwrap();

    let registry = TaggerRegistry::builtin();
    let collection = TaggerCollection::from_path(dir.path(), &registry).unwrap();
    assert_eq!(collection.len(), 2);

    let tags = collection.tag(&new_york_sentence());
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].to_string(), "CITY{[3, 5):New York}");
    assert_eq!(tags[1].to_string(), "LOCATION{[3, 5):New York}");
}

#[test]
fn every_tagger_handles_an_empty_sentence() {
    let taggers: Vec<Box<dyn Tagger>> = vec![
        Box::new(KeywordTagger::new("K", vec!["a".to_string()])),
        Box::new(
            taggers_core::tag::RegexTagger::new("R", vec!["a+".to_string()]).unwrap(),
        ),
        Box::new(
            PatternTagger::new("P", vec![r#"<pos="NN">"#.to_string()], &BTreeMap::new()).unwrap(),
        ),
    ];
    for tagger in &taggers {
        assert!(tagger.tags(&[], &[]).is_empty());
    }
}

fn arb_tags() -> impl Strategy<Value = Vec<Type>> {
    proptest::collection::vec(
        ("[AB]", 0usize..6, 1usize..4).prop_map(|(descriptor, start, len)| {
            Type::new("", descriptor, None, None, Interval::open(start, start + len))
        }),
        0..8,
    )
}

proptest! {
    #[test]
    fn overlap_filter_is_idempotent(tags in arb_tags()) {
        let once = filter_covered(tags);
        let twice = filter_covered(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn overlap_filter_is_order_independent(tags in arb_tags()) {
        let mut reversed = tags.clone();
        reversed.reverse();
        let key = |t: &Type| (t.interval().start(), t.interval().end(), t.descriptor().to_string());
        let mut a = filter_covered(tags);
        let mut b = filter_covered(reversed);
        a.sort_by_key(key);
        b.sort_by_key(key);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn survivors_are_distinct(tags in arb_tags()) {
        let kept = filter_covered(tags);
        for (i, tag) in kept.iter().enumerate() {
            prop_assert!(!kept[..i].contains(tag));
        }
    }

    #[test]
    fn survivors_are_never_strictly_contained(tags in arb_tags()) {
        let kept = filter_covered(tags);
        for tag in &kept {
            let covered = kept.iter().any(|other| {
                other.descriptor() == tag.descriptor()
                    && other.interval().superset(&tag.interval())
                    && other.interval() != tag.interval()
            });
            prop_assert!(!covered);
        }
    }
}
