/*!
 * Tests for the tokenizer, word filter and ranking
 */

use sscout::language_utils::Language;
use sscout::vocabulary::tokenizer::{strip_sentence_period, tokenize};
use sscout::vocabulary::{
    filter_known, Dictionary, KnownWordSet, PermissiveDictionary, RankedWordList, WordPipeline,
    WordToken,
};

use crate::common;

fn words_of(tokens: &[WordToken]) -> Vec<&str> {
    tokens.iter().map(|t| t.word.as_str()).collect()
}

/// Scenario: the sample sentence, with contractions and sentence periods
#[test]
fn test_tokenize_withSampleSentence_shouldSplitContractionAndStripPeriods() {
    let tokens = tokenize(common::SAMPLE_SENTENCE);

    assert_eq!(
        tokens,
        vec!["I", "do", "n't", "know", "this", "Mr", "Smith", "said", "hello", "hello", "world"]
    );
}

#[test]
fn test_countWords_withSampleSentence_shouldRankHelloFirst() {
    let pipeline = common::test_pipeline();

    let words = pipeline.count_words(common::SAMPLE_SENTENCE, Language::English);

    assert_eq!(words[0], WordToken::new("hello", 2));
    assert_eq!(
        words_of(&words),
        vec!["hello", "do", "know", "this", "mr", "said", "world"]
    );
    // "I" is too short, "n't" and "Smith" are not dictionary words
    assert!(words.iter().all(|t| t.frequency == 1 || t.word == "hello"));
}

#[test]
fn test_stripSentencePeriod_shouldOnlyStripASinglePeriod() {
    assert_eq!(strip_sentence_period("this."), "this");
    assert_eq!(strip_sentence_period("Mr."), "Mr");
    assert_eq!(strip_sentence_period("U.S."), "U.S.");
    assert_eq!(strip_sentence_period("e.g"), "e.g");
    assert_eq!(strip_sentence_period("plain"), "plain");
}

/// Scenario: empty text yields an empty ranked list
#[test]
fn test_extractFromText_withEmptyText_shouldReturnEmptyList() {
    let pipeline = common::test_pipeline();
    let known = KnownWordSet::new(Language::English);

    let extraction = pipeline.extract_from_text("", None, &known);

    assert_eq!(extraction.language, Language::English);
    assert!(extraction.words.is_empty());
    assert!(extraction.top(20).is_empty());
}

#[test]
fn test_isWord_shouldRequireLengthLatinStartAndDictionary() {
    let pipeline = WordPipeline::with_dictionary(PermissiveDictionary);

    assert!(pipeline.is_word("ok"));
    assert!(!pipeline.is_word("a"));
    assert!(!pipeline.is_word("42"));
    assert!(!pipeline.is_word("éclair"));
    assert!(!pipeline.is_word("'s"));

    let strict = common::test_pipeline();
    assert!(strict.is_word("Hello"));
    assert!(!strict.is_word("Smith"));
}

#[test]
fn test_permissiveDictionary_shouldAcceptEverything() {
    assert!(PermissiveDictionary.contains("anything"));
}

#[test]
fn test_filterKnown_shouldBeSetDifferenceAndIdempotent() {
    let words = vec![
        WordToken::new("hello", 3),
        WordToken::new("world", 2),
        WordToken::new("again", 1),
    ];
    let known = KnownWordSet::from_words(Language::English, ["WORLD"]);

    let once = filter_known(&words, &known);
    let twice = filter_known(&once, &known);

    assert_eq!(words_of(&once), vec!["hello", "again"]);
    assert_eq!(once, twice);
    assert!(once.iter().all(|t| !known.contains(&t.word)));
}

#[test]
fn test_rankedWordList_shouldBeMonotonicAndStable() {
    let words = vec![
        WordToken::new("one", 1),
        WordToken::new("three", 3),
        WordToken::new("first-two", 2),
        WordToken::new("second-two", 2),
        WordToken::new("other-one", 1),
    ];

    let ranked = RankedWordList::top(words, 4);

    assert_eq!(
        ranked.word_strings(),
        vec!["three", "first-two", "second-two", "one"]
    );
    assert!(ranked
        .words()
        .windows(2)
        .all(|pair| pair[0].frequency >= pair[1].frequency));
}

#[test]
fn test_rankedWordList_topDefault_shouldKeepTwenty() {
    let words: Vec<WordToken> = (0..30).map(|i| WordToken::new(format!("w{}", i), 30 - i)).collect();

    let ranked = RankedWordList::top_default(words);

    assert_eq!(ranked.len(), 20);
    assert_eq!(ranked.words()[0].word, "w0");
}

#[test]
fn test_knownWordSet_shouldOnlyGrow() {
    let mut known = KnownWordSet::new(Language::Japanese);

    assert!(known.confirm("Kanji"));
    assert!(!known.confirm("kanji"));
    assert_eq!(known.len(), 1);
    assert_eq!(known.language(), Language::Japanese);
}
