/*!
 * End-to-end tests of the extraction pipeline: bytes in, ranked words out
 */

use sscout::errors::SubtitleError;
use sscout::language_utils::Language;
use sscout::subtitle::{detect_format_and_styles, SubtitleFormat};
use sscout::vocabulary::{filter_known, KnownWordSet};

use crate::common;

fn english_known(words: &[&str]) -> KnownWordSet {
    KnownWordSet::from_words(Language::English, words.iter().copied())
}

#[test]
fn test_extractWords_withSrt_shouldIgnoreCueNoiseAndRank() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&[
        "Hello, my friend.",
        "Hello again! Come here.",
        "We go. Hello world.",
    ]);

    let extraction = pipeline
        .extract_words(srt.as_bytes(), SubtitleFormat::Srt, None, None, &english_known(&[]))
        .unwrap();

    assert_eq!(extraction.language, Language::English);
    assert_eq!(extraction.words[0].word, "hello");
    assert_eq!(extraction.words[0].frequency, 3);
    assert!(extraction.words.iter().all(|t| t.word.chars().all(|c| c.is_ascii_lowercase())));
    assert_eq!(
        extraction.words.iter().map(|t| t.word.as_str()).collect::<Vec<_>>(),
        vec!["hello", "my", "friend", "again", "come", "here", "we", "go", "world"]
    );
}

#[test]
fn test_extractWords_withSelectedStyle_shouldOnlyReadThatStyle() {
    let pipeline = common::test_pipeline();
    let ass = common::build_ass(
        &["Default", "Signs"],
        &[
            ("Default", "Hello world"),
            ("Signs", "EXIT"),
            ("Default", r"{\an8}Goodbye world"),
        ],
    );

    let extraction = pipeline
        .extract_words(ass.as_bytes(), SubtitleFormat::Ass, Some("Default"), None, &english_known(&[]))
        .unwrap();

    let words: Vec<&str> = extraction.words.iter().map(|t| t.word.as_str()).collect();
    assert_eq!(words, vec!["world", "hello", "goodbye"]);
    assert!(!words.contains(&"exit"));
}

#[test]
fn test_extractWords_withStyleWithoutEvents_shouldReportEmptyDialogue() {
    let pipeline = common::test_pipeline();
    let ass = common::signs_only_ass();

    let result = pipeline.extract_words(
        ass.as_bytes(),
        SubtitleFormat::Ass,
        Some("Default"),
        None,
        &english_known(&[]),
    );

    assert!(matches!(result, Err(SubtitleError::EmptyDialogue { ref style }) if style == "Default"));
}

#[test]
fn test_extractWords_withUnknownStyle_shouldListStyles() {
    let pipeline = common::test_pipeline();
    let ass = common::signs_only_ass();

    let result = pipeline.extract_words(
        ass.as_bytes(),
        SubtitleFormat::Ass,
        Some("Foo"),
        None,
        &english_known(&[]),
    );

    match result {
        Err(SubtitleError::StyleNotFound { available, .. }) => {
            assert_eq!(available, vec!["Default".to_string(), "Signs".to_string()])
        }
        other => panic!("expected StyleNotFound, got {:?}", other),
    }
}

#[test]
fn test_extractWords_twice_shouldBeIdempotent() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&[common::SAMPLE_SENTENCE, "Goodbye, my friend. Goodbye!"]);
    let known = english_known(&["said"]);

    let first = pipeline
        .extract_words(srt.as_bytes(), SubtitleFormat::Srt, None, None, &known)
        .unwrap();
    let second = pipeline
        .extract_words(srt.as_bytes(), SubtitleFormat::Srt, None, None, &known)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_extractWords_shouldBeDisjointFromKnownSet() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&[common::SAMPLE_SENTENCE]);
    let known = english_known(&["HELLO", "know"]);

    let extraction = pipeline
        .extract_words(srt.as_bytes(), SubtitleFormat::Srt, None, None, &known)
        .unwrap();

    assert!(extraction.words.iter().all(|t| !known.contains(&t.word)));
    assert_eq!(extraction.filtered_known, vec!["hello".to_string(), "know".to_string()]);

    // Filtering an already filtered list changes nothing
    assert_eq!(filter_known(&extraction.words, &known), extraction.words);
}

#[test]
fn test_extractWords_shouldRankMonotonically() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&[
        "world world world",
        "hello hello",
        "again friend hello",
        "here we go, we go again",
    ]);

    let extraction = pipeline
        .extract_words(srt.as_bytes(), SubtitleFormat::Srt, None, None, &english_known(&[]))
        .unwrap();

    assert!(extraction
        .words
        .windows(2)
        .all(|pair| pair[0].frequency >= pair[1].frequency));

    let top = extraction.top(3);
    assert_eq!(top.word_strings(), vec!["world", "hello", "again"]);
}

#[test]
fn test_extractWords_withJapaneseText_shouldDetectAndReturnNoWords() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&["こんにちは、世界。", "元気ですか？"]);

    let extraction = pipeline
        .extract_words(
            srt.as_bytes(),
            SubtitleFormat::Srt,
            None,
            None,
            &KnownWordSet::new(Language::Japanese),
        )
        .unwrap();

    assert_eq!(extraction.language, Language::Japanese);
    assert!(extraction.words.is_empty());
}

#[test]
fn test_extractWords_withForcedLanguage_shouldSkipDetection() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&["hello world"]);

    let extraction = pipeline
        .extract_words(
            srt.as_bytes(),
            SubtitleFormat::Srt,
            None,
            Some(Language::Japanese),
            &KnownWordSet::new(Language::Japanese),
        )
        .unwrap();

    assert_eq!(extraction.language, Language::Japanese);
    assert!(extraction.words.is_empty());
}

#[test]
fn test_extractWords_withUtf16File_shouldDecodeWithFallback() {
    let pipeline = common::test_pipeline();
    let srt = common::build_srt(&["hello world"]);
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(srt.encode_utf16().flat_map(|unit| unit.to_le_bytes()));

    let extraction = pipeline
        .extract_words(&bytes, SubtitleFormat::Srt, None, None, &english_known(&[]))
        .unwrap();

    assert_eq!(extraction.words.len(), 2);
}

#[test]
fn test_detectThenExtract_shouldFollowFormatAndStyles() {
    let pipeline = common::test_pipeline();
    let ass = common::build_ass(&["Main"], &[("Main", "Come here, my friend")]);

    let info = detect_format_and_styles("Episode.ASS", ass.as_bytes()).unwrap();
    assert_eq!(info.styles, vec!["Main".to_string()]);

    let extraction = pipeline
        .extract_words(ass.as_bytes(), info.format, Some(info.styles[0].as_str()), None, &english_known(&[]))
        .unwrap();

    assert_eq!(extraction.words.len(), 4);
}
