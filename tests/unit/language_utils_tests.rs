/*!
 * Tests for language classification and language codes
 */

use sscout::language_utils::{
    cjk_ratio, detect_language, detect_language_with_threshold, is_cjk_char, Language,
};

fn mixed_text(cjk: usize, latin: usize) -> String {
    format!("{}{}", "語".repeat(cjk), "a".repeat(latin))
}

/// Test that a 15% CJK share is classified as Japanese
#[test]
fn test_detectLanguage_withFifteenPercentCjk_shouldBeJapanese() {
    let text = mixed_text(15, 85);
    assert!((cjk_ratio(&text) - 0.15).abs() < 1e-9);
    assert_eq!(detect_language(&text), Language::Japanese);
}

/// Test that a 5% CJK share stays Latin-script
#[test]
fn test_detectLanguage_withFivePercentCjk_shouldBeEnglish() {
    let text = mixed_text(5, 95);
    assert_eq!(detect_language(&text), Language::English);
}

#[test]
fn test_detectLanguage_withEmptyText_shouldFailClosedToEnglish() {
    assert_eq!(cjk_ratio(""), 0.0);
    assert_eq!(detect_language(""), Language::English);
}

#[test]
fn test_detectLanguageWithThreshold_shouldHonorCustomThreshold() {
    let text = mixed_text(15, 85);
    assert_eq!(detect_language_with_threshold(&text, 0.2), Language::English);
    assert_eq!(detect_language_with_threshold(&text, 0.1), Language::Japanese);
}

#[test]
fn test_isCjkChar_shouldCoverKanaAndKanji() {
    assert!(is_cjk_char('の'));
    assert!(is_cjk_char('カ'));
    assert!(is_cjk_char('漢'));
    assert!(is_cjk_char('\u{2E80}'));
    assert!(is_cjk_char('\u{9FFF}'));
    assert!(!is_cjk_char('a'));
    assert!(!is_cjk_char('\u{A000}'));
}

#[test]
fn test_detectLanguage_withJapaneseDialogue_shouldBeJapanese() {
    assert_eq!(detect_language("こんにちは、元気ですか？"), Language::Japanese);
}

#[test]
fn test_language_parse_shouldAcceptCodesNamesAndAlias() {
    assert_eq!("en".parse::<Language>().unwrap(), Language::English);
    assert_eq!("eng".parse::<Language>().unwrap(), Language::English);
    assert_eq!("English".parse::<Language>().unwrap(), Language::English);
    assert_eq!("ja".parse::<Language>().unwrap(), Language::Japanese);
    assert_eq!("jp".parse::<Language>().unwrap(), Language::Japanese);
    assert_eq!("JPN".parse::<Language>().unwrap(), Language::Japanese);
}

#[test]
fn test_language_parse_withUnsupportedLanguage_shouldFail() {
    assert!("fr".parse::<Language>().is_err());
    assert!("xx".parse::<Language>().is_err());
    assert!("".parse::<Language>().is_err());
}

#[test]
fn test_language_display_shouldUseIsoCode() {
    assert_eq!(Language::English.to_string(), "en");
    assert_eq!(Language::Japanese.to_string(), "ja");
    assert_eq!(Language::Japanese.name(), "Japanese");
}
