use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// @module: Language classification for subtitle text
// Decides which word pipeline a piece of dialogue goes through and maps
// the two supported languages to ISO 639 codes.

/// Default share of CJK characters above which text counts as Japanese
pub const DEFAULT_CJK_RATIO_THRESHOLD: f64 = 0.1;

/// Language of a subtitle text, as far as the pipeline cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Latin-script text (dictionary-backed pipeline)
    #[default]
    English,
    /// CJK-script text
    Japanese,
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        self.iso().to_639_1().unwrap_or("und")
    }

    /// English name of the language
    pub fn name(&self) -> &'static str {
        self.iso().to_name()
    }

    /// Whether the language is written in a CJK script
    pub fn is_cjk(&self) -> bool {
        matches!(self, Self::Japanese)
    }

    fn iso(&self) -> isolang::Language {
        match self {
            Self::English => isolang::Language::Eng,
            Self::Japanese => isolang::Language::Jpn,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    /// Accepts ISO 639-1/639-3 codes, English names and the legacy `jp` alias
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();

        if normalized == "jp" {
            return Ok(Self::Japanese);
        }

        let iso = match normalized.len() {
            2 => isolang::Language::from_639_1(&normalized),
            3 => isolang::Language::from_639_3(&normalized),
            _ => [isolang::Language::Eng, isolang::Language::Jpn]
                .into_iter()
                .find(|lang| lang.to_name().eq_ignore_ascii_case(&normalized)),
        };

        match iso {
            Some(isolang::Language::Eng) => Ok(Self::English),
            Some(isolang::Language::Jpn) => Ok(Self::Japanese),
            Some(other) => Err(anyhow!("Unsupported language: {} ({})", s, other.to_name())),
            None => Err(anyhow!("Invalid language code: {}", s)),
        }
    }
}

/// Whether a character falls in the CJK range U+2E80..=U+9FFF
///
/// The range covers CJK radicals, kana, and the unified ideographs.
pub fn is_cjk_char(c: char) -> bool {
    ('\u{2E80}'..='\u{9FFF}').contains(&c)
}

/// Share of CJK characters in the text, 0.0 for empty input
pub fn cjk_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut cjk = 0usize;
    for c in text.chars() {
        total += 1;
        if is_cjk_char(c) {
            cjk += 1;
        }
    }

    if total == 0 {
        return 0.0;
    }
    cjk as f64 / total as f64
}

/// Classify text using the default threshold
pub fn detect_language(text: &str) -> Language {
    detect_language_with_threshold(text, DEFAULT_CJK_RATIO_THRESHOLD)
}

/// Classify text: Japanese when the CJK share is strictly above `threshold`
pub fn detect_language_with_threshold(text: &str, threshold: f64) -> Language {
    if cjk_ratio(text) > threshold {
        Language::Japanese
    } else {
        Language::English
    }
}
