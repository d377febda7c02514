use once_cell::sync::Lazy;
use regex::Regex;

// @module: Word tokenization for Latin-script dialogue

// @const: Inline markup left in dialogue (<i>, {\an8})
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>|\{[^}]*\}").unwrap()
});

// @const: Word candidates; inner hyphens, apostrophes and periods stay attached,
// as does one trailing period
static WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:[-'.][\p{L}\p{N}]+)*\.?").unwrap()
});

// @const: Clitics split off the end of a contraction, longest first
const CLITICS: &[&str] = &["n't", "'re", "'ve", "'ll", "'s", "'d", "'m"];

/// Split text into raw word tokens
///
/// Contractions are split the Treebank way (`don't` -> `do`, `n't`;
/// `he's` -> `he`, `'s`). A token ending in exactly one period, with no
/// other period inside, loses that period: `this.` -> `this`, `Mr.` -> `Mr`,
/// while `U.S.` stays as it is. Case is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.replace(['\u{2019}', '\u{2018}'], "'");
    let cleaned = MARKUP_REGEX.replace_all(&normalized, " ");

    let mut tokens = Vec::new();
    for candidate in WORD_REGEX.find_iter(&cleaned) {
        let candidate = strip_sentence_period(candidate.as_str());
        let (stem, clitic) = split_contraction(candidate);
        if !stem.is_empty() {
            tokens.push(stem.to_string());
        }
        if let Some(clitic) = clitic {
            tokens.push(clitic.to_string());
        }
    }
    tokens
}

/// Drop a trailing period when it is the only period in the token
pub fn strip_sentence_period(token: &str) -> &str {
    if token.ends_with('.') && token.matches('.').count() == 1 {
        &token[..token.len() - 1]
    } else {
        token
    }
}

/// Split a trailing clitic off a contraction
fn split_contraction(token: &str) -> (&str, Option<&str>) {
    if !token.contains('\'') {
        return (token, None);
    }

    for clitic in CLITICS {
        if token.len() <= clitic.len() {
            continue;
        }
        let at = token.len() - clitic.len();
        if token.is_char_boundary(at) && token[at..].eq_ignore_ascii_case(clitic) {
            return (&token[..at], Some(&token[at..]));
        }
    }

    (token, None)
}
