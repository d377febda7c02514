use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use super::IMPLICIT_STYLE;

// @module: Advanced SubStation Alpha parsing

// @const: Override blocks such as {\i1} or {\pos(10,20)}
static OVERRIDE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{[^}]*\}").unwrap()
});

// @const: Escaped hard/soft line breaks and hard spaces
static ESCAPE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[Nnh]").unwrap()
});

const DEFAULT_STYLE_FORMAT: &[&str] = &[
    "name", "fontname", "fontsize", "primarycolour", "secondarycolour", "outlinecolour",
    "backcolour", "bold", "italic", "underline", "strikeout", "scalex", "scaley", "spacing",
    "angle", "borderstyle", "outline", "shadow", "alignment", "marginl", "marginr", "marginv",
    "encoding",
];
const DEFAULT_EVENT_FORMAT: &[&str] = &[
    "layer", "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
];

// @struct: One dialogue line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssEvent {
    // @field: Style name the event references
    pub style: String,

    // @field: Dialogue text with markup removed
    pub text: String,
}

/// Outcome of asking a styled document for its dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogueSelection {
    /// Newline-joined dialogue of the selected style
    Text(String),
    /// No style was given; the caller has to pick one of these
    ChooseStyle(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Styles,
    Events,
    Other,
}

/// Parsed `.ass` document: the style table and the dialogue events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssDocument {
    styles: Vec<String>,
    events: Vec<AssEvent>,
}

impl AssDocument {
    /// Build a document directly from its parts
    pub fn new(styles: Vec<String>, events: Vec<AssEvent>) -> Self {
        Self { styles, events }
    }

    /// Parse decoded `.ass` text
    ///
    /// Unknown sections and malformed rows are skipped. `Comment:` rows are
    /// not dialogue and are ignored.
    pub fn parse(content: &str) -> Self {
        let mut doc = Self::default();
        let mut section = Section::Other;
        let mut style_format: Vec<String> = to_owned_columns(DEFAULT_STYLE_FORMAT);
        let mut event_format: Vec<String> = to_owned_columns(DEFAULT_EVENT_FORMAT);

        for (line_no, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                section = match line.to_lowercase().as_str() {
                    "[v4+ styles]" | "[v4 styles]" | "[v4+ styles+]" => Section::Styles,
                    "[events]" => Section::Events,
                    _ => Section::Other,
                };
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim_start();

            match (section, key.as_str()) {
                (Section::Styles, "format") => style_format = parse_format(value),
                (Section::Events, "format") => event_format = parse_format(value),
                (Section::Styles, "style") => {
                    match column(value, &style_format, "name").map(|name| normalize_style_name(&name)) {
                        Some(name) if !name.is_empty() => doc.styles.push(name),
                        _ => warn!("Skipping style without a name on line {}", line_no + 1),
                    }
                }
                (Section::Events, "dialogue") => {
                    let style = column(value, &event_format, "style").unwrap_or_default();
                    let text = column(value, &event_format, "text").unwrap_or_default();
                    doc.events.push(AssEvent {
                        style: normalize_style_name(&style),
                        text: clean_text(&text),
                    });
                }
                _ => {}
            }
        }

        debug!("Parsed ASS document: {} styles, {} events", doc.styles.len(), doc.events.len());
        doc
    }

    /// Declared style names, in document order
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Dialogue events, in document order
    pub fn events(&self) -> &[AssEvent] {
        &self.events
    }

    /// Dialogue text for `style`
    ///
    /// - no styles declared: every event belongs to one implicit style, so
    ///   all event text is returned whatever `style` says
    /// - `style` is `None`: the style list is handed back for a choice
    /// - unknown style: `StyleNotFound` listing the declared styles
    /// - known style with no events: `EmptyDialogue`
    pub fn extract_dialogue(&self, style: Option<&str>) -> Result<DialogueSelection, SubtitleError> {
        if self.styles.is_empty() {
            let label = style.unwrap_or(IMPLICIT_STYLE);
            return self.join_events(|_| true, label).map(DialogueSelection::Text);
        }

        let Some(style) = style else {
            return Ok(DialogueSelection::ChooseStyle(self.styles.clone()));
        };

        let style = style.trim();
        if !self.styles.iter().any(|s| s == style) {
            return Err(SubtitleError::StyleNotFound {
                style: style.to_string(),
                available: self.styles.clone(),
            });
        }

        self.join_events(|event| event.style == style, style)
            .map(DialogueSelection::Text)
    }

    fn join_events<F>(&self, mut predicate: F, label: &str) -> Result<String, SubtitleError>
    where
        F: FnMut(&AssEvent) -> bool,
    {
        let lines: Vec<&str> = self
            .events
            .iter()
            .filter(|event| predicate(*event))
            .map(|event| event.text.as_str())
            .collect();

        if lines.is_empty() {
            return Err(SubtitleError::EmptyDialogue { style: label.to_string() });
        }

        Ok(lines.join("\n"))
    }
}

fn to_owned_columns(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn parse_format(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|column| column.trim().to_lowercase())
        .collect()
}

/// Value of `name` in a row laid out by `format`
///
/// Only the last column keeps its commas; rows shorter or longer than the
/// format never shift the earlier columns.
fn column(value: &str, format: &[String], name: &str) -> Option<String> {
    let index = format.iter().position(|c| c == name)?;
    let field = if index + 1 == format.len() {
        value.splitn(format.len(), ',').nth(index)
    } else {
        value.split(',').nth(index)
    };
    field.map(|field| field.trim().to_string())
}

/// SSA writers may mark the default style with a leading `*`
fn normalize_style_name(style: &str) -> String {
    style.trim().trim_start_matches('*').to_string()
}

/// Drop override blocks and turn `\N`, `\n`, `\h` into spaces
fn clean_text(text: &str) -> String {
    let without_overrides = OVERRIDE_REGEX.replace_all(text, "");
    ESCAPE_REGEX.replace_all(&without_overrides, " ").trim().to_string()
}
