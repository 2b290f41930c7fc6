//! Independent extraction rules.
//!
//! Every rule reads the same normalized text (separators collapsed to single
//! spaces, brackets removed) and never sees the others' results, apart from
//! the fighter-name rule which is told where the event token sits so a name
//! can never swallow it.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::ops::Range;

use super::types::{Edition, Resolution};

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[._\s\[\](){}]+").expect("separator pattern is valid"));

static EVENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bufc (?:fight night (\d{1,4})|on ([a-z0-9]+) (\d{1,4})|(\d{1,4}))\b")
        .expect("event pattern is valid")
});

static EARLY_PRELIMS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)early ?prelim(?:s|inary)").expect("edition pattern is valid"));

static PRELIMS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)prelim(?:s|inary)").expect("edition pattern is valid"));

static RESOLUTION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:\d{3,4}[pi]|(?:4k|uhd)\b)").expect("resolution pattern is valid")
});

/// Words that describe the card or the release and are never part of a name.
const NON_NAME_WORDS: &[&str] = &[
    "ufc",
    "fight",
    "night",
    "ppv",
    "main",
    "event",
    "card",
    "early",
    "prelim",
    "prelims",
    "preliminary",
    "vs",
    "web",
    "webrip",
    "webdl",
    "dl",
    "hdtv",
    "bluray",
    "proper",
    "repack",
    "internal",
    "uhd",
    "edition",
];

/// A matched event token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventMatch {
    /// Canonical display form.
    pub display: String,
    /// Byte range of the match in the normalized text.
    pub span: Range<usize>,
}

/// Collapses separators and bracket characters into single spaces.
pub(crate) fn normalize(stem: &str) -> String {
    SEPARATORS.replace_all(stem, " ").trim().to_string()
}

/// Finds the event identifier. All-or-nothing: either a full match or `None`.
pub(crate) fn event_number(text: &str) -> Option<EventMatch> {
    let caps = EVENT_PATTERN.captures(text)?;
    let whole = caps.get(0)?;

    let display = if let Some(number) = caps.get(1) {
        format!("UFC Fight Night {}", number.as_str())
    } else if let (Some(network), Some(number)) = (caps.get(2), caps.get(3)) {
        format!(
            "UFC on {} {}",
            network.as_str().to_uppercase(),
            number.as_str()
        )
    } else {
        format!("UFC {}", caps.get(4)?.as_str())
    };

    Some(EventMatch {
        display,
        span: whole.range(),
    })
}

/// Classifies the edition. Early prelims must be checked before prelims.
pub(crate) fn edition(text: &str) -> Edition {
    if EARLY_PRELIMS_PATTERN.is_match(text) {
        Edition::EarlyPrelims
    } else if PRELIMS_PATTERN.is_match(text) {
        Edition::Prelims
    } else {
        Edition::MainEvent
    }
}

/// First resolution token in the text.
pub(crate) fn resolution(text: &str) -> Option<Resolution> {
    RESOLUTION_PATTERN
        .find(text)
        .map(|m| Resolution::new(m.as_str()))
}

/// Extracts "Name1 vs Name2". Returns both names or nothing.
pub(crate) fn fighter_names(text: &str, event_span: Option<Range<usize>>) -> Vec<String> {
    // The event token becomes a barrier word so names stop at it.
    let masked = match event_span {
        Some(span) => format!("{} | {}", &text[..span.start], &text[span.end..]),
        None => text.to_string(),
    };
    let words: Vec<&str> = masked.split_whitespace().collect();

    for (idx, word) in words.iter().enumerate() {
        if !word.eq_ignore_ascii_case("vs") {
            continue;
        }

        let left = left_name(&words[..idx]);
        let right = right_name(&words[idx + 1..]);
        if let (Some(left), Some(right)) = (left, right) {
            return vec![left, right];
        }
    }

    Vec::new()
}

fn left_name(words: &[&str]) -> Option<String> {
    let mut taken: Vec<String> = words
        .iter()
        .rev()
        .take_while(|w| is_name_word(w))
        .map(|w| title_case(w))
        .collect();

    if taken.is_empty() {
        return None;
    }
    taken.reverse();
    Some(taken.join(" "))
}

fn right_name(words: &[&str]) -> Option<String> {
    let mut taken: Vec<String> = words
        .iter()
        .take_while(|w| is_name_word(w))
        .map(|w| title_case(w))
        .collect();

    if taken.is_empty() {
        return None;
    }

    // Rematch number, e.g. "Jones vs Gustafsson 2"
    if let Some(next) = words.get(taken.len()) {
        if next.len() == 1 && next.chars().all(|c| c.is_ascii_digit()) {
            taken.push((*next).to_string());
        }
    }

    Some(taken.join(" "))
}

/// A hyphenated word is rejected when any segment is a card keyword, so a
/// tagged edition such as `edition-Main` never joins a name.
fn is_name_word(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word.chars().all(|c| c.is_alphabetic() || c == '-')
        && !word
            .split('-')
            .any(|segment| NON_NAME_WORDS.contains(&segment.to_lowercase().as_str()))
}

/// Title-cases each hyphen-separated segment. Mixed-case words such as
/// "McGregor" are kept as written.
fn title_case(word: &str) -> String {
    let has_upper = word.chars().any(char::is_uppercase);
    let has_lower = word.chars().any(char::is_lowercase);
    if has_upper && has_lower {
        return word.to_string();
    }

    word.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join("-")
}
