//! Line classification for IET scripts
//!
//! Every script line falls into exactly one [`LineKind`]. The kinds are tried
//! in the fixed order of [`RULES`]; the first predicate that accepts the line
//! wins and anything left over is dialogue.

use super::tags::{CLEAR_ALL_MARKER, PAGE_BREAK_SUFFIX, SOFT_LINE_SUFFIX, SPEAKER_SIDES};
use super::types::Location;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SAVE_LABEL: Regex = Regex::new(r#"^\[SAVELABLE TEXT="(.+)"\]$"#).unwrap();
    static ref CHARACTER_STATE: Regex =
        Regex::new(r"\[char_([clr]).*?st_([a-z]+?)\d.*\]").unwrap();
    static ref TRAILING_MARKER: Regex = Regex::new(r"^.+\[([a-z]+)\]$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Comment,
    Star,
    Tag,
    Dialogue,
}

/// One row of the classification table
pub struct Rule {
    pub kind: LineKind,
    pub matches: fn(&str) -> bool,
}

fn is_empty(line: &str) -> bool {
    line.is_empty()
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//")
}

fn is_star(line: &str) -> bool {
    line.starts_with('*')
}

fn is_tag(line: &str) -> bool {
    line.starts_with('[')
}

/// Classification rules in priority order
pub const RULES: [Rule; 4] = [
    Rule {
        kind: LineKind::Empty,
        matches: is_empty,
    },
    Rule {
        kind: LineKind::Comment,
        matches: is_comment,
    },
    Rule {
        kind: LineKind::Star,
        matches: is_star,
    },
    Rule {
        kind: LineKind::Tag,
        matches: is_tag,
    },
];

pub fn classify(line: &str) -> LineKind {
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .map_or(LineKind::Dialogue, |rule| rule.kind)
}

/// What a control line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagDirective<'a> {
    /// `[SAVELABLE TEXT="..."]`, carrying the raw payload
    SaveLabel(&'a str),
    /// Any other bracketed line, emitted verbatim after its side effects
    Opaque {
        character: Option<(Location, &'a str)>,
        clears_all: bool,
    },
}

/// Read a control line; the character update and the clear can both apply
pub fn analyze_tag(line: &str) -> TagDirective<'_> {
    if let Some(caps) = SAVE_LABEL.captures(line) {
        if let Some(payload) = caps.get(1) {
            return TagDirective::SaveLabel(payload.as_str());
        }
    }

    let character = CHARACTER_STATE.captures(line).and_then(|caps| {
        let location = caps.get(1)?.as_str().chars().next().and_then(Location::from_code)?;
        Some((location, caps.get(2)?.as_str()))
    });

    TagDirective::Opaque {
        character,
        clears_all: line.contains(CLEAR_ALL_MARKER),
    }
}

pub fn is_terminated_tag(line: &str) -> bool {
    line.ends_with(']')
}

/// How a dialogue line ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueEnding<'a> {
    /// `[sl]`; holds the text before the suffix
    SoftLine(&'a str),
    /// `[pg]`; holds the text before the suffix
    PageBreak(&'a str),
    /// `[l]` or `[r]`, kept as part of the text
    Speaker,
    Unrecognized,
}

pub fn dialogue_ending(line: &str) -> DialogueEnding<'_> {
    if let Some(body) = line.strip_suffix(SOFT_LINE_SUFFIX) {
        return DialogueEnding::SoftLine(body);
    }
    if let Some(body) = line.strip_suffix(PAGE_BREAK_SUFFIX) {
        return DialogueEnding::PageBreak(body);
    }
    let speaker = TRAILING_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .is_some_and(|side| SPEAKER_SIDES.contains(&side.as_str()));
    if speaker {
        DialogueEnding::Speaker
    } else {
        DialogueEnding::Unrecognized
    }
}
