//! Dialogue formatting: serif quoting and `<ul>` wrapping

use super::tags::IDEOGRAPHIC_SPACE;
use super::types::OnScreen;
use quick_xml::escape::escape;

const EMSP: &str = "<emsp/>";

/// Break marker placed at the end of an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakMarker {
    None,
    SoftLine,
    PageBreak,
}

impl BreakMarker {
    pub fn markup(self) -> &'static str {
        match self {
            BreakMarker::None => "",
            BreakMarker::SoftLine => "<sl/>",
            BreakMarker::PageBreak => "<pg/>",
        }
    }
}

/// Generate `<emsp/>` and `<q></q>` for an already escaped serif.
///
/// `「あれ？」` becomes `<q>あれ？</q>`; a leading full-width space becomes
/// `<emsp/>`. Only one quote pair spanning the whole text is recognized,
/// so an indented quote keeps its literal brackets.
pub fn format_serif(serif: &str) -> String {
    let serif = match serif.strip_prefix(IDEOGRAPHIC_SPACE) {
        Some(rest) => format!("{}{}", EMSP, rest),
        None => serif.to_string(),
    };

    match serif
        .strip_prefix('「')
        .and_then(|inner| inner.strip_suffix('」'))
    {
        Some(inner) => format!("<q>{}</q>", inner),
        None => serif,
    }
}

/// Wrap one dialogue line (break suffix already removed) into an utterance.
///
/// `「あれ？」` with `l: mizu` on screen and a page break gives
/// `<ul char="l: mizu"><q>あれ？</q><pg/></ul>` plus a newline.
pub fn wrap_utterance(row: &str, on_scr: &OnScreen, marker: BreakMarker) -> String {
    let char_attr = if on_scr.is_empty() {
        String::new()
    } else {
        format!(" char=\"{}\"", escape(&on_scr.to_string()))
    };

    format!(
        "<ul{}>{}{}</ul>\n",
        char_attr,
        format_serif(&escape(row)),
        marker.markup()
    )
}
