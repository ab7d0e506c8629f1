//! Script → XML encoder
//!
//! [`XmlFragments`] pulls script rows one at a time and yields the XML
//! document as newline-terminated fragments. It is the only owner of the
//! on-screen characters and the paragraph flag for its run.

use super::classify::{
    analyze_tag, classify, dialogue_ending, is_terminated_tag, DialogueEnding, LineKind,
    TagDirective,
};
use super::serif::{wrap_utterance, BreakMarker};
use super::tags::{
    root_open, BREAK, PARAGRAPH_CLOSE, PARAGRAPH_OPEN, ROOT_CLOSE, XML_DECLARATION,
};
use super::types::{EncodeReport, EncodeSettings, OnScreen};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use quick_xml::escape::escape;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Prologue,
    Body,
    Done,
}

/// Lazy encoder over script rows.
///
/// Rows may carry their `\n` (or `\r\n`) terminator or not; one terminator is
/// dropped before classification. Diagnostics accumulate as rows are pulled
/// and can be read at any point, complete once the iterator is exhausted.
pub struct XmlFragments<I> {
    rows: I,
    source: Option<String>,
    line_number: usize,
    on_scr: OnScreen,
    paragraph_open: bool,
    pending: VecDeque<String>,
    stage: Stage,
    diagnostics: Diagnostics,
}

impl<I, S> XmlFragments<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(rows: impl IntoIterator<IntoIter = I, Item = S>, settings: &EncodeSettings) -> Self {
        Self {
            rows: rows.into_iter(),
            source: settings.source.clone(),
            line_number: 0,
            on_scr: OnScreen::new(),
            paragraph_open: false,
            pending: VecDeque::new(),
            stage: Stage::Prologue,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Characters on screen after the rows pulled so far
    pub fn on_screen(&self) -> &OnScreen {
        &self.on_scr
    }

    fn emit(&mut self, fragment: impl Into<String>) {
        self.pending.push_back(fragment.into());
    }

    fn warn(&mut self, kind: DiagnosticKind, message: String) {
        let diagnostic =
            Diagnostic::new(kind, self.line_number, message).with_source(self.source.as_deref());
        self.diagnostics.add(diagnostic);
    }

    fn encode_row(&mut self, row: &str) {
        self.line_number += 1;
        let row = trim_terminator(row);
        let kind = classify(row);
        log::debug!("line {}: {:?}", self.line_number, kind);

        match kind {
            LineKind::Empty => self.emit(BREAK),
            LineKind::Comment => self.emit(format!("<comment>{}</comment>\n", escape(row))),
            LineKind::Star => self.emit(format!("<star>{}</star>\n", escape(row))),
            LineKind::Tag => self.encode_tag(row),
            LineKind::Dialogue => self.encode_dialogue(row),
        }
    }

    fn encode_tag(&mut self, row: &str) {
        if !is_terminated_tag(row) {
            self.warn(
                DiagnosticKind::UnterminatedBracketTag,
                format!("Row starts with \"[\" but not ended by \"]\": \"{}\"", row),
            );
        }

        match analyze_tag(row) {
            TagDirective::SaveLabel(text) => {
                self.emit(format!("<save-label text=\"{}\"/>\n", escape(text)));
            }
            TagDirective::Opaque {
                character,
                clears_all,
            } => {
                if let Some((location, state)) = character {
                    self.on_scr.set(location, state);
                }
                if clears_all {
                    self.on_scr.clear();
                }
                self.emit(format!("<tag>{}</tag>\n", escape(row)));
            }
        }
    }

    fn encode_dialogue(&mut self, row: &str) {
        if !self.paragraph_open {
            self.emit(PARAGRAPH_OPEN);
            self.paragraph_open = true;
        }

        match dialogue_ending(row) {
            DialogueEnding::SoftLine(body) => {
                let ul = wrap_utterance(body, &self.on_scr, BreakMarker::SoftLine);
                self.emit(ul);
            }
            DialogueEnding::PageBreak(body) => {
                let ul = wrap_utterance(body, &self.on_scr, BreakMarker::PageBreak);
                self.emit(ul);
                self.emit(PARAGRAPH_CLOSE);
                self.paragraph_open = false;
            }
            DialogueEnding::Speaker => {
                let ul = wrap_utterance(row, &self.on_scr, BreakMarker::None);
                self.emit(ul);
            }
            DialogueEnding::Unrecognized => {
                self.warn(
                    DiagnosticKind::UnrecognizedTrailingMarker,
                    format!("Row ends with no known tag: \"{}\"", row),
                );
                let ul = wrap_utterance(row, &self.on_scr, BreakMarker::None);
                self.emit(ul);
            }
        }
    }

    fn finish(&mut self) {
        // a script that does not end on [pg] still has to yield a closed <p>
        if self.paragraph_open {
            self.emit(PARAGRAPH_CLOSE);
            self.paragraph_open = false;
        }
        self.emit(ROOT_CLOSE);
    }
}

impl<I, S> Iterator for XmlFragments<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(fragment) = self.pending.pop_front() {
                return Some(fragment);
            }
            match self.stage {
                Stage::Prologue => {
                    self.emit(XML_DECLARATION);
                    self.emit(root_open());
                    self.stage = Stage::Body;
                }
                Stage::Body => match self.rows.next() {
                    Some(row) => self.encode_row(row.as_ref()),
                    None => {
                        self.finish();
                        self.stage = Stage::Done;
                    }
                },
                Stage::Done => return None,
            }
        }
    }
}

fn trim_terminator(row: &str) -> &str {
    let row = row.strip_suffix('\n').unwrap_or(row);
    row.strip_suffix('\r').unwrap_or(row)
}

/// Encode script rows into a complete XML document
pub fn encode_lines<I, S>(rows: I, settings: &EncodeSettings) -> EncodeReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fragments = XmlFragments::new(rows, settings);
    let xml: String = fragments.by_ref().collect();
    EncodeReport {
        xml,
        diagnostics: fragments.into_diagnostics(),
    }
}

/// Encode a whole script text; lines are split on `\n`
pub fn encode_str(text: &str, settings: &EncodeSettings) -> EncodeReport {
    encode_lines(text.lines(), settings)
}
