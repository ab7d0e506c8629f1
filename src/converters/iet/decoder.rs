//! XML → script decoder
//!
//! [`DecoderState`] holds the partial line being rebuilt. Feeding it one
//! [`MarkupEvent`] at a time either extends that line or hands back a
//! finished script line; the driver functions below only pump events from
//! [`MarkupEvents`] into it and collect what comes out.

use super::errors::DecodeResult;
use super::events::{MarkupEvent, MarkupEvents};
use super::tags::{save_label_line, Element};
use super::types::{DecodeSettings, QuoteStyle};
use std::mem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderState {
    quote_style: QuoteStyle,
    buffer: String,
}

impl DecoderState {
    pub fn new(quote_style: QuoteStyle) -> Self {
        Self {
            quote_style,
            buffer: String::new(),
        }
    }

    /// Line under construction
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Apply one event; returns a script line when the event completes one
    pub fn apply(&mut self, event: &MarkupEvent) -> Option<String> {
        match event {
            MarkupEvent::Start {
                element: Element::Quote,
                ..
            } => self.buffer.push(self.quote_style.open()),
            MarkupEvent::Start {
                element: Element::SaveLabel,
                text,
            } => {
                // written straight out, the buffered line is left alone
                return Some(save_label_line(text.as_deref().unwrap_or_default()));
            }
            MarkupEvent::Start { element, .. } => {
                if let Some(literal) = element.substitution() {
                    self.buffer.push_str(literal);
                }
            }
            MarkupEvent::Text(content) => {
                // newlines between elements are layout, not script text
                if content != "\n" {
                    self.buffer.push_str(content);
                }
            }
            MarkupEvent::End(Element::Break) => return Some(String::new()),
            MarkupEvent::End(Element::Quote) => self.buffer.push(self.quote_style.close()),
            MarkupEvent::End(element) if element.ends_line() => return Some(self.flush()),
            MarkupEvent::End(Element::Paragraph) if !self.buffer.is_empty() => {
                return Some(self.flush());
            }
            MarkupEvent::End(_) => {}
        }
        None
    }

    fn flush(&mut self) -> String {
        let mut line = mem::take(&mut self.buffer);
        if line.ends_with('\n') {
            line.pop();
        }
        log::debug!("flushed line: {:?}", line);
        line
    }
}

/// Run a stream of events through a fresh decoder
pub fn decode_events<I>(events: I, settings: &DecodeSettings) -> DecodeResult<Vec<String>>
where
    I: IntoIterator<Item = DecodeResult<MarkupEvent>>,
{
    let mut state = DecoderState::new(settings.quote_style);
    let mut lines = Vec::new();

    for event in events {
        if let Some(line) = state.apply(&event?) {
            lines.push(line);
        }
    }

    Ok(lines)
}

/// Decode an XML document into script lines (without terminators)
pub fn decode_str(xml: &str, settings: &DecodeSettings) -> DecodeResult<Vec<String>> {
    decode_events(MarkupEvents::new(xml), settings)
}

/// Decode an XML document into script text, one `\n` after every line
pub fn decode_to_text(xml: &str, settings: &DecodeSettings) -> DecodeResult<String> {
    Ok(lines_to_text(&decode_str(xml, settings)?))
}

pub fn lines_to_text<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::iet::errors::DecodeError;

    fn start(element: Element) -> MarkupEvent {
        MarkupEvent::start(element)
    }

    fn text(content: &str) -> MarkupEvent {
        MarkupEvent::Text(content.to_string())
    }

    #[test]
    fn test_utterance_with_quote_and_page_break() {
        let mut state = DecoderState::new(QuoteStyle::Corner);
        let events = [
            start(Element::Utterance),
            start(Element::Quote),
            text("あれ？"),
            MarkupEvent::End(Element::Quote),
            start(Element::PageBreak),
            MarkupEvent::End(Element::PageBreak),
        ];
        for event in &events {
            assert_eq!(state.apply(event), None);
        }
        assert_eq!(state.buffer(), "「あれ？」[pg]");

        assert_eq!(
            state.apply(&MarkupEvent::End(Element::Utterance)),
            Some("「あれ？」[pg]".to_string())
        );
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn test_western_quotes() {
        let mut state = DecoderState::new(QuoteStyle::Western);
        state.apply(&start(Element::Quote));
        state.apply(&text("hi"));
        state.apply(&MarkupEvent::End(Element::Quote));
        assert_eq!(state.buffer(), "“hi”");
    }

    #[test]
    fn test_marker_substitutions() {
        let mut state = DecoderState::default();
        state.apply(&start(Element::EmSpace));
        state.apply(&text("そして"));
        state.apply(&start(Element::SoftLine));
        assert_eq!(state.buffer(), "　そして[sl]");
    }

    #[test]
    fn test_break_and_save_label_bypass_buffer() {
        let mut state = DecoderState::default();
        state.apply(&text("partial"));

        assert_eq!(state.apply(&start(Element::Break)), None);
        assert_eq!(state.apply(&MarkupEvent::End(Element::Break)), Some(String::new()));

        let label = MarkupEvent::Start {
            element: Element::SaveLabel,
            text: Some("ch1".to_string()),
        };
        assert_eq!(
            state.apply(&label),
            Some("[SAVELABLE TEXT=\"ch1\"]".to_string())
        );
        assert_eq!(state.buffer(), "partial");
    }

    #[test]
    fn test_lone_newline_text_is_ignored() {
        let mut state = DecoderState::default();
        state.apply(&text("\n"));
        assert_eq!(state.buffer(), "");

        state.apply(&text("\n\n"));
        assert_eq!(state.buffer(), "\n\n");
    }

    #[test]
    fn test_flush_drops_one_trailing_newline() {
        let mut state = DecoderState::default();
        state.apply(&text("//x\n"));
        assert_eq!(
            state.apply(&MarkupEvent::End(Element::Comment)),
            Some("//x".to_string())
        );
    }

    #[test]
    fn test_paragraph_end_flushes_only_leftovers() {
        let mut state = DecoderState::default();
        assert_eq!(state.apply(&MarkupEvent::End(Element::Paragraph)), None);

        state.apply(&text("stray"));
        assert_eq!(
            state.apply(&MarkupEvent::End(Element::Paragraph)),
            Some("stray".to_string())
        );
    }

    #[test]
    fn test_root_and_unknown_elements_have_no_effect() {
        let mut state = DecoderState::default();
        assert_eq!(state.apply(&start(Element::Root)), None);
        assert_eq!(state.apply(&start(Element::Other)), None);
        assert_eq!(state.apply(&MarkupEvent::End(Element::Other)), None);
        assert_eq!(state.apply(&MarkupEvent::End(Element::Root)), None);
        assert_eq!(state.buffer(), "");
    }

    #[test]
    fn test_decode_str_full_document() {
        let xml = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
                   <iet converted-by=\"test\">\n\
                   <br/>\n\
                   <comment>//note</comment>\n\
                   <p>\n\
                   <ul char=\"l: mizu\"><q>あれ？</q><pg/></ul>\n\
                   </p>\n\
                   </iet>\n";
        let lines = decode_str(xml, &DecodeSettings::default()).unwrap();
        assert_eq!(lines, vec!["", "//note", "「あれ？」[pg]"]);
    }

    #[test]
    fn test_decode_to_text_terminates_every_line() {
        let xml = "<iet>\n<br/>\n<tag>[bgm]</tag>\n</iet>\n";
        let text = decode_to_text(xml, &DecodeSettings::default()).unwrap();
        assert_eq!(text, "\n[bgm]\n");
    }

    #[test]
    fn test_malformed_document_aborts() {
        let result = decode_str("<iet><ul>x</iet>", &DecodeSettings::default());
        assert!(matches!(result, Err(DecodeError::MalformedDocument(_))));
    }

    #[test]
    fn test_lines_to_text() {
        assert_eq!(lines_to_text::<&str>(&[]), "");
        assert_eq!(lines_to_text(&["a", "", "b"]), "a\n\nb\n");
    }
}
