//! Structural events over an XML document
//!
//! Wraps a quick-xml reader and yields only what the decoder cares about:
//! element starts and ends (self-closing elements yield both), and unescaped
//! text inside the root element. Well-formedness problems the reader lets
//! through (unclosed elements at end of input, missing root, content after
//! the root) are reported here as well.

use super::errors::{DecodeError, DecodeResult};
use super::tags::Element;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start {
        element: Element,
        /// `text` attribute, read for `<save-label>` only
        text: Option<String>,
    },
    Text(String),
    End(Element),
}

impl MarkupEvent {
    pub fn start(element: Element) -> Self {
        MarkupEvent::Start {
            element,
            text: None,
        }
    }
}

pub struct MarkupEvents<'x> {
    reader: Reader<&'x [u8]>,
    depth: usize,
    seen_root: bool,
    pending_end: Option<Element>,
    done: bool,
}

impl<'x> MarkupEvents<'x> {
    pub fn new(xml: &'x str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);
        reader.check_end_names(true);

        Self {
            reader,
            depth: 0,
            seen_root: false,
            pending_end: None,
            done: false,
        }
    }

    fn fail(&mut self, message: impl Into<String>) -> Option<DecodeResult<MarkupEvent>> {
        self.done = true;
        let position = self.reader.buffer_position();
        Some(Err(DecodeError::malformed(format!(
            "{} at position {}",
            message.into(),
            position
        ))))
    }

    fn open(&mut self, e: &BytesStart<'_>) -> DecodeResult<MarkupEvent> {
        if self.depth == 0 {
            if self.seen_root {
                return Err(DecodeError::malformed(format!(
                    "junk after document element at position {}",
                    self.reader.buffer_position()
                )));
            }
            self.seen_root = true;
        }

        for attr in e.attributes() {
            attr.map_err(|err| DecodeError::malformed(format!("bad attribute: {}", err)))?;
        }

        let element = Element::from_name(e.name().as_ref());
        let text = match element {
            Element::SaveLabel => Some(text_attribute(e)?),
            _ => None,
        };
        Ok(MarkupEvent::Start { element, text })
    }
}

impl Iterator for MarkupEvents<'_> {
    type Item = DecodeResult<MarkupEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(element) = self.pending_end.take() {
            return Some(Ok(MarkupEvent::End(element)));
        }

        while !self.done {
            let position = self.reader.buffer_position();
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    self.done = true;
                    return Some(Err(DecodeError::from_xml(err, position)));
                }
            };

            match event {
                Event::Start(e) => {
                    let started = self.open(&e);
                    if started.is_err() {
                        self.done = true;
                    }
                    self.depth += 1;
                    return Some(started);
                }
                Event::Empty(e) => {
                    let started = self.open(&e);
                    match &started {
                        Ok(MarkupEvent::Start { element, .. }) => self.pending_end = Some(*element),
                        _ => self.done = true,
                    }
                    return Some(started);
                }
                Event::End(e) => {
                    if self.depth == 0 {
                        return self.fail("unexpected closing tag");
                    }
                    self.depth -= 1;
                    return Some(Ok(MarkupEvent::End(Element::from_name(e.name().as_ref()))));
                }
                Event::Text(e) => {
                    let text = match e.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(err) => {
                            self.done = true;
                            return Some(Err(DecodeError::from_xml(err, position)));
                        }
                    };
                    if self.depth > 0 {
                        return Some(Ok(MarkupEvent::Text(text)));
                    }
                    if !text.trim().is_empty() {
                        return self.fail("text outside the document element");
                    }
                }
                Event::CData(e) => {
                    let text = match std::str::from_utf8(&e) {
                        Ok(text) => text.to_string(),
                        Err(err) => return self.fail(format!("invalid UTF-8 in CDATA: {}", err)),
                    };
                    if self.depth == 0 {
                        return self.fail("CDATA outside the document element");
                    }
                    return Some(Ok(MarkupEvent::Text(text)));
                }
                Event::Eof => {
                    self.done = true;
                    if self.depth > 0 {
                        return self.fail(format!("{} unclosed element(s) at end of input", self.depth));
                    }
                    if !self.seen_root {
                        return self.fail("no element found");
                    }
                    return None;
                }
                // declaration, comments, processing instructions, doctype
                _ => {}
            }
        }
        None
    }
}

fn text_attribute(e: &BytesStart<'_>) -> DecodeResult<String> {
    let attr = e
        .try_get_attribute("text")
        .map_err(|err| DecodeError::malformed(format!("bad attribute: {}", err)))?
        .ok_or_else(|| DecodeError::malformed("<save-label> without a text attribute"))?;
    let value = attr
        .unescape_value()
        .map_err(|err| DecodeError::malformed(format!("bad text attribute: {}", err)))?;
    Ok(value.into_owned())
}
