//! Element names and literal substitutions shared by both directions

/// Identifier written into the root element's `converted-by` attribute
pub const CONVERTED_BY: &str = concat!("iet-xml ", env!("CARGO_PKG_VERSION"));

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

pub const PARAGRAPH_OPEN: &str = "<p>\n";
pub const PARAGRAPH_CLOSE: &str = "</p>\n";
pub const BREAK: &str = "<br/>\n";
pub const ROOT_CLOSE: &str = "</iet>\n";

/// Full-width leading space of indented dialogue
pub const IDEOGRAPHIC_SPACE: char = '\u{3000}';

pub const SOFT_LINE_SUFFIX: &str = "[sl]";
pub const PAGE_BREAK_SUFFIX: &str = "[pg]";
pub const CLEAR_ALL_MARKER: &str = "char_all_clear";

/// Speaker-side suffixes a dialogue line may end with
pub const SPEAKER_SIDES: [&str; 2] = ["l", "r"];

/// Element vocabulary of the markup document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Root,
    Paragraph,
    Utterance,
    Quote,
    Break,
    SoftLine,
    PageBreak,
    EmSpace,
    Tag,
    Comment,
    Star,
    SaveLabel,
    Other,
}

impl Element {
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"iet" => Element::Root,
            b"p" => Element::Paragraph,
            b"ul" => Element::Utterance,
            b"q" => Element::Quote,
            b"br" => Element::Break,
            b"sl" => Element::SoftLine,
            b"pg" => Element::PageBreak,
            b"emsp" => Element::EmSpace,
            b"tag" => Element::Tag,
            b"comment" => Element::Comment,
            b"star" => Element::Star,
            b"save-label" => Element::SaveLabel,
            _ => Element::Other,
        }
    }

    #[cfg(test)]
    fn name(self) -> &'static str {
        match self {
            Element::Root => "iet",
            Element::Paragraph => "p",
            Element::Utterance => "ul",
            Element::Quote => "q",
            Element::Break => "br",
            Element::SoftLine => "sl",
            Element::PageBreak => "pg",
            Element::EmSpace => "emsp",
            Element::Tag => "tag",
            Element::Comment => "comment",
            Element::Star => "star",
            Element::SaveLabel => "save-label",
            Element::Other => "",
        }
    }

    /// Literal a marker element stands for in the script
    pub fn substitution(self) -> Option<&'static str> {
        match self {
            Element::EmSpace => Some("\u{3000}"),
            Element::SoftLine => Some(SOFT_LINE_SUFFIX),
            Element::PageBreak => Some(PAGE_BREAK_SUFFIX),
            _ => None,
        }
    }

    /// Elements whose end completes one script line
    pub fn ends_line(self) -> bool {
        matches!(
            self,
            Element::Utterance | Element::Comment | Element::Star | Element::Tag
        )
    }
}

/// Root start tag, emitted right after the XML declaration
pub fn root_open() -> String {
    format!("<iet converted-by=\"{}\">\n", CONVERTED_BY)
}

/// Canonical script form of a save-label directive
pub fn save_label_line(text: &str) -> String {
    format!("[SAVELABLE TEXT=\"{}\"]", text)
}
