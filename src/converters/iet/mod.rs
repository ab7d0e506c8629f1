//! IET script ⇄ XML converter
//!
//! Converts line-oriented IET visual-novel scripts into an XML document and
//! back. Decoding what was encoded gives the original script byte for byte
//! (for newline-terminated input), blank lines and quote punctuation included.
//!
//! # Overview
//!
//! ```text
//! script rows ─▶ classify ─▶ XmlFragments ─▶ XML fragments   (encode)
//! XML text ─▶ MarkupEvents ─▶ DecoderState ─▶ script lines   (decode)
//! ```
//!
//! Encoding never fails; odd lines are converted anyway and reported through
//! [`Diagnostics`](crate::diagnostics::Diagnostics). Decoding fails as a whole
//! with [`DecodeError::MalformedDocument`] when the XML is not well-formed.
//!
//! # Basic Usage
//!
//! ```
//! use iet_xml::converters::iet::{decode_to_text, encode_str, DecodeSettings, EncodeSettings};
//!
//! let script = "[char_l_st_mizu01]\n「やあ」[l]\n「あれ？」[pg]\n";
//! let report = encode_str(script, &EncodeSettings::default());
//! assert!(report.xml.contains("<ul char=\"l: mizu\">「やあ」[l]</ul>"));
//! assert!(report.diagnostics.is_empty());
//!
//! let restored = decode_to_text(&report.xml, &DecodeSettings::default()).unwrap();
//! assert_eq!(restored, script);
//! ```

pub mod classify;
pub mod decoder;
pub mod encoder;
pub mod errors;
pub mod events;
pub mod serif;
pub mod tags;
pub mod types;

pub use decoder::{decode_events, decode_str, decode_to_text, lines_to_text, DecoderState};
pub use encoder::{encode_lines, encode_str, XmlFragments};
pub use errors::{DecodeError, DecodeResult};
pub use events::{MarkupEvent, MarkupEvents};
pub use types::{
    DecodeSettings, EncodeReport, EncodeSettings, Location, OnScreen, QuoteStyle,
};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
