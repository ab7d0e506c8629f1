//! IET converter WASM API
//!
//! JavaScript-facing entry points. Everything here is a thin string-to-string
//! wrapper over [`crate::converters::iet`].

pub mod export;

pub use export::{decode_xml, encode_iet, encode_iet_report};
