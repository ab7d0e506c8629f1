//! Format converters
//!
//! This module contains the converter between IET scripts and their XML form.

pub mod iet;

// Re-export for convenience
pub use iet::{
    decode_str,
    decode_to_text,
    encode_lines,
    encode_str,
    DecodeError,
    DecodeSettings,
    EncodeReport,
    EncodeSettings,
    QuoteStyle,
};
