//! IET Script Converter
//!
//! Converts IET visual-novel scripts to XML and back without losing a byte.
//! The converter itself lives in [`converters::iet`]; [`batch`] drives it over
//! a directory and [`api`] exposes it to JavaScript.

pub mod api;
pub mod batch;
pub mod converters;
pub mod diagnostics;

// Re-export commonly used types
pub use converters::iet::{
    decode_str, decode_to_text, encode_lines, encode_str, DecodeError, DecodeSettings,
    EncodeReport, EncodeSettings, QuoteStyle, XmlFragments,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }

    log::info!("IET converter WASM module initialized");
}
