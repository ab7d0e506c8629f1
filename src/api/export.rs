//! Conversion operations for the WASM API
//!
//! This module exposes the IET ⇄ XML converter to JavaScript:
//! - encodeIet: script text → XML document
//! - encodeIetReport: script text → JSON `{ xml, diagnostics }`
//! - decodeXml: XML document → script text

use crate::converters::iet::{
    decode_to_text, encode_str, DecodeSettings, EncodeSettings, QuoteStyle,
};
use wasm_bindgen::prelude::*;

// ============================================================================
// Script → XML
// ============================================================================

/// Convert an IET script to XML
///
/// Diagnostics are logged to the console; use `encodeIetReport` to receive
/// them as data.
///
/// # Arguments
/// * `text` - Script contents
/// * `source` - Optional script name attached to diagnostics
#[wasm_bindgen(js_name = encodeIet)]
pub fn encode_iet(text: &str, source: Option<String>) -> String {
    log::info!("encodeIet called ({} bytes)", text.len());
    encode_str(text, &encode_settings(source)).xml
}

/// Convert an IET script to XML, returning `{ "xml": ..., "diagnostics": ... }` as JSON
#[wasm_bindgen(js_name = encodeIetReport)]
pub fn encode_iet_report(text: &str, source: Option<String>) -> Result<String, JsValue> {
    log::info!("encodeIetReport called ({} bytes)", text.len());
    encode_report_json(text, source).map_err(|e| {
        log::error!("Report serialization error: {}", e);
        JsValue::from_str(&format!("Report serialization error: {}", e))
    })
}

// ============================================================================
// XML → Script
// ============================================================================

/// Convert an XML document back to IET script text
///
/// # Arguments
/// * `xml` - Document produced by `encodeIet`
/// * `western_quotes` - Write `<q>` spans as “ ” instead of 「 」
#[wasm_bindgen(js_name = decodeXml)]
pub fn decode_xml(xml: &str, western_quotes: bool) -> Result<String, JsValue> {
    log::info!("decodeXml called ({} bytes)", xml.len());
    decode_to_text(xml, &decode_settings(western_quotes)).map_err(|e| {
        log::error!("{}", e);
        JsValue::from_str(&e.to_string())
    })
}

fn encode_settings(source: Option<String>) -> EncodeSettings {
    EncodeSettings { source }
}

fn decode_settings(western_quotes: bool) -> DecodeSettings {
    DecodeSettings {
        quote_style: if western_quotes {
            QuoteStyle::Western
        } else {
            QuoteStyle::Corner
        },
    }
}

pub(crate) fn encode_report_json(text: &str, source: Option<String>) -> serde_json::Result<String> {
    let report = encode_str(text, &encode_settings(source));
    serde_json::to_string(&report)
}
