//! Types shared by the encoder and decoder
//!
//! - Public API types (EncodeSettings, DecodeSettings, EncodeReport)
//! - On-screen character tracking (Location, OnScreen)

use crate::diagnostics::Diagnostics;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// PUBLIC API TYPES
// ============================================================================

/// Quote characters written back for `<q>` spans when decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    /// 「 」 corner brackets, as written in the scripts
    #[default]
    Corner,
    /// “ ” Western double quotes
    Western,
}

impl QuoteStyle {
    pub fn open(self) -> char {
        match self {
            QuoteStyle::Corner => '「',
            QuoteStyle::Western => '“',
        }
    }

    pub fn close(self) -> char {
        match self {
            QuoteStyle::Corner => '」',
            QuoteStyle::Western => '”',
        }
    }
}

/// Options for script → XML conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Script identifier attached to diagnostics (usually the file path)
    pub source: Option<String>,
}

impl EncodeSettings {
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

/// Options for XML → script conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeSettings {
    pub quote_style: QuoteStyle,
}

/// Result of script → XML conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeReport {
    /// Complete XML document
    pub xml: String,

    /// Anomalies found along the way (never fatal)
    pub diagnostics: Diagnostics,
}

// ============================================================================
// ON-SCREEN CHARACTERS
// ============================================================================

/// Stage position a character sprite can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Left,
    Center,
    Right,
}

impl Location {
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'l' => Some(Location::Left),
            'c' => Some(Location::Center),
            'r' => Some(Location::Right),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Location::Left => 'l',
            Location::Center => 'c',
            Location::Right => 'r',
        }
    }
}

/// Which character state is displayed at each location
///
/// Entries are kept in the order their locations were last set: setting a
/// location again moves it to the end. That order shows up verbatim in the
/// `char` attribute, so it must not depend on hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnScreen {
    entries: Vec<(Location, String)>,
}

impl OnScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, location: Location, state: impl Into<String>) {
        self.entries.retain(|(loc, _)| *loc != location);
        self.entries.push((location, state.into()));
    }

    pub fn get(&self, location: Location) -> Option<&str> {
        self.entries
            .iter()
            .find(|(loc, _)| *loc == location)
            .map(|(_, state)| state.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &str)> + '_ {
        self.entries.iter().map(|(loc, state)| (*loc, state.as_str()))
    }
}

/// Renders as the `char` attribute value, e.g. `l: mizu, r: sora`
impl fmt::Display for OnScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (location, state)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", location.code(), state)?;
        }
        Ok(())
    }
}
