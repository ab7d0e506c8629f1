//! Batch conversion of script directories
//!
//! Encodes every `*.iet` file of a directory to a sibling `.xml`, then
//! decodes every `*.xml` file to a sibling `.iet.restored`. Reads tolerate a
//! UTF-8 byte-order mark; `.xml` files are written without one and
//! `.iet.restored` files with one, matching how the scripts are shipped.

use crate::converters::iet::{
    decode_to_text, encode_lines, DecodeError, DecodeSettings, EncodeSettings, QuoteStyle,
};
use crate::diagnostics::Diagnostics;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BOM: char = '\u{feff}';

pub const SCRIPT_EXTENSION: &str = "iet";
pub const XML_EXTENSION: &str = "xml";
pub const RESTORED_EXTENSION: &str = "iet.restored";

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Decode { path: PathBuf, source: DecodeError },
}

impl BatchError {
    fn io(path: &Path, source: io::Error) -> Self {
        BatchError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BatchError>;

/// Configuration for one batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    pub directory: PathBuf,
    pub quote_style: QuoteStyle,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            quote_style: QuoteStyle::Corner,
        }
    }
}

/// What a batch run did
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// `.xml` files written
    pub encoded: Vec<PathBuf>,
    /// `.iet.restored` files written
    pub decoded: Vec<PathBuf>,
    /// Diagnostics from all encoded scripts
    pub diagnostics: Diagnostics,
    /// Files that could not be converted; the run carries on past them
    pub failures: Vec<BatchError>,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read a text file, dropping a leading byte-order mark
pub fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).map_err(|e| BatchError::io(path, e))?;
    Ok(match text.strip_prefix(BOM) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

/// Files in `dir` with the given extension, sorted by path
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| BatchError::io(dir, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| BatchError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

/// Encode one script to its sibling `.xml`
pub fn encode_file(path: &Path) -> Result<(PathBuf, Diagnostics)> {
    let text = read_text(path)?;
    let source = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let settings = EncodeSettings::with_source(source.display().to_string());

    let report = encode_lines(text.lines(), &settings);
    let output = path.with_extension(XML_EXTENSION);
    fs::write(&output, report.xml).map_err(|e| BatchError::io(&output, e))?;

    log::info!("encoded {} -> {}", path.display(), output.display());
    Ok((output, report.diagnostics))
}

/// Decode one XML document to its sibling `.iet.restored`
pub fn decode_file(path: &Path, quote_style: QuoteStyle) -> Result<PathBuf> {
    let xml = read_text(path)?;
    let text = decode_to_text(&xml, &DecodeSettings { quote_style }).map_err(|source| {
        BatchError::Decode {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let output = path.with_extension(RESTORED_EXTENSION);
    let mut contents = String::with_capacity(text.len() + BOM.len_utf8());
    contents.push(BOM);
    contents.push_str(&text);
    fs::write(&output, contents).map_err(|e| BatchError::io(&output, e))?;

    log::info!("decoded {} -> {}", path.display(), output.display());
    Ok(output)
}

/// Encode all scripts, then decode all XML documents, in `settings.directory`.
///
/// Directory listing errors abort the run. Per-file errors are collected in
/// the summary and the remaining files are still processed.
pub fn run(settings: &BatchSettings) -> Result<BatchSummary> {
    let mut summary = BatchSummary::default();

    for script in discover(&settings.directory, SCRIPT_EXTENSION)? {
        match encode_file(&script) {
            Ok((output, diagnostics)) => {
                summary.encoded.push(output);
                summary.diagnostics.extend(diagnostics);
            }
            Err(e) => {
                log::error!("{}", e);
                summary.failures.push(e);
            }
        }
    }

    for xml in discover(&settings.directory, XML_EXTENSION)? {
        match decode_file(&xml, settings.quote_style) {
            Ok(output) => summary.decoded.push(output),
            Err(e) => {
                log::error!("{}", e);
                summary.failures.push(e);
            }
        }
    }

    log::info!(
        "{} encoded, {} decoded, {} diagnostic(s), {} failure(s)",
        summary.encoded.len(),
        summary.decoded.len(),
        summary.diagnostics.len(),
        summary.failures.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text_strips_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.iet");
        fs::write(&path, "\u{feff}//a\n").unwrap();

        assert_eq!(read_text(&path).unwrap(), "//a\n");
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_text(&dir.path().join("missing.iet"));
        assert!(matches!(result, Err(BatchError::Io { .. })));
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.iet", "a.iet", "a.xml", "notes.txt", "c.iet.restored"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.iet")).unwrap();

        let found = discover(dir.path(), SCRIPT_EXTENSION).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.iet", "b.iet"]);
    }

    #[test]
    fn test_output_paths() {
        assert_eq!(
            Path::new("dir/ch1.iet").with_extension(XML_EXTENSION),
            PathBuf::from("dir/ch1.xml")
        );
        assert_eq!(
            Path::new("dir/ch1.xml").with_extension(RESTORED_EXTENSION),
            PathBuf::from("dir/ch1.iet.restored")
        );
    }
}
