//! Diagnostics for script conversion
//!
//! Non-fatal anomalies found while encoding a script are collected here and
//! handed back to the caller next to the primary output. Nothing in this
//! module halts processing; the encoder always takes a best-effort reading of
//! the offending line and carries on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for a diagnostic
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
}

/// The closed set of anomalies the encoder reports
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A control line starts with `[` but does not end with `]`
    UnterminatedBracketTag,
    /// A dialogue line ends with none of `[sl]`, `[pg]`, `[l]`, `[r]`
    UnrecognizedTrailingMarker,
}

impl DiagnosticKind {
    pub fn severity(self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::UnterminatedBracketTag => DiagnosticSeverity::Warning,
            DiagnosticKind::UnrecognizedTrailingMarker => DiagnosticSeverity::Warning,
        }
    }
}

/// A single anomaly, anchored to a 1-based line of the source script
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    /// 1-based line number in the script
    pub line: usize,
    /// Identifier of the script (usually its path), if the caller supplied one
    pub source: Option<String>,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            line,
            source: None,
            message: message.into(),
        }
    }

    /// Attach the script identifier
    pub fn with_source(mut self, source: Option<&str>) -> Self {
        self.source = source.map(str::to_string);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}:{}: {}", source, self.line, self.message),
            None => write!(f, "{} at line {}", self.message, self.line),
        }
    }
}

/// Diagnostics collected over one conversion run
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub marks: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    /// Record a diagnostic and mirror it to the log
    pub fn add(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}", diagnostic);
        self.marks.push(diagnostic);
    }

    /// Merge diagnostics from another run; they were logged when first added
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.marks.extend(diagnostics);
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.marks.iter()
    }

    /// All diagnostics of one kind, in the order they were recorded
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.marks.iter().filter(move |d| d.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}
