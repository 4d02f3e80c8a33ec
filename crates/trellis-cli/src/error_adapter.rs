//! Error adapter for converting TrellisError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. JSON parse errors
//! carry their source document, so they are rendered with a labeled snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use serde_json::error::Category;

use trellis::TrellisError;

/// Adapter for a JSON parse error with its source document.
pub struct ParseAdapter<'a> {
    err: &'a serde_json::Error,
    src: &'a str,
}

impl<'a> ParseAdapter<'a> {
    pub fn new(err: &'a serde_json::Error, src: &'a str) -> Self {
        Self { err, src }
    }

    /// Byte span of the character serde_json stopped at.
    pub fn span(&self) -> SourceSpan {
        let offset = line_column_offset(self.src, self.err.line(), self.err.column());
        let len = self.src[offset..].chars().next().map_or(0, char::len_utf8);
        SourceSpan::new(offset.into(), len)
    }
}

impl fmt::Debug for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid diagram document")
    }
}

impl std::error::Error for ParseAdapter<'_> {}

impl MietteDiagnostic for ParseAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("trellis::parse"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err.classify() {
            Category::Syntax => "check for a missing comma, quote or bracket",
            Category::Data => "a field has the wrong type; ids, labels and types are strings",
            Category::Eof => "the document ends before every object and array is closed",
            Category::Io => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let message = strip_position(&self.err.to_string());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some(message),
            self.span(),
        ))))
    }
}

/// Adapter for non-diagnostic [`TrellisError`] variants.
pub struct ErrorAdapter<'a>(pub &'a TrellisError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            TrellisError::Io(_) => "trellis::io",
            TrellisError::Transport { .. } => "trellis::transport",
            TrellisError::Parse { .. } => "trellis::parse",
            TrellisError::Config(_) => "trellis::config",
            TrellisError::Export(_) => "trellis::export",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with source location information.
    Parse(ParseAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Parse(p) => fmt::Display::fmt(p, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Parse(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Parse(p) => p.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Parse(p) => p.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Parse(p) => p.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`TrellisError`] into a reportable error.
pub fn to_reportable(err: &TrellisError) -> Reportable<'_> {
    match err {
        TrellisError::Parse { err: json_err, src } => {
            Reportable::Parse(ParseAdapter::new(json_err, src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Byte offset of a 1-based line and column, clamped to the source.
///
/// serde_json reports column 0 when it fails before consuming a character on
/// the line.
fn line_column_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let line_text = src[line_start..].split('\n').next().unwrap_or_default();
    let in_line = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(line_text.len(), |(index, _)| index);
    line_start + in_line
}

/// serde_json appends " at line L column C"; the snippet already shows it.
fn strip_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(index) => message[..index].to_string(),
        None => message.to_string(),
    }
}
