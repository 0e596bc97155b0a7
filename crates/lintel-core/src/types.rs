//! Core types for diagnostic findings.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::syntax::Span;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location from a file path and a tree [`Span`].
    #[must_use]
    pub fn from_span(file: PathBuf, span: Span) -> Self {
        Self::new(file, span.line, span.column)
    }

    /// Sets the byte offset and length for this location.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// A diagnostic produced by a rule.
///
/// Findings are a normal, expected result of analysis, not errors. They are
/// immutable once created; the session channel owns them until the consumer
/// takes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Primary location of the diagnosed code.
    pub location: Location,
    /// Short category label (e.g. `arg-order`).
    pub category: String,
    /// Confidence in the diagnosis, in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable message.
    pub message: String,
    /// Optional documentation reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Finding {
    /// Creates a new finding.
    #[must_use]
    pub fn new(
        location: Location,
        category: impl Into<String>,
        confidence: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            category: category.into(),
            confidence,
            message: message.into(),
            url: None,
        }
    }

    /// Adds a documentation reference to this finding.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.category,
            self.message
        )?;
        if let Some(url) = &self.url {
            write!(f, " (see: {url})")?;
        }
        Ok(())
    }
}

/// Converts a Finding to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Finding> for FindingDiagnostic {
    fn from(finding: &Finding) -> Self {
        Self {
            message: finding.message.clone(),
            help: finding.url.as_ref().map(|url| format!("see {url}")),
            span: SourceSpan::from((finding.location.offset, finding.location.length)),
            label_message: finding.category.clone(),
        }
    }
}
