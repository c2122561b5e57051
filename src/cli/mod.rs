//! CLI support for mex-lang
//!
//! Provides programmatic access to the `mex` command line operations so they
//! can be embedded in other tools and tested without spawning a process.

mod check;
mod convert;
mod docs;

pub use check::{execute_check, CheckOptions, CheckResult};
pub use convert::{convert_all, read_expressions, ConvertRecord};
pub use docs::{get_doc_category, get_docs_overview, DocCategory};

use std::{fmt, io};

use thiserror::Error;

use crate::error::MexError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Transpilation error
    #[error(transparent)]
    Mex(#[from] MexError),
    /// JSON serialization error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Pass expressions as arguments or pipe them to stdin.")]
    NoInput,
    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'mex docs' to see available categories.")]
    UnknownCategory(String),
    /// `check` produced different LaTeX than expected
    #[error("Output mismatch\n  expected: {expected}\n  actual:   {actual}")]
    Mismatch { expected: String, actual: String },
}

/// A [`MexError`] bundled with the source it points into, for rendering
/// with `miette`.
#[derive(Debug)]
pub struct SourceDiagnostic {
    error: MexError,
    source: String,
}

impl SourceDiagnostic {
    pub fn new(error: MexError, source: impl Into<String>) -> Self {
        SourceDiagnostic {
            error,
            source: source.into(),
        }
    }
}

impl fmt::Display for SourceDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error.message())
    }
}

impl std::error::Error for SourceDiagnostic {}

impl miette::Diagnostic for SourceDiagnostic {
    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn labels<'a>(&'a self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + 'a>> {
        let span = self.error.span()?;
        // Clamp so a span at end of input still points at something
        let start = span.start.min(self.source.len());
        let len = span.len().min(self.source.len() - start);
        let label = miette::LabeledSpan::new(Some(self.error.message()), start, len);
        Some(Box::new(std::iter::once(label)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.source as &dyn miette::SourceCode)
    }
}
