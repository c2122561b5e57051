//! Errors raised while transpiling MeX.
//!
//! Every failure is fatal for the call that raised it. A [`MexError`] carries
//! the message and, where the stage knows it, the byte span of the source
//! that caused it.

use std::fmt;

use thiserror::Error;

use crate::ast::Span;

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An `l{{`, `t{{` or `m{{` region never found its closing marker
    #[error("Unclosed range mode: {delimiter}")]
    UnclosedRangeMode { delimiter: String },

    /// A token that the grammar does not allow at this position
    #[error("Unexpected token: {found}")]
    UnexpectedToken { found: String },

    /// A group was opened but its closer is missing
    #[error("Expected closing '{expected}'")]
    ExpectedClosingDelimiter { expected: &'static str },

    /// `^`, `_` or `__` was not followed by a usable argument
    #[error("Expected script argument, got {found}")]
    ExpectedScriptArgument { found: String },

    /// `sqrt` without its parenthesized radicand
    #[error("sqrt requires parentheses for radicand")]
    SqrtRequiresParentheses,

    /// A special function called with an unsupported number of arguments
    #[error("{function}() requires {expected}, got {got}")]
    InvalidArity {
        function: String,
        expected: &'static str,
        got: usize,
    },

    /// Input nested deeper than the configured limit
    #[error("Expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    /// A node whose shape the parser never produces
    #[error("Invalid {kind} node: {reason}")]
    InvalidNode {
        kind: &'static str,
        reason: &'static str,
    },
}

/// A transpilation failure: message plus optional source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MexError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
}

impl MexError {
    pub fn new(kind: ErrorKind, span: Option<Span>) -> Self {
        MexError { kind, span }
    }

    pub fn at(kind: ErrorKind, span: Span) -> Self {
        MexError::new(kind, Some(span))
    }

    /// Error without a source location.
    pub fn bare(kind: ErrorKind) -> Self {
        MexError::new(kind, None)
    }

    pub fn unclosed_range_mode(delimiter: impl Into<String>, span: Span) -> Self {
        MexError::at(
            ErrorKind::UnclosedRangeMode {
                delimiter: delimiter.into(),
            },
            span,
        )
    }

    pub fn unexpected_token(found: impl Into<String>, span: Span) -> Self {
        MexError::at(
            ErrorKind::UnexpectedToken {
                found: found.into(),
            },
            span,
        )
    }

    pub fn invalid_arity(function: &str, expected: &'static str, got: usize) -> Self {
        MexError::bare(ErrorKind::InvalidArity {
            function: function.to_string(),
            expected,
            got,
        })
    }

    /// The message without location.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }
}

impl fmt::Display for MexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {}", self.kind, span),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for MexError {}

pub type MexResult<T> = Result<T, MexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_span() {
        let err = MexError::unclosed_range_mode("l{{", Span::new(0, 13));
        assert_eq!(err.to_string(), "Unclosed range mode: l{{ at 0-13");
        assert_eq!(err.message(), "Unclosed range mode: l{{");
    }

    #[test]
    fn test_display_without_span() {
        let err = MexError::invalid_arity("lim", "3 arguments", 2);
        assert_eq!(err.to_string(), "lim() requires 3 arguments, got 2");
        assert_eq!(err.span(), None);
    }
}
