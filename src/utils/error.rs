//! Error handling for math extraction and restoration
//!
//! This module provides a unified error type and result type for the
//! restoration side, plus the non-fatal warnings reported while extracting.

use std::fmt;

use thiserror::Error;

/// Math store error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// Restoration was requested before any math was extracted
    #[error("math store not initialized: remove_math must run before replace_math")]
    StoreNotInitialized,
    /// Restoration was requested a second time for the same document
    #[error("math store already consumed by an earlier replace_math call")]
    StoreConsumed,
    /// A new document was extracted while the previous store was still pending
    #[error("math store still holds an unrestored document")]
    StorePending,
    /// A placeholder refers to an entry the store does not hold
    #[error("dangling placeholder {placeholder}: store holds {entries} entries")]
    DanglingPlaceholder { placeholder: String, entries: usize },
}

/// Result type for restoration operations
pub type MathResult<T> = Result<T, MathError>;

// Convenience constructors for errors
impl MathError {
    pub fn dangling(placeholder: impl Into<String>, entries: usize) -> Self {
        MathError::DanglingPlaceholder {
            placeholder: placeholder.into(),
            entries,
        }
    }
}

/// What went wrong with a span that did not close normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Math ran into a paragraph break or the end of input and was left as text
    Unterminated,
    /// Math was closed at the last end delimiter seen inside an open brace group
    Salvaged,
    /// A backtick fence never closed
    UnclosedCode,
}

/// Extraction warnings (non-fatal issues)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathWarning {
    pub kind: WarningKind,
    /// The delimiter that opened the span
    pub delimiter: String,
    /// Line the span opened on (1-indexed)
    pub line: usize,
}

impl fmt::Display for MathWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            WarningKind::Unterminated => "unterminated math left as text",
            WarningKind::Salvaged => "math closed at fallback delimiter",
            WarningKind::UnclosedCode => "unclosed code span",
        };
        write!(
            f,
            "Warning at line {}: {} (opened by '{}')",
            self.line, what, self.delimiter
        )
    }
}
