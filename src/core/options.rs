//! Options controlling which delimiters open a protected span

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Extraction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathOptions {
    /// Treat a single `$` as an inline math delimiter
    /// Default: true
    pub inline_dollar: bool,

    /// Treat `\begin{name}` ... `\end{name}` as a math span
    /// Default: true
    pub environments: bool,

    /// Treat backtick fences as code, hiding any math-looking text inside them
    /// Default: true
    pub code_spans: bool,

    /// Strip one four-space indent after each newline of stored math once an
    /// indented blank line has been seen (markdown list continuation)
    /// Default: true
    pub strip_list_indent: bool,
}

impl Default for MathOptions {
    fn default() -> Self {
        Self {
            inline_dollar: true,
            environments: true,
            code_spans: true,
            strip_list_indent: true,
        }
    }
}

impl MathOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `$$` and environments open math, so prose with prices like
    /// `$5 and $10` passes through untouched
    pub fn display_only() -> Self {
        Self {
            inline_dollar: false,
            ..Self::default()
        }
    }

    /// Every delimiter kind is recognized
    pub fn permissive() -> Self {
        Self {
            inline_dollar: true,
            environments: true,
            code_spans: true,
            strip_list_indent: true,
        }
    }
}
