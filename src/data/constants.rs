//! Patterns and literals shared by the extraction and restoration passes
//!
//! This module holds the compiled regular expressions and the placeholder
//! wire format:
//! - The delimiter split pattern used by the tokenizer
//! - Line ending normalization
//! - The placeholder pattern recognized during restoration

use lazy_static::lazy_static;
use regex::Regex;

// ============================================================================
// Placeholder Wire Format
// ============================================================================

/// Marker written on both sides of a placeholder index
pub const PLACEHOLDER_FENCE: &str = "@@";

/// The inline math delimiter
pub const INLINE_DELIMITER: &str = "$";

/// The display math delimiter
pub const DISPLAY_DELIMITER: &str = "$$";

/// Indentation markdown adds for list continuation
pub const LIST_INDENT: &str = "    ";

/// Format the placeholder standing in for store entry `index`
pub fn placeholder(index: usize) -> String {
    format!("{PLACEHOLDER_FENCE}{index}{PLACEHOLDER_FENCE}")
}

// ============================================================================
// Compiled Patterns
// ============================================================================

lazy_static! {
    /// Delimiters the tokenizer splits on, in priority order:
    /// dollars, environment boundaries, escapes, braces, line break runs,
    /// placeholders and backtick fences
    pub static ref DELIMITER_PATTERN: Regex = Regex::new(
        r"(?i)\$\$?|\\(?:begin|end)\{[a-z]*\*?\}|\\[\\{}$]|[{}]|(?:\n\s*)+|@@[0-9]+@@|`+"
    )
    .unwrap();

    /// Windows and classic Mac line endings
    pub static ref LINE_ENDING: Regex = Regex::new(r"\r\n?").unwrap();

    /// A placeholder with its index captured
    pub static ref PLACEHOLDER_PATTERN: Regex = Regex::new(r"@@([0-9]+)@@").unwrap();
}
