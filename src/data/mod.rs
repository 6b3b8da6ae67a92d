//! Data layer - Static patterns and constants
//!
//! This module contains the static data used by math extraction:
//! - The delimiter pattern the tokenizer splits on
//! - The placeholder wire format

pub mod constants;

// Re-export commonly used items
pub use constants::{
    placeholder, DELIMITER_PATTERN, DISPLAY_DELIMITER, INLINE_DELIMITER, LINE_ENDING,
    LIST_INDENT, PLACEHOLDER_FENCE, PLACEHOLDER_PATTERN,
};
