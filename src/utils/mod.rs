//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error and warning types
//! - Escaping and indentation cleanup for stored spans

pub mod error;
pub mod escape;

// Re-export commonly used items
pub use error::{MathError, MathResult, MathWarning, WarningKind};
pub use escape::{escape_math, strip_list_indent};
