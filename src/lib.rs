//! # mathstash
//!
//! Protect TeX math from a markdown renderer, then put it back.
//!
//! Markdown renderers treat `_`, `*`, `\` and friends as markup, which
//! destroys inline `$...$`, display `$$...$$` and `\begin{env}...\end{env}`
//! math. `mathstash` swaps every math span for an opaque `@@N@@`
//! placeholder before rendering and restores the original text afterwards.
//!
//! ## Features
//!
//! - **Brace aware**: a `$` inside `{...}` does not close inline math
//! - **Code aware**: math-looking text inside backtick spans is left alone
//! - **Paragraph bounded**: a stray `$` never swallows the rest of the document
//! - **List aware**: list-continuation indentation is removed from stored math
//! - **Safe output**: `&`, `<` and `>` in stored math are HTML-escaped
//!
//! ## Usage Examples
//!
//! ```rust
//! use mathstash::{remove_math, replace_math};
//!
//! let extraction = remove_math("Inline $a_1 * b_2$ and *emphasis*");
//! assert_eq!(extraction.text, "Inline @@0@@ and *emphasis*");
//!
//! // ... render extraction.text with any markdown renderer ...
//! let rendered = "<p>Inline @@0@@ and <em>emphasis</em></p>";
//!
//! let html = replace_math(rendered, extraction.store).unwrap();
//! assert_eq!(html, "<p>Inline $a_1 * b_2$ and <em>emphasis</em></p>");
//! ```

/// Core extraction and restoration
pub mod core;

/// Data layer - patterns and the placeholder format
pub mod data;

/// Utility modules
pub mod utils;

// Re-export core types
pub use crate::core::{
    extract, split_delimiters, Delimiter, Extraction, MathOptions, MathSession, MathStore,
};

// Re-export data
pub use data::placeholder;

// Re-export utilities
pub use utils::error::{MathError, MathResult, MathWarning, WarningKind};

/// Replace every math span in `text` with a placeholder
///
/// # Arguments
/// * `text` - The markdown source
///
/// # Returns
/// The placeholder text, the store needed to restore it, and warnings for
/// spans that did not close normally
pub fn remove_math(text: &str) -> Extraction {
    extract(text, &MathOptions::default())
}

/// Replace every math span in `text` with a placeholder, with custom options
pub fn remove_math_with_options(text: &str, options: &MathOptions) -> Extraction {
    extract(text, options)
}

/// Restore the math in `text` from the store of the matching extraction
///
/// # Arguments
/// * `text` - The rendered output of the extraction's text
/// * `store` - The store returned by [`remove_math`]; it is consumed
///
/// # Errors
/// [`MathError::DanglingPlaceholder`] if `text` holds a placeholder the store
/// does not know
pub fn replace_math(text: &str, store: MathStore) -> MathResult<String> {
    store.restore(text)
}
