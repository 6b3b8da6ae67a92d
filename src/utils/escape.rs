//! Cleanup applied to a span before it is stored

use crate::data::LIST_INDENT;

/// Replace `&`, `<` and `>` with their named entities.
///
/// The ampersand goes first so the entities written for `<` and `>` are
/// not escaped a second time.
pub fn escape_math(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Remove one list-continuation indent after every newline.
pub fn strip_list_indent(content: &str) -> String {
    content.replace(&format!("\n{LIST_INDENT}"), "\n")
}
