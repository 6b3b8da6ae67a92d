//! Capturing split of a document into text and delimiter tokens
//!
//! The token vector always alternates: even indices hold plain text (possibly
//! empty), odd indices hold a delimiter match, and the length is odd.

use crate::data::{
    DELIMITER_PATTERN, DISPLAY_DELIMITER, INLINE_DELIMITER, LINE_ENDING, LIST_INDENT,
};

/// Category of a delimiter token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter<'a> {
    /// `$`
    Inline,
    /// `$$`
    Display,
    /// `\begin{name}`, carrying `{name}` including the braces
    Begin(&'a str),
    /// `\end{name}`
    End,
    /// `\\`, `\{`, `\}` or `\$`
    Escape,
    OpenBrace,
    CloseBrace,
    /// A run of line breaks and the whitespace between them
    LineBreaks {
        breaks: usize,
        /// The run ends with a four-space indent
        indented: bool,
    },
    /// An `@@N@@` already present in the input
    Placeholder,
    /// One or more backticks
    Backticks,
}

impl<'a> Delimiter<'a> {
    /// Classify a token produced at an odd index by [`split_delimiters`].
    ///
    /// Returns `None` for plain text.
    pub fn classify(token: &'a str) -> Option<Self> {
        let first = token.chars().next()?;
        let kind = match first {
            '$' if token == DISPLAY_DELIMITER => Delimiter::Display,
            '$' if token == INLINE_DELIMITER => Delimiter::Inline,
            '{' if token.len() == 1 => Delimiter::OpenBrace,
            '}' if token.len() == 1 => Delimiter::CloseBrace,
            '@' if token.starts_with("@@") && token.ends_with("@@") && token.len() > 4 => {
                Delimiter::Placeholder
            }
            '`' if token.chars().all(|c| c == '`') => Delimiter::Backticks,
            '\n' => Delimiter::LineBreaks {
                breaks: token.matches('\n').count(),
                indented: token.ends_with(LIST_INDENT),
            },
            '\\' => {
                let bytes = token.as_bytes();
                if bytes.len() == 2 {
                    Delimiter::Escape
                } else if bytes.len() > 6 && bytes[..6].eq_ignore_ascii_case(b"\\begin") {
                    Delimiter::Begin(&token[6..])
                } else if bytes.len() > 4 && bytes[..4].eq_ignore_ascii_case(b"\\end") {
                    Delimiter::End
                } else {
                    return None;
                }
            }
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a line break run separates paragraphs
    pub fn is_paragraph_break(&self) -> bool {
        matches!(self, Delimiter::LineBreaks { breaks, .. } if *breaks > 1)
    }
}

/// Normalize line endings and split `text` on math and code delimiters,
/// keeping the delimiters as their own tokens.
pub fn split_delimiters(text: &str) -> Vec<String> {
    let normalized = LINE_ENDING.replace_all(text, "\n");
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for m in DELIMITER_PATTERN.find_iter(&normalized) {
        tokens.push(normalized[cursor..m.start()].to_string());
        tokens.push(m.as_str().to_string());
        cursor = m.end();
    }
    tokens.push(normalized[cursor..].to_string());

    tokens
}
