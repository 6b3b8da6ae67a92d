//! Span scanner
//!
//! Walks the delimiter tokens left to right, tracking whether a math or code
//! span is open, what closes it and how deep its braces are nested. Closed
//! math spans are escaped, moved into the [`MathStore`] and replaced by a
//! placeholder. Code spans are only tracked so that math-looking text inside
//! them is left alone.
//!
//! All scan state lives in a scanner built for a single document, so
//! extraction is reentrant.

use std::collections::HashMap;

use super::options::MathOptions;
use super::store::MathStore;
use super::tokenizer::{split_delimiters, Delimiter};
use crate::data::placeholder;
use crate::utils::error::{MathResult, MathWarning, WarningKind};
use crate::utils::escape::{escape_math, strip_list_indent};

/// Result of extracting math from one document
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The document with every math span replaced by a placeholder
    pub text: String,
    /// Content for the placeholders in `text`
    pub store: MathStore,
    /// Spans that did not close normally
    pub warnings: Vec<MathWarning>,
}

impl Extraction {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Put the math back into `rendered`, the output of rendering `self.text`
    pub fn restore(self, rendered: &str) -> MathResult<String> {
        self.store.restore(rendered)
    }
}

/// Brace discipline of an open span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Braces {
    /// Math: unmatched `{` seen so far
    Counted(usize),
    /// Code: braces are content and the first matching fence closes
    Ignored,
}

/// A span whose closing delimiter has not been seen yet
#[derive(Debug)]
struct OpenSpan {
    start: usize,
    /// Last closing delimiter seen inside braces, used if the span never
    /// closes at depth zero
    fallback_end: Option<usize>,
    end: String,
    braces: Braces,
}

pub(crate) struct SpanScanner<'o> {
    options: &'o MathOptions,
    tokens: Vec<String>,
    /// Line breaks before each token in the input
    breaks_before: Vec<usize>,
    store: MathStore,
    /// Token index -> store index of placeholders found in the input
    protected: HashMap<usize, usize>,
    open: Option<OpenSpan>,
    indent_seen: bool,
    warnings: Vec<MathWarning>,
}

impl<'o> SpanScanner<'o> {
    pub(crate) fn new(text: &str, options: &'o MathOptions) -> Self {
        let tokens = split_delimiters(text);
        let breaks_before = tokens
            .iter()
            .scan(0, |seen, token| {
                let before = *seen;
                *seen += token.matches('\n').count();
                Some(before)
            })
            .collect();

        Self {
            options,
            tokens,
            breaks_before,
            store: MathStore::new(),
            protected: HashMap::new(),
            open: None,
            indent_seen: false,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Extraction {
        let count = self.tokens.len();
        let mut i = 1;
        while i < count {
            i = self.step(i, count) + 2;
        }
        if let Some(span) = self.open.take() {
            self.flush(span);
        }

        tracing::debug!(
            tokens = count,
            stored = self.store.len(),
            warnings = self.warnings.len(),
            "math extraction finished"
        );

        Extraction {
            text: self.tokens.concat(),
            store: self.store,
            warnings: self.warnings,
        }
    }

    /// Process the delimiter at `i`, returning the index scanning continues
    /// after. That is `i` itself unless a salvage rewound the scan.
    fn step(&mut self, i: usize, count: usize) -> usize {
        let token = self.tokens[i].clone();
        let Some(kind) = Delimiter::classify(&token) else {
            return i;
        };

        if kind == Delimiter::Placeholder {
            // a rewind can revisit a placeholder that was already protected
            if !self.protected.contains_key(&i) {
                self.protect(i);
            }
            return i;
        }

        match self.open.take() {
            Some(span) => self.scan_open(span, i, &token, kind, count),
            None => {
                self.scan_idle(i, &token, kind);
                i
            }
        }
    }

    fn scan_idle(&mut self, i: usize, token: &str, kind: Delimiter<'_>) {
        let (end, braces, fallback_end) = match kind {
            Delimiter::Display => (token.to_string(), Braces::Counted(0), None),
            Delimiter::Inline if self.options.inline_dollar => {
                (token.to_string(), Braces::Counted(0), None)
            }
            Delimiter::Begin(name) if self.options.environments => {
                (format!("\\end{}", name), Braces::Counted(0), None)
            }
            Delimiter::Backticks if self.options.code_spans => {
                (token.to_string(), Braces::Ignored, Some(i))
            }
            Delimiter::LineBreaks { indented: true, .. } => {
                self.indent_seen = true;
                return;
            }
            _ => return,
        };

        tracing::trace!(index = i, delimiter = token, "span opened");
        self.open = Some(OpenSpan {
            start: i,
            fallback_end,
            end,
            braces,
        });
    }

    fn scan_open(
        &mut self,
        mut span: OpenSpan,
        i: usize,
        token: &str,
        kind: Delimiter<'_>,
        count: usize,
    ) -> usize {
        if token == span.end {
            match span.braces {
                Braces::Counted(depth) if depth > 0 => {
                    span.fallback_end = Some(i);
                    self.open = Some(span);
                }
                Braces::Counted(_) => self.finalize(span.start, i),
                Braces::Ignored => {
                    tracing::trace!(start = span.start, end = i, "code span closed");
                }
            }
            return i;
        }

        // no close past a paragraph break, and none can follow the last delimiter
        if kind.is_paragraph_break() || i + 2 >= count {
            return self.abandon(span, i);
        }

        if let Braces::Counted(depth) = &mut span.braces {
            match kind {
                Delimiter::OpenBrace => *depth += 1,
                Delimiter::CloseBrace => *depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        self.open = Some(span);
        i
    }

    /// Give up on `span` at token `i`. Math with a fallback close is stored up
    /// to it and scanning resumes right after the fallback.
    fn abandon(&mut self, span: OpenSpan, i: usize) -> usize {
        match (span.fallback_end, span.braces) {
            (Some(last), Braces::Counted(_)) => {
                tracing::debug!(start = span.start, end = last, "salvaging unclosed math");
                self.warn(WarningKind::Salvaged, &span);
                self.finalize(span.start, last);
                last
            }
            (Some(last), Braces::Ignored) => {
                tracing::debug!(start = span.start, "abandoning unclosed code span");
                self.warn(WarningKind::UnclosedCode, &span);
                last
            }
            (None, _) => {
                tracing::debug!(start = span.start, at = i, "abandoning unterminated math");
                self.warn(WarningKind::Unterminated, &span);
                i
            }
        }
    }

    /// Handle a span still open after the last token.
    fn flush(&mut self, span: OpenSpan) {
        match (span.fallback_end, span.braces) {
            (Some(last), Braces::Counted(_)) => {
                self.warn(WarningKind::Salvaged, &span);
                self.finalize(span.start, last);
            }
            (_, Braces::Ignored) => self.warn(WarningKind::UnclosedCode, &span),
            (None, Braces::Counted(_)) => self.warn(WarningKind::Unterminated, &span),
        }
    }

    /// Store a placeholder that was already in the input and give it a fresh one.
    fn protect(&mut self, i: usize) {
        let original = std::mem::take(&mut self.tokens[i]);
        let index = self.store.push(original);
        self.tokens[i] = placeholder(index);
        self.protected.insert(i, index);
    }

    /// Move tokens `start..=last` into the store as one escaped entry.
    fn finalize(&mut self, start: usize, last: usize) {
        let mut raw = String::new();
        for j in start..=last {
            match self.protected.get(&j).and_then(|&k| self.store.get(k)) {
                Some(original) => raw.push_str(original),
                None => raw.push_str(&self.tokens[j]),
            }
        }

        let mut content = escape_math(&raw);
        if self.indent_seen && self.options.strip_list_indent {
            content = strip_list_indent(&content);
        }

        let index = self.store.push(content);
        self.tokens[start] = placeholder(index);
        for token in &mut self.tokens[start + 1..=last] {
            token.clear();
        }
        tracing::trace!(index, start, last, "math span stored");
    }

    fn warn(&mut self, kind: WarningKind, span: &OpenSpan) {
        self.warnings.push(MathWarning {
            kind,
            delimiter: self.tokens[span.start].clone(),
            line: self.breaks_before[span.start] + 1,
        });
    }
}

/// Extract math from `text` with the given options.
pub fn extract(text: &str, options: &MathOptions) -> Extraction {
    SpanScanner::new(text, options).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(store: &MathStore) -> Vec<&str> {
        store.iter().collect()
    }

    fn run(text: &str) -> Extraction {
        extract(text, &MathOptions::default())
    }

    #[test]
    fn test_inline_and_display() {
        let out = run("Inline $a+b$ and $$c=d$$ end.");
        assert_eq!(out.text, "Inline @@0@@ and @@1@@ end.");
        assert_eq!(entries(&out.store), vec!["$a+b$", "$$c=d$$"]);
        assert!(!out.has_warnings());
    }

    #[test]
    fn test_sequential_spans_reset_state() {
        // a stale start position would merge the second span into the first
        let out = run("$a$ x $b$ y $c$");
        assert_eq!(out.text, "@@0@@ x @@1@@ y @@2@@");
        assert_eq!(entries(&out.store), vec!["$a$", "$b$", "$c$"]);
    }

    #[test]
    fn test_environment() {
        let out = run(r"See \begin{align*}x &= 1\end{align*} done");
        assert_eq!(out.text, "See @@0@@ done");
        assert_eq!(
            entries(&out.store),
            vec![r"\begin{align*}x &amp;= 1\end{align*}"]
        );
    }

    #[test]
    fn test_environment_ignores_other_ends() {
        let out = run(r"\begin{a}\end{b}\end{a}");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec![r"\begin{a}\end{b}\end{a}"]);
    }

    #[test]
    fn test_dollar_inside_braces_is_not_a_close() {
        let out = run(r"$\text{a $b$ c}$ rest");
        assert_eq!(out.text, "@@0@@ rest");
        assert_eq!(entries(&out.store), vec![r"$\text{a $b$ c}$"]);
    }

    #[test]
    fn test_escaped_braces_do_not_count() {
        let out = run(r"$a\{b\}c$");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec![r"$a\{b\}c$"]);
    }

    #[test]
    fn test_escaped_dollar_does_not_open() {
        let out = run(r"costs \$5 and $x$");
        assert_eq!(out.text, r"costs \$5 and @@0@@");
    }

    #[test]
    fn test_unbalanced_brace_aborts_at_paragraph() {
        let out = run("$a{b c\n\nnext $d$");
        assert_eq!(out.text, "$a{b c\n\nnext @@0@@");
        assert_eq!(entries(&out.store), vec!["$d$"]);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, WarningKind::Unterminated);
    }

    #[test]
    fn test_unbalanced_brace_salvages_fallback() {
        // the `$` inside the open group is remembered and used once the paragraph ends
        let out = run("$a{b$ c\n\nnext");
        assert_eq!(out.text, "@@0@@ c\n\nnext");
        assert_eq!(entries(&out.store), vec!["$a{b$"]);
        assert_eq!(out.warnings[0].kind, WarningKind::Salvaged);
    }

    #[test]
    fn test_fallback_salvaged_at_end_of_input() {
        let out = run("$a{b$");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec!["$a{b$"]);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].kind, WarningKind::Salvaged);

        let out = run(r"\begin{a}x{\end{a}");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec![r"\begin{a}x{\end{a}"]);
        assert_eq!(out.warnings[0].kind, WarningKind::Salvaged);
    }

    #[test]
    fn test_close_brace_at_depth_zero_is_content() {
        let out = run("$a}b$");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec!["$a}b$"]);
        assert!(!out.has_warnings());
    }

    #[test]
    fn test_salvage_rewinds_scan() {
        let out = run("$a{b$ c $$d$$\n\nx");
        assert_eq!(out.text, "@@0@@ c @@1@@\n\nx");
        assert_eq!(entries(&out.store), vec!["$a{b$", "$$d$$"]);
    }

    #[test]
    fn test_unterminated_at_paragraph_break() {
        let out = run("price $5\n\nlater $x$");
        assert_eq!(out.text, "price $5\n\nlater @@0@@");
        assert_eq!(out.warnings[0].line, 1);
    }

    #[test]
    fn test_single_line_break_does_not_abort() {
        let out = run("$a\nb$");
        assert_eq!(out.text, "@@0@@");
        assert_eq!(entries(&out.store), vec!["$a\nb$"]);
    }

    #[test]
    fn test_code_span_hides_math() {
        let out = run("`$x$` and $y$");
        assert_eq!(out.text, "`$x$` and @@0@@");
        assert_eq!(entries(&out.store), vec!["$y$"]);
    }

    #[test]
    fn test_code_fence_lengths_must_match() {
        let out = run("``a ` $x$ ``");
        assert_eq!(out.text, "``a ` $x$ ``");
        assert!(out.store.is_empty());
    }

    #[test]
    fn test_unclosed_backtick_rewinds() {
        let out = run("a ` b $x$ c\n\nd");
        assert_eq!(out.text, "a ` b @@0@@ c\n\nd");
        assert_eq!(out.warnings[0].kind, WarningKind::UnclosedCode);
    }

    #[test]
    fn test_code_spans_disabled() {
        let options = MathOptions {
            code_spans: false,
            ..MathOptions::default()
        };
        let out = extract("`$x$`", &options);
        assert_eq!(out.text, "`@@0@@`");
    }

    #[test]
    fn test_display_only_skips_inline() {
        let out = extract("$5 and $10, $$x$$", &MathOptions::display_only());
        assert_eq!(out.text, "$5 and $10, @@0@@");
    }

    #[test]
    fn test_existing_placeholder_is_protected() {
        let out = run("keep @@3@@ and $x$");
        assert_eq!(out.text, "keep @@0@@ and @@1@@");
        assert_eq!(entries(&out.store), vec!["@@3@@", "$x$"]);
    }

    #[test]
    fn test_placeholder_inside_math_keeps_literal_text() {
        let out = run("$a @@7@@ b$");
        assert_eq!(out.text, "@@1@@");
        assert_eq!(out.store.get(1), Some("$a @@7@@ b$"));
        assert_eq!(out.restore("@@1@@").unwrap(), "$a @@7@@ b$");
    }

    #[test]
    fn test_escaping_applied() {
        let out = run("$a<b & c>d$");
        assert_eq!(entries(&out.store), vec!["$a&lt;b &amp; c&gt;d$"]);
    }

    #[test]
    fn test_indent_stripped_after_indented_blank_line() {
        let out = run("- item\n\n    $$\n    y\n    z$$");
        assert_eq!(entries(&out.store), vec!["$$\ny\nz$$"]);
    }

    #[test]
    fn test_indent_kept_without_indented_blank_line() {
        let out = run("$$\n    y$$");
        assert_eq!(entries(&out.store), vec!["$$\n    y$$"]);
    }

    #[test]
    fn test_indent_strip_disabled() {
        let options = MathOptions {
            strip_list_indent: false,
            ..MathOptions::default()
        };
        let out = extract("- item\n\n    $$\n    y$$", &options);
        assert_eq!(entries(&out.store), vec!["$$\n    y$$"]);
    }

    #[test]
    fn test_open_at_last_delimiter_is_left_alone() {
        let out = run("costs $5");
        assert_eq!(out.text, "costs $5");
        assert!(out.store.is_empty());
        assert_eq!(out.warnings[0].kind, WarningKind::Unterminated);
    }

    #[test]
    fn test_crlf_normalized() {
        let out = run("$a\r\nb$\r\n");
        assert_eq!(out.text, "@@0@@\n");
        assert_eq!(entries(&out.store), vec!["$a\nb$"]);
    }

    #[test]
    fn test_warning_line_numbers() {
        let out = run("one\ntwo\n\nthree $x\n\nfour");
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].line, 4);
        assert_eq!(out.warnings[0].delimiter, "$");
    }
}
