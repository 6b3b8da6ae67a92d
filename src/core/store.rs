//! The math store and placeholder restoration
//!
//! A [`MathStore`] is produced by one extraction pass and consumed by the
//! matching restoration pass. Restoring takes the store by value, so a store
//! can never serve a second document.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::data::PLACEHOLDER_PATTERN;
use crate::utils::error::{MathError, MathResult};

/// Ordered, append-only list of extracted spans
///
/// Entry `n` is the content that placeholder `@@n@@` stands for. Math entries
/// are stored already HTML-escaped; protected input placeholders are stored
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MathStore {
    entries: Vec<String>,
}

impl MathStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, returning its index
    pub(crate) fn push(&mut self, content: String) -> usize {
        self.entries.push(content);
        self.entries.len() - 1
    }

    /// Get the content behind placeholder `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the stored entries in placeholder order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }

    /// Substitute every placeholder in `text` with its stored content.
    ///
    /// Content is inserted as stored and never re-escaped. A placeholder whose
    /// index the store does not hold is an error; it is never left in the
    /// output.
    pub fn restore(self, text: &str) -> MathResult<String> {
        let mut result = String::with_capacity(text.len());
        let mut cursor = 0;

        for caps in PLACEHOLDER_PATTERN.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let content = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.get(index))
                .ok_or_else(|| MathError::dangling(whole.as_str(), self.len()))?;

            result.push_str(&text[cursor..whole.start()]);
            result.push_str(content);
            cursor = whole.end();
        }
        result.push_str(&text[cursor..]);

        tracing::debug!(entries = self.len(), "restored math placeholders");
        Ok(result)
    }
}
