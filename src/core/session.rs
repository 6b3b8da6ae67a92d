//! Two-call session API
//!
//! Some hosts want `remove_math(text)` then `replace_math(rendered)` on one
//! object without carrying the store themselves. [`MathSession`] holds the
//! store between the two calls and turns out-of-order use into errors.

use super::options::MathOptions;
use super::scanner::extract;
use super::store::MathStore;
use crate::utils::error::{MathError, MathResult, MathWarning};

#[derive(Debug, Default)]
enum SessionState {
    #[default]
    Fresh,
    Extracted(MathStore),
    Consumed,
}

/// Holds the math of one document between extraction and restoration
#[derive(Debug, Default)]
pub struct MathSession {
    options: MathOptions,
    state: SessionState,
    warnings: Vec<MathWarning>,
}

impl MathSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: MathOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the math in `text` with placeholders and keep it for
    /// [`MathSession::replace_math`].
    ///
    /// Fails with [`MathError::StorePending`] if the previous document has not
    /// been restored yet. A session whose store was consumed can start over.
    pub fn remove_math(&mut self, text: &str) -> MathResult<String> {
        if matches!(self.state, SessionState::Extracted(_)) {
            return Err(MathError::StorePending);
        }

        let extraction = extract(text, &self.options);
        self.warnings = extraction.warnings;
        self.state = SessionState::Extracted(extraction.store);
        Ok(extraction.text)
    }

    /// Restore the math removed by the last [`MathSession::remove_math`].
    pub fn replace_math(&mut self, text: &str) -> MathResult<String> {
        match std::mem::replace(&mut self.state, SessionState::Consumed) {
            SessionState::Extracted(store) => store.restore(text),
            SessionState::Fresh => {
                self.state = SessionState::Fresh;
                Err(MathError::StoreNotInitialized)
            }
            SessionState::Consumed => Err(MathError::StoreConsumed),
        }
    }

    /// Warnings from the last extraction
    pub fn warnings(&self) -> &[MathWarning] {
        &self.warnings
    }

    /// The pending store, if a document has been extracted and not restored
    pub fn store(&self) -> Option<&MathStore> {
        match &self.state {
            SessionState::Extracted(store) => Some(store),
            _ => None,
        }
    }
}
