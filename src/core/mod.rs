//! Core extraction and restoration
//!
//! This module contains the math protection engine:
//! - `tokenizer`: capturing split on math and code delimiters
//! - `scanner`: the span state machine that fills the store
//! - `store`: the math store and placeholder restoration
//! - `session`: two-call wrapper that enforces call order

pub mod options;
pub mod scanner;
pub mod session;
pub mod store;
pub mod tokenizer;

pub use options::MathOptions;
pub use scanner::{extract, Extraction};
pub use session::MathSession;
pub use store::MathStore;
pub use tokenizer::{split_delimiters, Delimiter};
