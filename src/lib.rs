pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;
pub mod parser;

pub use checker::dictionary::{Dictionary, LoadReport, WordlistEntry};
pub use checker::{CheckOptions, SpellChecker};
pub use config::Config;
pub use error::{Error, Result};

use serde::{Deserialize, Serialize};

/// A token that failed validation. `start` and `end` are byte offsets into
/// the checked text, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub fixed_count: usize,
}
