use serde::Serialize;

use super::StringParam;

/// The analyzed shape of one localization key.
///
/// `params` is ordered by position and covers exactly `1..=params.len()`.
/// `source_text` is the format string as written, kept for generated comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub key: String,
    pub params: Vec<StringParam>,
    pub source_text: String,
}

impl ResolvedEntry {
    /// Number of arguments the key requires.
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
