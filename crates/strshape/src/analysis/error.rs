//! Error and warning types for string analysis.

use std::fmt;

use thiserror::Error;

use crate::format::SpecifierKind;
use crate::types::SourceId;

/// Why one key could not be analyzed.
///
/// Every variant is scoped to a single key; the rest of the file is still
/// analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A specifier with an unrecognized conversion, length, or syntax.
    #[error("malformed format specifier for parameter {position}")]
    MalformedSpecifier { position: usize },

    /// A position is claimed twice, or left as a gap.
    #[error("parameter {position} {problem}")]
    PositionConflict {
        position: usize,
        problem: PositionProblem,
    },

    /// A `%#@name@` reference in a string that is not a plural rule.
    #[error("non-specifier reference '%#@{name}@' outside a plural rule")]
    NonSpecifierReference { name: String },

    /// A plural variable that references itself, directly or transitively.
    #[error("cyclic reference '{name}': {}", .chain.join(" -> "))]
    CyclicReference { name: String, chain: Vec<String> },

    /// A reference to a variable the entry does not declare.
    #[error("missing reference '{name}'{}", format_suggestions(.suggestions))]
    MissingReference {
        name: String,
        suggestions: Vec<String>,
    },

    /// A referenced variable without the plural-rule shape.
    #[error("incorrect reference '{name}': {reason}")]
    IncorrectReference { name: String, reason: String },

    /// Two variants of a variable need incompatible types at one position.
    #[error("can't unify '{name}': parameter {position} is {left} in one variant and {right} in another")]
    CannotUnify {
        name: String,
        position: usize,
        left: SpecifierKind,
        right: SpecifierKind,
    },

    /// A strings table value that is not a string.
    #[error("non-string value ({found})")]
    NonStringValue { found: String },

    /// A stringsdict value that is not a dictionary.
    #[error("non-dict value ({found})")]
    NonDictValue { found: String },

    /// A stringsdict entry without `NSStringLocalizedFormatKey`.
    #[error("missing NSStringLocalizedFormatKey")]
    MissingLocalizedFormat,
}

/// What is wrong with a parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionProblem {
    /// No specifier uses the position although higher ones are used.
    Unused,
    /// Two specifiers claim the same position.
    Duplicate {
        existing: SpecifierKind,
        found: SpecifierKind,
    },
}

impl fmt::Display for PositionProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionProblem::Unused => f.write_str("is skipped by the explicit positions"),
            PositionProblem::Duplicate { existing, found } => {
                write!(f, "is claimed twice, as {existing} and as {found}")
            }
        }
    }
}

/// A failed key, attributed to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error} in '{key}' {origin}")]
pub struct KeyFailure {
    pub key: String,
    pub origin: SourceId,
    pub error: AnalysisError,
}

/// A non-fatal finding. The affected key is still part of the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisWarning {
    /// A malformed specifier kept as `Unknown` under the lenient policy.
    #[error("malformed format specifier for parameter {position} in '{key}'")]
    MalformedSpecifier { key: String, position: usize },

    /// A key defined more than once in the same file; the last one wins.
    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },

    /// A variant key that is not a CLDR plural category.
    #[error("'{category}' in '{key}' variable '{variable}' is not a plural category")]
    UnknownPluralCategory {
        key: String,
        variable: String,
        category: String,
    },

    /// A plural variable without the required `other` variant.
    #[error("variable '{variable}' in '{key}' has no 'other' variant")]
    MissingOtherVariant { key: String, variable: String },

    /// A category the locale's plural rules never select.
    #[error("variant '{category}' of variable '{variable}' in '{key}' is never used by '{language}'")]
    UnusedPluralCategory {
        key: String,
        variable: String,
        category: String,
        language: String,
    },

    /// Locales of one table disagree on a key's parameters.
    #[error("parameters of '{key}' in table '{table}' differ between locales: {}", .locales.join(", "))]
    SignatureMismatch {
        table: String,
        key: String,
        locales: Vec<String>,
    },

    /// A key missing from some locales of its table.
    #[error("'{key}' in table '{table}' is missing in: {}", .missing.join(", "))]
    MissingTranslation {
        table: String,
        key: String,
        missing: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}", suggestions.join(", "))
    }
}

/// Suggest names close to `target` by edit distance.
///
/// Allows a distance of 1 for names up to 3 characters and 2 otherwise, and
/// returns at most three suggestions, closest first.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .filter(|candidate| candidate.as_str() != target)
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}
