//! Parameter signature analysis.
//!
//! This module turns tokenized format strings into positional parameter
//! lists. It normalizes positions, resolves plural references with cycle
//! detection, unifies plural variants, and collects per-key failures and
//! warnings into reports.

mod error;
mod merge;
mod options;
mod plural;
mod report;
mod resolver;
mod signature;
mod unify;

pub use error::{
    AnalysisError, AnalysisWarning, KeyFailure, PositionProblem, compute_suggestions,
};
pub use merge::{MergedEntry, MergedTable, merge_reports};
pub use options::{AnalysisOptions, UnknownSpecifierPolicy};
pub use plural::{PLURAL_CATEGORIES, language_categories, lint_plural_entry};
pub use report::{Report, analyze_plurals, analyze_source, analyze_strings};
pub use resolver::{normalize, resolve_format, resolve_plural_entry, resolve_reference};
pub use unify::{UnifyConflict, unify, unify_params};
