pub mod analysis;
pub mod format;
pub mod source;
pub mod types;

pub use analysis::{
    AnalysisError, AnalysisOptions, AnalysisWarning, KeyFailure, MergedEntry, MergedTable,
    Report, UnknownSpecifierPolicy, analyze_plurals, analyze_source, analyze_strings,
    compute_suggestions, merge_reports, normalize, resolve_format, resolve_plural_entry,
    resolve_reference, unify,
};
pub use format::{Dialect, FormatString, SpecifierKind, tokenize, tokenize_with};
pub use source::{LoadError, ParseError, SourceFile, SourceKind, load_source, parse_source};
pub use types::{LocaleId, PluralRuleEntry, PluralVariable, ResolvedEntry, SourceId, StringParam};
