//! Per-file analysis.
//!
//! Every key is resolved independently. A failing key lands in
//! [`Report::failures`] and is left out of [`Report::entries`]; the rest of
//! the file is unaffected.

use std::collections::BTreeMap;

use tracing::debug;

use crate::analysis::error::{AnalysisError, AnalysisWarning, KeyFailure};
use crate::analysis::options::AnalysisOptions;
use crate::analysis::plural::{language_categories, lint_plural_entry};
use crate::analysis::resolver::{resolve_format, resolve_plural_entry};
use crate::format::{Dialect, SpecifierKind};
use crate::source::{SourceContent, SourceFile};
use crate::types::{PluralRuleEntry, ResolvedEntry, SourceId, StringParam};

/// The outcome of analyzing one source file.
#[derive(Debug, Clone)]
pub struct Report {
    pub origin: SourceId,
    /// Successfully resolved keys.
    pub entries: BTreeMap<String, ResolvedEntry>,
    /// Keys that could not be resolved.
    pub failures: Vec<KeyFailure>,
    pub warnings: Vec<AnalysisWarning>,
}

impl Report {
    /// Create an empty report for `origin`.
    pub fn new(origin: SourceId) -> Self {
        Self {
            origin,
            entries: BTreeMap::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if no key failed.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get a resolved entry by key.
    pub fn get(&self, key: &str) -> Option<&ResolvedEntry> {
        self.entries.get(key)
    }

    /// Get the failure recorded for a key, if any.
    pub fn failure(&self, key: &str) -> Option<&AnalysisError> {
        self.failures
            .iter()
            .find(|failure| failure.key == key)
            .map(|failure| &failure.error)
    }

    fn fail(&mut self, key: &str, error: AnalysisError) {
        debug!(key, origin = %self.origin, %error, "key failed");
        self.failures.push(KeyFailure {
            key: key.to_string(),
            origin: self.origin.clone(),
            error,
        });
    }

    fn accept(&mut self, key: &str, params: Vec<StringParam>, source_text: &str) {
        for param in &params {
            if param.kind() == SpecifierKind::Unknown {
                self.warnings.push(AnalysisWarning::MalformedSpecifier {
                    key: key.to_string(),
                    position: param.position().unwrap_or_default(),
                });
            }
        }
        self.entries.insert(
            key.to_string(),
            ResolvedEntry {
                key: key.to_string(),
                params,
                source_text: source_text.to_string(),
            },
        );
    }
}

/// Analyze a flat table of format strings.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
///
/// use strshape::format::Dialect;
/// use strshape::{AnalysisOptions, LocaleId, SourceId, analyze_strings};
///
/// let origin = SourceId::new("Localizable.strings", LocaleId::Language("en".into()));
/// let strings = BTreeMap::from([
///     ("greeting".to_string(), "Hello %@".to_string()),
///     ("broken".to_string(), "%1$@ %3$@".to_string()),
/// ]);
///
/// let report = analyze_strings(&origin, &strings, Dialect::Apple, &AnalysisOptions::default());
/// assert_eq!(report.get("greeting").unwrap().arity(), 1);
/// assert!(report.failure("broken").is_some());
/// ```
pub fn analyze_strings(
    origin: &SourceId,
    strings: &BTreeMap<String, String>,
    dialect: Dialect,
    options: &AnalysisOptions,
) -> Report {
    let mut report = Report::new(origin.clone());
    for (key, value) in strings {
        match resolve_format(value, dialect, options) {
            Ok(params) => report.accept(key, params, value),
            Err(error) => report.fail(key, error),
        }
    }
    debug!(
        origin = %origin,
        resolved = report.entries.len(),
        failed = report.failures.len(),
        "analyzed strings table"
    );
    report
}

/// Analyze a table of plural-rule entries.
pub fn analyze_plurals(
    origin: &SourceId,
    entries: &BTreeMap<String, PluralRuleEntry>,
    options: &AnalysisOptions,
) -> Report {
    let mut report = Report::new(origin.clone());

    let language = origin.locale.language();
    let categories = match language {
        Some(tag) if options.lint_plural_categories => language_categories(tag),
        _ => None,
    };
    let lint_language = language.zip(categories.as_deref());

    for (key, entry) in entries {
        if options.lint_plural_categories {
            lint_plural_entry(key, entry, lint_language, &mut report.warnings);
        }
        match resolve_plural_entry(entry, options) {
            Ok(params) => report.accept(key, params, &entry.format),
            Err(error) => report.fail(key, error),
        }
    }

    debug!(
        origin = %origin,
        resolved = report.entries.len(),
        failed = report.failures.len(),
        "analyzed plural rules"
    );
    report
}

/// Analyze a loaded source file.
///
/// Keys the adapter already rejected (wrong value shapes) are reported as
/// failures alongside the keys that fail resolution.
pub fn analyze_source(file: &SourceFile, options: &AnalysisOptions) -> Report {
    let mut report = match &file.content {
        SourceContent::Strings(strings) => {
            analyze_strings(&file.id, strings, file.kind.dialect(), options)
        }
        SourceContent::Plurals(entries) => analyze_plurals(&file.id, entries, options),
    };

    for (key, error) in &file.rejected {
        report.fail(key, error.clone());
    }
    for key in &file.duplicate_keys {
        report
            .warnings
            .push(AnalysisWarning::DuplicateKey { key: key.clone() });
    }

    report
}
