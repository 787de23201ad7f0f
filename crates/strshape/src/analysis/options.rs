//! Analysis configuration.

use bon::Builder;

/// How a specifier classified as `Unknown` is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownSpecifierPolicy {
    /// Fail the key with `MalformedSpecifier`.
    #[default]
    Reject,
    /// Keep the parameter as `Unknown` and record a warning.
    Warn,
}

/// Options controlling a single analysis run.
///
/// # Example
///
/// ```
/// use strshape::{AnalysisOptions, UnknownSpecifierPolicy};
///
/// let options = AnalysisOptions::builder()
///     .unknown_specifiers(UnknownSpecifierPolicy::Warn)
///     .build();
///
/// assert!(options.lint_plural_categories);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct AnalysisOptions {
    #[builder(default)]
    pub unknown_specifiers: UnknownSpecifierPolicy,

    /// Check plural variant keys against CLDR categories.
    #[builder(default = true)]
    pub lint_plural_categories: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions::builder().build()
    }
}
