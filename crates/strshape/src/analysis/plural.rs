//! CLDR plural category checks for plural-rule variables.
//!
//! Stringsdict variants are keyed by plural category. A key outside the six
//! CLDR categories is never selected at runtime, and a missing `other` leaves
//! some quantities without text.

use icu_locale_core::Locale;
use icu_plurals::{PluralCategory, PluralRuleType, PluralRules};

use crate::analysis::error::AnalysisWarning;
use crate::types::PluralRuleEntry;

/// The CLDR plural categories, in CLDR order.
pub const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

fn category_str(category: PluralCategory) -> &'static str {
    match category {
        PluralCategory::Zero => "zero",
        PluralCategory::One => "one",
        PluralCategory::Two => "two",
        PluralCategory::Few => "few",
        PluralCategory::Many => "many",
        PluralCategory::Other => "other",
    }
}

/// Categories the cardinal rules of `language` can select.
///
/// Returns `None` if the tag does not parse or has no plural data.
///
/// ```
/// use strshape::analysis::language_categories;
///
/// let english = language_categories("en").unwrap();
/// assert!(english.contains(&"one"));
/// assert!(!english.contains(&"few"));
/// ```
pub fn language_categories(language: &str) -> Option<Vec<&'static str>> {
    let locale: Locale = language.parse().ok()?;
    let rules = PluralRules::try_new(locale.into(), PluralRuleType::Cardinal.into()).ok()?;
    Some(rules.categories().map(category_str).collect())
}

/// Check every variable of one entry, appending findings to `warnings`.
///
/// `language_categories` are the categories of the report's language, when
/// known. `zero` is always accepted since Foundation matches it on the value
/// 0 regardless of language.
pub fn lint_plural_entry(
    key: &str,
    entry: &PluralRuleEntry,
    language: Option<(&str, &[&'static str])>,
    warnings: &mut Vec<AnalysisWarning>,
) {
    for (variable_name, variable) in &entry.variables {
        if !variable.is_plural_rule() {
            continue;
        }

        for category in variable.variants.keys() {
            if !PLURAL_CATEGORIES.contains(&category.as_str()) {
                warnings.push(AnalysisWarning::UnknownPluralCategory {
                    key: key.to_string(),
                    variable: variable_name.clone(),
                    category: category.clone(),
                });
                continue;
            }
            if let Some((tag, categories)) = language
                && category != "zero"
                && !categories.contains(&category.as_str())
            {
                warnings.push(AnalysisWarning::UnusedPluralCategory {
                    key: key.to_string(),
                    variable: variable_name.clone(),
                    category: category.clone(),
                    language: tag.to_string(),
                });
            }
        }

        if !variable.variants.contains_key("other") {
            warnings.push(AnalysisWarning::MissingOtherVariant {
                key: key.to_string(),
                variable: variable_name.clone(),
            });
        }
    }
}
