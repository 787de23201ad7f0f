//! Typed model of one stringsdict entry.
//!
//! The source adapter converts the untyped property list into these types, so
//! the resolver never sees heterogeneous values.

use std::collections::BTreeMap;

/// Dictionary key holding an entry's top-level format template.
pub const LOCALIZED_FORMAT_KEY: &str = "NSStringLocalizedFormatKey";
/// Variable key declaring the rule type.
pub const FORMAT_SPEC_TYPE_KEY: &str = "NSStringFormatSpecTypeKey";
/// Variable key declaring the controlling argument's format specifier.
pub const FORMAT_VALUE_TYPE_KEY: &str = "NSStringFormatValueTypeKey";
/// The only rule type this engine resolves.
pub const PLURAL_RULE_TYPE: &str = "NSStringPluralRuleType";

/// One plural-rule entry: a template plus the variables it may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralRuleEntry {
    /// The localized format template (may contain `%#@name@` references).
    pub format: String,
    /// Named variables, keyed by the name used in references.
    pub variables: BTreeMap<String, PluralVariable>,
}

impl PluralRuleEntry {
    /// Create an entry with no variables.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Add a variable, replacing any previous one with the same name.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, variable: PluralVariable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// Names of all declared variables, sorted.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.keys().cloned().collect()
    }
}

/// A variable bundle: rule type, value type, and its variant strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralVariable {
    /// Declared rule type (`NSStringFormatSpecTypeKey`).
    pub spec_type: Option<String>,
    /// Declared controlling value type without the '%' (`NSStringFormatValueTypeKey`).
    pub value_type: Option<String>,
    /// Variant strings keyed by plural category, iterated in key order.
    pub variants: BTreeMap<String, String>,
}

impl PluralVariable {
    /// A well-formed plural-rule variable.
    pub fn plural_rule<K, V>(
        value_type: impl Into<String>,
        variants: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            spec_type: Some(PLURAL_RULE_TYPE.to_string()),
            value_type: Some(value_type.into()),
            variants: variants
                .into_iter()
                .map(|(category, text)| (category.into(), text.into()))
                .collect(),
        }
    }

    /// Returns true if the declared rule type is the plural rule type.
    pub fn is_plural_rule(&self) -> bool {
        self.spec_type.as_deref() == Some(PLURAL_RULE_TYPE)
    }
}
