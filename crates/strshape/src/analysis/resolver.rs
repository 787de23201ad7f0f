//! Signature resolution for flat format strings and plural-rule entries.
//!
//! Plural references are resolved recursively. Each recursive call extends a
//! borrowed [`ResolutionPath`], so cycle detection is local to one resolution
//! tree and nothing is shared between keys.

use tracing::{debug, trace};

use crate::analysis::error::{AnalysisError, compute_suggestions};
use crate::analysis::options::{AnalysisOptions, UnknownSpecifierPolicy};
use crate::analysis::signature::SignatureBuilder;
use crate::analysis::unify::unify_params;
use crate::format::{
    Dialect, FormatPart, FormatSpecifier, FormatString, SpecifierKind, tokenize, tokenize_with,
};
use crate::types::{
    FORMAT_SPEC_TYPE_KEY, FORMAT_VALUE_TYPE_KEY, PluralRuleEntry, PluralVariable, StringParam,
};

/// The chain of variables currently being resolved, innermost last.
#[derive(Debug, Clone, Copy)]
struct ResolutionPath<'p> {
    key: &'p str,
    parent: Option<&'p ResolutionPath<'p>>,
}

impl ResolutionPath<'_> {
    fn contains(&self, key: &str) -> bool {
        let mut current = Some(self);
        while let Some(node) = current {
            if node.key == key {
                return true;
            }
            current = node.parent;
        }
        false
    }

    /// Keys from the outermost reference to the innermost.
    fn chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            chain.push(node.key.to_string());
            current = node.parent;
        }
        chain.reverse();
        chain
    }
}

/// Resolves format strings into parameter lists.
struct Resolver<'a> {
    /// The enclosing plural-rule entry, or `None` for flat strings.
    entry: Option<&'a PluralRuleEntry>,
    options: &'a AnalysisOptions,
    dialect: Dialect,
}

impl Resolver<'_> {
    /// Build the signature of one tokenized format string.
    ///
    /// `owner` names the plural variable whose variant is being read, and is
    /// attached to every specifier found directly in it.
    fn signature(
        &self,
        format: &FormatString,
        owner: Option<&str>,
        path: Option<&ResolutionPath<'_>>,
    ) -> Result<Vec<StringParam>, AnalysisError> {
        let mut builder = SignatureBuilder::new();

        for part in &format.parts {
            match part {
                FormatPart::Literal(_) => {}
                FormatPart::Spec(spec) => {
                    if spec.kind == SpecifierKind::Percent {
                        continue;
                    }
                    let position = spec.position.unwrap_or_else(|| builder.next_free());
                    if spec.kind == SpecifierKind::Unknown
                        && self.options.unknown_specifiers == UnknownSpecifierPolicy::Reject
                    {
                        return Err(AnalysisError::MalformedSpecifier { position });
                    }
                    let param = match owner {
                        Some(name) => StringParam::named(name, *spec),
                        None => StringParam::new(*spec),
                    };
                    builder.place(position, param)?;
                }
                FormatPart::Reference { name, position } => {
                    if self.entry.is_none() {
                        return Err(AnalysisError::NonSpecifierReference { name: name.clone() });
                    }
                    let resolved = self.resolve_reference(name, path)?;
                    let start = position.unwrap_or_else(|| builder.next_free());
                    builder.place_run(start, &resolved)?;
                }
            }
        }

        builder.finish()
    }

    /// Resolve a `%#@name@` reference against the enclosing entry.
    fn resolve_reference(
        &self,
        name: &str,
        path: Option<&ResolutionPath<'_>>,
    ) -> Result<Vec<StringParam>, AnalysisError> {
        if let Some(path) = path
            && path.contains(name)
        {
            let mut chain = path.chain();
            chain.push(name.to_string());
            return Err(AnalysisError::CyclicReference {
                name: name.to_string(),
                chain,
            });
        }

        let Some(entry) = self.entry else {
            return Err(AnalysisError::NonSpecifierReference {
                name: name.to_string(),
            });
        };

        let Some(variable) = entry.variables.get(name) else {
            return Err(AnalysisError::MissingReference {
                name: name.to_string(),
                suggestions: compute_suggestions(name, &entry.variable_names()),
            });
        };

        let base = base_param(name, variable)?;
        debug!(
            variable = name,
            variants = variable.variants.len(),
            "resolving plural reference"
        );

        let here = ResolutionPath {
            key: name,
            parent: path,
        };
        let mut result = vec![base];

        for (category, text) in &variable.variants {
            trace!(variable = name, category = %category, "folding plural variant");
            let format = tokenize_with(text, self.dialect);
            let alternative = self.signature(&format, Some(name), Some(&here))?;
            result = unify_params(&result, &alternative).map_err(|conflict| {
                AnalysisError::CannotUnify {
                    name: name.to_string(),
                    position: conflict.position,
                    left: conflict.left,
                    right: conflict.right,
                }
            })?;
        }

        Ok(result)
    }
}

/// Check a variable's shape and derive its controlling parameter.
fn base_param(name: &str, variable: &PluralVariable) -> Result<StringParam, AnalysisError> {
    let incorrect = |reason: String| AnalysisError::IncorrectReference {
        name: name.to_string(),
        reason,
    };

    match variable.spec_type.as_deref() {
        None => return Err(incorrect(format!("missing {FORMAT_SPEC_TYPE_KEY}"))),
        Some(_) if variable.is_plural_rule() => {}
        Some(other) => return Err(incorrect(format!("unsupported rule type '{other}'"))),
    }

    let Some(value_type) = variable.value_type.as_deref() else {
        return Err(incorrect(format!("missing {FORMAT_VALUE_TYPE_KEY}")));
    };

    let format = tokenize(&format!("%{value_type}"));
    match format.parts.as_slice() {
        [FormatPart::Spec(spec)]
            if spec.position.is_none()
                && !matches!(spec.kind, SpecifierKind::Unknown | SpecifierKind::Percent) =>
        {
            Ok(StringParam::new(FormatSpecifier::at(1, spec.kind)))
        }
        _ => Err(incorrect(format!(
            "unparseable format specifier '{value_type}'"
        ))),
    }
}

/// Resolve the parameters of a flat (non-plural) format string.
///
/// References are rejected with `NonSpecifierReference`.
///
/// # Example
///
/// ```
/// use strshape::format::{Dialect, SpecifierKind};
/// use strshape::{AnalysisOptions, resolve_format};
///
/// let params = resolve_format(
///     "Hello %@, you have %d new messages",
///     Dialect::Apple,
///     &AnalysisOptions::default(),
/// )
/// .unwrap();
///
/// assert_eq!(params[0].kind(), SpecifierKind::ObjectOrString);
/// assert_eq!(params[1].kind(), SpecifierKind::SignedInt);
/// ```
pub fn resolve_format(
    text: &str,
    dialect: Dialect,
    options: &AnalysisOptions,
) -> Result<Vec<StringParam>, AnalysisError> {
    normalize(&tokenize_with(text, dialect), options)
}

/// Assign final positions to an already tokenized flat format string.
pub fn normalize(
    format: &FormatString,
    options: &AnalysisOptions,
) -> Result<Vec<StringParam>, AnalysisError> {
    let resolver = Resolver {
        entry: None,
        options,
        dialect: Dialect::Apple,
    };
    resolver.signature(format, None, None)
}

/// Resolve the parameters of a plural-rule entry's template.
pub fn resolve_plural_entry(
    entry: &PluralRuleEntry,
    options: &AnalysisOptions,
) -> Result<Vec<StringParam>, AnalysisError> {
    let resolver = Resolver {
        entry: Some(entry),
        options,
        dialect: Dialect::Apple,
    };
    resolver.signature(&tokenize(&entry.format), None, None)
}

/// Resolve one named variable of a plural-rule entry, starting a fresh
/// resolution path.
pub fn resolve_reference(
    name: &str,
    entry: &PluralRuleEntry,
    options: &AnalysisOptions,
) -> Result<Vec<StringParam>, AnalysisError> {
    let resolver = Resolver {
        entry: Some(entry),
        options,
        dialect: Dialect::Apple,
    };
    resolver.resolve_reference(name, None)
}
