//! `.stringsdict` reader.
//!
//! Parses the XML property list subset used by stringsdict files and
//! converts each top-level entry into a typed [`PluralRuleEntry`]. Entries
//! with the wrong value shapes are rejected individually; the rest of the
//! file is still usable.

use std::collections::BTreeMap;

use tracing::trace;

use roxmltree::Node;

use super::error::ParseError;
use super::{element_text, parse_xml};
use crate::analysis::AnalysisError;
use crate::types::{
    FORMAT_SPEC_TYPE_KEY, FORMAT_VALUE_TYPE_KEY, LOCALIZED_FORMAT_KEY, PluralRuleEntry,
    PluralVariable,
};

/// A property list value.
#[derive(Debug, Clone, PartialEq)]
enum PlistValue {
    String(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Date(String),
    Data(String),
    Array(Vec<PlistValue>),
    Dict(BTreeMap<String, PlistValue>),
}

impl PlistValue {
    /// Short description used in rejection messages, e.g. `integer 3`.
    fn describe(&self) -> String {
        match self {
            PlistValue::String(text) => format!("string \"{text}\""),
            PlistValue::Integer(value) => format!("integer {value}"),
            PlistValue::Real(value) => format!("real {value}"),
            PlistValue::Boolean(value) => format!("boolean {value}"),
            PlistValue::Date(value) => format!("date {value}"),
            PlistValue::Data(value) => format!("data of {} base64 chars", value.trim().len()),
            PlistValue::Array(items) => format!("array of {} values", items.len()),
            PlistValue::Dict(members) => format!("dict of {} keys", members.len()),
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(text) => Some(text),
            _ => None,
        }
    }
}

/// The typed content of one stringsdict file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringsdictTable {
    pub entries: BTreeMap<String, PluralRuleEntry>,
    /// Entries whose values have the wrong shape.
    pub rejected: BTreeMap<String, AnalysisError>,
    /// Keys that appear more than once at the top level.
    pub duplicate_keys: Vec<String>,
}

/// Parse stringsdict XML text.
pub fn parse_stringsdict(input: &str) -> Result<StringsdictTable, ParseError> {
    let document = parse_xml(input)?;
    let root = document.root_element();
    let top = if root.tag_name().name() == "plist" {
        let mut children = root.children().filter(Node::is_element);
        match (children.next(), children.next()) {
            (Some(value), None) => value,
            _ => return Err(structure("<plist> must contain exactly one value")),
        }
    } else {
        root
    };

    if top.tag_name().name() != "dict" {
        return Err(structure(format!(
            "top-level value must be a dict, found <{}>",
            top.tag_name().name()
        )));
    }

    let mut duplicate_keys = Vec::new();
    let members = dict_members(top, &mut duplicate_keys)?;

    let mut table = StringsdictTable {
        duplicate_keys,
        ..StringsdictTable::default()
    };
    for (key, value) in members {
        match plural_entry(value) {
            Ok(entry) => {
                trace!(key = %key, variables = entry.variables.len(), "read plural entry");
                table.entries.insert(key, entry);
            }
            Err(error) => {
                table.rejected.insert(key, error);
            }
        }
    }
    Ok(table)
}

/// Convert one top-level value into a plural-rule entry.
fn plural_entry(value: PlistValue) -> Result<PluralRuleEntry, AnalysisError> {
    let members = match value {
        PlistValue::Dict(members) => members,
        other => {
            return Err(AnalysisError::NonDictValue {
                found: other.describe(),
            });
        }
    };

    let format = match members.get(LOCALIZED_FORMAT_KEY) {
        None => return Err(AnalysisError::MissingLocalizedFormat),
        Some(PlistValue::String(format)) => format.clone(),
        Some(other) => {
            return Err(AnalysisError::NonStringValue {
                found: other.describe(),
            });
        }
    };

    let mut entry = PluralRuleEntry::new(format);
    for (name, member) in members {
        // Only dict members are variables; anything else is not referenceable.
        if let PlistValue::Dict(fields) = member {
            entry.variables.insert(name, plural_variable(fields));
        }
    }
    Ok(entry)
}

fn plural_variable(fields: BTreeMap<String, PlistValue>) -> PluralVariable {
    let mut variable = PluralVariable::default();
    for (field, value) in fields {
        let Some(text) = value.as_str() else {
            continue;
        };
        match field.as_str() {
            FORMAT_SPEC_TYPE_KEY => variable.spec_type = Some(text.to_string()),
            FORMAT_VALUE_TYPE_KEY => variable.value_type = Some(text.to_string()),
            _ => {
                variable.variants.insert(field, text.to_string());
            }
        }
    }
    variable
}

/// Read a `<dict>` element's `<key>`/value pairs. Later duplicates win.
fn dict_members(
    dict: Node<'_, '_>,
    duplicates: &mut Vec<String>,
) -> Result<BTreeMap<String, PlistValue>, ParseError> {
    let mut members = BTreeMap::new();
    let mut children = dict.children().filter(Node::is_element);
    while let Some(key) = children.next() {
        if key.tag_name().name() != "key" {
            return Err(structure(format!(
                "expected <key> in <dict>, found <{}>",
                key.tag_name().name()
            )));
        }
        let name = element_text(key);
        let Some(value) = children.next() else {
            return Err(structure(format!("<key>{name}</key> has no value")));
        };
        let value = plist_value(value)?;
        if members.insert(name.clone(), value).is_some() {
            duplicates.push(name);
        }
    }
    Ok(members)
}

fn plist_value(element: Node<'_, '_>) -> Result<PlistValue, ParseError> {
    let value = match element.tag_name().name() {
        "string" => PlistValue::String(element_text(element)),
        "integer" => {
            let text = element_text(element);
            let parsed = text
                .trim()
                .parse()
                .map_err(|_| structure(format!("invalid integer '{text}'")))?;
            PlistValue::Integer(parsed)
        }
        "real" => {
            let text = element_text(element);
            let parsed = text
                .trim()
                .parse()
                .map_err(|_| structure(format!("invalid real '{text}'")))?;
            PlistValue::Real(parsed)
        }
        "true" => PlistValue::Boolean(true),
        "false" => PlistValue::Boolean(false),
        "date" => PlistValue::Date(element_text(element)),
        "data" => PlistValue::Data(element_text(element)),
        "array" => PlistValue::Array(
            element
                .children()
                .filter(Node::is_element)
                .map(plist_value)
                .collect::<Result<_, _>>()?,
        ),
        // Nested duplicates are not interesting enough to report.
        "dict" => PlistValue::Dict(dict_members(element, &mut Vec::new())?),
        other => return Err(structure(format!("unsupported plist element <{other}>"))),
    };
    Ok(value)
}

fn structure(message: impl Into<String>) -> ParseError {
    ParseError::Structure {
        message: message.into(),
    }
}
