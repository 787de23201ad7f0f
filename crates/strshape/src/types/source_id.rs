use std::fmt;

use serde::Serialize;

/// The locale a source file belongs to.
///
/// Ordering puts the untagged locale first, then `Base`, then languages by tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleId {
    /// The file is not inside any localization directory.
    None,
    /// `Base.lproj`.
    Base,
    /// A BCP-47 language tag such as `en` or `pt-BR`.
    Language(String),
}

impl LocaleId {
    /// The language tag, if this is a language locale.
    pub fn language(&self) -> Option<&str> {
        match self {
            LocaleId::Language(tag) => Some(tag),
            LocaleId::None | LocaleId::Base => None,
        }
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocaleId::None => f.write_str("none"),
            LocaleId::Base => f.write_str("Base"),
            LocaleId::Language(tag) => f.write_str(tag),
        }
    }
}

/// Identifies the file a key came from, for error messages and merging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceId {
    /// Table name (file stem), e.g. `Localizable`.
    pub table: String,
    /// File name with extension, e.g. `Localizable.stringsdict`.
    pub file_name: String,
    pub locale: LocaleId,
}

impl SourceId {
    /// Create a source id, deriving the table name from the file stem.
    pub fn new(file_name: impl Into<String>, locale: LocaleId) -> Self {
        let file_name = file_name.into();
        let table = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => file_name.clone(),
        };
        Self {
            table,
            file_name,
            locale,
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.locale {
            LocaleId::None => write!(f, "'{}'", self.file_name),
            locale => write!(f, "'{}' ({locale})", self.file_name),
        }
    }
}
