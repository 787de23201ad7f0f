//! Source adapter: reads localization files into typed tables.
//!
//! Three file kinds are supported:
//! - `.strings`: flat `"key" = "value";` tables
//! - `.stringsdict`: XML property lists of plural-rule entries
//! - `.xml`: Android `strings.xml` resources
//!
//! The adapter decides value shapes. Anything the resolver sees is already a
//! string or a typed [`PluralRuleEntry`].

mod android;
mod error;
mod locale;
mod strings_file;
mod stringsdict;

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::debug;

pub use android::{AndroidStrings, parse_android_strings};
pub use error::{LoadError, ParseError};
pub use locale::locale_for_path;
pub use strings_file::parse_strings;
pub use stringsdict::{StringsdictTable, parse_stringsdict};

use crate::analysis::AnalysisError;
use crate::format::Dialect;
use crate::types::{PluralRuleEntry, SourceId};

/// The file extensions this adapter reads.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["strings", "stringsdict", "xml"];

/// The format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Strings,
    Stringsdict,
    AndroidXml,
}

impl SourceKind {
    /// Determine the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default();
        match extension {
            "strings" => Ok(SourceKind::Strings),
            "stringsdict" => Ok(SourceKind::Stringsdict),
            "xml" => Ok(SourceKind::AndroidXml),
            other => Err(LoadError::UnsupportedExtension {
                path: path.to_path_buf(),
                extension: other.to_string(),
                supported: SUPPORTED_EXTENSIONS.iter().map(ToString::to_string).collect(),
            }),
        }
    }

    /// The specifier dialect of format strings in this kind of file.
    pub fn dialect(self) -> Dialect {
        match self {
            SourceKind::Strings | SourceKind::Stringsdict => Dialect::Apple,
            SourceKind::AndroidXml => Dialect::Android,
        }
    }
}

/// Typed content of a source file.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    /// Flat key to format string table.
    Strings(BTreeMap<String, String>),
    /// Plural-rule entries.
    Plurals(BTreeMap<String, PluralRuleEntry>),
}

impl SourceContent {
    /// Number of usable keys.
    pub fn len(&self) -> usize {
        match self {
            SourceContent::Strings(strings) => strings.len(),
            SourceContent::Plurals(entries) => entries.len(),
        }
    }

    /// Returns true if there are no usable keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub id: SourceId,
    pub kind: SourceKind,
    pub content: SourceContent,
    /// Keys whose values had the wrong shape, with the reason.
    pub rejected: BTreeMap<String, AnalysisError>,
    /// Keys defined more than once; the last definition is kept.
    pub duplicate_keys: Vec<String>,
}

/// Read and parse a source file from disk.
///
/// The locale comes from the parent directory (see [`locale_for_path`]).
pub fn load_source(path: impl AsRef<Path>) -> Result<SourceFile, LoadError> {
    let path = path.as_ref();
    let kind = SourceKind::from_path(path)?;

    let bytes = fs::read(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let parse_error = |error| LoadError::Parse {
        path: path.to_path_buf(),
        error,
    };
    let text = decode_text(&bytes).map_err(parse_error)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = SourceId::new(file_name, locale_for_path(path));

    let file = parse_source(id, kind, &text).map_err(parse_error)?;
    debug!(
        path = %path.display(),
        keys = file.content.len(),
        rejected = file.rejected.len(),
        "loaded source file"
    );
    Ok(file)
}

/// Parse source text that has already been read.
pub fn parse_source(id: SourceId, kind: SourceKind, text: &str) -> Result<SourceFile, ParseError> {
    let mut rejected = BTreeMap::new();
    let mut duplicate_keys = Vec::new();

    let content = match kind {
        SourceKind::Strings => {
            let mut strings = BTreeMap::new();
            for (key, value) in parse_strings(text)? {
                if strings.insert(key.clone(), value).is_some() {
                    duplicate_keys.push(key);
                }
            }
            SourceContent::Strings(strings)
        }
        SourceKind::Stringsdict => {
            let table = parse_stringsdict(text)?;
            rejected = table.rejected;
            duplicate_keys = table.duplicate_keys;
            SourceContent::Plurals(table.entries)
        }
        SourceKind::AndroidXml => {
            let android = parse_android_strings(text)?;
            duplicate_keys = android.duplicate_keys;
            SourceContent::Strings(android.strings)
        }
    };

    Ok(SourceFile {
        id,
        kind,
        content,
        rejected,
        duplicate_keys,
    })
}

/// Parse an XML document. Property lists carry a DOCTYPE, so DTDs are allowed.
fn parse_xml(input: &str) -> Result<Document<'_>, ParseError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(input, options).map_err(|e| {
        let position = e.pos();
        ParseError::Syntax {
            line: position.row as usize,
            column: position.col as usize,
            message: e.to_string(),
        }
    })
}

/// All text below `node`, with markup and comments dropped.
fn element_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

/// Decode file bytes as UTF-8 (optional BOM) or UTF-16 with a BOM.
pub fn decode_text(bytes: &[u8]) -> Result<String, ParseError> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => utf8(rest),
        [0xFF, 0xFE, rest @ ..] => utf16(rest, u16::from_le_bytes),
        [0xFE, 0xFF, rest @ ..] => utf16(rest, u16::from_be_bytes),
        _ => utf8(bytes),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, ParseError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| ParseError::InvalidUtf8)
}

fn utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String, ParseError> {
    let pairs = bytes.chunks_exact(2);
    if !pairs.remainder().is_empty() {
        return Err(ParseError::InvalidUtf8);
    }
    let units: Vec<u16> = pairs.map(|pair| unit([pair[0], pair[1]])).collect();
    String::from_utf16(&units).map_err(|_| ParseError::InvalidUtf8)
}
