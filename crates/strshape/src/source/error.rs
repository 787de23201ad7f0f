//! Error types for reading localization source files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// An error that occurred while parsing a source file's text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed XML that is not the expected document structure.
    #[error("invalid document structure: {message}")]
    Structure { message: String },

    /// Text that is neither UTF-8 nor UTF-16 with a byte order mark.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
}

/// Errors that occur while loading a source file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the source file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file could not be parsed.
    #[error("{path}: {error}")]
    Parse { path: PathBuf, error: ParseError },

    /// The file extension is not one this crate reads.
    #[error("unsupported extension '{extension}' for '{path}', expected one of: {}", .supported.join(", "))]
    UnsupportedExtension {
        path: PathBuf,
        extension: String,
        supported: Vec<String>,
    },
}

/// Calculate line and column from original input and remaining input.
pub(crate) fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len().saturating_sub(remaining.len());
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}

/// Build a syntax error pointing at the start of `remaining`.
pub(crate) fn syntax_error(original: &str, remaining: &str, message: String) -> ParseError {
    let (line, column) = calculate_position(original, remaining);
    ParseError::Syntax {
        line,
        column,
        message,
    }
}
