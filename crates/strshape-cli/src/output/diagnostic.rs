//! Miette diagnostic wrapper for source file parse errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use strshape::ParseError;
use thiserror::Error;

/// A miette-compatible diagnostic for localization file parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(strshape::parse))]
pub struct SourceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl SourceDiagnostic {
    /// Create a diagnostic from a ParseError with source context.
    pub fn from_parse_error(path: &Path, content: &str, err: &ParseError) -> Self {
        let (line, column, message, help) = match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => (*line, *column, format!("syntax error: {message}"), None),
            ParseError::Structure { message } => (
                1,
                1,
                format!("unexpected document structure: {message}"),
                Some("stringsdict files must be a <plist> with a top-level <dict>; Android files a <resources> element".to_string()),
            ),
            ParseError::InvalidUtf8 => (
                1,
                1,
                "invalid text encoding".to_string(),
                Some("save the file as UTF-8 or as UTF-16 with a byte order mark".to_string()),
            ),
        };

        // Columns count characters, so walk the error line to find the byte offset.
        let line_start = content
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum::<usize>();
        let column_offset = content[line_start.min(content.len())..]
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(0, |(offset, _)| offset);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = (line_start + column_offset).min(content.len());

        SourceDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}
