//! Loading source files with rendered diagnostics.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use strshape::source::decode_text;
use strshape::{load_source, LoadError, SourceFile};

use crate::output::SourceDiagnostic;

/// Files that loaded, plus the exit code for those that did not.
pub struct Loaded {
    pub files: Vec<SourceFile>,
    pub exit_code: i32,
}

/// Load every path, printing a diagnostic for each file that fails.
///
/// The exit code is that of the first failure, or `OK`.
pub fn load_files(paths: &[PathBuf]) -> Loaded {
    let mut loaded = Loaded {
        files: Vec::with_capacity(paths.len()),
        exit_code: exitcode::OK,
    };

    for path in paths {
        match load_source(path) {
            Ok(file) => loaded.files.push(file),
            Err(error) => {
                let code = report_load_error(path, &error);
                if loaded.exit_code == exitcode::OK {
                    loaded.exit_code = code;
                }
            }
        }
    }

    loaded
}

/// Print a load error and return its exit code.
fn report_load_error(path: &Path, error: &LoadError) -> i32 {
    match error {
        LoadError::Io { source, .. } => {
            eprintln!("{} {error}", "error:".red().bold());
            if source.kind() == ErrorKind::NotFound {
                exitcode::NOINPUT
            } else {
                exitcode::IOERR
            }
        }
        LoadError::Parse { error: parse, .. } => {
            let content = fs::read(path)
                .ok()
                .and_then(|bytes| decode_text(&bytes).ok())
                .unwrap_or_default();
            let diagnostic = SourceDiagnostic::from_parse_error(path, &content, parse);
            eprintln!("{:?}", miette::Report::new(diagnostic));
            exitcode::DATAERR
        }
        LoadError::UnsupportedExtension { .. } => {
            eprintln!("{} {error}", "error:".red().bold());
            exitcode::USAGE
        }
    }
}
