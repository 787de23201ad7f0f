//! Implementation of the `strshape check` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use strshape::{
    analyze_source, merge_reports, AnalysisOptions, Report, UnknownSpecifierPolicy,
};

use super::load::load_files;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.strings, .stringsdict, .xml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Keep unrecognized specifiers as warnings instead of failing the key
    #[arg(long)]
    pub lenient: bool,

    /// Skip plural category checks
    #[arg(long)]
    pub no_lint: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one analyzed file.
#[derive(Serialize)]
struct FileJson {
    file: String,
    table: String,
    locale: String,
    resolved: usize,
    failures: Vec<FailureJson>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct FailureJson {
    key: String,
    message: String,
}

/// JSON output for cross-locale findings of one table.
#[derive(Serialize)]
struct TableJson {
    table: String,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct CheckJson {
    files: Vec<FileJson>,
    tables: Vec<TableJson>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let options = AnalysisOptions::builder()
        .unknown_specifiers(if args.lenient {
            UnknownSpecifierPolicy::Warn
        } else {
            UnknownSpecifierPolicy::Reject
        })
        .lint_plural_categories(!args.no_lint)
        .build();

    let loaded = load_files(&args.files);
    let reports: Vec<Report> = loaded
        .files
        .iter()
        .map(|file| analyze_source(file, &options))
        .collect();
    let tables = merge_reports(&reports);

    let any_failed = reports.iter().any(|report| !report.is_ok());

    if args.json {
        let output = CheckJson {
            files: reports.iter().map(file_json).collect(),
            tables: tables
                .iter()
                .map(|table| TableJson {
                    table: table.name.clone(),
                    warnings: table.warnings.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        for report in &reports {
            print_report(report);
        }
        for table in &tables {
            for warning in &table.warnings {
                println!("{} {warning}", "warning:".yellow().bold());
            }
        }
    }

    if loaded.exit_code != exitcode::OK {
        Ok(loaded.exit_code)
    } else if any_failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn file_json(report: &Report) -> FileJson {
    FileJson {
        file: report.origin.file_name.clone(),
        table: report.origin.table.clone(),
        locale: report.origin.locale.to_string(),
        resolved: report.entries.len(),
        failures: report
            .failures
            .iter()
            .map(|failure| FailureJson {
                key: failure.key.clone(),
                message: failure.error.to_string(),
            })
            .collect(),
        warnings: report.warnings.iter().map(ToString::to_string).collect(),
    }
}

fn print_report(report: &Report) {
    let status = if report.is_ok() {
        "ok".green().to_string()
    } else {
        format!("{} failed", report.failures.len()).red().to_string()
    };
    println!(
        "{} {}: {} keys resolved, {status}",
        "checked".bold(),
        report.origin,
        report.entries.len(),
    );
    for failure in &report.failures {
        println!("  {} {failure}", "error:".red().bold());
    }
    for warning in &report.warnings {
        println!("  {} {warning}", "warning:".yellow().bold());
    }
}
