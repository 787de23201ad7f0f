//! Implementation of the `strshape signatures` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use strshape::{analyze_source, merge_reports, AnalysisOptions, Report};

use super::load::load_files;
use crate::output::table::format_signature_table;

/// Arguments for the signatures command.
#[derive(Debug, clap::Args)]
pub struct SignaturesArgs {
    /// Files to merge (all locales of one or more tables)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the signatures command.
pub fn run_signatures(args: SignaturesArgs) -> miette::Result<i32> {
    let options = AnalysisOptions::default();
    let loaded = load_files(&args.files);
    let reports: Vec<Report> = loaded
        .files
        .iter()
        .map(|file| analyze_source(file, &options))
        .collect();

    let skipped: usize = reports.iter().map(|report| report.failures.len()).sum();
    if skipped > 0 {
        eprintln!(
            "{} {skipped} keys failed to resolve and are not shown; run `strshape check` for details",
            "note:".cyan().bold()
        );
    }

    let tables = merge_reports(&reports);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tables).into_diagnostic()?
        );
    } else {
        for table in &tables {
            let locales = table
                .locales
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            println!("{} ({locales})", table.name.bold());
            println!("{}", format_signature_table(table));
            for warning in &table.warnings {
                println!("{} {warning}", "warning:".yellow().bold());
            }
            println!();
        }
    }

    Ok(loaded.exit_code)
}
