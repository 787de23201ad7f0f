//! Implementation of the `strshape inspect` command.

use owo_colors::OwoColorize;
use serde::Serialize;
use strshape::format::FormatPart;
use strshape::{
    resolve_format, tokenize_with, AnalysisOptions, Dialect, StringParam, UnknownSpecifierPolicy,
};

/// Arguments for the inspect command.
#[derive(Debug, clap::Args)]
pub struct InspectArgs {
    /// Format string to inspect
    pub format: String,

    /// Use Android conversion rules (`%s` is an object)
    #[arg(long)]
    pub android: bool,

    /// Keep unrecognized specifiers instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one tokenized part.
#[derive(Serialize)]
struct PartJson {
    kind: &'static str,
    text: String,
}

/// JSON output for inspect results.
#[derive(Serialize)]
struct InspectJson {
    parts: Vec<PartJson>,
    params: Option<Vec<StringParam>>,
    error: Option<String>,
}

/// Run the inspect command.
pub fn run_inspect(args: InspectArgs) -> miette::Result<i32> {
    let dialect = if args.android {
        Dialect::Android
    } else {
        Dialect::Apple
    };
    let options = AnalysisOptions::builder()
        .unknown_specifiers(if args.lenient {
            UnknownSpecifierPolicy::Warn
        } else {
            UnknownSpecifierPolicy::Reject
        })
        .build();

    let format = tokenize_with(&args.format, dialect);
    let resolved = resolve_format(&args.format, dialect, &options);

    if args.json {
        let output = InspectJson {
            parts: format.parts.iter().map(part_json).collect(),
            params: resolved.as_ref().ok().cloned(),
            error: resolved.as_ref().err().map(ToString::to_string),
        };
        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| miette::miette!("Failed to serialize output: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", "parts".bold());
        for part in &format.parts {
            let PartJson { kind, text } = part_json(part);
            println!("  {:<9} {}", kind.dimmed(), text);
        }
        match &resolved {
            Ok(params) if params.is_empty() => println!("{}", "no parameters".bold()),
            Ok(params) => {
                println!("{}", "parameters".bold());
                for param in params {
                    println!("  {param}");
                }
            }
            Err(error) => println!("{} {error}", "error:".red().bold()),
        }
    }

    if resolved.is_ok() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

fn part_json(part: &FormatPart) -> PartJson {
    match part {
        FormatPart::Literal(text) => PartJson {
            kind: "literal",
            text: format!("{text:?}"),
        },
        FormatPart::Spec(spec) => PartJson {
            kind: "specifier",
            text: format!("{spec} ({})", spec.kind),
        },
        FormatPart::Reference { .. } => PartJson {
            kind: "reference",
            text: part.to_string(),
        },
    }
}
