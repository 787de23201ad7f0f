//! Merging per-file reports into one signature per key and table.
//!
//! A table is every file sharing a stem (`Localizable.strings`,
//! `Localizable.stringsdict`, in every locale). Within one locale a
//! stringsdict entry overrides a strings entry with the same key; across
//! locales the parameter lists must unify.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::analysis::error::AnalysisWarning;
use crate::analysis::report::Report;
use crate::analysis::unify::unify;
use crate::types::{LocaleId, ResolvedEntry, StringParam};

/// One key's signature agreed on by all locales that define it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedEntry {
    pub key: String,
    pub params: Vec<StringParam>,
    /// Text from the preferred locale (untagged, then `Base`, then the first language).
    pub source_text: String,
    /// Locales defining the key, in order.
    pub locales: Vec<LocaleId>,
}

/// The merged view of one table.
#[derive(Debug, Clone, Serialize)]
pub struct MergedTable {
    pub name: String,
    pub locales: Vec<LocaleId>,
    pub entries: BTreeMap<String, MergedEntry>,
    #[serde(skip)]
    pub warnings: Vec<AnalysisWarning>,
}

/// Merge reports into tables, sorted by table name.
pub fn merge_reports(reports: &[Report]) -> Vec<MergedTable> {
    let mut by_table: BTreeMap<&str, Vec<&Report>> = BTreeMap::new();
    for report in reports {
        by_table
            .entry(report.origin.table.as_str())
            .or_default()
            .push(report);
    }

    by_table
        .into_iter()
        .map(|(name, reports)| merge_table(name, &reports))
        .collect()
}

fn merge_table(name: &str, reports: &[&Report]) -> MergedTable {
    // Strings files first so stringsdict entries of the same locale replace them.
    let mut ordered = reports.to_vec();
    ordered.sort_by_key(|report| {
        (
            report.origin.locale.clone(),
            report.origin.file_name.ends_with(".stringsdict"),
        )
    });

    let mut per_locale: BTreeMap<LocaleId, BTreeMap<&str, &ResolvedEntry>> = BTreeMap::new();
    for report in &ordered {
        let locale_entries = per_locale.entry(report.origin.locale.clone()).or_default();
        for (key, entry) in &report.entries {
            locale_entries.insert(key.as_str(), entry);
        }
    }

    let keys: BTreeSet<&str> = per_locale
        .values()
        .flat_map(|entries| entries.keys().copied())
        .collect();

    let mut table = MergedTable {
        name: name.to_string(),
        locales: per_locale.keys().cloned().collect(),
        entries: BTreeMap::new(),
        warnings: Vec::new(),
    };

    for key in keys {
        let present: Vec<(&LocaleId, &ResolvedEntry)> = per_locale
            .iter()
            .filter_map(|(locale, entries)| entries.get(key).map(|entry| (locale, *entry)))
            .collect();

        let missing: Vec<String> = per_locale
            .iter()
            .filter(|(_, entries)| !entries.contains_key(key))
            .map(|(locale, _)| locale.to_string())
            .collect();
        if !missing.is_empty() {
            table.warnings.push(AnalysisWarning::MissingTranslation {
                table: name.to_string(),
                key: key.to_string(),
                missing,
            });
        }

        let Some(((_, first), rest)) = present.split_first() else {
            continue;
        };
        let merged = rest.iter().try_fold(first.params.clone(), |params, (_, entry)| {
            unify(&params, &entry.params)
        });

        let Some(params) = merged else {
            debug!(table = name, key, "signatures differ between locales");
            table.warnings.push(AnalysisWarning::SignatureMismatch {
                table: name.to_string(),
                key: key.to_string(),
                locales: present.iter().map(|(locale, _)| locale.to_string()).collect(),
            });
            continue;
        };

        table.entries.insert(
            key.to_string(),
            MergedEntry {
                key: key.to_string(),
                params,
                source_text: first.source_text.clone(),
                locales: present.iter().map(|(locale, _)| (*locale).clone()).collect(),
            },
        );
    }

    table
}
