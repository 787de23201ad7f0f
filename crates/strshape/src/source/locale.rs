//! Locale derivation from resource directory names.

use std::ffi::OsStr;
use std::path::Path;

use icu_locale_core::LanguageIdentifier;

use crate::types::LocaleId;

/// Derive the locale of a file from its parent directory.
///
/// - `en.lproj`, `pt_BR.lproj` → `Language("en")`, `Language("pt-BR")`
/// - `Base.lproj` → `Base`
/// - `values-fr`, `values-pt-rBR` → `Language("fr")`, `Language("pt-BR")`
/// - anything else, including bare `values` → `None`
pub fn locale_for_path(path: &Path) -> LocaleId {
    let Some(directory) = path
        .parent()
        .and_then(Path::file_name)
        .and_then(OsStr::to_str)
    else {
        return LocaleId::None;
    };

    if let Some(language) = directory.strip_suffix(".lproj") {
        if language == "Base" {
            return LocaleId::Base;
        }
        return LocaleId::Language(canonical_tag(&language.replace('_', "-")));
    }

    if let Some(qualifiers) = directory.strip_prefix("values-") {
        return android_locale(qualifiers);
    }

    LocaleId::None
}

/// Read the language and optional `rXX` region from Android resource qualifiers.
///
/// Qualifiers that do not start with a language (`values-night`,
/// `values-v21`) yield `None`. `b+` BCP-47 qualifiers are decoded too.
fn android_locale(qualifiers: &str) -> LocaleId {
    if let Some(bcp47) = qualifiers.strip_prefix("b+") {
        let tag = bcp47.split('-').next().unwrap_or_default().replace('+', "-");
        return match tag.parse::<LanguageIdentifier>() {
            Ok(id) => LocaleId::Language(id.to_string()),
            Err(_) => LocaleId::None,
        };
    }

    let mut parts = qualifiers.split('-');
    let Some(language) = parts.next() else {
        return LocaleId::None;
    };
    let is_language = matches!(language.len(), 2 | 3)
        && language.chars().all(|c| c.is_ascii_lowercase())
        && language.parse::<LanguageIdentifier>().is_ok();
    if !is_language {
        return LocaleId::None;
    }

    let region = parts.next().and_then(|part| {
        part.strip_prefix('r')
            .filter(|region| region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase()))
    });
    let tag = match region {
        Some(region) => format!("{language}-{region}"),
        None => language.to_string(),
    };
    LocaleId::Language(canonical_tag(&tag))
}

/// Canonicalize a tag through `icu_locale_core`, keeping it raw if it does
/// not parse.
fn canonical_tag(tag: &str) -> String {
    match tag.parse::<LanguageIdentifier>() {
        Ok(id) => id.to_string(),
        Err(_) => tag.to_string(),
    }
}
