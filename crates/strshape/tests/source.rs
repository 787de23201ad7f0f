//! Integration tests for reading localization files from disk

use std::fs;
use std::path::{Path, PathBuf};

use strshape::format::SpecifierKind;
use strshape::source::{SourceContent, SourceKind, locale_for_path};
use strshape::{
    AnalysisError, AnalysisOptions, AnalysisWarning, LoadError, LocaleId, ParseError,
    StringParam, analyze_source, load_source,
};
use tempfile::TempDir;

fn write_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn language(tag: &str) -> LocaleId {
    LocaleId::Language(tag.to_string())
}

// =============================================================================
// .strings
// =============================================================================

const STRINGS_FILE: &str = r#"/* Shown on the start screen */
"greeting" = "Hello %@";

// Escapes
"escaped" = "Line\nTab\t\"quoted\" \U00e9";
bare_key = "value";
"greeting" = "Hi %@";
"Cancel";
"#;

#[test]
fn test_load_strings_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "en.lproj/Localizable.strings", STRINGS_FILE);

    let file = load_source(&path).unwrap();
    assert_eq!(file.kind, SourceKind::Strings);
    assert_eq!(file.id.table, "Localizable");
    assert_eq!(file.id.file_name, "Localizable.strings");
    assert_eq!(file.id.locale, language("en"));
    assert_eq!(file.duplicate_keys, vec!["greeting".to_string()]);

    let SourceContent::Strings(strings) = &file.content else {
        panic!("expected a strings table");
    };
    assert_eq!(strings["greeting"], "Hi %@");
    assert_eq!(strings["escaped"], "Line\nTab\t\"quoted\" é");
    assert_eq!(strings["bare_key"], "value");
    assert_eq!(strings["Cancel"], "Cancel");
}

#[test]
fn test_analyze_strings_file_reports_duplicates() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "en.lproj/Localizable.strings", STRINGS_FILE);

    let report = analyze_source(&load_source(&path).unwrap(), &AnalysisOptions::default());
    assert!(report.is_ok());
    assert_eq!(
        report.warnings,
        vec![AnalysisWarning::DuplicateKey {
            key: "greeting".to_string()
        }]
    );
    assert_eq!(
        report.get("greeting").unwrap().params,
        vec![StringParam::at(1, SpecifierKind::ObjectOrString)]
    );
}

#[test]
fn test_strings_syntax_error_location() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Localizable.strings", "\"a\" = \"b\";\n\"c\" = ;\n");

    match load_source(&path) {
        Err(LoadError::Parse {
            path: error_path,
            error: ParseError::Syntax { line, column, .. },
        }) => {
            assert_eq!(error_path, path);
            assert_eq!((line, column), (2, 1));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_utf16_strings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("de.lproj").join("Localizable.strings");
    fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut bytes = vec![0xFF, 0xFE];
    for unit in "\"count\" = \"%d Dateien\";".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::write(&path, bytes).unwrap();

    let file = load_source(&path).unwrap();
    assert_eq!(file.id.locale, language("de"));
    assert_eq!(file.content.len(), 1);
}

// =============================================================================
// .stringsdict
// =============================================================================

const STRINGSDICT_FILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>files</key>
    <dict>
        <key>NSStringLocalizedFormatKey</key>
        <string>%#@files@ in %@</string>
        <key>files</key>
        <dict>
            <key>NSStringFormatSpecTypeKey</key>
            <string>NSStringPluralRuleType</string>
            <key>NSStringFormatValueTypeKey</key>
            <string>d</string>
            <key>one</key>
            <string>%d file</string>
            <key>other</key>
            <string>%d files</string>
        </dict>
    </dict>
    <!-- Wrong shapes -->
    <key>count</key>
    <integer>3</integer>
    <key>no_format</key>
    <dict>
        <key>n</key>
        <dict/>
    </dict>
    <key>numeric_format</key>
    <dict>
        <key>NSStringLocalizedFormatKey</key>
        <real>1.5</real>
    </dict>
</dict>
</plist>
"#;

#[test]
fn test_load_stringsdict_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "Base.lproj/Localizable.stringsdict", STRINGSDICT_FILE);

    let file = load_source(&path).unwrap();
    assert_eq!(file.kind, SourceKind::Stringsdict);
    assert_eq!(file.id.locale, LocaleId::Base);
    assert_eq!(file.content.len(), 1);
    assert_eq!(
        file.rejected.get("count"),
        Some(&AnalysisError::NonDictValue {
            found: "integer 3".to_string()
        })
    );
    assert_eq!(
        file.rejected.get("no_format"),
        Some(&AnalysisError::MissingLocalizedFormat)
    );
    assert_eq!(
        file.rejected.get("numeric_format"),
        Some(&AnalysisError::NonStringValue {
            found: "real 1.5".to_string()
        })
    );
}

#[test]
fn test_analyze_stringsdict_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "en.lproj/Localizable.stringsdict", STRINGSDICT_FILE);

    let report = analyze_source(&load_source(&path).unwrap(), &AnalysisOptions::default());
    let entry = report.get("files").unwrap();
    assert_eq!(entry.params.len(), 2);
    assert_eq!(entry.params[0].name.as_deref(), Some("files"));
    assert_eq!(entry.params[0].kind(), SpecifierKind::SignedInt);
    assert_eq!(entry.params[1].kind(), SpecifierKind::ObjectOrString);

    let failed: Vec<&str> = report
        .failures
        .iter()
        .map(|failure| failure.key.as_str())
        .collect();
    assert_eq!(failed, vec!["count", "no_format", "numeric_format"]);
}

#[test]
fn test_stringsdict_with_array_root_is_structure_error() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "Localizable.stringsdict",
        "<plist version=\"1.0\"><array/></plist>",
    );
    assert!(matches!(
        load_source(&path),
        Err(LoadError::Parse {
            error: ParseError::Structure { .. },
            ..
        })
    ));
}

// =============================================================================
// Android strings.xml
// =============================================================================

const ANDROID_FILE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
    <string name="app_name" translatable="false">Files</string>
    <string name="greeting">Hello <xliff:g id="name">%1$s</xliff:g>!</string>
    <string name="count">"%d  items"</string>
    <string name="apostrophe">Don\'t panic</string>
    <plurals name="songs">
        <item quantity="one">%d song</item>
    </plurals>
</resources>
"#;

#[test]
fn test_load_android_strings() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "res/values-pt-rBR/strings.xml", ANDROID_FILE);

    let file = load_source(&path).unwrap();
    assert_eq!(file.kind, SourceKind::AndroidXml);
    assert_eq!(file.id.locale, language("pt-BR"));

    let SourceContent::Strings(strings) = &file.content else {
        panic!("expected a strings table");
    };
    assert!(!strings.contains_key("app_name"));
    assert!(!strings.contains_key("songs"));
    assert_eq!(strings["greeting"], "Hello %1$s!");
    assert_eq!(strings["count"], "%d  items");
    assert_eq!(strings["apostrophe"], "Don't panic");
}

#[test]
fn test_analyze_android_strings_uses_android_dialect() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "res/values/strings.xml", ANDROID_FILE);

    let report = analyze_source(&load_source(&path).unwrap(), &AnalysisOptions::default());
    assert_eq!(report.origin.locale, LocaleId::None);
    assert_eq!(
        report.get("greeting").unwrap().params,
        vec![StringParam::at(1, SpecifierKind::ObjectOrString)]
    );
}

#[test]
fn test_android_wrong_root() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "values/strings.xml", "<plist><dict/></plist>");
    assert!(matches!(
        load_source(&path),
        Err(LoadError::Parse {
            error: ParseError::Structure { .. },
            ..
        })
    ));
}

// =============================================================================
// Loader errors
// =============================================================================

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "strings.json", "{}");

    match load_source(&path) {
        Err(LoadError::UnsupportedExtension {
            extension,
            supported,
            ..
        }) => {
            assert_eq!(extension, "json");
            assert_eq!(supported, vec!["strings", "stringsdict", "xml"]);
        }
        other => panic!("expected an unsupported extension error, got {other:?}"),
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.lproj/Missing.strings");
    assert!(matches!(load_source(&path), Err(LoadError::Io { .. })));
}

#[test]
fn test_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Localizable.strings");
    fs::write(&path, [0x22, 0xC3, 0x28, 0x22]).unwrap();
    assert!(matches!(
        load_source(&path),
        Err(LoadError::Parse {
            error: ParseError::InvalidUtf8,
            ..
        })
    ));
}

// =============================================================================
// Locale derivation
// =============================================================================

#[test]
fn test_locale_for_path() {
    let cases = [
        ("App/en.lproj/Localizable.strings", language("en")),
        ("App/pt_BR.lproj/Localizable.strings", language("pt-BR")),
        ("App/zh-Hans.lproj/Localizable.strings", language("zh-Hans")),
        ("App/Base.lproj/Main.strings", LocaleId::Base),
        ("res/values-fr/strings.xml", language("fr")),
        ("res/values-pt-rBR/strings.xml", language("pt-BR")),
        ("res/values-b+sr+Latn/strings.xml", language("sr-Latn")),
        ("res/values/strings.xml", LocaleId::None),
        ("res/values-night/strings.xml", LocaleId::None),
        ("res/values-v21/strings.xml", LocaleId::None),
        ("Localizable.strings", LocaleId::None),
    ];
    for (path, expected) in cases {
        assert_eq!(locale_for_path(Path::new(path)), expected, "{path}");
    }
}
