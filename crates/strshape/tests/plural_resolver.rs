//! Integration tests for plural reference resolution

use strshape::format::{FormatSpecifier, SpecifierKind};
use strshape::{
    AnalysisError, AnalysisOptions, PluralRuleEntry, PluralVariable, StringParam,
    UnknownSpecifierPolicy, resolve_plural_entry, resolve_reference,
};

fn named(name: &str, position: usize, kind: SpecifierKind) -> StringParam {
    StringParam::named(name, FormatSpecifier::at(position, kind))
}

fn other_only(text: &str) -> PluralVariable {
    PluralVariable::plural_rule("d", [("other", text)])
}

fn resolve(entry: &PluralRuleEntry) -> Result<Vec<StringParam>, AnalysisError> {
    resolve_plural_entry(entry, &AnalysisOptions::default())
}

#[test]
fn test_single_plural_variable() {
    let entry = PluralRuleEntry::new("%#@messages@").with_variable(
        "messages",
        PluralVariable::plural_rule("d", [("one", "%d message"), ("other", "%d messages")]),
    );
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![named("messages", 1, SpecifierKind::SignedInt)]
    );
}

#[test]
fn test_resolve_reference_directly() {
    let entry = PluralRuleEntry::new("%#@messages@").with_variable(
        "messages",
        PluralVariable::plural_rule("d", [("one", "%d message"), ("other", "%d messages")]),
    );
    assert_eq!(
        resolve_reference("messages", &entry, &AnalysisOptions::default()).unwrap(),
        vec![named("messages", 1, SpecifierKind::SignedInt)]
    );
}

#[test]
fn test_variant_without_specifier_uses_base_type() {
    let entry = PluralRuleEntry::new("%#@items@").with_variable(
        "items",
        PluralVariable::plural_rule("lu", [("one", "one item"), ("other", "%lu items")]),
    );
    let params = resolve(&entry).unwrap();
    assert_eq!(params, vec![named("items", 1, SpecifierKind::UnsignedInt)]);
}

#[test]
fn test_base_param_is_unnamed_when_no_variant_has_specifiers() {
    let entry = PluralRuleEntry::new("%#@items@")
        .with_variable("items", other_only("several items"));
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![StringParam::at(1, SpecifierKind::SignedInt)]
    );
}

#[test]
fn test_template_specifiers_around_reference() {
    let entry = PluralRuleEntry::new("%@ has %#@photos@")
        .with_variable("photos", other_only("%d photos"));
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            StringParam::at(1, SpecifierKind::ObjectOrString),
            named("photos", 2, SpecifierKind::SignedInt),
        ]
    );
}

#[test]
fn test_variant_with_extra_arguments() {
    let entry = PluralRuleEntry::new("%#@files@").with_variable(
        "files",
        PluralVariable::plural_rule(
            "d",
            [("one", "%1$d file in %2$@"), ("other", "%1$d files in %2$@")],
        ),
    );
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            named("files", 1, SpecifierKind::SignedInt),
            named("files", 2, SpecifierKind::ObjectOrString),
        ]
    );
}

#[test]
fn test_two_references_take_consecutive_slots() {
    let entry = PluralRuleEntry::new("%#@files@ in %#@folders@")
        .with_variable(
            "files",
            PluralVariable::plural_rule("d", [("one", "%d file"), ("other", "%d files")]),
        )
        .with_variable(
            "folders",
            PluralVariable::plural_rule("d", [("one", "%d folder"), ("other", "%d folders")]),
        );
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            named("files", 1, SpecifierKind::SignedInt),
            named("folders", 2, SpecifierKind::SignedInt),
        ]
    );
}

#[test]
fn test_positional_reference() {
    let entry = PluralRuleEntry::new("%2$#@count@ for %1$@")
        .with_variable("count", other_only("%d points"));
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            StringParam::at(1, SpecifierKind::ObjectOrString),
            named("count", 2, SpecifierKind::SignedInt),
        ]
    );
}

#[test]
fn test_same_variable_referenced_twice_is_not_a_cycle() {
    let entry = PluralRuleEntry::new("%#@n@ / %#@n@").with_variable("n", other_only("%d"));
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            named("n", 1, SpecifierKind::SignedInt),
            named("n", 2, SpecifierKind::SignedInt),
        ]
    );
}

#[test]
fn test_nested_reference() {
    let entry = PluralRuleEntry::new("%#@outer@")
        .with_variable("outer", other_only("%d groups of %#@inner@"))
        .with_variable("inner", other_only("%d"));
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![
            named("outer", 1, SpecifierKind::SignedInt),
            named("inner", 2, SpecifierKind::SignedInt),
        ]
    );
}

#[test]
fn test_integer_variant_widens_to_float() {
    let entry = PluralRuleEntry::new("%#@km@").with_variable(
        "km",
        PluralVariable::plural_rule("d", [("one", "%d kilometer"), ("other", "%.1f kilometers")]),
    );
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![named("km", 1, SpecifierKind::Double)]
    );
}

#[test]
fn test_unreferenced_variables_are_ignored() {
    let entry = PluralRuleEntry::new("%d things")
        .with_variable("broken", PluralVariable::default());
    assert_eq!(
        resolve(&entry).unwrap(),
        vec![StringParam::at(1, SpecifierKind::SignedInt)]
    );
}

#[test]
fn test_template_without_references() {
    let entry = PluralRuleEntry::new("Nothing to count");
    assert_eq!(resolve(&entry).unwrap(), vec![]);
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn test_self_reference_is_cyclic() {
    let entry = PluralRuleEntry::new("%#@count@").with_variable("count", other_only("%#@count@"));
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::CyclicReference {
            name: "count".to_string(),
            chain: vec!["count".to_string(), "count".to_string()],
        })
    );
}

#[test]
fn test_mutual_reference_is_cyclic() {
    let entry = PluralRuleEntry::new("%#@b@")
        .with_variable("b", other_only("%#@a@"))
        .with_variable("a", other_only("%d and %#@b@"));
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::CyclicReference {
            name: "b".to_string(),
            chain: vec!["b".to_string(), "a".to_string(), "b".to_string()],
        })
    );
}

#[test]
fn test_long_cycle_terminates() {
    let depth = 200;
    let mut entry = PluralRuleEntry::new("%#@v0@");
    for index in 0..depth {
        let next = (index + 1) % depth;
        entry = entry.with_variable(format!("v{index}"), other_only(&format!("%#@v{next}@")));
    }
    match resolve(&entry) {
        Err(AnalysisError::CyclicReference { name, chain }) => {
            assert_eq!(name, "v0");
            assert_eq!(chain.len(), depth + 1);
        }
        other => panic!("expected a cycle, got {other:?}"),
    }
}

#[test]
fn test_cycle_only_in_one_variant_still_fails() {
    let entry = PluralRuleEntry::new("%#@n@").with_variable(
        "n",
        PluralVariable::plural_rule("d", [("one", "%d"), ("other", "%#@n@")]),
    );
    assert!(matches!(
        resolve(&entry),
        Err(AnalysisError::CyclicReference { .. })
    ));
}

// =============================================================================
// Lookup and shape failures
// =============================================================================

#[test]
fn test_missing_reference_suggests_close_names() {
    let entry = PluralRuleEntry::new("%#@cuont@")
        .with_variable("count", other_only("%d"))
        .with_variable("total", other_only("%d"));
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::MissingReference {
            name: "cuont".to_string(),
            suggestions: vec!["count".to_string()],
        })
    );
}

#[test]
fn test_missing_reference_without_suggestions() {
    let entry = PluralRuleEntry::new("%#@zzz@").with_variable("count", other_only("%d"));
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::MissingReference {
            name: "zzz".to_string(),
            suggestions: vec![],
        })
    );
}

#[test]
fn test_missing_spec_type() {
    let variable = PluralVariable {
        spec_type: None,
        ..other_only("%d")
    };
    let entry = PluralRuleEntry::new("%#@n@").with_variable("n", variable);
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::IncorrectReference {
            name: "n".to_string(),
            reason: "missing NSStringFormatSpecTypeKey".to_string(),
        })
    );
}

#[test]
fn test_wrong_rule_type() {
    let variable = PluralVariable {
        spec_type: Some("NSStringVariableWidthRuleType".to_string()),
        ..other_only("%d")
    };
    let entry = PluralRuleEntry::new("%#@n@").with_variable("n", variable);
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::IncorrectReference {
            name: "n".to_string(),
            reason: "unsupported rule type 'NSStringVariableWidthRuleType'".to_string(),
        })
    );
}

#[test]
fn test_missing_value_type() {
    let variable = PluralVariable {
        value_type: None,
        ..other_only("%d")
    };
    let entry = PluralRuleEntry::new("%#@n@").with_variable("n", variable);
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::IncorrectReference {
            name: "n".to_string(),
            reason: "missing NSStringFormatValueTypeKey".to_string(),
        })
    );
}

#[test]
fn test_unparseable_value_type() {
    for value_type in ["k", "", "1$d", "d and more"] {
        let entry = PluralRuleEntry::new("%#@n@")
            .with_variable("n", PluralVariable::plural_rule(value_type, [("other", "x")]));
        assert_eq!(
            resolve(&entry),
            Err(AnalysisError::IncorrectReference {
                name: "n".to_string(),
                reason: format!("unparseable format specifier '{value_type}'"),
            }),
            "value type {value_type:?}"
        );
    }
}

// =============================================================================
// Unification across variants
// =============================================================================

#[test]
fn test_variants_with_incompatible_types() {
    let entry = PluralRuleEntry::new("%#@n@").with_variable(
        "n",
        PluralVariable::plural_rule("d", [("one", "%d item"), ("other", "%@ items")]),
    );
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::CannotUnify {
            name: "n".to_string(),
            position: 1,
            left: SpecifierKind::SignedInt,
            right: SpecifierKind::ObjectOrString,
        })
    );
}

#[test]
fn test_variant_conflicting_with_base_type() {
    let entry = PluralRuleEntry::new("%#@n@")
        .with_variable("n", PluralVariable::plural_rule("@", [("other", "%d")]));
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::CannotUnify {
            name: "n".to_string(),
            position: 1,
            left: SpecifierKind::ObjectOrString,
            right: SpecifierKind::SignedInt,
        })
    );
}

#[test]
fn test_malformed_variant_specifier() {
    let entry = PluralRuleEntry::new("%#@n@").with_variable(
        "n",
        PluralVariable::plural_rule("d", [("one", "%d"), ("other", "%d %k")]),
    );
    assert_eq!(
        resolve(&entry),
        Err(AnalysisError::MalformedSpecifier { position: 2 })
    );

    let lenient = AnalysisOptions::builder()
        .unknown_specifiers(UnknownSpecifierPolicy::Warn)
        .build();
    let params = resolve_plural_entry(&entry, &lenient).unwrap();
    assert_eq!(params[1].kind(), SpecifierKind::Unknown);
}
