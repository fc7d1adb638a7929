//! Integration tests for the full detection pipeline.
//!
//! These tests validate that the analyzer correctly identifies anti-patterns
//! when run against the testdata fixtures.

use std::collections::BTreeSet;
use std::path::PathBuf;

use smellcheck::parser::{parse, SyntaxVariant};
use smellcheck::{analyze, AnalyzeError, Finding, RuleId, Severity};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(testdata_path().join(name)).expect("fixture should exist")
}

/// Analyze a fixture, using its name as the grammar hint.
fn analyze_fixture(name: &str) -> Vec<Finding> {
    analyze(&read_fixture(name), Some(name)).expect("fixture should parse")
}

fn count(findings: &[Finding], id: RuleId) -> usize {
    findings.iter().filter(|f| f.id == id).count()
}

fn lines_of(findings: &[Finding], id: RuleId) -> Vec<usize> {
    findings.iter().filter(|f| f.id == id).map(|f| f.line).collect()
}

#[test]
fn test_bad_code_counts_per_rule() {
    let findings = analyze_fixture("bad_code.ts");

    assert_eq!(count(&findings, RuleId::AnyType), 8);
    assert_eq!(count(&findings, RuleId::LongParamList), 2);
    assert_eq!(count(&findings, RuleId::MagicNumber), 5);
    assert_eq!(count(&findings, RuleId::NonNullAssertion), 4);
    assert_eq!(count(&findings, RuleId::CallbackHell), 2);
    assert_eq!(count(&findings, RuleId::GodClass), 0);
    assert_eq!(findings.len(), 21);
}

#[test]
fn test_bad_code_walk_order() {
    let findings = analyze_fixture("bad_code.ts");
    let order: Vec<(RuleId, usize)> = findings.iter().map(|f| (f.id, f.line)).collect();

    use RuleId::*;
    assert_eq!(
        order,
        vec![
            (AnyType, 4),
            (AnyType, 4),
            (LongParamList, 9),
            (MagicNumber, 22),
            (MagicNumber, 23),
            (MagicNumber, 24),
            (NonNullAssertion, 29),
            (NonNullAssertion, 29),
            (CallbackHell, 38),
            (CallbackHell, 39),
            (LongParamList, 50),
            (AnyType, 50),
            (AnyType, 50),
            (AnyType, 50),
            (AnyType, 50),
            (AnyType, 50),
            (AnyType, 50),
            (NonNullAssertion, 51),
            (MagicNumber, 51),
            (NonNullAssertion, 51),
            (MagicNumber, 51),
        ]
    );
}

#[test]
fn test_bad_code_descriptions() {
    let findings = analyze_fixture("bad_code.ts");

    let long: Vec<_> = findings
        .iter()
        .filter(|f| f.id == RuleId::LongParamList)
        .map(|f| f.description.as_str())
        .collect();
    assert_eq!(
        long,
        vec!["Function has 6 parameters.", "Function has 5 parameters."]
    );

    let magic: Vec<_> = findings
        .iter()
        .filter(|f| f.id == RuleId::MagicNumber)
        .map(|f| f.description.as_str())
        .collect();
    assert_eq!(
        magic,
        vec![
            "Unnamed numeric literal \"1.15\" found.",
            "Unnamed numeric literal \"0.85\" found.",
            "Unnamed numeric literal \"25\" found.",
            "Unnamed numeric literal \"3.14159\" found.",
            "Unnamed numeric literal \"2.71828\" found.",
        ]
    );

    let depths: Vec<_> = findings
        .iter()
        .filter(|f| f.id == RuleId::CallbackHell)
        .map(|f| f.description.as_str())
        .collect();
    assert_eq!(
        depths,
        vec!["Function nesting depth is 5.", "Function nesting depth is 6."]
    );
}

#[test]
fn test_component_fixture_uses_markup_grammar() {
    let findings = analyze_fixture("bad_component.tsx");

    assert_eq!(lines_of(&findings, RuleId::AnyType), vec![7, 8, 9, 68, 72, 76, 80, 84]);
    assert_eq!(lines_of(&findings, RuleId::LongParamList), vec![13]);
    assert_eq!(lines_of(&findings, RuleId::NonNullAssertion), vec![34, 34, 34, 34, 38]);
    assert_eq!(lines_of(&findings, RuleId::CallbackHell), vec![47, 48]);
    // style object literals are property assignments, so 20/15/16 are exempt
    assert_eq!(
        lines_of(&findings, RuleId::MagicNumber),
        vec![29, 30, 38, 39, 69, 73, 77, 81, 85]
    );
    assert_eq!(count(&findings, RuleId::GodClass), 0);
    assert_eq!(findings.len(), 25);
}

#[test]
fn test_component_fixture_fails_as_plain_typescript() {
    let source = read_fixture("bad_component.tsx");
    let err = analyze(&source, Some("component.ts")).unwrap_err();
    assert!(matches!(err, AnalyzeError::Parse(_)));
}

#[test]
fn test_god_class_fixture() {
    let findings = analyze_fixture("god_class.ts");

    let god: Vec<_> = findings.iter().filter(|f| f.id == RuleId::GodClass).collect();
    assert_eq!(god.len(), 1);
    assert_eq!(god[0].line, 3);
    assert_eq!(god[0].description, "Class has 24 methods and 41 lines.");
    assert_eq!(god[0].severity, Severity::High);

    // the class node is visited before anything inside it
    assert_eq!(findings[0].id, RuleId::GodClass);

    // `return 1` is exempt, 2 through 22 are not, plus 3.14
    assert_eq!(count(&findings, RuleId::MagicNumber), 22);
    assert_eq!(lines_of(&findings, RuleId::AnyType), vec![30, 30]);
    assert_eq!(lines_of(&findings, RuleId::NonNullAssertion), vec![31, 31]);
    assert_eq!(lines_of(&findings, RuleId::LongParamList), vec![34]);
    assert_eq!(findings.len(), 28);
}

#[test]
fn test_clean_fixture_has_no_findings() {
    let findings = analyze_fixture("clean_code.ts");
    assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
}

#[test]
fn test_mixed_any_on_one_function() {
    let source = "\nfunction echo(input: any): any {\n    return input;\n}\n";
    let findings = analyze(source, None).unwrap();
    assert_eq!(findings.len(), 2);
    assert!(findings.iter().all(|f| f.id == RuleId::AnyType && f.line == 2));
}

#[test]
fn test_parameter_threshold_boundary() {
    let three = analyze("function f(a: number, b: number, c: number) {}\n", None).unwrap();
    assert_eq!(count(&three, RuleId::LongParamList), 0);

    let four = analyze("function f(a: number, b: number, c: number, d: number) {}\n", None)
        .unwrap();
    assert_eq!(count(&four, RuleId::LongParamList), 1);
}

#[test]
fn test_magic_number_exemptions() {
    let expr = analyze("export function price(p: number) { return p * 1.15; }\n", None).unwrap();
    assert_eq!(lines_of(&expr, RuleId::MagicNumber), vec![1]);

    let named = analyze("export const TAX = 1.15;\n", None).unwrap();
    assert!(named.is_empty());

    let exempt = analyze(
        "export function f(x: number) { return [x * 0, x * 1, x * -1, g(0, 1, -1)]; }\n",
        None,
    )
    .unwrap();
    assert!(exempt.is_empty(), "unexpected findings: {:?}", exempt);
}

#[test]
fn test_nesting_scenarios() {
    let six = r#"
function level1() {
    a(() => {
        b(() => {
            c(() => {
                d(() => {
                    e(() => {});
                });
            });
        });
    });
}
"#;
    let findings = analyze(six, None).unwrap();
    assert_eq!(lines_of(&findings, RuleId::CallbackHell), vec![7]);

    let five = r#"
function level1() {
    a(() => {
        b(() => {
            c(() => {
                d(() => {});
            });
        });
    });
}
"#;
    assert!(analyze(five, None).unwrap().is_empty());
}

#[test]
fn test_outer_findings_precede_nested_ones() {
    // the class spans later lines than its first method's magic number,
    // but it is visited first
    let mut source = String::from("class Registry {\n");
    for i in 0..21 {
        source.push_str(&format!("    m{}() {{ return {}; }}\n", i, i + 2));
    }
    source.push_str("}\n");

    let findings = analyze(&source, None).unwrap();
    assert_eq!(findings[0].id, RuleId::GodClass);
    assert!(findings[1..].iter().all(|f| f.id == RuleId::MagicNumber));
}

#[test]
fn test_idempotent_under_comments_and_whitespace() {
    let original = read_fixture("bad_code.ts");
    let noisy = format!(
        "/* header\n   comment */\n\n{}\n\n// trailing comment\n",
        original.replace(";\n", ";   // note\n\n")
    );

    let before = analyze(&original, Some("bad_code.ts")).unwrap();
    let after = analyze(&noisy, Some("bad_code.ts")).unwrap();

    assert_eq!(before.len(), after.len());
    let ids = |f: &[Finding]| f.iter().map(|f| f.id).collect::<BTreeSet<_>>();
    assert_eq!(ids(&before), ids(&after));
    let id_order = |f: &[Finding]| f.iter().map(|f| f.id).collect::<Vec<_>>();
    assert_eq!(id_order(&before), id_order(&after));
}

#[test]
fn test_deterministic_results() {
    for name in ["bad_code.ts", "bad_component.tsx", "god_class.ts"] {
        let first = analyze_fixture(name);
        let second = analyze_fixture(name);
        assert_eq!(first, second, "{} should analyze identically", name);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_concurrent_calls_do_not_interfere() {
    let expected = analyze_fixture("bad_code.ts");
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| analyze_fixture("bad_code.ts")))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_unparseable_input_is_an_error_not_clean() {
    let err = analyze("function broken( {\n  return ;;\n", Some("broken.ts")).unwrap_err();
    match err {
        AnalyzeError::Parse(parse) => assert!(parse.line >= 1),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_fixed_metadata_per_rule() {
    let findings = analyze_fixture("bad_code.ts");
    for f in &findings {
        assert_eq!(f.name, f.id.name());
        assert_eq!(f.message, f.id.message());
        assert_eq!(f.severity, f.id.severity());
    }
}

fn assert_lines_in_range(source: &str, hint: &str) {
    let variant = SyntaxVariant::from_filename(Some(hint));
    let total = parse(source, variant).expect("source should parse").line_count();
    let findings = analyze(source, Some(hint)).expect("source should parse");
    for f in &findings {
        assert!(
            f.line >= 1 && f.line <= total,
            "{}: {} finding at line {} outside 1..={}",
            hint,
            f.id,
            f.line,
            total
        );
    }
}

#[test]
fn test_finding_lines_within_source() {
    for name in [
        "bad_code.ts",
        "bad_component.tsx",
        "clean_code.ts",
        "god_class.ts",
    ] {
        assert_lines_in_range(&read_fixture(name), name);
    }
}

#[test]
fn test_finding_on_last_line_without_newline() {
    let source = "const SCALE = 2;\nexport const area = (r: number) => r * r * 3.14";
    let findings = analyze(source, None).unwrap();
    assert_eq!(lines_of(&findings, RuleId::MagicNumber), vec![2]);
    assert_lines_in_range(source, "area.ts");

    let single = "run(42)";
    assert_eq!(analyze(single, None).unwrap()[0].line, 1);
    assert_lines_in_range(single, "single.ts");
}
