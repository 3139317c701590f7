//! Match engine tests

use super::*;
use crate::rules::{RuleSet, RuleSpec, Severity};
use std::sync::Arc;

fn rule(name: &'static str, pattern: &'static str, severity: Severity) -> RuleSpec {
    RuleSpec {
        name,
        pattern,
        severity,
        message: "test message",
        recommendation: "test recommendation",
        explanation: None,
    }
}

fn engine(specs: Vec<RuleSpec>) -> MatchEngine {
    let rules = RuleSet::from_specs(&specs).expect("test rules must compile");
    MatchEngine::new(Arc::new(rules))
}

fn eval_engine() -> MatchEngine {
    engine(vec![rule("Dynamic Code Execution", r"eval\(", Severity::Critical)])
}

#[test]
fn test_determinism() {
    let engine = eval_engine();
    let text = "let a = 1;\neval(input);\nlet b = 2;\n";
    let first = engine.analyze("app.js", text);
    let second = engine.analyze("app.js", text);
    assert_eq!(first, second);
}

#[test]
fn test_match_in_code_is_reported() {
    let result = eval_engine().analyze("app.js", "eval(x);");
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].rule_name, "Dynamic Code Execution");
    assert_eq!(result.findings[0].line, 1);
}

#[test]
fn test_match_inside_string_is_suppressed() {
    let result = eval_engine().analyze("app.js", r#"const s = "eval(x)";"#);
    assert!(result.findings.is_empty());
    assert_eq!(result.summary, SeveritySummary::default());
}

#[test]
fn test_match_inside_line_comment_is_suppressed() {
    let result = eval_engine().analyze("app.js", "// eval(x)\nsafe();\n");
    assert!(result.findings.is_empty());
}

#[test]
fn test_match_inside_block_comment_is_suppressed() {
    let result = eval_engine().analyze("app.js", "/* eval(x) */\nsafe();\n");
    assert!(result.findings.is_empty());
}

#[test]
fn test_match_inside_regex_literal_is_suppressed() {
    let engine = engine(vec![rule("Eval Mention", r"eval", Severity::High)]);
    let result = engine.analyze("app.js", "const re = /eval/g;\n");
    assert!(result.findings.is_empty());
}

#[test]
fn test_code_after_regex_literal_is_reported() {
    let result = eval_engine().analyze("app.js", "const r = /a/; eval(x);");
    assert_eq!(result.findings.len(), 1);
}

#[test]
fn test_line_accuracy() {
    // Multi-byte content before the match must not shift the line number
    let text = "const a = 1;\nconst b = 2;\n// café ☕ naïve\nconst c = 3;\nconst d = 4;\nconst e = 5;\neval(x);\nconst f = 6;\nconst g = 7;\nconst h = 8;\n";
    let result = eval_engine().analyze("app.js", text);
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].line, 7);
    assert_eq!(result.findings[0].matched_line_text, "eval(x);");
}

#[test]
fn test_severity_aggregation() {
    let engine = engine(vec![
        rule("A", r"alpha", Severity::Critical),
        rule("B", r"beta", Severity::High),
        rule("C", r"gamma", Severity::High),
        rule("D", r"delta", Severity::Low),
    ]);
    let result = engine.analyze("app.js", "alpha beta gamma delta");
    assert_eq!(
        result.summary,
        SeveritySummary {
            critical: 1,
            high: 2,
            medium: 0,
            low: 1,
        }
    );
}

#[test]
fn test_snippet_clamped_at_start_of_file() {
    let result = eval_engine().analyze("app.js", "eval(x);\nb();\nc();\nd();\ne();\n");
    let snippet = &result.findings[0].context_snippet;
    let lines: Vec<&str> = snippet.lines().collect();
    assert_eq!(lines.len(), 3); // lines 1..=3, nothing before line 1
    assert!(lines[0].starts_with(">   1 |"));
    assert!(lines[1].starts_with("    2 |"));
}

#[test]
fn test_snippet_clamped_at_end_of_file() {
    let result = eval_engine().analyze("app.js", "a();\nb();\nc();\nd();\neval(x);");
    let finding = &result.findings[0];
    assert_eq!(finding.line, 5);
    let lines: Vec<&str> = finding.context_snippet.lines().collect();
    assert_eq!(lines.len(), 3); // lines 3..=5, nothing past EOF
    assert!(lines[2].starts_with(">   5 |"));
}

#[test]
fn test_empty_file() {
    let result = eval_engine().analyze("empty.js", "");
    assert!(result.findings.is_empty());
    assert_eq!(result.summary.total(), 0);
}

#[test]
fn test_multiline_match_reports_first_line() {
    let engine = engine(vec![rule("Spread Call", r"foo\([^)]*\)", Severity::Medium)]);
    let result = engine.analyze("app.js", "pad();\nfoo(a,\n    b);\n");
    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].line, 2);
}

#[test]
fn test_findings_keep_rule_order_then_match_order() {
    let engine = engine(vec![
        rule("Late", r"zulu", Severity::Low),
        rule("Early", r"alpha", Severity::Critical),
    ]);
    // "Late" matches further down the file but is reported first because
    // findings preserve rule order, not line order
    let result = engine.analyze("app.js", "alpha();\nzulu();\n");
    let names: Vec<&str> = result.findings.iter().map(|f| f.rule_name.as_str()).collect();
    assert_eq!(names, vec!["Late", "Early"]);
}

#[test]
fn test_overlapping_rules_are_independent_findings() {
    let engine = engine(vec![
        rule("First", r"eval\(", Severity::Critical),
        rule("Second", r"\beval", Severity::High),
    ]);
    let result = engine.analyze("app.js", "eval(x);");
    assert_eq!(result.findings.len(), 2);
}

#[test]
fn test_batch_keeps_only_files_with_findings() {
    let engine = eval_engine();
    let result = engine.analyze_batch(vec![
        ("clean-1.js", "const a = 1;"),
        ("dirty.js", "eval(x);"),
        ("clean-2.js", "const b = 2;"),
    ]);
    assert_eq!(result.files_scanned, 3);
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].file_path, "dirty.js");

    let summary = result.summary();
    assert_eq!(summary.files_scanned, 3);
    assert_eq!(summary.files_with_findings, 1);
    assert_eq!(summary.total_findings, 1);
    assert_eq!(summary.severity.critical, 1);
}

#[test]
fn test_hardcoded_secret_end_to_end() {
    let engine = engine(vec![rule(
        "Hardcoded Secret",
        r#"(?i)api[_-]?key\s*=\s*["'][a-z0-9_]{16,}["']"#,
        Severity::Critical,
    )]);
    let text = r#"const apiKey = "sk_live_1234567890abcdef";"#;
    let result = engine.analyze("config.js", text);
    assert_eq!(result.findings.len(), 1);

    let finding = &result.findings[0];
    assert_eq!(finding.severity, Severity::Critical);
    assert_eq!(finding.line, 1);
    assert_eq!(finding.matched_line_text, text.trim());
    assert_eq!(result.summary.critical, 1);
}

#[test]
fn test_builtin_rules_do_not_trigger_on_rule_definitions() {
    // A file that defines the patterns as string literals must not
    // self-trigger
    let engine = MatchEngine::new(RuleSet::builtin());
    let text = concat!(
        "const rules = [\n",
        "  { name: 'eval', pattern: 'eval\\\\(' },\n",
        "  { name: 'xss', pattern: '.innerHTML =' },\n",
        "  { name: 'write', pattern: 'document.write(' },\n",
        "];\n"
    );
    let result = engine.analyze("rules.js", text);
    assert!(
        result.findings.is_empty(),
        "unexpected findings: {:?}",
        result.findings
    );
}
