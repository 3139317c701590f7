//! Report rendering
//!
//! Pure formatting of already-computed scan results. Severity sorting for
//! display happens here; the engine keeps discovery order.

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::engine::{Finding, ScanResult};
use crate::rules::Severity;

/// Output format selection for the CLI and MCP tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Render a scan result in the requested format
pub fn render(result: &ScanResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(result)),
        ReportFormat::Json => render_json(result),
    }
}

/// Human-readable report: findings grouped per file, sorted by severity
/// ordinal then line, followed by a scan summary block
pub fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();
    let summary = result.summary();

    if result.files.is_empty() {
        out.push_str(&format!(
            "No security findings in {} scanned file(s)\n",
            summary.files_scanned
        ));
        return out;
    }

    for file in &result.files {
        out.push_str(&format!(
            "\n{} ({} finding(s))\n",
            style(&file.file_path).bold(),
            file.findings.len()
        ));

        let mut findings: Vec<&Finding> = file.findings.iter().collect();
        findings.sort_by_key(|f| (f.severity.rank(), f.line));

        for finding in findings {
            out.push_str(&format!(
                "  {} {} (line {})\n",
                severity_badge(finding.severity),
                finding.rule_name,
                finding.line
            ));
            out.push_str(&format!("    {}\n", finding.message));
            for snippet_line in finding.context_snippet.lines() {
                out.push_str(&format!("    {}\n", snippet_line));
            }
            out.push_str(&format!(
                "    {} {}\n",
                style("fix:").green(),
                finding.recommendation
            ));
        }
    }

    out.push_str(&format!(
        "\n{}\n  files scanned: {}\n  files with findings: {}\n  total findings: {}\n  critical: {}  high: {}  medium: {}  low: {}\n",
        style("Scan summary").bold().underlined(),
        summary.files_scanned,
        summary.files_with_findings,
        summary.total_findings,
        summary.severity.critical,
        summary.severity.high,
        summary.severity.medium,
        summary.severity.low,
    ));

    out
}

/// Machine-readable report with `files` and `summary` sections
pub fn render_json(result: &ScanResult) -> Result<String> {
    let report = json!({
        "files": result.files,
        "summary": result.summary(),
    });
    Ok(serde_json::to_string_pretty(&report)?)
}

fn severity_badge(severity: Severity) -> String {
    let label = format!("[{}]", severity);
    match severity {
        Severity::Critical => style(label).red().bold().to_string(),
        Severity::High => style(label).red().to_string(),
        Severity::Medium => style(label).yellow().to_string(),
        Severity::Low => style(label).dim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MatchEngine;
    use crate::rules::RuleSet;

    fn sample_result() -> ScanResult {
        let engine = MatchEngine::new(RuleSet::builtin());
        engine.analyze_batch(vec![
            ("app.js", "debugger;\neval(input);\n"),
            ("clean.js", "const a = 1;\n"),
        ])
    }

    #[test]
    fn test_text_report_sorts_by_severity() {
        let report = render_text(&sample_result());
        let eval_pos = report.find("Dynamic Code Execution").expect("eval finding");
        let debugger_pos = report.find("Debugger Statement").expect("debugger finding");
        // Critical before low, even though debugger appears first in the file
        assert!(eval_pos < debugger_pos);
        assert!(report.contains("files scanned: 2"));
        assert!(report.contains("files with findings: 1"));
    }

    #[test]
    fn test_text_report_clean_scan() {
        let engine = MatchEngine::new(RuleSet::builtin());
        let result = engine.analyze_batch(vec![("clean.js", "const a = 1;\n")]);
        let report = render_text(&result);
        assert!(report.contains("No security findings"));
    }

    #[test]
    fn test_json_report_shape() {
        let report = render_json(&sample_result()).expect("json render");
        let value: serde_json::Value = serde_json::from_str(&report).expect("valid json");
        assert_eq!(value["summary"]["files_scanned"], 2);
        assert_eq!(value["summary"]["files_with_findings"], 1);
        assert_eq!(value["files"][0]["file_path"], "app.js");
        assert!(value["files"][0]["findings"].is_array());
    }
}
