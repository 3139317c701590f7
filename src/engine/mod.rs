//! The matching engine
//!
//! Takes raw source text plus a rule set and produces line-located,
//! severity-classified findings. Matches that fall inside string literals,
//! comments, or regex literals are discarded by the [`lexical`] classifier.
//! The engine is synchronous and side-effect-free per file: same text plus
//! same rules always yields the same result, so callers may fan out across
//! files freely.

use serde::Serialize;
use std::sync::Arc;

use crate::rules::{RuleSet, Severity};

pub mod lexical;
pub mod summary;

#[cfg(test)]
mod tests;

pub use lexical::LexicalClassifier;
pub use summary::{ScanSummary, SeveritySummary};

/// Default number of context lines above/below a finding
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// One rule match that survived lexical suppression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Severity copied from the triggering rule
    pub severity: Severity,

    /// Name of the triggering rule
    pub rule_name: String,

    /// 1-based line number where the match starts
    pub line: usize,

    /// Trimmed content of that line
    pub matched_line_text: String,

    /// Surrounding lines, numbered, with a `>` marker on the matching line
    pub context_snippet: String,

    /// Risk description copied from the rule
    pub message: String,

    /// Remediation copied from the rule
    pub recommendation: String,
}

/// All findings for one analyzed file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileResult {
    /// Identifier supplied by the caller; a path for filesystem scans, a
    /// synthetic label for inline content
    pub file_path: String,

    /// Findings in discovery order (rule order, then match order).
    /// Severity sorting is a reporting concern.
    pub findings: Vec<Finding>,

    /// Per-severity counts over `findings`
    pub summary: SeveritySummary,
}

/// Results across a multi-file scan; only files with at least one finding
/// are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanResult {
    pub files: Vec<FileResult>,

    /// Total files handed to the engine, including clean ones
    pub files_scanned: usize,
}

impl ScanResult {
    /// Scan-level totals, reduced from the per-file summaries
    pub fn summary(&self) -> ScanSummary {
        summary::aggregate(&self.files, self.files_scanned)
    }

    pub fn total_findings(&self) -> usize {
        self.files.iter().map(|f| f.findings.len()).sum()
    }
}

/// Applies every rule's pattern across file text and emits located findings
pub struct MatchEngine {
    rules: Arc<RuleSet>,
    context_lines: usize,
}

impl MatchEngine {
    pub fn new(rules: Arc<RuleSet>) -> Self {
        Self {
            rules,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }

    /// Override the context snippet radius
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Produce all findings for one file.
    ///
    /// Patterns run over the entire text, not line by line, so multi-line
    /// matches are possible. Findings keep rule order first, then match
    /// order within each rule.
    pub fn analyze(&self, file_identifier: &str, text: &str) -> FileResult {
        let lines: Vec<&str> = text.lines().collect();
        let classifier = LexicalClassifier::new(text);
        let mut findings = Vec::new();

        for rule in self.rules.iter() {
            for m in rule.pattern.find_iter(text) {
                let (start, end) = (m.start(), m.end());
                // Defensive: a zero-width match carries no position worth
                // reporting and would loop on snippet math
                if end <= start {
                    continue;
                }

                // Check both endpoints: a match can begin outside a string
                // and end inside one when the delimiter is part of the
                // matched text, or vice versa
                if classifier.is_inside_string_or_comment(start)
                    || classifier.is_inside_string_or_comment(end - 1)
                    || classifier.is_inside_regex_literal(start)
                {
                    continue;
                }

                let line = line_number_at(text, start);
                let matched_line_text = lines
                    .get(line - 1)
                    .map(|l| l.trim().to_string())
                    .unwrap_or_default();

                findings.push(Finding {
                    severity: rule.severity,
                    rule_name: rule.name.clone(),
                    line,
                    matched_line_text,
                    context_snippet: build_snippet(&lines, line, self.context_lines),
                    message: rule.message.clone(),
                    recommendation: rule.recommendation.clone(),
                });
            }
        }

        let summary = SeveritySummary::from_findings(&findings);
        FileResult {
            file_path: file_identifier.to_string(),
            findings,
            summary,
        }
    }

    /// Analyze a batch of `(identifier, text)` pairs, keeping only files
    /// with at least one finding
    pub fn analyze_batch<I, S, T>(&self, files: I) -> ScanResult
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let mut result = ScanResult::default();
        for (identifier, text) in files {
            result.files_scanned += 1;
            let file_result = self.analyze(identifier.as_ref(), text.as_ref());
            if !file_result.findings.is_empty() {
                result.files.push(file_result);
            }
        }
        result
    }
}

/// 1-based line number of a byte offset, by counting preceding newlines
fn line_number_at(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

/// Fixed-radius window of numbered lines around `line`, clamped to file
/// bounds, with a `>` marker on the matching line
fn build_snippet(lines: &[&str], line: usize, radius: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let first = line.saturating_sub(radius + 1); // 0-based, clamped at 0
    let last = (line + radius).min(lines.len()); // 1-based, clamped at EOF

    let mut snippet = Vec::with_capacity(last - first);
    for (idx, content) in lines.iter().enumerate().take(last).skip(first) {
        let number = idx + 1;
        let marker = if number == line { '>' } else { ' ' };
        snippet.push(format!("{}{:>4} | {}", marker, number, content));
    }
    snippet.join("\n")
}
