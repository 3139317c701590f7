//! Severity tallies and scan-level aggregation
//!
//! Pure reductions over already-computed findings; no side effects and no
//! error conditions.

use serde::Serialize;

use super::{FileResult, Finding};
use crate::rules::Severity;

/// Counts of findings by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeveritySummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeveritySummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for finding in findings {
            summary.add(finding.severity);
        }
        summary
    }

    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn merge(&mut self, other: &SeveritySummary) {
        self.critical += other.critical;
        self.high += other.high;
        self.medium += other.medium;
        self.low += other.low;
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Scan-level totals across all analyzed files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files handed to the engine, including clean ones
    pub files_scanned: usize,

    /// Files that produced at least one finding
    pub files_with_findings: usize,

    /// Findings across all files
    pub total_findings: usize,

    /// Per-severity totals
    pub severity: SeveritySummary,
}

/// Reduce per-file summaries into scan totals
pub fn aggregate(files: &[FileResult], files_scanned: usize) -> ScanSummary {
    let mut severity = SeveritySummary::default();
    for file in files {
        severity.merge(&file.summary);
    }
    ScanSummary {
        files_scanned,
        files_with_findings: files.len(),
        total_findings: severity.total(),
        severity,
    }
}
