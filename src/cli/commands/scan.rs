//! Scan command implementation

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::HawkConfig;
use crate::report::{self, ReportFormat};
use crate::scan::ProjectScanner;

/// Scan a file or directory and render a report.
///
/// Exits with a non-zero status when findings exist, so the command can gate
/// CI pipelines and git hooks.
pub fn execute(
    path: Option<PathBuf>,
    format: ReportFormat,
    config_path: Option<&str>,
    output: &Output,
) -> Result<()> {
    let config = HawkConfig::load(config_path)?;
    let scanner = ProjectScanner::from_config(&config)?;

    let target = path.unwrap_or_else(|| PathBuf::from("."));
    if format == ReportFormat::Text {
        output.step(&format!("Scanning {}", target.display()));
    }
    if output.is_verbose() {
        output.verbose(&format!(
            "{} rules active, context radius {}",
            scanner.engine().rules().len(),
            config.scan.context_lines
        ));
    }

    let result = scanner.scan_path(&target)?;
    let summary = result.summary();

    println!("{}", report::render(&result, format)?);

    if summary.total_findings > 0 {
        if format == ReportFormat::Text {
            output.error(&format!(
                "Found {} issue(s) in {} file(s)",
                summary.total_findings, summary.files_with_findings
            ));
        }
        std::process::exit(1);
    }

    if format == ReportFormat::Text {
        output.success("No security issues found");
    }
    Ok(())
}
