//! Rules listing command implementation

use anyhow::Result;
use serde_json::json;

use crate::cli::Output;
use crate::config::HawkConfig;
use crate::report::ReportFormat;

/// List the effective rule set (built-ins minus disabled, plus custom)
pub fn execute(format: ReportFormat, config_path: Option<&str>, output: &Output) -> Result<()> {
    let config = HawkConfig::load(config_path)?;
    let rules = config.effective_rules()?;

    match format {
        ReportFormat::Json => {
            let listed: Vec<serde_json::Value> = rules
                .iter()
                .map(|rule| {
                    json!({
                        "name": rule.name,
                        "severity": rule.severity,
                        "message": rule.message,
                        "recommendation": rule.recommendation,
                        "explanation": rule.explanation,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        ReportFormat::Text => {
            output.header(&format!("Detection rules ({})", rules.len()));
            for rule in rules.iter() {
                output.table_row(&rule.name, &format!("[{}] {}", rule.severity, rule.message));
            }
        }
    }

    Ok(())
}
