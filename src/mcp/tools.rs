//! MCP tool definitions and execution
//!
//! Each tool wraps one engine operation: inline-content analysis, file and
//! directory scans, and rule listing. Tool failures surface as JSON-RPC
//! errors; a failing file inside a directory scan is skipped by the scanner
//! and never aborts the call.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::Path;

use crate::config::HawkConfig;
use crate::engine::ScanResult;
use crate::scan::ProjectScanner;

/// Tool definition for MCP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Get all available MCP tools
pub fn get_available_tools() -> Vec<McpTool> {
    vec![
        McpTool {
            name: "scan_source".to_string(),
            description: "Scan inline JavaScript/TypeScript source text for security issues"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Source text to analyze"
                    },
                    "identifier": {
                        "type": "string",
                        "description": "Label used for the file in the report",
                        "default": "inline.js"
                    }
                },
                "required": ["content"]
            }),
        },
        McpTool {
            name: "scan_file".to_string(),
            description: "Scan a single file on disk for security issues".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the file"
                    }
                },
                "required": ["path"]
            }),
        },
        McpTool {
            name: "scan_directory".to_string(),
            description: "Recursively scan a directory for security issues".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Path to the directory"
                    }
                },
                "required": ["path"]
            }),
        },
        McpTool {
            name: "list_rules".to_string(),
            description: "List the effective detection rules".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Execute a tool by name
pub fn execute_tool(config: &HawkConfig, tool_name: &str, params: Value) -> Result<Value, String> {
    match tool_name {
        "scan_source" => scan_source(config, params),
        "scan_file" => scan_path_tool(config, params),
        "scan_directory" => scan_path_tool(config, params),
        "list_rules" => list_rules(config),
        _ => Err(format!("Unknown tool: {}", tool_name)),
    }
}

/// Analyze inline content without touching the filesystem
fn scan_source(config: &HawkConfig, params: Value) -> Result<Value, String> {
    let content = params
        .get("content")
        .and_then(|c| c.as_str())
        .ok_or_else(|| "Missing required argument: content".to_string())?;
    let identifier = params
        .get("identifier")
        .and_then(|i| i.as_str())
        .unwrap_or("inline.js");

    let scanner = build_scanner(config)?;
    let result = scanner.engine().analyze_batch(vec![(identifier, content)]);
    render_result(&result)
}

/// Scan a file or directory path
fn scan_path_tool(config: &HawkConfig, params: Value) -> Result<Value, String> {
    let path = params
        .get("path")
        .and_then(|p| p.as_str())
        .ok_or_else(|| "Missing required argument: path".to_string())?;

    let scanner = build_scanner(config)?;
    let result = scanner
        .scan_path(Path::new(path))
        .map_err(|e| format!("{:#}", e))?;
    render_result(&result)
}

/// List the effective rule set
fn list_rules(config: &HawkConfig) -> Result<Value, String> {
    let rules = config.effective_rules().map_err(|e| format!("{:#}", e))?;
    let listed: Vec<Value> = rules
        .iter()
        .map(|rule| {
            json!({
                "name": rule.name,
                "severity": rule.severity,
                "message": rule.message,
                "recommendation": rule.recommendation,
            })
        })
        .collect();
    Ok(json!({ "rules": listed, "count": listed.len() }))
}

fn build_scanner(config: &HawkConfig) -> Result<ProjectScanner, String> {
    ProjectScanner::from_config(config).map_err(|e| format!("{:#}", e))
}

fn render_result(result: &ScanResult) -> Result<Value, String> {
    Ok(json!({
        "files": result.files,
        "summary": result.summary(),
    }))
}
