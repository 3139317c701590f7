//! Configuration management for jshawk
//!
//! Handles loading and parsing configuration from YAML files. Configuration
//! is optional: with no `jshawk.yml` in reach, built-in defaults apply.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::rules::{Rule, RuleSet, Severity};


/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jshawk.yml";

/// Main configuration structure for jshawk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HawkConfig {
    /// Scanning configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// MCP server configuration
    #[serde(default)]
    pub mcp: McpConfig,
}

/// Scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File extensions handed to the engine
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns excluded from directory walks, in addition to hidden
    /// directories
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Context lines above/below a finding in snippets
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    /// Built-in rules disabled by name (case-insensitive)
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Additional project-specific rules
    #[serde(default)]
    pub custom_rules: Vec<CustomRuleConfig>,
}

/// A project-supplied detection rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRuleConfig {
    /// Rule name
    pub name: String,

    /// Regex pattern
    pub regex: String,

    /// Severity level (critical, high, medium, low)
    #[serde(default = "default_severity")]
    pub severity: String,

    /// Risk description
    #[serde(default)]
    pub message: String,

    /// Remediation advice
    #[serde(default)]
    pub recommendation: String,

    /// Whether this rule is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// MCP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_extensions() -> Vec<String> {
    ["js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "html"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_exclude_patterns() -> Vec<String> {
    [
        "**/node_modules/**",
        "**/dist/**",
        "**/build/**",
        "**/coverage/**",
        "**/vendor/**",
        "**/*.min.js",
        "**/*.bundle.js",
        "**/package-lock.json",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_context_lines() -> usize {
    crate::engine::DEFAULT_CONTEXT_LINES
}

fn default_severity() -> String {
    "high".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            exclude_patterns: default_exclude_patterns(),
            context_lines: default_context_lines(),
            disabled_rules: Vec::new(),
            custom_rules: Vec::new(),
        }
    }
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HawkConfig {
    /// Load configuration: an explicit path must exist; otherwise
    /// `jshawk.yml` in the working directory is used when present, and
    /// defaults apply when it is not.
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from_file(Path::new(path));
        }
        let default_path = Path::new(CONFIG_FILE_NAME);
        if default_path.exists() {
            Self::load_from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific YAML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_yml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Build the effective rule set: built-ins minus disabled rules, plus
    /// enabled custom rules. Invalid custom patterns or severities fail
    /// loading; silently skipping a security rule is worse than failing.
    pub fn effective_rules(&self) -> Result<Arc<RuleSet>> {
        let mut rules = (*RuleSet::builtin()).clone();
        rules.retain_enabled(&self.scan.disabled_rules);

        for custom in &self.scan.custom_rules {
            if !custom.enabled {
                continue;
            }
            let severity = Severity::from_str(&custom.severity)
                .with_context(|| format!("custom rule '{}'", custom.name))?;
            rules.push(Rule::new(
                custom.name.clone(),
                &custom.regex,
                severity,
                custom.message.clone(),
                custom.recommendation.clone(),
                None,
            )?);
        }

        Ok(Arc::new(rules))
    }
}
