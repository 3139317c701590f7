//! Detection rules for JavaScript/TypeScript security scanning
//!
//! This module defines the rule model (name, pattern, severity, remediation
//! guidance) and the compiled rule set handed to the match engine. Built-in
//! rules live in [`builtin`] and are compiled once per process.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

pub mod builtin;

/// Severity levels for findings
///
/// The ordering is an explicit ordinal mapping (critical=0 ... low=3) used
/// for report sorting; never rely on declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Ordinal rank used for sorting: critical=0, high=1, medium=2, low=3
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::High => write!(f, "HIGH"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::Low => write!(f, "LOW"),
        }
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            other => bail!("unknown severity level: {}", other),
        }
    }
}

/// A compiled detection rule for one vulnerability class
#[derive(Debug, Clone)]
pub struct Rule {
    /// Identifier for the vulnerability class (e.g. "Hardcoded Secret")
    pub name: String,

    /// Compiled pattern, applied in find-all mode over whole file text
    pub pattern: Regex,

    /// Severity level
    pub severity: Severity,

    /// Human-readable description of the risk
    pub message: String,

    /// Suggested remediation
    pub recommendation: String,

    /// Extended rationale, where one exists
    pub explanation: Option<String>,
}

/// Uncompiled rule definition, as authored in [`builtin`] or supplied
/// through configuration
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub severity: Severity,
    pub message: &'static str,
    pub recommendation: &'static str,
    pub explanation: Option<&'static str>,
}

impl Rule {
    /// Compile a rule from its parts
    ///
    /// A malformed pattern is a fatal configuration error: silently skipping
    /// a security rule is worse than failing the scan.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        severity: Severity,
        message: impl Into<String>,
        recommendation: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid regex for rule '{}': {}", name, pattern))?;
        Ok(Self {
            name,
            pattern,
            severity,
            message: message.into(),
            recommendation: recommendation.into(),
            explanation,
        })
    }
}

/// An ordered collection of compiled rules
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build a rule set from uncompiled specs, failing fast on any bad pattern
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self> {
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            rules.push(Rule::new(
                spec.name,
                spec.pattern,
                spec.severity,
                spec.message,
                spec.recommendation,
                spec.explanation.map(String::from),
            )?);
        }
        Ok(Self { rules })
    }

    /// The built-in rule library, compiled once per process and shared
    pub fn builtin() -> Arc<RuleSet> {
        builtin::builtin_rules()
    }

    /// Add a compiled rule, preserving order
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Drop rules by name (case-insensitive), used for config-disabled rules
    pub fn retain_enabled(&mut self, disabled: &[String]) {
        if disabled.is_empty() {
            return;
        }
        let disabled: Vec<String> = disabled.iter().map(|n| n.to_lowercase()).collect();
        self.rules
            .retain(|r| !disabled.contains(&r.name.to_lowercase()));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordinals() {
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::High.rank(), 1);
        assert_eq!(Severity::Medium.rank(), 2);
        assert_eq!(Severity::Low.rank(), 3);
        assert!(Severity::Critical < Severity::High);
        assert!(Severity::Medium < Severity::Low);
    }

    #[test]
    fn test_severity_parsing() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert_eq!("Medium".parse::<Severity>().unwrap(), Severity::Medium);
        assert!("nope".parse::<Severity>().is_err());
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let result = Rule::new(
            "Broken",
            r"(unclosed",
            Severity::Low,
            "broken",
            "fix it",
            None,
        );
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("Broken"));
    }

    #[test]
    fn test_builtin_rules_compile() {
        let rules = RuleSet::builtin();
        assert!(!rules.is_empty());
        // Every rule carries remediation guidance
        for rule in rules.iter() {
            assert!(!rule.message.is_empty(), "rule '{}' has no message", rule.name);
            assert!(
                !rule.recommendation.is_empty(),
                "rule '{}' has no recommendation",
                rule.name
            );
        }
    }

    #[test]
    fn test_retain_enabled() {
        let mut rules = (*RuleSet::builtin()).clone();
        let before = rules.len();
        rules.retain_enabled(&["debugger statement".to_string()]);
        assert_eq!(rules.len(), before - 1);
    }
}
