//! # jshawk - Static security scanning for JavaScript and TypeScript
//!
//! jshawk flags risky code constructs (XSS sinks, hardcoded secrets, weak
//! crypto, SQL built from strings, disabled TLS/CSRF protections, and more)
//! using a library of regular-expression rules, then emits a
//! severity-classified report.
//!
//! Matches that fall inside string literals, comments, or regex literals are
//! suppressed by a lightweight lexical classifier, so files that merely *talk
//! about* dangerous patterns (including rule definitions themselves) do not
//! self-trigger.
//!
//! ## Quick Start
//!
//! ```bash
//! # Scan a project
//! jshawk scan src/
//!
//! # Machine-readable output
//! jshawk scan src/ --format json
//!
//! # Start the MCP server for AI integration
//! jshawk mcp start
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use jshawk::engine::MatchEngine;
//! use jshawk::rules::RuleSet;
//!
//! let engine = MatchEngine::new(RuleSet::builtin());
//! let result = engine.analyze("app.js", "document.body.innerHTML = data;");
//! for finding in &result.findings {
//!     println!("{}:{} {}", result.file_path, finding.line, finding.rule_name);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod mcp;
pub mod report;
pub mod rules;
pub mod scan;

pub use cli::{Cli, Output};
pub use config::HawkConfig;

/// Result type alias for jshawk operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
