//! Command-line interface for jshawk
//!
//! Main CLI structure and command dispatch, built on clap derive.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportFormat;

pub mod commands;
pub mod output;

pub use output::Output;

/// jshawk - Static security scanner for JavaScript and TypeScript
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path (defaults to ./jshawk.yml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Scan a file or directory for security issues
    Scan {
        /// File or directory to scan (defaults to the current directory)
        path: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// List the effective detection rules
    Rules {
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: ReportFormat,
    },
    /// MCP server commands
    #[command(subcommand)]
    Mcp(McpCommands),
}

/// MCP server subcommands
#[derive(Subcommand)]
pub enum McpCommands {
    /// Start the MCP server
    Start {
        /// Bind address (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides configuration)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List available MCP tools
    Tools,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);

        match self.command {
            Some(Commands::Scan { path, format }) => {
                commands::scan::execute(path, format, self.config.as_deref(), &output)
            }
            Some(Commands::Rules { format }) => {
                commands::rules::execute(format, self.config.as_deref(), &output)
            }
            Some(Commands::Mcp(cmd)) => {
                commands::mcp::execute(cmd, self.config.as_deref(), &output).await
            }
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }
}
