//! MCP server command implementations

use anyhow::Result;

use crate::cli::{McpCommands, Output};
use crate::config::HawkConfig;
use crate::mcp::{McpServer, tools};

/// Execute MCP commands
pub async fn execute(cmd: McpCommands, config_path: Option<&str>, output: &Output) -> Result<()> {
    let mut config = HawkConfig::load(config_path)?;

    match cmd {
        McpCommands::Start { host, port } => {
            if let Some(host) = host {
                config.mcp.host = host;
            }
            if let Some(port) = port {
                config.mcp.port = port;
            }
            output.step(&format!(
                "Starting MCP server on {}:{}",
                config.mcp.host, config.mcp.port
            ));
            McpServer::new(config).start().await
        }
        McpCommands::Tools => {
            output.header("Available MCP tools");
            for tool in tools::get_available_tools() {
                output.table_row(&tool.name, &tool.description);
            }
            Ok(())
        }
    }
}
