//! Model Context Protocol (MCP) server
//!
//! Exposes the match engine as remotely callable tools over JSON-RPC. All
//! session and framing concerns live here; the engine itself holds no state
//! between calls.

use anyhow::Result;
use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::config::HawkConfig;

pub mod tools;

/// MCP server state
#[derive(Clone)]
pub struct McpServer {
    config: HawkConfig,
}

/// MCP JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

/// MCP error response
#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl McpResponse {
    fn result(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(config: HawkConfig) -> Self {
        Self { config }
    }

    /// Create the router for the MCP server
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(health_check))
            .route("/mcp", post(handle_mcp_request))
            .with_state(self.clone())
    }

    /// Start the MCP server and serve until shutdown
    pub async fn start(&self) -> Result<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.config.mcp.host, self.config.mcp.port);

        tracing::info!("starting MCP server on http://{}", addr);
        println!("MCP server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "jshawk-mcp",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Handle MCP JSON-RPC requests
async fn handle_mcp_request(
    axum::extract::State(server): axum::extract::State<McpServer>,
    Json(request): Json<McpRequest>,
) -> impl IntoResponse {
    let response = match request.method.as_str() {
        "initialize" => handle_initialize(request.id),
        "tools/list" => handle_tools_list(request.id),
        "tools/call" => handle_tools_call(&server.config, request.id, request.params).await,
        _ => McpResponse::error(request.id, -32601, "Method not found"),
    };

    (StatusCode::OK, Json(response))
}

/// Handle initialize request
fn handle_initialize(id: Option<serde_json::Value>) -> McpResponse {
    McpResponse::result(
        id,
        serde_json::json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "jshawk-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

/// Handle tools list request
fn handle_tools_list(id: Option<serde_json::Value>) -> McpResponse {
    let tools = tools::get_available_tools();
    McpResponse::result(id, serde_json::json!({ "tools": tools }))
}

/// Handle tools call request
async fn handle_tools_call(
    config: &HawkConfig,
    id: Option<serde_json::Value>,
    params: Option<serde_json::Value>,
) -> McpResponse {
    let Some(params) = params else {
        return McpResponse::error(id, -32602, "Missing params");
    };
    let Some(name) = params.get("name").and_then(|n| n.as_str()) else {
        return McpResponse::error(id, -32602, "Missing tool name");
    };
    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    match tools::execute_tool(config, name, arguments) {
        Ok(result) => McpResponse::result(
            id,
            serde_json::json!({
                "content": [
                    {
                        "type": "text",
                        "text": result.to_string()
                    }
                ]
            }),
        ),
        Err(message) => McpResponse::error(id, -32000, message),
    }
}
