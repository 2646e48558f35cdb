//! Line-based MCP server.
//!
//! Each request is handled to completion before the next line is read.
//! Requests share nothing but the configuration.

mod capabilities;

pub use capabilities::{initialize_result, server_capabilities, PROTOCOL_VERSION, SERVER_NAME};

use std::io::{BufRead, BufReader, Write};

use blend_carton::BlendConfig;
use serde_json::{json, Value};

use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams, ToolCallResult,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
};
use crate::tools;

/// MCP server bound to one library configuration.
pub struct McpServer {
    config: BlendConfig,
}

impl McpServer {
    pub fn new(config: BlendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// Run the server, reading from stdin and writing to stdout.
    pub fn run(&self) -> std::io::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(BufReader::new(stdin.lock()), stdout.lock())
    }

    /// Serve newline-delimited requests until `reader` is exhausted.
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> std::io::Result<()> {
        tracing::info!(
            "serving {} (library root: {})",
            SERVER_NAME,
            self.config.library_root.display()
        );

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let Some(response) = self.handle_message(&line) else {
                continue;
            };
            let response_json = serde_json::to_string(&response).unwrap_or_else(|_| {
                r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"Internal error"}}"#
                    .to_string()
            });

            writeln!(writer, "{}", response_json)?;
            writer.flush()?;
        }

        tracing::info!("input closed, stopping");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub fn handle_message(&self, input: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(r) => r,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != "2.0" {
            tracing::warn!("unexpected jsonrpc version {:?}", request.jsonrpc);
        }

        if request.is_notification() {
            tracing::debug!("notification {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        let response = match self.dispatch(&request) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        Some(response)
    }

    fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        match request.method.as_str() {
            "initialize" => {
                tracing::info!("client initialized");
                Ok(initialize_result())
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tools::definitions() })),
            "tools/call" => self.handle_tool_call(request.params.clone()),
            method => Err(JsonRpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        }
    }

    fn handle_tool_call(&self, params: Value) -> Result<Value, JsonRpcError> {
        let params: ToolCallParams = serde_json::from_value(params).map_err(|e| {
            JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e))
        })?;

        match tools::call_by_name(&params.name, &params.arguments, &self.config) {
            Ok(text) => serde_json::to_value(ToolCallResult::text(text))
                .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string())),
            Err(err) => {
                tracing::warn!("tool {} failed: {}", params.name, err);
                Err(err.to_rpc_error())
            }
        }
    }
}
