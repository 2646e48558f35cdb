//! MCP handshake payloads.

use serde_json::{json, Value};

/// Protocol revision implemented by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "blend-mcp";

/// Result of `initialize`.
pub fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": server_capabilities(),
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Only tools are offered; the list never changes while running.
pub fn server_capabilities() -> Value {
    json!({
        "tools": { "listChanged": false }
    })
}
