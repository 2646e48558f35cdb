//! # blend_maestro
//!
//! Maestro - MCP tool server for the Blend design system.
//!
//! ## Name Origin
//!
//! A **maestro** conducts an orchestra, cueing each section at the right
//! moment. `blend_maestro` conducts the other Blend crates for an AI agent:
//! each tool call is routed to the extractor or one of the renderers and
//! the result is handed back over JSON-RPC.
//!
//! ## Architecture
//!
//! ```text
//! stdin ──> McpServer::serve ──> dispatch ──> tools::call ──> blend_croquis
//!                 │                                      └──> blend_musea
//! stdout <────────┘  (one JSON-RPC response per line)
//! ```
//!
//! ## Usage
//!
//! ```no_run
//! use blend_carton::BlendConfig;
//!
//! blend_maestro::init_logging(false);
//! blend_maestro::serve(BlendConfig::load(None)).unwrap();
//! ```

pub mod logging;
pub mod protocol;
pub mod server;
pub mod tools;

pub use logging::init_logging;
pub use server::McpServer;
pub use tools::{Tool, ToolDefinition, ToolError};

use blend_carton::BlendConfig;

/// Start the MCP server on stdin/stdout.
pub fn serve(config: BlendConfig) -> std::io::Result<()> {
    McpServer::new(config).run()
}
