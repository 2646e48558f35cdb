//! MCP command - Start the tool server on stdin/stdout

use blend_carton::BlendConfig;
use clap::Args;

#[derive(Args)]
pub struct McpArgs {
    /// Print the tool catalogue and exit
    #[arg(long)]
    pub list_tools: bool,
}

pub fn run(args: McpArgs, config: BlendConfig) {
    if args.list_tools {
        super::print_json(&blend_maestro::tools::definitions());
        return;
    }

    eprintln!("blend mcp: MCP server started (stdio mode)");
    eprintln!("Library root: {}", config.library_root.display());
    eprintln!("Protocol: one JSON-RPC message per line on stdin, responses on stdout");

    if let Err(e) = blend_maestro::serve(config) {
        super::fail(format!("server error: {}", e));
    }
}
