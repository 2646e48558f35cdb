//! # blend
//!
//! Command-line entry point for the Blend design system tooling.
//!
//! Every MCP tool is also reachable as a subcommand, so the same output can
//! be produced from a shell or a CI job without an agent in the loop.

mod commands;

use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Parser)]
#[command(name = "blend")]
#[command(about = "Blend design system tooling", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP tool server on stdin/stdout
    #[command(visible_alias = "maestro")]
    Mcp(commands::mcp::McpArgs),

    /// List components in the library
    List(commands::list::ListArgs),

    /// Print the props of a component as JSON
    Props(commands::props::PropsArgs),

    /// Generate Markdown documentation for a component
    Docs(commands::docs::DocsArgs),

    /// Generate JSX from a component request file
    Generate(commands::generate::GenerateArgs),

    /// Generate a dashboard section
    Scaffold(commands::scaffold::ScaffoldArgs),

    /// Print the descriptor rows of a component's .context.ts file
    Metadata(commands::metadata::MetadataArgs),

    /// Resolve responsive style properties to CSS
    #[command(visible_alias = "cascade")]
    Styles(commands::styles::StylesArgs),

    /// Print the resolved configuration
    Config,

    /// Write .blend/blend.config.schema.json under the working directory
    InitSchema,
}

fn main() {
    let cli = Cli::parse();
    blend_maestro::init_logging(cli.global.debug);
    let config = cli.global.resolve();

    match cli.command {
        Commands::Mcp(args) => commands::mcp::run(args, config),
        Commands::List(args) => commands::list::run(args, &config),
        Commands::Props(args) => commands::props::run(args, &config),
        Commands::Docs(args) => commands::docs::run(args, &config),
        Commands::Generate(args) => commands::generate::run(args, &config),
        Commands::Scaffold(args) => commands::scaffold::run(args, &config),
        Commands::Metadata(args) => commands::metadata::run(args, &config),
        Commands::Styles(args) => commands::styles::run(args),
        Commands::Config => commands::print_config(&config),
        Commands::InitSchema => commands::init_schema(),
    }
}
