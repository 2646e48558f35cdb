//! Docs command - Markdown documentation for one or all components

use std::path::PathBuf;

use blend_carton::BlendConfig;
use clap::Args;

#[derive(Args)]
pub struct DocsArgs {
    /// Component name; omit with --all
    #[arg(required_unless_present = "all")]
    pub component: Option<String>,

    /// Output file (single component) or directory (with --all)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Document every component in the library
    #[arg(long, conflicts_with = "component")]
    pub all: bool,
}

pub fn run(args: DocsArgs, config: &BlendConfig) {
    if args.all {
        run_all(args.output, config);
        return;
    }

    let Some(component) = args.component else {
        super::fail("a component name is required");
    };
    match blend_musea::generate_component_documentation(&component, &config.library_root) {
        Ok(doc) => super::emit(&doc.markdown, args.output.as_deref()),
        Err(e) => super::fail(e),
    }
}

fn run_all(output: Option<PathBuf>, config: &BlendConfig) {
    let output = output.unwrap_or_else(|| PathBuf::from("docs"));
    let components =
        blend_croquis::list_components(&config.library_root).unwrap_or_else(|e| super::fail(e));

    let mut failed = 0usize;
    for component in &components {
        match blend_musea::generate_component_documentation(component, &config.library_root) {
            Ok(doc) => super::emit(&doc.markdown, Some(&output.join(&doc.filename))),
            Err(e) => {
                failed += 1;
                eprintln!("  {} skipped: {}", component, e);
            }
        }
    }

    eprintln!(
        "Documented {} of {} component(s)",
        components.len() - failed,
        components.len()
    );
    if failed == components.len() && !components.is_empty() {
        std::process::exit(1);
    }
}
