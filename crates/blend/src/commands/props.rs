//! Props command - Extracted props of one component

use blend_carton::BlendConfig;
use clap::Args;

#[derive(Args)]
pub struct PropsArgs {
    /// Component name, e.g. Button
    pub component: String,
}

pub fn run(args: PropsArgs, config: &BlendConfig) {
    match blend_croquis::analyze_component(&args.component, &config.library_root) {
        Ok(analysis) => {
            tracing::debug!("read {}", analysis.source_path.display());
            super::print_json(&analysis.props);
        }
        Err(e) => super::fail(e),
    }
}
