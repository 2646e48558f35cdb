//! Metadata command - Descriptor rows from a .context.ts file

use blend_carton::BlendConfig;
use clap::Args;

#[derive(Args)]
pub struct MetadataArgs {
    /// Component name, e.g. Button
    pub component: String,
}

pub fn run(args: MetadataArgs, config: &BlendConfig) {
    match blend_croquis::read_component_metadata(&args.component, &config.metadata_root) {
        Ok(rows) => super::print_json(&rows),
        Err(e) => super::fail(e),
    }
}
