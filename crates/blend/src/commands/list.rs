//! List command - Component directories in the library

use blend_carton::BlendConfig;
use clap::Args;

#[derive(Args)]
pub struct ListArgs {
    /// Print a JSON array instead of one name per line
    #[arg(long)]
    pub json: bool,

    /// List components with a .context.ts descriptor instead
    #[arg(long)]
    pub descriptors: bool,
}

pub fn run(args: ListArgs, config: &BlendConfig) {
    let result = if args.descriptors {
        blend_croquis::list_descriptors(&config.metadata_root)
    } else {
        blend_croquis::list_components(&config.library_root)
    };
    let names = result.unwrap_or_else(|e| super::fail(e));

    if args.json {
        super::print_json(&names);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
}
