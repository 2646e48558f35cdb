//! Generate command - JSX from a component request file

use std::path::PathBuf;

use blend_carton::BlendConfig;
use blend_musea::{ComponentGenerationRequest, LibraryPropTypes, MarkupOptions};
use clap::Args;

#[derive(Args)]
pub struct GenerateArgs {
    /// JSON file holding a component request
    /// (`{"componentName": "Button", "props": {...}, "children": ...}`)
    pub request: PathBuf,

    /// Do not prepend the import statement
    #[arg(long)]
    pub no_imports: bool,
}

pub fn run(args: GenerateArgs, config: &BlendConfig) {
    let request: ComponentGenerationRequest = super::read_json(&args.request);
    let options = MarkupOptions {
        include_imports: !args.no_imports,
        package_name: config.package_name.clone(),
    };
    let types = LibraryPropTypes::new(&config.library_root);
    println!(
        "{}",
        blend_musea::generate_component_markup(&request, &options, &types)
    );
}
