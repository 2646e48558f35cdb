//! Scaffold command - Composed dashboard sections

use blend_carton::BlendConfig;
use blend_musea::{LibraryPropTypes, MarkupOptions, SectionType};
use clap::builder::PossibleValuesParser;
use clap::Args;
use serde_json::Value;

#[derive(Args)]
pub struct ScaffoldArgs {
    /// Section type
    #[arg(value_parser = PossibleValuesParser::new(SectionType::names()))]
    pub section_type: String,

    /// Options as a JSON object, e.g. '{"title": "Payouts"}'
    #[arg(long)]
    pub options: Option<String>,

    /// Do not prepend the import statement
    #[arg(long)]
    pub no_imports: bool,
}

pub fn run(args: ScaffoldArgs, config: &BlendConfig) {
    let options = match args.options.as_deref() {
        Some(raw) => serde_json::from_str(raw)
            .unwrap_or_else(|e| super::fail(format!("invalid --options: {}", e))),
        None => Value::Null,
    };
    let markup = MarkupOptions {
        include_imports: !args.no_imports,
        package_name: config.package_name.clone(),
    };
    let types = LibraryPropTypes::new(&config.library_root);

    match blend_musea::scaffold_dashboard_section(&args.section_type, &options, &markup, &types) {
        Ok(code) => println!("{}", code),
        Err(e) => super::fail(e),
    }
}
