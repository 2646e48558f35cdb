//! Styles command - Resolve responsive style properties
//!
//! The input file is either a plain property map:
//!
//! ```json
//! { "padding": { "mobile": "8px", "desktop": "16px" }, "display": "flex" }
//! ```
//!
//! or a property map with foundation tokens to substitute `{path}` references:
//!
//! ```json
//! {
//!   "properties": { "color": "{colors.primary.500}" },
//!   "foundation": { "colors": { "primary": { "500": "#2B7FFF" } } },
//!   "overrides": { "colors": { "primary": { "500": "#0561E2" } } }
//! }
//! ```

use std::path::PathBuf;

use blend_cascade::{ComponentTokens, FoundationTokens, StyleRuleSet};
use clap::{Args, ValueEnum};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Args)]
pub struct StylesArgs {
    /// JSON file with the style properties
    pub input: PathBuf,

    /// Selector the CSS rules are scoped to
    #[arg(long, default_value = ".component")]
    pub selector: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = StylesFormat::Css)]
    pub format: StylesFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StylesFormat {
    /// CSS text with media queries
    Css,
    /// CSS-in-JS object
    Json,
}

#[derive(Debug, Deserialize)]
struct TokenInput {
    properties: Map<String, Value>,
    #[serde(default)]
    foundation: Option<Value>,
    #[serde(default)]
    overrides: Option<Value>,
}

pub fn run(args: StylesArgs) {
    let input: Value = super::read_json(&args.input);
    let rules = resolve_input(input).unwrap_or_else(|e| super::fail(e));

    match args.format {
        StylesFormat::Css => print!("{}", rules.to_css(&args.selector)),
        StylesFormat::Json => super::print_json(&rules),
    }
}

fn resolve_input(input: Value) -> Result<StyleRuleSet<Value>, String> {
    let Value::Object(map) = input else {
        return Err("style input must be a JSON object".to_string());
    };

    if !map.contains_key("properties") {
        return Ok(ComponentTokens::from_json(&map).resolve(None));
    }

    let input: TokenInput =
        serde_json::from_value(Value::Object(map)).map_err(|e| e.to_string())?;
    let foundation = input.foundation.map(|tree| {
        let tokens = FoundationTokens::new(tree);
        match input.overrides {
            Some(ref overrides) => tokens.with_overrides(overrides),
            None => tokens,
        }
    });
    tracing::debug!(
        "resolving {} properties (foundation: {})",
        input.properties.len(),
        foundation.is_some()
    );

    Ok(ComponentTokens::from_json(&input.properties).resolve(foundation.as_ref()))
}
