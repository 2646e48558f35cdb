//! Tool catalogue and dispatch.
//!
//! Every tool takes a JSON object of arguments and answers with text: JSON
//! for data lookups, JSX or Markdown for generators.

mod error;

pub use error::{Result, ToolError};

use std::fmt;
use std::str::FromStr;

use blend_carton::BlendConfig;
use blend_musea::{ComponentGenerationRequest, LibraryPropTypes, MarkupOptions, SectionType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Tools exposed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ListComponents,
    GetComponentProps,
    GenerateComponent,
    ScaffoldDashboardSection,
    GenerateDocumentation,
    GetComponentMetadata,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::ListComponents,
        Tool::GetComponentProps,
        Tool::GenerateComponent,
        Tool::ScaffoldDashboardSection,
        Tool::GenerateDocumentation,
        Tool::GetComponentMetadata,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ListComponents => "list_blend_components",
            Tool::GetComponentProps => "get_blend_component_props",
            Tool::GenerateComponent => "generate_blend_component",
            Tool::ScaffoldDashboardSection => "scaffold_dashboard_section",
            Tool::GenerateDocumentation => "generate_component_documentation",
            Tool::GetComponentMetadata => "get_component_metadata",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ListComponents => "List all component directories in the Blend library.",
            Tool::GetComponentProps => {
                "Get the props of a Blend component: name, type, required flag, description, category and default value."
            }
            Tool::GenerateComponent => {
                "Generate JSX for a Blend component from a prop map and optional nested children."
            }
            Tool::ScaffoldDashboardSection => {
                "Generate a composed dashboard section from a named pattern."
            }
            Tool::GenerateDocumentation => {
                "Generate Markdown documentation for a Blend component."
            }
            Tool::GetComponentMetadata => {
                "Read the prop descriptor rows of a component's .context.ts file."
            }
        }
    }

    pub fn input_schema(self) -> Value {
        let component_name = json!({
            "type": "string",
            "description": "Component name as it appears in the library, e.g. \"Button\""
        });
        let include_imports = json!({
            "type": "boolean",
            "description": "Prepend an import statement (default: true)"
        });

        match self {
            Tool::ListComponents => json!({ "type": "object", "properties": {} }),
            Tool::GetComponentProps
            | Tool::GenerateDocumentation
            | Tool::GetComponentMetadata => json!({
                "type": "object",
                "properties": { "componentName": component_name },
                "required": ["componentName"]
            }),
            Tool::GenerateComponent => json!({
                "type": "object",
                "properties": {
                    "componentName": component_name,
                    "props": {
                        "type": "object",
                        "description": "Prop values keyed by prop name"
                    },
                    "children": {
                        "description": "Text content, or an array of nested component requests",
                        "oneOf": [
                            { "type": "string" },
                            { "type": "array", "items": { "type": "object" } }
                        ]
                    },
                    "includeImports": include_imports
                },
                "required": ["componentName"]
            }),
            Tool::ScaffoldDashboardSection => json!({
                "type": "object",
                "properties": {
                    "sectionType": {
                        "type": "string",
                        "enum": SectionType::names()
                    },
                    "options": {
                        "type": "object",
                        "description": "Overrides for titles, columns and data"
                    },
                    "includeImports": include_imports
                },
                "required": ["sectionType"]
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ToolError::invalid(format!("unknown tool: {s}")))
    }
}

/// Entry of the `tools/list` result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// All tool definitions, in catalogue order.
pub fn definitions() -> Vec<ToolDefinition> {
    Tool::ALL.into_iter().map(Tool::definition).collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComponentArgs {
    component_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateArgs {
    #[serde(flatten)]
    request: ComponentGenerationRequest,
    #[serde(default = "default_true")]
    include_imports: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScaffoldArgs {
    section_type: String,
    #[serde(default)]
    options: Value,
    #[serde(default = "default_true")]
    include_imports: bool,
}

fn default_true() -> bool {
    true
}

fn parse_args<T: DeserializeOwned>(arguments: &Value) -> Result<T> {
    let arguments = match arguments {
        Value::Null => json!({}),
        other => other.clone(),
    };
    Ok(serde_json::from_value(arguments)?)
}

fn component_name(arguments: &Value) -> Result<String> {
    let args: ComponentArgs = parse_args(arguments)?;
    let name = args.component_name.trim();
    if name.is_empty() {
        return Err(ToolError::invalid("componentName must not be empty"));
    }
    Ok(name.to_string())
}

fn markup_options(config: &BlendConfig, include_imports: bool) -> MarkupOptions {
    MarkupOptions {
        include_imports,
        package_name: config.package_name.clone(),
    }
}

fn to_json_text<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| ToolError::Internal(e.to_string()))
}

/// Run `tool` with `arguments` against the configured library.
pub fn call(tool: Tool, arguments: &Value, config: &BlendConfig) -> Result<String> {
    tracing::debug!("calling {}", tool);

    match tool {
        Tool::ListComponents => {
            let components = blend_croquis::list_components(&config.library_root)?;
            to_json_text(&components)
        }
        Tool::GetComponentProps => {
            let name = component_name(arguments)?;
            let analysis = blend_croquis::analyze_component(&name, &config.library_root)?;
            to_json_text(&analysis.props)
        }
        Tool::GenerateComponent => {
            let args: GenerateArgs = parse_args(arguments)?;
            if args.request.component_name.trim().is_empty() {
                return Err(ToolError::invalid("componentName must not be empty"));
            }
            let types = LibraryPropTypes::new(&config.library_root);
            Ok(blend_musea::generate_component_markup(
                &args.request,
                &markup_options(config, args.include_imports),
                &types,
            ))
        }
        Tool::ScaffoldDashboardSection => {
            let args: ScaffoldArgs = parse_args(arguments)?;
            let types = LibraryPropTypes::new(&config.library_root);
            Ok(blend_musea::scaffold_dashboard_section(
                &args.section_type,
                &args.options,
                &markup_options(config, args.include_imports),
                &types,
            )?)
        }
        Tool::GenerateDocumentation => {
            let name = component_name(arguments)?;
            let output = blend_musea::generate_component_documentation(&name, &config.library_root)?;
            Ok(output.markdown)
        }
        Tool::GetComponentMetadata => {
            let name = component_name(arguments)?;
            let rows = blend_croquis::read_component_metadata(&name, &config.metadata_root)?;
            to_json_text(&rows)
        }
    }
}

/// Look up a tool by name and run it.
pub fn call_by_name(name: &str, arguments: &Value, config: &BlendConfig) -> Result<String> {
    call(name.parse()?, arguments, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(tool.name().parse::<Tool>().unwrap(), tool);
        }
        assert!(matches!(
            "delete_everything".parse::<Tool>(),
            Err(ToolError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_definitions_require_component_name() {
        let defs = definitions();
        assert_eq!(defs.len(), 6);
        let props = defs
            .iter()
            .find(|d| d.name == "get_blend_component_props")
            .unwrap();
        assert_eq!(props.input_schema["required"], json!(["componentName"]));
        let scaffold = Tool::ScaffoldDashboardSection.input_schema();
        assert_eq!(
            scaffold["properties"]["sectionType"]["enum"],
            json!(["fintech_kpi_summary_with_chart", "transaction_list_with_controls"])
        );
    }

    #[test]
    fn test_missing_component_name() {
        let config = BlendConfig::default();
        let err = call(Tool::GetComponentProps, &json!({}), &config).unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));

        let err = call(
            Tool::GenerateDocumentation,
            &json!({ "componentName": "  " }),
            &config,
        )
        .unwrap_err();
        assert!(matches!(err, ToolError::InvalidParameters(_)));
    }

    #[test]
    fn test_generate_without_library_defaults_to_imports() {
        let config = BlendConfig {
            library_root: "does/not/exist".into(),
            ..BlendConfig::default()
        };
        let text = call(
            Tool::GenerateComponent,
            &json!({ "componentName": "Button", "props": { "text": "Save", "disabled": true } }),
            &config,
        )
        .unwrap();
        assert_eq!(
            text,
            "import { Button } from '@juspay/blend-design-system';\n\n<Button text=\"Save\" disabled />"
        );
    }
}
