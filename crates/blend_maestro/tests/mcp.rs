//! Tool calls through the JSON-RPC surface against a library on disk.

use std::fs;
use std::path::Path;

use blend_carton::BlendConfig;
use blend_maestro::McpServer;
use serde_json::{json, Value};

const BADGE: &str = r#"
/**
 * Small status label.
 */
export interface BadgeProps {
  /** Text shown in the badge */
  text: string;
  /**
   * Colour scheme
   * @propCategory Appearance
   * @default 'neutral'
   */
  tone?: 'neutral' | 'success' | 'error';
}

/**
 * @feature Three tones
 * @example Success badge
 * <Badge text="Paid" tone="success" />
 */
export function Badge({ text, tone = 'neutral' }: BadgeProps) {
  return null;
}
"#;

const BADGE_CONTEXT: &str = r#"
export default [
  { propName: 'text', propType: 'string', propDescription: 'Label', llmContext: 'Keep it short' },
  { propName: 'tone', propType: 'BadgeTone', propDefault: 'neutral' },
];
"#;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

struct Fixture {
    _dir: tempfile::TempDir,
    server: McpServer,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "lib/Badge/Badge.tsx", BADGE);
    fs::create_dir_all(dir.path().join("lib/.cache")).unwrap();
    fs::create_dir_all(dir.path().join("lib/Avatar")).unwrap();
    write(dir.path(), "meta/Badge.context.ts", BADGE_CONTEXT);

    let config = BlendConfig {
        library_root: dir.path().join("lib"),
        metadata_root: dir.path().join("meta"),
        package_name: "@acme/blend".into(),
        ..BlendConfig::default()
    };
    Fixture {
        _dir: dir,
        server: McpServer::new(config),
    }
}

fn call(fixture: &Fixture, name: &str, arguments: Value) -> Value {
    let request = json!({
        "jsonrpc": "2.0",
        "id": 7,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    });
    let response = fixture
        .server
        .handle_message(&request.to_string())
        .unwrap();
    serde_json::to_value(response).unwrap()
}

fn text(response: &Value) -> &str {
    assert_eq!(response["result"]["content"][0]["type"], "text", "{response}");
    response["result"]["content"][0]["text"].as_str().unwrap()
}

// =============================================================================
// Lookups
// =============================================================================

mod lookups {
    use super::*;

    #[test]
    fn list_components_skips_hidden_directories() {
        let fixture = fixture();
        let response = call(&fixture, "list_blend_components", Value::Null);
        let names: Vec<String> = serde_json::from_str(text(&response)).unwrap();
        assert_eq!(names, vec!["Avatar", "Badge"]);
    }

    #[test]
    fn component_props() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "get_blend_component_props",
            json!({ "componentName": "Badge" }),
        );
        let props: Value = serde_json::from_str(text(&response)).unwrap();
        assert_eq!(
            props,
            json!({
                "componentDescription": "Small status label.",
                "props": [
                    {
                        "name": "text",
                        "type": "string",
                        "required": true,
                        "description": "Text shown in the badge",
                        "category": "General"
                    },
                    {
                        "name": "tone",
                        "type": "'neutral' | 'success' | 'error' | undefined",
                        "required": false,
                        "description": "Colour scheme",
                        "category": "Appearance",
                        "defaultValue": "'neutral'"
                    }
                ]
            })
        );
    }

    #[test]
    fn component_metadata() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "get_component_metadata",
            json!({ "componentName": "Badge" }),
        );
        let rows: Value = serde_json::from_str(text(&response)).unwrap();
        assert_eq!(rows[0]["llmContext"], "Keep it short");
        assert_eq!(rows[1]["propDefault"], "neutral");
    }
}

// =============================================================================
// Generators
// =============================================================================

mod generators {
    use super::*;

    #[test]
    fn generate_component_with_children() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "generate_blend_component",
            json!({
                "componentName": "Card",
                "props": { "elevated": true },
                "children": [
                    { "componentName": "Badge", "props": { "text": "Paid", "tone": "success" } }
                ]
            }),
        );
        insta::assert_snapshot!(text(&response), @r#"
        import { Card, Badge } from '@acme/blend';

        <Card elevated>
          <Badge text="Paid" tone="success" />
        </Card>
        "#);
    }

    #[test]
    fn scaffold_without_imports() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "scaffold_dashboard_section",
            json!({ "sectionType": "transaction_list_with_controls", "includeImports": false }),
        );
        let markup = text(&response);
        assert!(markup.starts_with("<div style="));
        assert!(markup.contains("<DateRangePicker value={dateRange} onChange={setDateRange} />"));
    }

    #[test]
    fn documentation_uses_documented_example() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "generate_component_documentation",
            json!({ "componentName": "Badge" }),
        );
        let md = text(&response);
        assert!(md.contains("- Three tones"));
        assert!(md.contains(
            "### Success badge\n\n```tsx\n<Badge text=\"Paid\" tone=\"success\" />\n```"
        ));
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn unknown_component_reports_attempted_paths() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "get_blend_component_props",
            json!({ "componentName": "Tooltip" }),
        );
        assert_eq!(response["id"], 7);
        assert_eq!(response["error"]["code"], -32602);
        let attempted = response["error"]["data"]["attemptedPaths"].as_array().unwrap();
        assert_eq!(attempted.len(), 4);
        assert!(attempted[0].as_str().unwrap().ends_with("types.ts"));
    }

    #[test]
    fn unknown_section_type() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "scaffold_dashboard_section",
            json!({ "sectionType": "crypto_ticker" }),
        );
        assert_eq!(response["error"]["code"], -32602);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("crypto_ticker"));
    }

    #[test]
    fn missing_props_declaration_is_internal() {
        let fixture = fixture();
        write(
            fixture.server.config().library_root.as_path(),
            "Spacer/index.ts",
            "export const Spacer = () => null;",
        );
        let response = call(
            &fixture,
            "get_blend_component_props",
            json!({ "componentName": "Spacer" }),
        );
        assert_eq!(response["error"]["code"], -32603);
    }

    #[test]
    fn missing_descriptor() {
        let fixture = fixture();
        let response = call(
            &fixture,
            "get_component_metadata",
            json!({ "componentName": "Avatar" }),
        );
        assert_eq!(response["error"]["code"], -32602);
        assert_eq!(
            response["error"]["data"]["attemptedPaths"]
                .as_array()
                .unwrap()
                .len(),
            3
        );
    }
}
