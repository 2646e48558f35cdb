//! Markdown rendering of [`ComponentDocumentation`].

use blend_carton::text::escape_table_cell;
use blend_croquis::PropDetail;

use super::{ComponentDocumentation, EMPTY_PROPS_HEADING};

const TABLE_HEADER: &str = "| Prop Name | Type | Required | Description | Default Value |\n\
                            |-----------|------|----------|-------------|---------------|\n";

/// Render the documentation page.
///
/// The layout is fixed so pages diff cleanly:
/// - Title
/// - Description (with a fallback sentence)
/// - Features (bullets, or a fallback sentence)
/// - Props, one table per category
/// - Usage examples as `tsx` blocks
pub fn render_documentation(doc: &ComponentDocumentation) -> String {
    let mut md = String::with_capacity(2048);

    // Title
    md.push_str("# ");
    md.push_str(&doc.component_name);
    md.push_str(" Component Documentation\n\n");

    // Description
    md.push_str("## Description\n\n");
    let description = doc.description.trim();
    if description.is_empty() {
        md.push_str("No description available.");
    } else {
        md.push_str(description);
    }
    md.push_str("\n\n");

    // Features
    md.push_str("## Features\n\n");
    if doc.features.is_empty() {
        md.push_str("No features documented.\n\n");
    } else {
        for feature in &doc.features {
            md.push_str("- ");
            md.push_str(feature);
            md.push('\n');
        }
        md.push('\n');
    }

    // Props
    md.push_str("## Props\n\n");
    if doc.prop_sections.iter().all(|s| s.props.is_empty()) {
        md.push_str("### ");
        md.push_str(EMPTY_PROPS_HEADING);
        md.push_str("\n\n");
        md.push_str(TABLE_HEADER);
        md.push('\n');
    } else {
        for section in doc.prop_sections.iter().filter(|s| !s.props.is_empty()) {
            md.push_str("### ");
            md.push_str(&section.category);
            md.push_str("\n\n");
            md.push_str(TABLE_HEADER);
            for prop in &section.props {
                md.push_str(&prop_row(prop));
            }
            md.push('\n');
        }
    }

    // Usage examples
    md.push_str("## Usage Examples\n\n");
    if doc.examples.is_empty() {
        push_code_block(&mut md, &format!("<{} />", doc.component_name));
    } else {
        for example in &doc.examples {
            if !example.title.is_empty() {
                md.push_str("### ");
                md.push_str(&example.title);
                md.push_str("\n\n");
            }
            push_code_block(&mut md, &example.code);
        }
    }

    // Single trailing newline
    while md.ends_with("\n\n") {
        md.pop();
    }
    md
}

fn prop_row(prop: &PropDetail) -> String {
    let description = if prop.description.trim().is_empty() {
        "-".to_string()
    } else {
        escape_table_cell(&prop.description)
    };
    let default = match &prop.default_value {
        Some(value) => format!("`{}`", escape_table_cell(value)),
        None => "-".to_string(),
    };
    format!(
        "| `{}` | `{}` | {} | {} | {} |\n",
        prop.name,
        escape_table_cell(&prop.ty),
        if prop.required { "Yes" } else { "No" },
        description,
        default
    )
}

fn push_code_block(md: &mut String, code: &str) {
    md.push_str("```tsx\n");
    md.push_str(code.trim_end());
    md.push_str("\n```\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::{group_by_category, ComponentDocumentation};
    use blend_croquis::UsageExample;

    #[test]
    fn test_empty_documentation() {
        let doc = ComponentDocumentation::new("Avatar");
        insta::assert_snapshot!(render_documentation(&doc).trim_end(), @r"
        # Avatar Component Documentation

        ## Description

        No description available.

        ## Features

        No features documented.

        ## Props

        ### Available Props

        | Prop Name | Type | Required | Description | Default Value |
        |-----------|------|----------|-------------|---------------|

        ## Usage Examples

        ```tsx
        <Avatar />
        ```
        ");
    }

    #[test]
    fn test_full_documentation() {
        let props = vec![
            PropDetail {
                name: "size".into(),
                ty: "'sm' | 'md' | undefined".into(),
                required: false,
                description: "Size of the\nbutton".into(),
                category: "Appearance".into(),
                default_value: Some("'md'".into()),
            },
            PropDetail {
                name: "text".into(),
                ty: "string".into(),
                required: true,
                description: String::new(),
                category: "General".into(),
                default_value: None,
            },
        ];
        let doc = ComponentDocumentation {
            component_name: "Button".into(),
            description: "Triggers an action.".into(),
            features: vec!["Three sizes".into()],
            prop_sections: group_by_category(&props),
            examples: vec![UsageExample {
                title: "Basic".into(),
                code: "<Button text=\"Save\" />".into(),
            }],
        };

        insta::assert_snapshot!(render_documentation(&doc).trim_end(), @r#"
        # Button Component Documentation

        ## Description

        Triggers an action.

        ## Features

        - Three sizes

        ## Props

        ### Appearance

        | Prop Name | Type | Required | Description | Default Value |
        |-----------|------|----------|-------------|---------------|
        | `size` | `'sm' \| 'md' \| undefined` | No | Size of the button | `'md'` |

        ### General

        | Prop Name | Type | Required | Description | Default Value |
        |-----------|------|----------|-------------|---------------|
        | `text` | `string` | Yes | - | - |

        ## Usage Examples

        ### Basic

        ```tsx
        <Button text="Save" />
        ```
        "#);
    }
}
