//! Prop extraction from a component's props declaration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CroquisError, Result};
use crate::index::{Member, SourceIndex, TypeDeclaration, ValueDeclaration};
use crate::introspect::TypeIntrospector;

/// Category used when a member has no `@propCategory` tag.
pub const DEFAULT_CATEGORY: &str = "General";

/// Name of the shared fallback props declaration.
const GENERIC_PROPS: &str = "Props";

/// One documented prop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDetail {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Result of [`extract_props`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProps {
    pub component_description: String,
    pub props: Vec<PropDetail>,
}

impl ComponentProps {
    /// Look up a prop by name.
    pub fn get(&self, name: &str) -> Option<&PropDetail> {
        self.props.iter().find(|p| p.name == name)
    }

    /// Fill missing defaults from the component's destructured parameter.
    pub fn apply_param_defaults(&mut self, implementation: &ValueDeclaration) {
        for prop in &mut self.props {
            if prop.default_value.is_some() {
                continue;
            }
            if let Some(default) = implementation.param_defaults.get(&prop.name) {
                prop.default_value = Some(default.clone());
                prop.required = false;
            }
        }
    }
}

/// Read `path` and extract the props of `component`.
pub fn extract_props(component: &str, path: &Path) -> Result<ComponentProps> {
    let index = SourceIndex::from_file(path)?;
    extract_props_from_index(component, &index)
}

/// Extract props of `component` from an already indexed file.
///
/// `{component}Props` is preferred. When it is missing or resolves to no
/// members, a generic `Props` declaration is tried instead and its
/// description is dropped, since a shared name says nothing about this
/// particular component.
pub fn extract_props_from_index(component: &str, index: &SourceIndex) -> Result<ComponentProps> {
    let preferred = format!("{component}Props");
    let preferred_members = index.resolve_members(&preferred);

    let (decl, members, describe) = match preferred_members {
        Some(members) if !members.is_empty() => {
            (index.type_declaration(&preferred), members, true)
        }
        preferred_members => match index.resolve_members(GENERIC_PROPS) {
            Some(members) if !members.is_empty() => {
                tracing::warn!(
                    "{} not found or empty, falling back to {}",
                    preferred,
                    GENERIC_PROPS
                );
                (None, members, false)
            }
            _ => match preferred_members {
                // Declared but contributes nothing resolvable from this file
                Some(members) => (index.type_declaration(&preferred), members, true),
                None => {
                    return Err(CroquisError::PropsNotFound {
                        component: component.to_string(),
                    })
                }
            },
        },
    };

    let component_description = match (describe, decl) {
        (true, Some(decl)) => declaration_summary(decl),
        _ => String::new(),
    };

    let mut props = ComponentProps {
        component_description,
        props: members
            .iter()
            .map(|member| prop_detail(index, member))
            .collect(),
    };
    if let Some(implementation) = index.value_declaration(component) {
        props.apply_param_defaults(implementation);
    }

    tracing::debug!("extracted {} props for {}", props.props.len(), component);
    Ok(props)
}

fn declaration_summary(decl: &TypeDeclaration) -> String {
    decl.doc
        .as_ref()
        .map(|doc| doc.summary().to_string())
        .unwrap_or_default()
}

fn prop_detail<I: TypeIntrospector>(introspector: &I, member: &Member) -> PropDetail {
    let mut ty = match introspector.resolve_literal_union(&member.ty) {
        Some(literals) => literals.join(" | "),
        None => member.ty.text.clone(),
    };
    if member.optional && !ty.trim_end().ends_with("| undefined") && ty != "undefined" {
        ty.push_str(" | undefined");
    }

    let doc = member.doc.as_ref();
    let default_value = doc
        .and_then(|d| d.tag("default").or_else(|| d.tag("defaultValue")))
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    let category = doc
        .and_then(|d| d.tag("propCategory"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string();

    PropDetail {
        name: member.name.clone(),
        ty,
        required: !member.optional && default_value.is_none(),
        description: doc.map(|d| d.description.clone()).unwrap_or_default(),
        category,
        default_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(component: &str, source: &str) -> Result<ComponentProps> {
        let index = SourceIndex::parse(source, Path::new("types.ts"))?;
        extract_props_from_index(component, &index)
    }

    #[test]
    fn test_literal_union_is_required() {
        let props = extract(
            "Badge",
            "export type BadgeProps = { status: 'active' | 'inactive' };",
        )
        .unwrap();
        assert_eq!(
            props.props,
            vec![PropDetail {
                name: "status".into(),
                ty: "'active' | 'inactive'".into(),
                required: true,
                description: String::new(),
                category: DEFAULT_CATEGORY.into(),
                default_value: None,
            }]
        );
    }

    #[test]
    fn test_optional_member() {
        let props = extract("Badge", "export interface BadgeProps { label?: string }").unwrap();
        let label = props.get("label").unwrap();
        assert!(!label.required);
        assert_eq!(label.ty, "string | undefined");
    }

    #[test]
    fn test_docs_category_and_default_tag() {
        let props = extract(
            "Button",
            r#"
/**
 * Clickable button.
 */
export interface ButtonProps {
  /**
   * Size of the button
   * @propCategory Appearance
   * @default 'md'
   */
  size?: ButtonSize;
  /** Shown while busy */
  loading: boolean;
}
export type ButtonSize = 'sm' | 'md' | 'lg';
"#,
        )
        .unwrap();
        assert_eq!(props.component_description, "Clickable button.");

        let size = props.get("size").unwrap();
        assert_eq!(size.ty, "'sm' | 'md' | 'lg' | undefined");
        assert_eq!(size.category, "Appearance");
        assert_eq!(size.default_value.as_deref(), Some("'md'"));
        assert_eq!(size.description, "Size of the button");

        let loading = props.get("loading").unwrap();
        assert!(loading.required);
        assert_eq!(loading.category, "General");
    }

    #[test]
    fn test_aliases_inside_unions_are_expanded() {
        let props = extract(
            "Chip",
            r#"
type ChipSize = 'sm' | 'md';
type ChipTone = 'neutral' | ChipSize;
export interface ChipProps {
  size?: ChipSize | undefined;
  tone: ChipTone;
  icon?: ReactNode | null;
}
"#,
        )
        .unwrap();
        assert_eq!(props.get("size").unwrap().ty, "'sm' | 'md' | undefined");
        assert_eq!(props.get("tone").unwrap().ty, "'neutral' | 'sm' | 'md'");
        assert_eq!(props.get("icon").unwrap().ty, "ReactNode | null | undefined");
    }

    #[test]
    fn test_destructured_default_makes_prop_optional() {
        let index = SourceIndex::parse(
            r#"
export type TagProps = {
  /** @default 'sm' */
  size: TagSize;
  closable: boolean;
  label: string;
};
export const Tag = ({ size = 'md', closable = false, label }: TagProps) => null;
"#,
            Path::new("Tag.tsx"),
        )
        .unwrap();
        let props = extract_props_from_index("Tag", &index).unwrap();

        // The documented default wins over the destructured one
        assert_eq!(props.get("size").unwrap().default_value.as_deref(), Some("'sm'"));
        let closable = props.get("closable").unwrap();
        assert_eq!(closable.default_value.as_deref(), Some("false"));
        assert!(!closable.required);
        assert!(props.get("label").unwrap().required);
    }

    #[test]
    fn test_generic_props_fallback_drops_description() {
        let props = extract(
            "Chart",
            "/** Shared props */\nexport type Props = { data: number[] };",
        )
        .unwrap();
        assert_eq!(props.component_description, "");
        assert_eq!(props.props.len(), 1);
    }

    #[test]
    fn test_missing_props_declaration() {
        let err = extract("Chart", "export const Chart = () => null;").unwrap_err();
        assert!(matches!(err, CroquisError::PropsNotFound { .. }));
    }

    #[test]
    fn test_serialized_shape() {
        let props = ComponentProps {
            component_description: "A tag".into(),
            props: vec![PropDetail {
                name: "size".into(),
                ty: "string".into(),
                required: false,
                description: String::new(),
                category: "General".into(),
                default_value: Some("'md'".into()),
            }],
        };
        assert_eq!(
            serde_json::to_value(&props).unwrap(),
            serde_json::json!({
                "componentDescription": "A tag",
                "props": [{
                    "name": "size",
                    "type": "string",
                    "required": false,
                    "description": "",
                    "category": "General",
                    "defaultValue": "'md'"
                }]
            })
        );
    }
}
