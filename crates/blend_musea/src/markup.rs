//! JSX markup generation from component requests.
//!
//! A request names a component, its props and optional children. Prop types
//! extracted from the library, when available, decide how each value is
//! written: `disabled` versus `disabled={true}`, `size="md"` versus
//! `size={ButtonSize.MD}`.

use std::path::PathBuf;

use blend_carton::text::{dedent, indent, INDENT};
use blend_carton::{FxHashMap, IndexSet};
use blend_croquis::ComponentProps;
use serde::{Deserialize, Serialize};

/// A component to render, with nested children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentGenerationRequest {
    pub component_name: String,
    #[serde(default)]
    pub props: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
}

/// Children of a generated element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Children {
    Text(String),
    Nodes(Vec<ComponentGenerationRequest>),
}

impl ComponentGenerationRequest {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            props: serde_json::Map::new(),
            children: None,
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children = Some(Children::Text(text.into()));
        self
    }

    pub fn child(mut self, child: ComponentGenerationRequest) -> Self {
        match &mut self.children {
            Some(Children::Nodes(nodes)) => nodes.push(child),
            _ => self.children = Some(Children::Nodes(vec![child])),
        }
        self
    }

    /// Component names used anywhere in this tree, first occurrence first.
    ///
    /// Lowercase names are intrinsic elements and are not collected.
    pub fn component_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        self.collect_names(&mut names);
        names
    }

    /// Names the import line needs: components, then enums referenced by
    /// `{Enum.MEMBER}` prop values.
    pub fn import_names(&self) -> IndexSet<String> {
        let mut names = self.component_names();
        self.collect_enum_refs(&mut names);
        names
    }

    fn collect_enum_refs(&self, names: &mut IndexSet<String>) {
        for value in self.props.values() {
            if let Some(owner) = value.as_str().and_then(enum_reference) {
                names.insert(owner.to_string());
            }
        }
        if let Some(Children::Nodes(nodes)) = &self.children {
            for node in nodes {
                node.collect_enum_refs(names);
            }
        }
    }

    fn collect_names(&self, names: &mut IndexSet<String>) {
        if self
            .component_name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
        {
            names.insert(self.component_name.clone());
        }
        if let Some(Children::Nodes(nodes)) = &self.children {
            for node in nodes {
                node.collect_names(names);
            }
        }
    }
}

/// Options for [`generate_component_markup`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkupOptions {
    /// Prepend one combined import line.
    #[serde(default)]
    pub include_imports: bool,
    /// Package the import line names.
    #[serde(default = "default_package")]
    pub package_name: String,
}

fn default_package() -> String {
    blend_carton::config::DEFAULT_PACKAGE_NAME.to_string()
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            include_imports: false,
            package_name: default_package(),
        }
    }
}

/// Source of known prop types, keyed by prop name.
pub trait PropTypes {
    /// Type text of each prop of `component`, or `None` when unknown.
    fn prop_types(&self, component: &str) -> Option<FxHashMap<String, String>>;
}

/// No type information; every value is formatted from its JSON kind alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPropTypes;

impl PropTypes for NoPropTypes {
    fn prop_types(&self, _component: &str) -> Option<FxHashMap<String, String>> {
        None
    }
}

impl PropTypes for FxHashMap<String, ComponentProps> {
    fn prop_types(&self, component: &str) -> Option<FxHashMap<String, String>> {
        self.get(component).map(prop_type_map)
    }
}

/// Prop types read from a component library on disk.
///
/// Lookup failures are logged and treated as "no type information".
#[derive(Debug, Clone)]
pub struct LibraryPropTypes {
    library_root: PathBuf,
}

impl LibraryPropTypes {
    pub fn new(library_root: impl Into<PathBuf>) -> Self {
        Self {
            library_root: library_root.into(),
        }
    }
}

impl PropTypes for LibraryPropTypes {
    fn prop_types(&self, component: &str) -> Option<FxHashMap<String, String>> {
        match blend_croquis::analyze_component(component, &self.library_root) {
            Ok(analysis) => Some(prop_type_map(&analysis.props)),
            Err(e) => {
                tracing::debug!("no prop types for {}: {}", component, e);
                None
            }
        }
    }
}

fn prop_type_map(props: &ComponentProps) -> FxHashMap<String, String> {
    props
        .props
        .iter()
        .map(|p| (p.name.clone(), p.ty.clone()))
        .collect()
}

/// Render `request` as JSX.
pub fn generate_component_markup(
    request: &ComponentGenerationRequest,
    options: &MarkupOptions,
    types: &dyn PropTypes,
) -> String {
    let mut out = String::with_capacity(256);
    let names = request.import_names();
    // Intrinsic-only trees have nothing to import
    if options.include_imports && !names.is_empty() {
        out.push_str(&import_line(
            names.iter().map(String::as_str),
            &options.package_name,
        ));
        out.push_str("\n\n");
    }
    render_node(&mut out, request, 0, types);
    out
}

/// `import { A, B } from 'package';`
pub fn import_line<'a>(names: impl IntoIterator<Item = &'a str>, package_name: &str) -> String {
    let names: Vec<&str> = names.into_iter().collect();
    format!("import {{ {} }} from '{}';", names.join(", "), package_name)
}

fn render_node(
    out: &mut String,
    request: &ComponentGenerationRequest,
    depth: usize,
    types: &dyn PropTypes,
) {
    let pad = INDENT.repeat(depth);
    let known = types.prop_types(&request.component_name);

    out.push_str(&pad);
    out.push('<');
    out.push_str(&request.component_name);
    for (name, value) in &request.props {
        let ty = known.as_ref().and_then(|k| k.get(name)).map(String::as_str);
        out.push(' ');
        out.push_str(&format_attribute(name, value, ty));
    }

    match &request.children {
        None => out.push_str(" />"),
        Some(Children::Nodes(nodes)) if nodes.is_empty() => out.push_str(" />"),
        Some(Children::Text(text)) if text.trim().is_empty() => out.push_str(" />"),
        Some(Children::Text(text)) => {
            out.push_str(">\n");
            out.push_str(&indent(dedent(text).trim_matches('\n'), depth + 1));
            close_tag(out, &pad, &request.component_name);
        }
        Some(Children::Nodes(nodes)) => {
            out.push_str(">\n");
            for (i, node) in nodes.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_node(out, node, depth + 1, types);
            }
            close_tag(out, &pad, &request.component_name);
        }
    }
}

fn close_tag(out: &mut String, pad: &str, name: &str) {
    out.push('\n');
    out.push_str(pad);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Format one `name=value` attribute.
///
/// `ty` is the prop's declared type text, if known.
pub fn format_attribute(name: &str, value: &serde_json::Value, ty: Option<&str>) -> String {
    use serde_json::Value;

    match value {
        Value::Bool(true) if ty.map_or(true, is_boolean_type) => name.to_string(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('{') && trimmed.ends_with('}') && trimmed.len() >= 2 {
                format!("{name}={trimmed}")
            } else if ty.is_some_and(|t| !is_plain_string_type(t)) {
                format!("{name}={{{s}}}")
            } else if s.contains('"') || s.contains('\n') {
                format!("{name}={{{}}}", Value::String(s.clone()))
            } else {
                format!("{name}=\"{s}\"")
            }
        }
        other => format!("{name}={{{}}}", other),
    }
}

/// Union members of `ty` other than `undefined` and `null`.
fn value_members(ty: &str) -> impl Iterator<Item = &str> {
    ty.split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "undefined" && *part != "null")
}

/// `Owner` of a `{Owner.MEMBER}` expression whose owner is capitalised.
fn enum_reference(value: &str) -> Option<&str> {
    let inner = value.trim().strip_prefix('{')?.strip_suffix('}')?.trim();
    let (owner, member) = inner.split_once('.')?;
    let is_word =
        |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    (owner.starts_with(|c: char| c.is_ascii_uppercase()) && is_word(owner) && is_word(member))
        .then_some(owner)
}

fn is_boolean_type(ty: &str) -> bool {
    let mut members = value_members(ty).peekable();
    members.peek().is_some() && members.all(|m| matches!(m, "boolean" | "true" | "false"))
}

fn is_plain_string_type(ty: &str) -> bool {
    let mut members = value_members(ty).peekable();
    members.peek().is_some()
        && members.all(|m| {
            m == "string"
                || (m.len() >= 2
                    && ((m.starts_with('\'') && m.ends_with('\''))
                        || (m.starts_with('"') && m.ends_with('"'))))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn types(entries: &[(&str, &str)]) -> Option<FxHashMap<String, String>> {
        Some(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    struct Fixed(Option<FxHashMap<String, String>>);

    impl PropTypes for Fixed {
        fn prop_types(&self, _component: &str) -> Option<FxHashMap<String, String>> {
            self.0.clone()
        }
    }

    #[test]
    fn test_boolean_presence_attribute() {
        let request = ComponentGenerationRequest::new("Checkbox")
            .prop("checked", true)
            .prop("label", "Accept");
        let types = Fixed(types(&[("checked", "boolean | undefined"), ("label", "string")]));
        assert_eq!(
            generate_component_markup(&request, &MarkupOptions::default(), &types),
            r#"<Checkbox checked label="Accept" />"#
        );
    }

    #[test]
    fn test_format_attribute() {
        assert_eq!(format_attribute("open", &json!(true), None), "open");
        assert_eq!(
            format_attribute("open", &json!(true), Some("string")),
            "open={true}"
        );
        assert_eq!(format_attribute("open", &json!(false), None), "open={false}");
        assert_eq!(format_attribute("count", &json!(3), None), "count={3}");
        assert_eq!(
            format_attribute("size", &json!("md"), Some("'sm' | 'md' | undefined")),
            r#"size="md""#
        );
        assert_eq!(
            format_attribute("buttonType", &json!("ButtonType.PRIMARY"), Some("ButtonType")),
            "buttonType={ButtonType.PRIMARY}"
        );
        assert_eq!(
            format_attribute("onClick", &json!("{() => save()}"), None),
            "onClick={() => save()}"
        );
        assert_eq!(
            format_attribute("style", &json!({ "gap": "8px" }), None),
            r#"style={{"gap":"8px"}}"#
        );
        assert_eq!(
            format_attribute("title", &json!("Say \"hi\""), None),
            r#"title={"Say \"hi\""}"#
        );
    }

    #[test]
    fn test_nested_children_and_imports() {
        let request = ComponentGenerationRequest::new("Card")
            .prop("title", "Revenue")
            .child(ComponentGenerationRequest::new("Text").text("Total"))
            .child(
                ComponentGenerationRequest::new("div")
                    .child(ComponentGenerationRequest::new("Button").prop("text", "Open")),
            )
            .child(ComponentGenerationRequest::new("Text").text("Again"));

        let options = MarkupOptions {
            include_imports: true,
            package_name: "@juspay/blend-design-system".into(),
        };
        insta::assert_snapshot!(generate_component_markup(&request, &options, &NoPropTypes), @r#"
        import { Card, Text, Button } from '@juspay/blend-design-system';

        <Card title="Revenue">
          <Text>
            Total
          </Text>
          <div>
            <Button text="Open" />
          </div>
          <Text>
            Again
          </Text>
        </Card>
        "#);
    }

    #[test]
    fn test_enum_member_values_are_imported() {
        let request = ComponentGenerationRequest::new("Button")
            .prop("buttonType", "{ButtonType.PRIMARY}")
            .prop("size", "{ButtonSize.SMALL}")
            .prop("onClick", "{handler.call}")
            .prop("data", "{rows}");
        assert_eq!(
            request.import_names().into_iter().collect::<Vec<_>>(),
            vec!["Button", "ButtonType", "ButtonSize"]
        );
        assert_eq!(enum_reference("{Theme.colors.primary}"), None);
    }

    #[test]
    fn test_intrinsic_only_tree_has_no_import_line() {
        let request = ComponentGenerationRequest::new("div").child(ComponentGenerationRequest::new("span"));
        let options = MarkupOptions {
            include_imports: true,
            package_name: "@juspay/blend-design-system".into(),
        };
        assert_eq!(
            generate_component_markup(&request, &options, &NoPropTypes),
            "<div>\n  <span />\n</div>"
        );
    }

    #[test]
    fn test_text_children_are_reindented() {
        let request = ComponentGenerationRequest::new("Alert").text("\n    Line one\n      Line two\n");
        assert_eq!(
            generate_component_markup(&request, &MarkupOptions::default(), &NoPropTypes),
            "<Alert>\n  Line one\n    Line two\n</Alert>"
        );
    }

    #[test]
    fn test_request_deserializes_both_children_forms() {
        let request: ComponentGenerationRequest = serde_json::from_value(json!({
            "componentName": "Tabs",
            "props": { "defaultValue": "a" },
            "children": [{ "componentName": "TabsTrigger", "children": "A" }]
        }))
        .unwrap();
        match &request.children {
            Some(Children::Nodes(nodes)) => {
                assert_eq!(nodes[0].children, Some(Children::Text("A".into())))
            }
            other => panic!("unexpected children {other:?}"),
        }
    }
}
