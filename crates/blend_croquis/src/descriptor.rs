//! Reader for `*.context.ts` prop descriptor files.
//!
//! A descriptor file default-exports an array of rows describing a
//! component's props for documentation and LLM context. The export is read
//! by evaluating the literal expression from the syntax tree: nothing is
//! executed and nothing is written to disk.

use std::path::{Path, PathBuf};

use blend_carton::FxHashMap;
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    ArrayExpressionElement, BindingPattern, Declaration, Expression, ObjectPropertyKind,
    PropertyKey, Statement,
};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};
use oxc_syntax::operator::UnaryOperator;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CroquisError, Result};

/// File suffix of descriptor files.
pub const DESCRIPTOR_SUFFIX: &str = ".context.ts";

/// One row of a descriptor file. Unknown keys are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropRowDescriptor {
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prop_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prop_type: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub type_definition: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prop_default: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prop_description: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub llm_context: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Accept any scalar where text is expected; `propDefault: false` reads as `"false"`.
fn scalar_as_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Candidate descriptor paths for `component`, in search order.
pub fn descriptor_candidates(component: &str, metadata_root: &Path) -> Vec<PathBuf> {
    let file = format!("{component}{DESCRIPTOR_SUFFIX}");
    let lower = format!("{}{DESCRIPTOR_SUFFIX}", component.to_lowercase());
    vec![
        metadata_root.join(&file),
        metadata_root.join(&lower),
        metadata_root.join(component).join(&file),
    ]
}

/// Locate and read the descriptor rows of `component`.
pub fn read_component_metadata(
    component: &str,
    metadata_root: &Path,
) -> Result<Vec<PropRowDescriptor>> {
    let attempted = descriptor_candidates(component, metadata_root);
    let Some(path) = attempted.iter().find(|p| p.is_file()) else {
        return Err(CroquisError::NotFound {
            component: component.to_string(),
            attempted,
        });
    };
    read_descriptor_file(path)
}

/// Component names with a descriptor file directly under `metadata_root`.
pub fn list_descriptors(metadata_root: &Path) -> Result<Vec<String>> {
    if !metadata_root.is_dir() {
        return Err(CroquisError::RootNotFound(metadata_root.to_path_buf()));
    }
    let mut names: Vec<String> = std::fs::read_dir(metadata_root)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.strip_suffix(DESCRIPTOR_SUFFIX).map(str::to_string)
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Read rows from one descriptor file.
pub fn read_descriptor_file(path: &Path) -> Result<Vec<PropRowDescriptor>> {
    let source = std::fs::read_to_string(path)?;
    parse_descriptor(&source, path)
}

/// Evaluate the default export of `source` into descriptor rows.
pub fn parse_descriptor(source: &str, path: &Path) -> Result<Vec<PropRowDescriptor>> {
    let value = evaluate_default_export(source, path)?;
    let serde_json::Value::Array(rows) = value else {
        return Err(parse_error(path, "default export is not an array"));
    };
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row)
                .map_err(|e| parse_error(path, format!("row {i}: {e}")))
        })
        .collect()
}

/// Evaluate the literal default export of `source` as JSON.
pub fn evaluate_default_export(source: &str, path: &Path) -> Result<serde_json::Value> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::ts()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let message = ret
            .errors
            .first()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unrecoverable syntax error".to_string());
        return Err(parse_error(path, message));
    }

    let mut evaluator = LiteralEvaluator {
        source,
        bindings: FxHashMap::default(),
    };
    let mut default_export = None;

    for stmt in ret.program.body.iter() {
        match stmt {
            Statement::VariableDeclaration(var_decl) => evaluator.bind(var_decl),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(Declaration::VariableDeclaration(var_decl)) = &export.declaration {
                    evaluator.bind(var_decl);
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                default_export = export.declaration.as_expression();
            }
            _ => {}
        }
    }

    let Some(expr) = default_export else {
        return Err(parse_error(path, "no default export"));
    };
    evaluator
        .evaluate(expr, 0)
        .map_err(|message| parse_error(path, message))
}

fn parse_error(path: &Path, message: impl Into<String>) -> CroquisError {
    CroquisError::Parse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Nesting limit for identifier indirection.
const MAX_DEPTH: usize = 32;

struct LiteralEvaluator<'s, 'e, 'a> {
    source: &'s str,
    bindings: FxHashMap<&'e str, &'e Expression<'a>>,
}

impl<'s, 'e, 'a> LiteralEvaluator<'s, 'e, 'a> {
    fn bind(&mut self, var_decl: &'e oxc_ast::ast::VariableDeclaration<'a>) {
        for declarator in var_decl.declarations.iter() {
            if let (BindingPattern::BindingIdentifier(id), Some(init)) =
                (&declarator.id, &declarator.init)
            {
                self.bindings.insert(id.name.as_str(), init);
            }
        }
    }

    fn evaluate(
        &self,
        expr: &Expression<'a>,
        depth: usize,
    ) -> std::result::Result<serde_json::Value, String> {
        use serde_json::Value;

        if depth > MAX_DEPTH {
            return Err("literal nesting too deep".to_string());
        }

        let value = match expr {
            Expression::StringLiteral(s) => Value::String(s.value.to_string()),
            Expression::NumericLiteral(n) => number(n.value),
            Expression::BooleanLiteral(b) => Value::Bool(b.value),
            Expression::NullLiteral(_) => Value::Null,
            Expression::TemplateLiteral(tpl) => {
                if !tpl.expressions.is_empty() {
                    return Err(self.unsupported(expr, "template with substitutions"));
                }
                let text = tpl
                    .quasis
                    .iter()
                    .map(|q| {
                        q.value
                            .cooked
                            .as_ref()
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| q.value.raw.to_string())
                    })
                    .collect::<String>();
                Value::String(text)
            }
            Expression::UnaryExpression(unary) if unary.operator == UnaryOperator::UnaryNegation => {
                match self.evaluate(&unary.argument, depth + 1)? {
                    Value::Number(n) => n
                        .as_f64()
                        .map(|v| number(-v))
                        .ok_or_else(|| self.unsupported(expr, "numeric negation"))?,
                    _ => return Err(self.unsupported(expr, "negation of non-number")),
                }
            }
            Expression::ArrayExpression(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in array.elements.iter() {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            match self.evaluate(&spread.argument, depth + 1)? {
                                Value::Array(spread_items) => items.extend(spread_items),
                                _ => return Err(self.unsupported(expr, "spread of non-array")),
                            }
                        }
                        ArrayExpressionElement::Elision(_) => items.push(Value::Null),
                        other => {
                            let Some(item) = other.as_expression() else {
                                return Err(self.unsupported(expr, "array element"));
                            };
                            items.push(self.evaluate(item, depth + 1)?);
                        }
                    }
                }
                Value::Array(items)
            }
            Expression::ObjectExpression(object) => {
                let mut map = serde_json::Map::new();
                for property in object.properties.iter() {
                    match property {
                        ObjectPropertyKind::ObjectProperty(prop) => {
                            let key = match &prop.key {
                                PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                                PropertyKey::StringLiteral(s) => s.value.to_string(),
                                PropertyKey::NumericLiteral(n) => n.value.to_string(),
                                _ => return Err(self.unsupported(expr, "computed key")),
                            };
                            map.insert(key, self.evaluate(&prop.value, depth + 1)?);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            match self.evaluate(&spread.argument, depth + 1)? {
                                Value::Object(spread_map) => map.extend(spread_map),
                                _ => return Err(self.unsupported(expr, "spread of non-object")),
                            }
                        }
                    }
                }
                Value::Object(map)
            }
            Expression::Identifier(id) => match id.name.as_str() {
                "undefined" => Value::Null,
                name => match self.bindings.get(name) {
                    Some(bound) => self.evaluate(bound, depth + 1)?,
                    None => return Err(format!("unresolved identifier `{name}`")),
                },
            },
            Expression::TSAsExpression(assertion) => self.evaluate(&assertion.expression, depth)?,
            Expression::TSSatisfiesExpression(satisfies) => {
                self.evaluate(&satisfies.expression, depth)?
            }
            Expression::TSNonNullExpression(non_null) => {
                self.evaluate(&non_null.expression, depth)?
            }
            Expression::ParenthesizedExpression(paren) => {
                self.evaluate(&paren.expression, depth)?
            }
            other => return Err(self.unsupported(other, "expression")),
        };
        Ok(value)
    }

    fn unsupported(&self, expr: &Expression<'a>, what: &str) -> String {
        let span = expr.span();
        let text = self
            .source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("");
        let snippet: String = text.chars().take(40).collect();
        format!("unsupported {what} in literal: `{snippet}`")
    }
}

fn number(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(source: &str) -> Result<serde_json::Value> {
        evaluate_default_export(source, Path::new("Button.context.ts"))
    }

    #[test]
    fn test_direct_array() {
        let value = eval(
            r#"export default [
  { propName: "size", propType: 'ButtonSize', propDefault: `md`, order: -1, hidden: false },
];"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!([{ "propName": "size", "propType": "ButtonSize", "propDefault": "md", "order": -1, "hidden": false }])
        );
    }

    #[test]
    fn test_const_binding_with_wrappers() {
        let value = eval(
            r#"
import type { PropRow } from '../types';

const shared = { llmContext: 'Use sparingly' } as const;

const rows: PropRow[] = [
  { propName: 'variant', ...shared },
  { propName: 'size', propDefault: undefined },
] satisfies PropRow[];

export default rows;
"#,
        )
        .unwrap();
        assert_eq!(
            value,
            json!([
                { "propName": "variant", "llmContext": "Use sparingly" },
                { "propName": "size", "propDefault": null }
            ])
        );
    }

    #[test]
    fn test_non_literal_is_rejected() {
        let err = eval("export default [{ propName: computeName() }];").unwrap_err();
        match err {
            CroquisError::Parse { message, .. } => {
                assert!(message.contains("computeName()"), "{message}")
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(eval("export const rows = [];").is_err());
        assert!(eval("export default `${x}`;").is_err());
    }

    #[test]
    fn test_rows_keep_extra_keys() {
        let rows = parse_descriptor(
            "export default [{ propName: 'size', propType: 'string', propDefault: false, category: 'Appearance' }];",
            Path::new("Button.context.ts"),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].prop_name.as_deref(), Some("size"));
        assert_eq!(rows[0].prop_default.as_deref(), Some("false"));
        assert_eq!(rows[0].extra.get("category"), Some(&json!("Appearance")));
        assert_eq!(
            serde_json::to_value(&rows[0]).unwrap(),
            json!({ "propName": "size", "propType": "string", "propDefault": "false", "category": "Appearance" })
        );
    }

    #[test]
    fn test_default_export_must_be_array() {
        let err = parse_descriptor("export default { a: 1 };", Path::new("x.context.ts"))
            .unwrap_err();
        assert!(err.to_string().contains("not an array"));
    }

    #[test]
    fn test_read_component_metadata() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("Button.context.ts"),
            "export default [{ propName: 'text' }];",
        )
        .unwrap();

        let rows = read_component_metadata("Button", root.path()).unwrap();
        assert_eq!(rows[0].prop_name.as_deref(), Some("text"));
        assert_eq!(list_descriptors(root.path()).unwrap(), vec!["Button"]);

        let err = read_component_metadata("Tabs", root.path()).unwrap_err();
        assert_eq!(err.attempted_paths().len(), 3);
    }
}
