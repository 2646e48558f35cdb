//! Foundation tokens and per-component token definitions.
//!
//! Foundation tokens are a JSON tree (`colors.primary.500`, `spacing.4`, ...)
//! that users may partially override. Component tokens map style properties
//! to responsive values; string values may reference foundation tokens with
//! `{dotted.path}` placeholders.

use blend_carton::IndexMap;
use serde::{Deserialize, Serialize};

use crate::rules::{resolve_multiple, CssValue, StyleRuleSet};
use crate::ResponsiveValue;

/// A tree of design tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FoundationTokens(serde_json::Value);

impl FoundationTokens {
    pub fn new(tree: serde_json::Value) -> Self {
        Self(tree)
    }

    #[inline]
    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Apply user overrides: objects merge recursively, anything else replaces.
    pub fn merge_overrides(&mut self, overrides: &serde_json::Value) {
        deep_merge(&mut self.0, overrides);
    }

    /// Return a copy with `overrides` applied.
    pub fn with_overrides(&self, overrides: &serde_json::Value) -> Self {
        let mut merged = self.clone();
        merged.merge_overrides(overrides);
        merged
    }

    /// Look up a token by dotted path, e.g. `colors.primary.500`.
    pub fn lookup(&self, path: &str) -> Option<&serde_json::Value> {
        path.split('.')
            .try_fold(&self.0, |node, segment| match node {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            })
    }

    /// Replace `{path}` references inside `value`.
    ///
    /// A string that is exactly one reference takes the token's JSON value;
    /// references embedded in longer strings are interpolated as CSS text.
    /// Unknown references are left untouched.
    pub fn substitute(&self, value: &serde_json::Value) -> serde_json::Value {
        match value {
            serde_json::Value::String(s) => self.substitute_str(s),
            serde_json::Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(|v| self.substitute(v)).collect())
            }
            serde_json::Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), self.substitute(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn substitute_str(&self, s: &str) -> serde_json::Value {
        if let Some(path) = whole_reference(s) {
            if let Some(token) = self.lookup(path) {
                return token.clone();
            }
        }

        let mut out = String::with_capacity(s.len());
        let mut rest = s;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            let path = &rest[open + 1..close];
            out.push_str(&rest[..open]);
            match self.lookup(path).filter(|_| is_token_path(path)) {
                Some(token) => out.push_str(&token.to_css_value()),
                None => out.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }
        out.push_str(rest);
        serde_json::Value::String(out)
    }
}

fn whole_reference(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?.strip_suffix('}')?;
    is_token_path(inner).then_some(inner)
}

fn is_token_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// Merge `overrides` into `base` in place.
pub fn deep_merge(base: &mut serde_json::Value, overrides: &serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(over_map)) => {
            for (key, value) in over_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overrides) => *base = overrides.clone(),
    }
}

/// Style properties of one component, each possibly responsive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTokens(IndexMap<String, Option<ResponsiveValue<serde_json::Value>>>);

impl ComponentTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an untyped property map; `null` marks an unset property.
    pub fn from_json(properties: &serde_json::Map<String, serde_json::Value>) -> Self {
        Self(
            properties
                .iter()
                .map(|(k, v)| {
                    let value = (!v.is_null()).then(|| ResponsiveValue::from_json(v.clone()));
                    (k.clone(), value)
                })
                .collect(),
        )
    }

    pub fn set(
        &mut self,
        property: impl Into<String>,
        value: impl Into<ResponsiveValue<serde_json::Value>>,
    ) {
        self.0.insert(property.into(), Some(value.into()));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve into a rule set, substituting foundation references first.
    pub fn resolve(&self, foundation: Option<&FoundationTokens>) -> StyleRuleSet<serde_json::Value> {
        let substituted: Vec<(&str, Option<ResponsiveValue<serde_json::Value>>)> = self
            .0
            .iter()
            .map(|(property, value)| {
                let value = value.as_ref().map(|v| match foundation {
                    Some(tokens) => substitute_responsive(tokens, v),
                    None => v.clone(),
                });
                (property.as_str(), value)
            })
            .collect();

        resolve_multiple(
            substituted
                .iter()
                .map(|(property, value)| (*property, value.as_ref())),
        )
    }
}

fn substitute_responsive(
    tokens: &FoundationTokens,
    value: &ResponsiveValue<serde_json::Value>,
) -> ResponsiveValue<serde_json::Value> {
    match value {
        ResponsiveValue::Bare(v) => ResponsiveValue::Bare(tokens.substitute(v)),
        ResponsiveValue::Responsive(map) => {
            ResponsiveValue::responsive(map.iter().map(|(bp, v)| (bp, tokens.substitute(v))))
        }
    }
}
