//! Style rule sets and responsive property resolution.
//!
//! Rules are always emitted smallest breakpoint first: the unconditional
//! group, then `min-width` groups in ascending order. Under normal cascade
//! ordering a larger breakpoint without its own override keeps matching the
//! last smaller rule.

use std::collections::BTreeMap;

use blend_carton::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::{Breakpoint, ResponsiveValue};

/// Selector of one rule group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleSelector {
    /// Applies unconditionally.
    Base,
    /// Applies from this breakpoint's minimum width upward.
    MinWidth(Breakpoint),
}

impl RuleSelector {
    /// Media condition for this group, `None` for the base group.
    pub fn media_query(self) -> Option<String> {
        match self {
            RuleSelector::Base => None,
            RuleSelector::MinWidth(bp) => bp.media_query(),
        }
    }
}

/// Ordered style declarations grouped by media condition.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRuleSet<V> {
    base: IndexMap<String, V>,
    media: BTreeMap<Breakpoint, IndexMap<String, V>>,
}

impl<V> Default for StyleRuleSet<V> {
    fn default() -> Self {
        Self {
            base: IndexMap::new(),
            media: BTreeMap::new(),
        }
    }
}

impl<V> StyleRuleSet<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. `Mobile` lands in the unconditional group.
    pub fn insert(&mut self, breakpoint: Breakpoint, property: impl Into<String>, value: V) {
        let property = property.into();
        match breakpoint {
            Breakpoint::Mobile => {
                self.base.insert(property, value);
            }
            bp => {
                self.media.entry(bp).or_default().insert(property, value);
            }
        }
    }

    /// Unconditional declarations.
    #[inline]
    pub fn base(&self) -> &IndexMap<String, V> {
        &self.base
    }

    /// Declarations gated at `breakpoint`, if any.
    pub fn media(&self, breakpoint: Breakpoint) -> Option<&IndexMap<String, V>> {
        match breakpoint {
            Breakpoint::Mobile => (!self.base.is_empty()).then_some(&self.base),
            bp => self.media.get(&bp).filter(|group| !group.is_empty()),
        }
    }

    /// Non-empty groups in emission order.
    pub fn groups(&self) -> impl Iterator<Item = (RuleSelector, &IndexMap<String, V>)> {
        let base = (!self.base.is_empty()).then_some((RuleSelector::Base, &self.base));
        base.into_iter().chain(
            self.media
                .iter()
                .filter(|(_, group)| !group.is_empty())
                .map(|(bp, group)| (RuleSelector::MinWidth(*bp), group)),
        )
    }

    /// Number of non-empty groups.
    pub fn group_count(&self) -> usize {
        self.groups().count()
    }

    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }

    /// Merge `other` into `self`.
    ///
    /// Groups under the same condition are merged by key union; a later value
    /// for the same property replaces the earlier one in place.
    pub fn merge(&mut self, other: StyleRuleSet<V>) {
        self.base.extend(other.base);
        for (bp, group) in other.media {
            self.media.entry(bp).or_default().extend(group);
        }
    }
}

/// Resolve one property into a rule set.
///
/// Bare values yield a single unconditional declaration. Mappings yield one
/// declaration per declared breakpoint; absent breakpoints are omitted.
pub fn resolve_property<V: Clone>(property: &str, value: &ResponsiveValue<V>) -> StyleRuleSet<V> {
    let mut rules = StyleRuleSet::new();
    match value {
        ResponsiveValue::Bare(v) => rules.insert(Breakpoint::Mobile, property, v.clone()),
        ResponsiveValue::Responsive(map) => {
            for (bp, v) in map.iter() {
                rules.insert(bp, property, v.clone());
            }
        }
    }
    rules
}

/// Resolve several properties and merge them, skipping unset (`None`) ones.
///
/// Property order is preserved inside each group; groups are emitted in
/// breakpoint order regardless of which property introduced them.
pub fn resolve_multiple<'a, V, I>(properties: I) -> StyleRuleSet<V>
where
    V: Clone + 'a,
    I: IntoIterator<Item = (&'a str, Option<&'a ResponsiveValue<V>>)>,
{
    let mut rules = StyleRuleSet::new();
    for (property, value) in properties {
        if let Some(value) = value {
            rules.merge(resolve_property(property, value));
        }
    }
    rules
}

/// Resolve an untyped property map. `null` values count as unset.
pub fn resolve_json(
    properties: &serde_json::Map<String, serde_json::Value>,
) -> StyleRuleSet<serde_json::Value> {
    let mut rules = StyleRuleSet::new();
    for (property, value) in properties {
        if value.is_null() {
            continue;
        }
        let value = ResponsiveValue::from_json(value.clone());
        rules.merge(resolve_property(property, &value));
    }
    rules
}

/// Serializes as a CSS-in-JS object: base declarations first, then one nested
/// object per media query.
impl<V: Serialize> Serialize for StyleRuleSet<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(None)?;
        for (property, value) in &self.base {
            out.serialize_entry(property, value)?;
        }
        for (bp, group) in &self.media {
            if group.is_empty() {
                continue;
            }
            if let Some(query) = bp.media_query() {
                out.serialize_entry(&query, group)?;
            }
        }
        out.end()
    }
}

/// A value that can be written as a CSS declaration value.
pub trait CssValue {
    fn to_css_value(&self) -> String;
}

impl CssValue for String {
    fn to_css_value(&self) -> String {
        self.clone()
    }
}

impl CssValue for &str {
    fn to_css_value(&self) -> String {
        (*self).to_string()
    }
}

impl CssValue for i64 {
    fn to_css_value(&self) -> String {
        self.to_string()
    }
}

impl CssValue for f64 {
    fn to_css_value(&self) -> String {
        self.to_string()
    }
}

impl CssValue for serde_json::Value {
    fn to_css_value(&self) -> String {
        match self {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            serde_json::Value::Array(items) => items
                .iter()
                .map(CssValue::to_css_value)
                .collect::<Vec<_>>()
                .join(" "),
            other => other.to_string(),
        }
    }
}

/// Convert a camelCase property name to its kebab-case CSS form.
pub fn to_css_property(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl<V: CssValue> StyleRuleSet<V> {
    /// Render as CSS text scoped to `selector`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = String::with_capacity(256);
        for (rule, group) in self.groups() {
            match rule.media_query() {
                None => write_block(&mut css, selector, group, 0),
                Some(query) => {
                    css.push_str(&query);
                    css.push_str(" {\n");
                    write_block(&mut css, selector, group, 1);
                    css.push_str("}\n");
                }
            }
        }
        css
    }
}

fn write_block<V: CssValue>(
    css: &mut String,
    selector: &str,
    group: &IndexMap<String, V>,
    depth: usize,
) {
    let pad = blend_carton::text::INDENT.repeat(depth);
    css.push_str(&pad);
    css.push_str(selector);
    css.push_str(" {\n");
    for (property, value) in group {
        css.push_str(&pad);
        css.push_str(blend_carton::text::INDENT);
        css.push_str(&to_css_property(property));
        css.push_str(": ");
        css.push_str(&value.to_css_value());
        css.push_str(";\n");
    }
    css.push_str(&pad);
    css.push_str("}\n");
}
