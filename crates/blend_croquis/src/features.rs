//! `@feature` and `@example` tags of a component.

use std::path::Path;

use blend_carton::text::strip_code_fence;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::{SourceIndex, ValueKind};
use crate::jsdoc::JsDoc;

/// One usage example taken from an `@example` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageExample {
    pub title: String,
    pub code: String,
}

/// Feature bullets and usage examples of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturesAndExamples {
    pub features: Vec<String>,
    pub examples: Vec<UsageExample>,
}

impl FeaturesAndExamples {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.examples.is_empty()
    }
}

/// Read `path` and collect the tags documenting `component`.
pub fn extract_features_and_examples(component: &str, path: &Path) -> Result<FeaturesAndExamples> {
    let index = SourceIndex::from_file(path)?;
    Ok(features_from_index(component, &index))
}

/// Collect tags from the first documentable node that carries any.
///
/// Nodes are tried in order: the props declaration, then a function, a
/// class and a variable named after the component.
pub fn features_from_index(component: &str, index: &SourceIndex) -> FeaturesAndExamples {
    let props_name = format!("{component}Props");
    let props_doc = index
        .type_declaration(&props_name)
        .and_then(|decl| decl.doc.as_ref());

    let value_doc = |kind: ValueKind| {
        index
            .value_declaration(component)
            .filter(|value| value.kind == kind)
            .and_then(|value| value.doc.as_ref())
    };

    let candidates = [
        props_doc,
        value_doc(ValueKind::Function),
        value_doc(ValueKind::Class),
        value_doc(ValueKind::Variable),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|doc| doc.has_tag("feature") || doc.has_tag("example"))
        .map(collect)
        .unwrap_or_default()
}

fn collect(doc: &JsDoc) -> FeaturesAndExamples {
    FeaturesAndExamples {
        features: doc
            .tags_named("feature")
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
        examples: doc.tags_named("example").filter_map(parse_example).collect(),
    }
}

/// First line is the title, the rest is code.
fn parse_example(body: &str) -> Option<UsageExample> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let (title, code) = match body.split_once('\n') {
        Some((title, rest)) => (title.trim(), rest),
        None => ("Example", body),
    };
    // A fence on the first line means there is no title
    let (title, code) = if title.starts_with("```") {
        ("Example", body)
    } else {
        (title, code)
    };
    Some(UsageExample {
        title: title.to_string(),
        code: strip_code_fence(code).trim().to_string(),
    })
}
