//! Markdown documentation for Blend components.
//!
//! # Example
//!
//! ```rust
//! use blend_musea::docs::{render_documentation, ComponentDocumentation};
//!
//! let doc = ComponentDocumentation::new("Button");
//! let markdown = render_documentation(&doc);
//! assert!(markdown.starts_with("# Button Component Documentation"));
//! assert!(markdown.contains("No description available."));
//! ```

mod markdown;

pub use markdown::render_documentation;

use std::path::Path;

use blend_croquis::{analyze_component, PropDetail, UsageExample};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Heading used when a component has no props at all.
pub const EMPTY_PROPS_HEADING: &str = "Available Props";

/// Props sharing one `@propCategory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropSection {
    pub category: String,
    pub props: Vec<PropDetail>,
}

/// Everything rendered into a component's documentation page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDocumentation {
    pub component_name: String,
    pub description: String,
    pub features: Vec<String>,
    pub prop_sections: Vec<PropSection>,
    pub examples: Vec<UsageExample>,
}

impl ComponentDocumentation {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
            ..Default::default()
        }
    }

    pub fn prop_count(&self) -> usize {
        self.prop_sections.iter().map(|s| s.props.len()).sum()
    }
}

/// Output of documentation generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocOutput {
    /// Generated Markdown content.
    pub markdown: String,

    /// Suggested filename for the documentation.
    pub filename: String,

    /// Number of props documented.
    pub prop_count: usize,
}

/// Group props by category, keeping first-seen category order.
pub fn group_by_category(props: &[PropDetail]) -> Vec<PropSection> {
    let mut sections: Vec<PropSection> = Vec::new();
    for prop in props {
        match sections.iter_mut().find(|s| s.category == prop.category) {
            Some(section) => section.props.push(prop.clone()),
            None => sections.push(PropSection {
                category: prop.category.clone(),
                props: vec![prop.clone()],
            }),
        }
    }
    sections
}

/// Example used when a component documents none of its own.
pub fn basic_usage_example(component_name: &str) -> UsageExample {
    UsageExample {
        title: "Basic Usage".to_string(),
        code: format!("<{component_name} />"),
    }
}

/// Gather documentation inputs for `component` from the library on disk.
pub fn collect_documentation(
    component: &str,
    library_root: &Path,
) -> Result<ComponentDocumentation> {
    let analysis = analyze_component(component, library_root)?;
    let mut examples = analysis.features.examples;
    if examples.is_empty() {
        examples.push(basic_usage_example(component));
    }

    Ok(ComponentDocumentation {
        component_name: component.to_string(),
        description: analysis.props.component_description,
        features: analysis.features.features,
        prop_sections: group_by_category(&analysis.props.props),
        examples,
    })
}

/// Generate the Markdown page for `component`.
pub fn generate_component_documentation(
    component: &str,
    library_root: &Path,
) -> Result<DocOutput> {
    let doc = collect_documentation(component, library_root)?;
    Ok(DocOutput {
        markdown: render_documentation(&doc),
        filename: format!("{component}.md"),
        prop_count: doc.prop_count(),
    })
}
