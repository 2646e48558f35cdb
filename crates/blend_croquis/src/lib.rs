//! # blend_croquis
//!
//! Croquis - Component metadata extraction for Blend.
//!
//! ## Name Origin
//!
//! A **croquis** is a quick sketch capturing the essence of a pose in a few
//! lines. This crate sketches a component from its TypeScript sources: the
//! props it accepts, their types and defaults, and the features and examples
//! its authors documented, without running a type checker.
//!
//! ## Pipeline
//!
//! 1. [`locate_component_source`] finds the file declaring a component.
//! 2. [`SourceIndex`] parses it with oxc and keeps owned declarations.
//! 3. [`TypeIntrospector`] resolves apparent members and literal unions.
//! 4. [`extract_props`] and [`extract_features_and_examples`] produce the
//!    data consumed by the documentation and markup renderers.
//!
//! `*.context.ts` descriptor files are read separately by [`descriptor`].

pub mod descriptor;
pub mod error;
pub mod features;
pub mod index;
pub mod introspect;
pub mod jsdoc;
pub mod locate;
pub mod props;

use std::path::{Path, PathBuf};

pub use descriptor::{
    list_descriptors, read_component_metadata, read_descriptor_file, PropRowDescriptor,
};
pub use error::{CroquisError, Result};
pub use features::{
    extract_features_and_examples, features_from_index, FeaturesAndExamples, UsageExample,
};
pub use index::{
    Member, MemberType, SourceIndex, TypeDeclaration, UnionPart, ValueDeclaration,
};
pub use introspect::TypeIntrospector;
pub use jsdoc::JsDoc;
pub use locate::{candidate_paths, list_components, locate_component_source};
pub use props::{
    extract_props, extract_props_from_index, ComponentProps, PropDetail, DEFAULT_CATEGORY,
};

/// Everything extracted for one component from a single parse.
#[derive(Debug, Clone)]
pub struct ComponentAnalysis {
    pub name: String,
    pub source_path: PathBuf,
    pub props: ComponentProps,
    pub features: FeaturesAndExamples,
}

/// Locate `component` under `library_root`, parse it once, and extract both
/// its props and its documented features.
pub fn analyze_component(component: &str, library_root: &Path) -> Result<ComponentAnalysis> {
    let source_path = locate_component_source(component, library_root)?;
    let index = SourceIndex::from_file(&source_path)?;
    let mut props = extract_props_from_index(component, &index)?;
    let mut features = features_from_index(component, &index);

    // A separate types file leaves defaults and tags on the component itself
    if let Some(path) = implementation_path(component, &source_path) {
        match SourceIndex::from_file(&path) {
            Ok(implementation) => {
                if let Some(value) = implementation.value_declaration(component) {
                    props.apply_param_defaults(value);
                }
                if features.is_empty() {
                    features = features_from_index(component, &implementation);
                }
            }
            Err(e) => tracing::debug!("skipping {}: {}", path.display(), e),
        }
    }

    Ok(ComponentAnalysis {
        name: component.to_string(),
        source_path,
        props,
        features,
    })
}

/// `{dir}/{Name}.tsx` when it differs from the already parsed file.
fn implementation_path(component: &str, source_path: &Path) -> Option<PathBuf> {
    let candidate = source_path.parent()?.join(format!("{component}.tsx"));
    (candidate != source_path && candidate.is_file()).then_some(candidate)
}
