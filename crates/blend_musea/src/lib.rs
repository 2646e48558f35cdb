//! # blend_musea
//!
//! Musea - Documentation and example generation for Blend components.
//!
//! ## Name Origin
//!
//! **Musea** is the plural of *museum*: places where works are catalogued
//! and explained. This crate turns what `blend_croquis` extracted into
//! Markdown reference pages, ready-to-paste JSX invocations and composed
//! dashboard sections.
//!
//! ## Modules
//!
//! - [`docs`]: `render_documentation` and the page model
//! - [`markup`]: `generate_component_markup` for nested component requests
//! - [`scaffold`]: fixed dashboard compositions

pub mod docs;
pub mod error;
pub mod markup;
pub mod scaffold;

pub use docs::{
    collect_documentation, generate_component_documentation, group_by_category,
    render_documentation, ComponentDocumentation, DocOutput, PropSection,
};
pub use error::{MuseaError, Result};
pub use markup::{
    generate_component_markup, Children, ComponentGenerationRequest, LibraryPropTypes,
    MarkupOptions, NoPropTypes, PropTypes,
};
pub use scaffold::{scaffold_dashboard_section, section_request, SectionType};
