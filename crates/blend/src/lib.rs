//! # Blend
//!
//! Tooling for the Blend design system, written in Rust.
//!
//! This crate re-exports all Blend sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`carton`] - Shared maps, text helpers and configuration
//! - [`cascade`] - Responsive style resolution and foundation tokens
//! - [`croquis`] - Component metadata extraction
//! - [`musea`] - Documentation, markup and scaffold generation
//! - [`maestro`] - MCP tool server

/// Shared maps, text helpers and configuration.
pub use blend_carton as carton;

/// Responsive style resolution and foundation tokens.
pub use blend_cascade as cascade;

/// Component metadata extraction.
pub use blend_croquis as croquis;

/// Documentation, markup and scaffold generation.
pub use blend_musea as musea;

/// MCP tool server.
pub use blend_maestro as maestro;
